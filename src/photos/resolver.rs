use crate::spreadsheet::excel::load_relationships;
use crate::spreadsheet::excel::relationships_path;
use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

/// Root content folder that relationship targets are resolved against.
pub(crate) const CONTENT_ROOT: &str = "xl/";

/// Relationship ids of one drawing part mapped to media paths.
///
/// A part whose companion `.rels` is missing or unreadable resolves nothing.
pub(crate) struct PartRelationships {
    targets: Option<HashMap<String, String>>,
}

impl PartRelationships {
    /// Loads `xl/drawings/_rels/<part>.rels` for the given drawing part.
    pub(crate) fn load<RS: Read + Seek>(zip: &mut ZipArchive<RS>, part: &str) -> Self {
        let path = relationships_path(part);
        let targets = match load_relationships(zip, &path) {
            Ok(Some(targets)) => Some(targets),
            Ok(None) => {
                log::warn!("Relationship part '{path}' not found, images of '{part}' are skipped");
                None
            }
            Err(error) => {
                log::warn!("Relationship part '{path}' is unreadable ({error}), images of '{part}' are skipped");
                None
            }
        };
        Self { targets }
    }

    /// Media path of relationship `id`, `None` when it is not declared.
    pub(crate) fn resolve(&self, id: &str) -> Option<String> {
        let target = self.targets.as_ref()?.get(id)?;
        Some(resolve_media_path(target))
    }
}

/// Turns a relationship target into a package path.
///
/// Parent and current directory segments are dropped and the rest is placed
/// under the content root, so `../media/image1.png` becomes
/// `xl/media/image1.png`. A leading `/` marks a package-absolute target.
pub(crate) fn resolve_media_path(target: &str) -> String {
    let target = target.split('#').next().unwrap_or(target).trim();
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_owned();
    }
    let segments: Vec<&str> = target
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .collect();
    format!("{CONTENT_ROOT}{}", segments.join("/"))
}
