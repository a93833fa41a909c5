//! Office Open XML package helpers shared by the workbook reader and the drawing resolver
use crate::error::SheetPhotosError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

/// XML tag name for relationship elements in `.rels` parts
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Loads a relationship part as a mapping of relationship id to raw target
///
/// # Arguments
/// * `zip` - Zip archive handle
/// * `path` - Path to the relationships XML part within the archive
///
/// # Returns
/// `None` when the part does not exist, otherwise the id to target mapping
pub(crate) fn load_relationships<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
) -> Result<Option<HashMap<String, String>>, SheetPhotosError> {
    let Some(mut reader) = zip.xml_reader(path)? else {
        return Ok(None);
    };
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let target = event.get_attribute_value("Target")?;
            if let Some((id, target)) = id.zip(target) {
                relationships.insert(id.to_string(), target.to_string());
            }
        }
    });
    Ok(Some(relationships))
}

/// Returns the companion relationship part of a package part,
/// e.g. `xl/drawings/drawing1.xml` → `xl/drawings/_rels/drawing1.xml.rels`
pub(crate) fn relationships_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file_name)) => format!("{dir}/_rels/{file_name}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Normalizes a workbook-relative target to a path within the package
///
/// # Arguments
/// * `path` - Target as written in `xl/_rels/workbook.xml.rels`
///
/// # Returns
/// Normalized path suitable for accessing files within the zip archive
pub(crate) fn to_zip_path(path: &str) -> String {
    if let Some(path) = path.strip_prefix('/') {
        path.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}
