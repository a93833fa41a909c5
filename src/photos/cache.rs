//! Row-keyed cache of embedded images, filled from the package's drawing parts.
use crate::helpers::zip::ZipHelper;
use crate::photos::config::{ExtractionConfig, MimePolicy, DEFAULT_MIME_TYPE};
use crate::photos::diagnostics::Diagnostics;
use crate::photos::drawing::{drawing_part_paths, DrawingPart};
use crate::photos::geometry::RowGeometry;
use crate::photos::matcher::{match_anchor, AnchorMatch};
use crate::photos::resolver::PartRelationships;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

/// Base64 payload of one media entry with the MIME type it is served as.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CachedImage {
    pub(crate) mime_type: &'static str,
    pub(crate) payload: String,
}

impl CachedImage {
    pub(crate) fn encode(bytes: &[u8], policy: MimePolicy) -> Self {
        let mime_type = match policy {
            MimePolicy::Fixed => DEFAULT_MIME_TYPE,
            MimePolicy::Sniff => image::guess_format(bytes)
                .map(|format| format.to_mime_type())
                .unwrap_or(DEFAULT_MIME_TYPE),
        };
        Self {
            mime_type,
            payload: STANDARD.encode(bytes),
        }
    }

    /// `data:<mime>;base64,<payload>`
    pub(crate) fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}

/// At most one image per 1-based row.
#[derive(Default)]
pub(crate) struct ImageCache {
    images: HashMap<usize, CachedImage>,
}

impl ImageCache {
    /// Stores the image of a row, returning the one it replaces.
    ///
    /// The last image placed on a row wins: a picture re-drawn over an older
    /// one is the one the sheet shows. Insertion order is sorted part path,
    /// then anchor document order.
    pub(crate) fn insert(&mut self, row: usize, image: CachedImage) -> Option<CachedImage> {
        self.images.insert(row, image)
    }

    pub(crate) fn get(&self, row: usize) -> Option<&CachedImage> {
        self.images.get(&row)
    }

    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }
}

/// Walks every drawing part and caches each picture under the row it overlays.
///
/// Nothing in here is fatal: a part, anchor, reference or media entry that
/// cannot be used is logged, counted and skipped.
pub(crate) fn build_image_cache<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    geometry: &RowGeometry,
    config: &ExtractionConfig,
    diagnostics: &mut Diagnostics,
) -> ImageCache {
    let mut cache = ImageCache::default();
    for path in drawing_part_paths(zip) {
        diagnostics.drawing_parts += 1;
        let xml = match zip.read_string(&path) {
            Ok(Some(xml)) => xml,
            Ok(None) => continue,
            Err(error) => {
                log::warn!("Drawing part '{path}' is unreadable, skipped: {error}");
                diagnostics.malformed_parts += 1;
                continue;
            }
        };
        let part = match DrawingPart::parse(&path, &xml) {
            Ok(part) => part,
            Err(error) => {
                log::warn!("Drawing part '{path}' is not valid XML (possibly empty), skipped: {error}");
                diagnostics.malformed_parts += 1;
                continue;
            }
        };

        let mut relationships = None::<PartRelationships>;
        for anchor in part.anchors() {
            diagnostics.anchors += 1;
            let row = match match_anchor(&anchor, geometry, config.match_tolerance) {
                AnchorMatch::Row(row) => row,
                AnchorMatch::NoPosition => {
                    log::debug!("{:?} anchor in '{}' has no usable y coordinate", anchor.kind, part.path);
                    diagnostics.anchors_without_position += 1;
                    continue;
                }
                AnchorMatch::Unmatched(y) => {
                    log::debug!("{:?} anchor in '{}' at y={y:.2}pt matches no row", anchor.kind, part.path);
                    diagnostics.anchors_unmatched += 1;
                    continue;
                }
                AnchorMatch::FirstRow => {
                    log::debug!("{:?} anchor in '{}' sits on the header row", anchor.kind, part.path);
                    diagnostics.anchors_on_first_row += 1;
                    continue;
                }
            };

            let Some(id) = anchor.embed_id() else {
                log::debug!("Anchor on row {row} in '{}' embeds no picture", part.path);
                diagnostics.anchors_without_reference += 1;
                continue;
            };
            let media_path = relationships
                .get_or_insert_with(|| PartRelationships::load(zip, &part.path))
                .resolve(id);
            let Some(media_path) = media_path else {
                log::warn!("Relationship '{id}' of '{}' cannot be resolved, row {row} skipped", part.path);
                diagnostics.unresolved_references += 1;
                continue;
            };
            let bytes = match zip.read_bytes(&media_path) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    log::warn!("Media '{media_path}' not found, row {row} skipped");
                    diagnostics.missing_media += 1;
                    continue;
                }
                Err(error) => {
                    log::warn!("Media '{media_path}' is unreadable, row {row} skipped: {error}");
                    diagnostics.missing_media += 1;
                    continue;
                }
            };

            if cache.insert(row, CachedImage::encode(&bytes, config.mime_policy)).is_some() {
                log::debug!("Row {row} image replaced by '{media_path}'");
                diagnostics.images_replaced += 1;
            } else {
                log::debug!("Row {row} image cached from '{media_path}'");
            }
            diagnostics.images_cached += 1;
        }
    }
    cache
}
