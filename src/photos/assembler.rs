use crate::photos::cache::ImageCache;
use crate::photos::diagnostics::Diagnostics;
use crate::photos::header::ColumnMapping;
use crate::spreadsheet::Sheet;

/// One output record: a person's name and their photo as a data URI.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PhotoRecord {
    pub(crate) name: String,
    pub(crate) image: String,
}

/// Joins the data rows below the header with the cached images, in row order.
pub(crate) fn assemble(
    sheet: &Sheet,
    header_row: usize,
    mapping: &ColumnMapping,
    cache: &ImageCache,
    diagnostics: &mut Diagnostics,
) -> Vec<PhotoRecord> {
    let mut records = Vec::new();
    for (row, cells) in sheet.rows().skip(header_row) {
        diagnostics.rows += 1;
        let Some(name) = cells.get(mapping.name_col) else {
            log::debug!("Row {row} has {} cell(s), name column not reached", cells.len());
            diagnostics.short_rows += 1;
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            log::debug!("Row {row} has an empty name");
            diagnostics.empty_names += 1;
            continue;
        }
        let Some(image) = cache.get(row) else {
            log::debug!("Row {row} ('{name}') has no image");
            diagnostics.rows_without_image += 1;
            continue;
        };
        records.push(PhotoRecord {
            name: name.to_owned(),
            image: image.data_uri(),
        });
    }
    diagnostics.records = records.len();
    records
}
