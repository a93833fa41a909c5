//! # Spreadsheet Reading Module
//!
//! Reads the parts of an Excel (.xlsx) package that the photo pipeline needs:
//! the active worksheet's cell texts and its row heights, plus the package
//! relationship helpers used to follow references between parts.
use crate::error::SheetPhotosError;
use std::io::Read;
use std::io::Seek;
use thiserror::Error;
use zip::ZipArchive;

pub(crate) mod cell;
pub(crate) mod excel;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod xlsx;

pub(crate) use sheet::Sheet;

/// Number of rows a SpreadsheetML worksheet can hold
pub(crate) const MAX_ROWS: usize = 1_048_576;

/// Errors raised while reading the workbook structure or a worksheet.
#[derive(Error, Debug)]
pub(crate) enum SpreadsheetError {
    /// A required package part is missing
    #[error("Missing package part '{0}'")]
    FileError(String),

    /// The workbook lists no worksheets
    #[error("Workbook contains no worksheets")]
    SpreadsheetEmptyError,

    /// A cell points past the end of the shared string table
    #[error("Shared string index {0} out of range")]
    SharedStringIndexError(usize),

    /// A row number past the last row a worksheet can hold
    #[error("Row {0} exceeds the worksheet limit of {MAX_ROWS} rows")]
    RowLimitError(usize),
}

/// Opens the workbook's active worksheet.
///
/// The active sheet is the one named by `workbookView@activeTab`; an index
/// past the last sheet falls back to the first one.
pub(crate) fn open_active_sheet<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<Sheet, SheetPhotosError> {
    let (sheets, active_tab) = xlsx::load_workbook(zip)?;
    let (name, path) = sheets
        .get(active_tab)
        .or_else(|| sheets.first())
        .ok_or(SpreadsheetError::SpreadsheetEmptyError)?;
    let shared_strings = xlsx::load_shared_strings(zip)?;
    let sheet = xlsx::read_worksheet(zip, name, path, &shared_strings)?;
    log::debug!("Read sheet '{}' from '{}': {} row(s)", sheet.name, path, sheet.max_row());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::PackageBuilder;
    use std::io::Cursor;

    #[test]
    fn opens_the_active_sheet() {
        let bytes = PackageBuilder::new()
            .sheet("Ignored", &[&["x"]])
            .sheet("Photos", &[&["姓名", "照片"], &["Alice"]])
            .active_tab(1)
            .build();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let sheet = open_active_sheet(&mut zip).unwrap();
        assert_eq!(sheet.name, "Photos");
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.row(2), ["Alice"]);
    }

    #[test]
    fn out_of_range_active_tab_falls_back_to_first_sheet() {
        let bytes = PackageBuilder::new()
            .sheet("Only", &[&["姓名"]])
            .active_tab(5)
            .build();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(open_active_sheet(&mut zip).unwrap().name, "Only");
    }

    #[test]
    fn workbook_without_sheets_is_an_error() {
        let bytes = PackageBuilder::new()
            .part("xl/workbook.xml", b"<workbook><sheets/></workbook>")
            .part("xl/_rels/workbook.xml.rels", b"<Relationships/>")
            .build();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert!(open_active_sheet(&mut zip).is_err());
    }
}
