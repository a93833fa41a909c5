use crate::error::SheetPhotosError;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::excel::load_relationships;
use crate::spreadsheet::excel::to_zip_path;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;
use crate::spreadsheet::MAX_ROWS;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::io::BufRead;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

// XML tag names for parsing Excel XLSX format
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");   // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");       // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t");                  // Text content within strings
const TAG_WORKBOOK_VIEW: QName = QName(b"workbookView"); // Window settings, carries the active tab
const TAG_SHEET: QName = QName(b"sheet");             // Worksheet definition
const TAG_ROW: QName = QName(b"row");                 // Row in worksheet
const TAG_CELL: QName = QName(b"c");                  // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is");        // Inline string value
const TAG_VALUE: QName = QName(b"v");                 // Cell value content

/// Loads the worksheet list and the active tab index from `xl/workbook.xml`
///
/// # Returns
/// Tuple of (worksheets, active_tab) where worksheets are (name, zip_path) pairs in tab order
pub(super) fn load_workbook<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<(Vec<(String, String)>, usize), SheetPhotosError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?
        .ok_or_else(|| SpreadsheetError::FileError("xl/_rels/workbook.xml.rels".to_string()))?;
    let mut reader = zip.xml_reader("xl/workbook.xml")?
        .ok_or_else(|| SpreadsheetError::FileError("xl/workbook.xml".to_string()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut active_tab = None::<usize>;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(target) = relationships.get(id.as_ref()) {
                    sheets.push((name.to_string(), to_zip_path(target)));
                }
            }
        }
        // Only the first view decides; later views belong to other windows
        Event::Start(event) if active_tab.is_none() && event.name() == TAG_WORKBOOK_VIEW => {
            active_tab = Some(event.parse_attribute_value("activeTab")?.unwrap_or(0));
        }
    });
    Ok((sheets, active_tab.unwrap_or(0)))
}

/// Loads the shared string table; a package without `xl/sharedStrings.xml` has none
pub(super) fn load_shared_strings<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<Vec<String>, SheetPhotosError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader("xl/sharedStrings.xml")? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };

    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
            let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
            shared_strings.push(string);
        }
    });
    Ok(shared_strings)
}

/// Reads cell texts and row heights of one worksheet part
///
/// # Arguments
/// * `zip` - ZIP archive containing the XLSX file
/// * `name` - Sheet name, kept for diagnostics
/// * `path` - Worksheet part path
/// * `shared_strings` - Shared string table for `t="s"` cells
pub(super) fn read_worksheet<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    name: &str,
    path: &str,
    shared_strings: &[String],
) -> Result<Sheet, SheetPhotosError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_string()))?;
    let mut sheet = Sheet::new(name);
    let mut row_count = 0usize;
    let mut col_count = 0usize;
    let mut row = 0usize;
    let mut col = 0usize;
    let mut kind = CellType::default();
    let mut value = String::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_ROW => {
            row = event.parse_attribute_value::<usize>("r")?
                .filter(|number| *number > 0)
                .map(|number| number - 1)
                .unwrap_or(row_count);
            check_row_limit(row)?;
            row_count = row + 1;
            col_count = 0;
            if let Some(height) = event.parse_attribute_value::<f64>("ht")? {
                sheet.set_height(row + 1, height);
            }
        }
        Event::Start(event) if event.name() == TAG_CELL => {
            (row, col) = event.get_attribute_value("r")?
                .and_then(|reference| reference_to_index(&reference))
                .unwrap_or((row, col_count));
            check_row_limit(row)?;
            col_count = col + 1;
            kind = CellType::parse(event.get_attribute_value("t")?.as_deref());
            value.clear();
            sheet.touch(row + 1);
        }
        Event::Start(event) if event.name() == TAG_INLINE_STRING => {
            value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
        }
        Event::Start(event) if event.name() == TAG_VALUE => {
            value = read_string_value(&mut reader, TAG_VALUE, true)?;
        }
        Event::End(event) if !value.is_empty() && event.name() == TAG_CELL => {
            sheet.push(row + 1, col, kind.to_text(&value, shared_strings)?);
            value.clear();
        }
    });
    Ok(sheet)
}

/// Rejects a zero-based row index outside the worksheet grid.
fn check_row_limit(row: usize) -> Result<(), SpreadsheetError> {
    if row >= MAX_ROWS {
        return Err(SpreadsheetError::RowLimitError(row.saturating_add(1)));
    }
    Ok(())
}

/// Reads string value from XML content, handling text and CDATA sections
///
/// Extracts string content from XML elements, skipping phonetic text annotations
/// and concatenating rich-text runs.
///
/// # Arguments
/// * `reader` - XML reader positioned just after the start tag
/// * `end_tag` - XML tag that marks the end of the string content
/// * `is_text_content` - Whether to treat the content as text by default
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, SheetPhotosError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&String::from_utf8_lossy(&event)),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}
