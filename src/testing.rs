//! In-memory spreadsheet packages for unit tests.
use quick_xml::escape::escape;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Smallest byte strings the image format sniffer recognizes.
pub(crate) const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";
pub(crate) const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0\x01\x01\0\0\x01\0\x01\0\0";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_PACKAGE_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing";
const NS_DRAWING_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

struct SheetFixture {
    name: String,
    rows: Vec<Vec<String>>,
    heights: BTreeMap<usize, f64>,
}

/// Builds a spreadsheet package from sheets and raw parts.
///
/// Workbook, workbook relationships and worksheet parts are only generated
/// when at least one sheet is added.
pub(crate) struct PackageBuilder {
    parts: Vec<(String, Vec<u8>)>,
    sheets: Vec<SheetFixture>,
    active_tab: Option<usize>,
}

impl PackageBuilder {
    pub(crate) fn new() -> Self {
        Self {
            parts: Vec::new(),
            sheets: Vec::new(),
            active_tab: None,
        }
    }

    pub(crate) fn part(mut self, path: &str, bytes: &[u8]) -> Self {
        self.parts.push((path.to_owned(), bytes.to_vec()));
        self
    }

    /// Adds a sheet of inline-string cells; empty texts are left out.
    pub(crate) fn sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        self.sheets.push(SheetFixture {
            name: name.to_owned(),
            rows: rows
                .iter()
                .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
                .collect(),
            heights: BTreeMap::new(),
        });
        self
    }

    /// Sets a row height on the last added sheet.
    pub(crate) fn row_height(mut self, row: usize, height: f64) -> Self {
        self.sheets
            .last_mut()
            .expect("row_height needs a sheet")
            .heights
            .insert(row, height);
        self
    }

    pub(crate) fn active_tab(mut self, index: usize) -> Self {
        self.active_tab = Some(index);
        self
    }

    /// Adds `xl/drawings/<name>` holding the given anchor elements.
    pub(crate) fn drawing(self, name: &str, anchors: &str) -> Self {
        let xml = wrap_drawing(anchors);
        self.part(&format!("xl/drawings/{name}"), xml.as_bytes())
    }

    /// Adds `xl/drawings/_rels/<name>.rels` with image relationships.
    pub(crate) fn drawing_relationships(self, name: &str, targets: &[(&str, &str)]) -> Self {
        let relationships: String = targets
            .iter()
            .map(|(id, target)| {
                format!(
                    r#"<Relationship Id="{}" Type="{NS_RELATIONSHIPS}/image" Target="{}"/>"#,
                    escape(*id),
                    escape(*target)
                )
            })
            .collect();
        let xml = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{NS_PACKAGE_RELATIONSHIPS}">{relationships}</Relationships>"#);
        self.part(&format!("xl/drawings/_rels/{name}.rels"), xml.as_bytes())
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut parts = Vec::new();
        if !self.sheets.is_empty() {
            parts.push(("xl/workbook.xml".to_owned(), self.workbook_xml().into_bytes()));
            parts.push(("xl/_rels/workbook.xml.rels".to_owned(), self.workbook_relationships_xml().into_bytes()));
            for (index, sheet) in self.sheets.iter().enumerate() {
                parts.push((format!("xl/worksheets/sheet{}.xml", index + 1), worksheet_xml(sheet).into_bytes()));
            }
        }
        parts.extend(self.parts);

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (path, bytes) in parts {
            writer.start_file(path, options).unwrap();
            writer.write_all(&bytes).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn workbook_xml(&self) -> String {
        let active_tab = self
            .active_tab
            .map(|index| format!(r#" activeTab="{index}""#))
            .unwrap_or_default();
        let sheets: String = self
            .sheets
            .iter()
            .enumerate()
            .map(|(index, sheet)| {
                format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    escape(sheet.name.as_str()),
                    index + 1,
                    index + 1
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="{NS_MAIN}" xmlns:r="{NS_RELATIONSHIPS}"><bookViews><workbookView{active_tab}/></bookViews><sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn workbook_relationships_xml(&self) -> String {
        let relationships: String = (1..=self.sheets.len())
            .map(|number| {
                format!(r#"<Relationship Id="rId{number}" Type="{NS_RELATIONSHIPS}/worksheet" Target="worksheets/sheet{number}.xml"/>"#)
            })
            .collect();
        format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{NS_PACKAGE_RELATIONSHIPS}">{relationships}</Relationships>"#)
    }
}

fn worksheet_xml(sheet: &SheetFixture) -> String {
    let mut rows = String::new();
    for (index, cells) in sheet.rows.iter().enumerate() {
        let number = index + 1;
        let height = sheet
            .heights
            .get(&number)
            .map(|height| format!(r#" ht="{height}" customHeight="1""#))
            .unwrap_or_default();
        let mut xml: String = cells
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .map(|(col, text)| {
                format!(
                    r#"<c r="{}{number}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    column_name(col),
                    escape(text.as_str())
                )
            })
            .collect();
        if xml.is_empty() {
            // Keeps the row counted even without text
            xml = format!(r#"<c r="A{number}"/>"#);
        }
        rows.push_str(&format!(r#"<row r="{number}"{height}>{xml}</row>"#));
    }
    format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="{NS_MAIN}"><sheetData>{rows}</sheetData></worksheet>"#)
}

fn column_name(mut col: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// Wraps anchor elements in a drawing part root declaring the `xdr`, `a` and `r` prefixes.
pub(crate) fn wrap_drawing(anchors: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><xdr:wsDr xmlns:xdr="{NS_DRAWING}" xmlns:a="{NS_DRAWING_MAIN}" xmlns:r="{NS_RELATIONSHIPS}">{anchors}</xdr:wsDr>"#
    )
}

fn picture(embed: &str) -> String {
    format!(
        r#"<xdr:pic><xdr:nvPicPr><xdr:cNvPr id="2" name="Picture 1"/><xdr:cNvPicPr><a:picLocks noChangeAspect="1"/></xdr:cNvPicPr></xdr:nvPicPr><xdr:blipFill><a:blip r:embed="{embed}"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill><xdr:spPr><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></xdr:spPr></xdr:pic><xdr:clientData/>"#
    )
}

/// Two-cell anchor starting in column B at zero-based `row` plus `row_offset` drawing units.
pub(crate) fn two_cell_anchor(row: usize, row_offset: i64, embed: &str) -> String {
    format!(
        r#"<xdr:twoCellAnchor editAs="oneCell"><xdr:from><xdr:col>1</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{row}</xdr:row><xdr:rowOff>{row_offset}</xdr:rowOff></xdr:from><xdr:to><xdr:col>2</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>{}</xdr:twoCellAnchor>"#,
        row + 1,
        picture(embed)
    )
}

/// Absolute anchor `y` drawing units below the sheet top.
pub(crate) fn absolute_anchor(y: i64, embed: &str) -> String {
    format!(
        r#"<xdr:absoluteAnchor><xdr:pos x="0" y="{y}"/><xdr:ext cx="952500" cy="952500"/>{}</xdr:absoluteAnchor>"#,
        picture(embed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }
}
