use crate::photos::config::ExtractionConfig;
use crate::photos::PhotoError;
use crate::spreadsheet::Sheet;

/// Columns located on the header row, zero-based.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ColumnMapping {
    pub(crate) name_col: usize,
    /// Columns whose header mentions an image. Only checked for presence,
    /// images are linked to rows through the drawing anchors.
    pub(crate) image_cols: Vec<usize>,
}

impl ColumnMapping {
    /// Maps the cells of the header row.
    pub(crate) fn from_header(row: usize, cells: &[String], config: &ExtractionConfig) -> Result<Self, PhotoError> {
        let keywords: Vec<String> = config.image_keywords.iter().map(|keyword| keyword.to_lowercase()).collect();
        let mut name_col = None;
        let mut image_cols = Vec::new();
        for (col, cell) in cells.iter().enumerate() {
            let text = cell.trim();
            if text == config.name_label {
                if name_col.is_some() {
                    return Err(PhotoError::DuplicateNameColumn { row, label: config.name_label.clone() });
                }
                name_col = Some(col);
            } else {
                let text = text.to_lowercase();
                if keywords.iter().any(|keyword| text.contains(keyword.as_str())) {
                    image_cols.push(col);
                }
            }
        }

        let name_col = name_col.ok_or_else(|| PhotoError::MissingNameColumn { row, label: config.name_label.clone() })?;
        if image_cols.is_empty() {
            return Err(PhotoError::MissingImageColumn { row });
        }
        Ok(Self { name_col, image_cols })
    }
}

/// Finds the 1-based header row among the first `header_search_rows` rows.
///
/// The header is the first row with a cell equal to the name label. When that
/// row holds the label more than once the sheet is ambiguous and rejected.
pub(crate) fn locate_header(sheet: &Sheet, config: &ExtractionConfig) -> Result<usize, PhotoError> {
    for row in 1..=config.header_search_rows.min(sheet.max_row()) {
        let count = sheet
            .row(row)
            .iter()
            .filter(|cell| cell.trim() == config.name_label)
            .count();
        match count {
            0 => continue,
            1 => return Ok(row),
            _ => {
                return Err(PhotoError::DuplicateNameColumn {
                    row,
                    label: config.name_label.clone(),
                })
            }
        }
    }
    Err(PhotoError::HeaderRowNotFound {
        rows: config.header_search_rows,
        label: config.name_label.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        let mut sheet = Sheet::new("Sheet1");
        for (index, cells) in rows.iter().enumerate() {
            sheet.touch(index + 1);
            for (col, text) in cells.iter().enumerate() {
                if !text.is_empty() {
                    sheet.push(index + 1, col, text.to_string());
                }
            }
        }
        sheet
    }

    fn cells(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn header_in_first_row() {
        let sheet = sheet(&[&["姓名", "照片"], &["Alice"]]);
        assert_eq!(locate_header(&sheet, &ExtractionConfig::default()).unwrap(), 1);
    }

    #[test]
    fn header_in_third_row() {
        let sheet = sheet(&[&["Staff photos"], &["2024", "", "draft"], &[" 姓名 ", "Dept", "Photo"], &["Alice"]]);
        assert_eq!(locate_header(&sheet, &ExtractionConfig::default()).unwrap(), 3);
    }

    #[test]
    fn header_past_search_rows_is_not_found() {
        let sheet = sheet(&[&["a"], &["b"], &["c"], &["姓名", "照片"]]);
        assert!(matches!(
            locate_header(&sheet, &ExtractionConfig::default()),
            Err(PhotoError::HeaderRowNotFound { rows: 3, .. })
        ));
    }

    #[test]
    fn label_must_match_whole_cell() {
        let sheet = sheet(&[&["姓名字段", "照片"], &["x"]]);
        assert!(matches!(
            locate_header(&sheet, &ExtractionConfig::default()),
            Err(PhotoError::HeaderRowNotFound { .. })
        ));
    }

    #[test]
    fn duplicate_label_is_distinct_from_missing() {
        let sheet = sheet(&[&["姓名", "照片", "姓名"], &["Alice"]]);
        assert!(matches!(
            locate_header(&sheet, &ExtractionConfig::default()),
            Err(PhotoError::DuplicateNameColumn { row: 1, .. })
        ));

        let config = ExtractionConfig::default();
        assert!(matches!(
            ColumnMapping::from_header(1, &cells(&["姓名", "照片", " 姓名"]), &config),
            Err(PhotoError::DuplicateNameColumn { .. })
        ));
        assert!(matches!(
            ColumnMapping::from_header(1, &cells(&["Name", "照片"]), &config),
            Err(PhotoError::MissingNameColumn { .. })
        ));
    }

    #[test]
    fn maps_name_and_image_columns() {
        let config = ExtractionConfig::default();
        let mapping = ColumnMapping::from_header(
            2,
            &cells(&["Dept", "  姓名", "员工照片", "", "Profile IMAGE", "示意图(可选)"]),
            &config,
        )
        .unwrap();
        assert_eq!(mapping, ColumnMapping { name_col: 1, image_cols: vec![2, 4, 5] });
    }

    #[test]
    fn header_without_image_column_is_rejected() {
        let config = ExtractionConfig::default();
        assert!(matches!(
            ColumnMapping::from_header(1, &cells(&["姓名", "Dept", "Phone"]), &config),
            Err(PhotoError::MissingImageColumn { row: 1 })
        ));
    }
}
