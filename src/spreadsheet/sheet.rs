use std::collections::BTreeMap;
use std::collections::HashMap;

/// Text content and row geometry of one worksheet.
///
/// Rows are addressed 1-based, the way a spreadsheet user counts them.
#[derive(Debug)]
pub(crate) struct Sheet {
    /// Sheet name from the workbook
    pub(crate) name: String,
    /// Cell texts per row, from column A up to the last present cell
    rows: BTreeMap<usize, Vec<String>>,
    /// Explicit row heights in points
    heights: HashMap<usize, f64>,
    /// Largest row carrying a cell element
    max_row: usize,
}

impl Sheet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            rows: BTreeMap::new(),
            heights: HashMap::new(),
            max_row: 0,
        }
    }

    /// Records an explicit row height.
    pub(crate) fn set_height(&mut self, row: usize, height: f64) {
        self.heights.insert(row, height);
    }

    /// Marks a row as carrying a cell element, even a valueless one.
    pub(crate) fn touch(&mut self, row: usize) {
        self.max_row = self.max_row.max(row);
    }

    /// Stores a cell text at zero-based column `col`, padding gaps with empty strings.
    pub(crate) fn push(&mut self, row: usize, col: usize, text: String) {
        self.touch(row);
        let cells = self.rows.entry(row).or_default();
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = text;
    }

    /// Number of rows in the sheet, i.e. the last row carrying a cell.
    pub(crate) fn max_row(&self) -> usize {
        self.max_row
    }

    /// Cell texts of a row; empty for rows without cells.
    pub(crate) fn row(&self, row: usize) -> &[String] {
        self.rows.get(&row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Explicit height of a row, if the sheet declares one.
    pub(crate) fn height(&self, row: usize) -> Option<f64> {
        self.heights.get(&row).copied()
    }

    /// Explicit heights of rows `1..=max_row`, in row order.
    pub(crate) fn heights(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (1..=self.max_row).map(|row| self.height(row))
    }

    /// All rows `1..=max_row` with their cells, including empty ones.
    pub(crate) fn rows(&self) -> impl Iterator<Item = (usize, &[String])> + '_ {
        (1..=self.max_row).map(|row| (row, self.row(row)))
    }
}
