use crate::error::SheetPhotosError;
use crate::spreadsheet::SpreadsheetError;

/// Types of cell data in a SpreadsheetML worksheet, from the `t` attribute of `<c>`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    /// Numeric values (also the default when `t` is absent)
    #[default]
    Number,
    /// Boolean values stored as `0` / `1`
    Boolean,
    /// Inline string values (`inlineStr`) and cached formula strings (`str`)
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values such as `#N/A`
    Error,
}

impl CellType {
    /// Maps the `t` attribute of a cell element to its cell type.
    pub(crate) fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("s") => Self::SharedString,
            Some("inlineStr") | Some("str") => Self::InlineString,
            Some("b") => Self::Boolean,
            Some("e") => Self::Error,
            _ => Self::Number,
        }
    }

    /// Renders the raw `<v>` / `<is>` content as the cell's text form.
    pub(crate) fn to_text(self, value: &str, shared_strings: &[String]) -> Result<String, SheetPhotosError> {
        match self {
            Self::SharedString => {
                let index = value.trim().parse::<usize>()?;
                let text = shared_strings
                    .get(index)
                    .ok_or(SpreadsheetError::SharedStringIndexError(index))?;
                Ok(text.to_owned())
            }
            Self::Boolean => Ok(if value.trim() == "1" { "TRUE" } else { "FALSE" }.to_owned()),
            Self::Number | Self::InlineString | Self::Error => Ok(value.to_owned()),
        }
    }
}
