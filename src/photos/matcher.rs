use crate::photos::drawing::Anchor;
use crate::photos::drawing::AnchorPosition;
use crate::photos::drawing::EMU_PER_POINT;
use crate::photos::geometry::RowGeometry;

/// Result of placing one anchor on the sheet's rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum AnchorMatch {
    /// 1-based data row owning the anchor
    Row(usize),
    /// No vertical coordinate could be derived
    NoPosition,
    /// The coordinate (points) lies outside every row
    Unmatched(f64),
    /// The anchor sits on row 1, which holds no data
    FirstRow,
}

/// Converts a raw anchor position to a distance from the sheet top, in points.
///
/// Cell-relative positions add the offset to the origin row's top edge and
/// need that row to exist in `geometry`.
pub(crate) fn vertical_coordinate(position: AnchorPosition, geometry: &RowGeometry) -> Option<f64> {
    match position {
        AnchorPosition::CellRelative { row, offset } => {
            let row_start = row.checked_add(1).and_then(|row| geometry.row_start(row))?;
            Some(row_start + offset as f64 / EMU_PER_POINT)
        }
        AnchorPosition::Absolute { y } => Some(y as f64 / EMU_PER_POINT),
    }
}

/// Finds the data row an anchor overlays.
pub(crate) fn match_anchor(anchor: &Anchor<'_, '_>, geometry: &RowGeometry, tolerance: f64) -> AnchorMatch {
    let Some(y) = anchor
        .position()
        .and_then(|position| vertical_coordinate(position, geometry))
    else {
        return AnchorMatch::NoPosition;
    };
    match geometry.locate(y, tolerance) {
        None => AnchorMatch::Unmatched(y),
        Some(1) => AnchorMatch::FirstRow,
        Some(row) => AnchorMatch::Row(row),
    }
}
