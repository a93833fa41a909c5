/// Counters for every recoverable condition met during one extraction.
///
/// None of these change the shape of the output; they only explain why a
/// row or an anchor did not make it into the result.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Diagnostics {
    /// Drawing parts enumerated under `xl/drawings/`
    pub(crate) drawing_parts: usize,
    /// Drawing parts skipped because they are empty or not well-formed XML
    pub(crate) malformed_parts: usize,
    /// Anchor elements found across all parts
    pub(crate) anchors: usize,
    /// Anchors without a derivable vertical coordinate
    pub(crate) anchors_without_position: usize,
    /// Anchors whose coordinate falls in no row range
    pub(crate) anchors_unmatched: usize,
    /// Anchors that matched the reserved header row 1
    pub(crate) anchors_on_first_row: usize,
    /// Anchors without an embedded image reference
    pub(crate) anchors_without_reference: usize,
    /// References missing from (or lacking) the companion relationship part
    pub(crate) unresolved_references: usize,
    /// Resolved media paths absent from the package
    pub(crate) missing_media: usize,
    /// Images stored in the cache
    pub(crate) images_cached: usize,
    /// Cached images replaced by a later anchor on the same row
    pub(crate) images_replaced: usize,
    /// Sheet rows walked by the assembler
    pub(crate) rows: usize,
    /// Data rows too short to reach the name column
    pub(crate) short_rows: usize,
    /// Data rows whose trimmed name is empty
    pub(crate) empty_names: usize,
    /// Data rows with a name but no cached image
    pub(crate) rows_without_image: usize,
    /// Records emitted
    pub(crate) records: usize,
}
