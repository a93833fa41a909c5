/// MIME prefix written when the image format is not sniffed.
pub(crate) const DEFAULT_MIME_TYPE: &str = "image/png";

/// How the MIME type of an output data URI is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum MimePolicy {
    /// Always `image/png`, whatever the media bytes are
    #[default]
    Fixed,
    /// Guess from the media bytes' signature, `image/png` when unknown
    Sniff,
}

/// Fixed configuration of one extraction call.
#[derive(Clone, Debug)]
pub(crate) struct ExtractionConfig {
    /// Header label of the name column
    pub(crate) name_label: String,
    /// Case-insensitive substrings marking an image column header
    pub(crate) image_keywords: Vec<String>,
    /// How many leading rows may hold the header
    pub(crate) header_search_rows: usize,
    /// Height in points of rows without an explicit height
    pub(crate) default_row_height: f64,
    /// Slack in points when testing a coordinate against a row range
    pub(crate) match_tolerance: f64,
    pub(crate) mime_policy: MimePolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_label: "姓名".to_owned(),
            image_keywords: ["图", "图片", "示意图", "照片", "img", "photo", "image"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            header_search_rows: 3,
            default_row_height: 15.0,
            match_tolerance: 0.5,
            mime_policy: MimePolicy::Fixed,
        }
    }
}
