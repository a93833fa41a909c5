//! Low-level helpers shared by the spreadsheet reader and the photo pipeline
pub(crate) mod reader;
pub(crate) mod xml;
pub(crate) mod zip;
