//! # Photo Extraction Module
//!
//! Pairs the pictures floating over a worksheet with the data rows they cover.
//!
//! Row heights are stacked into vertical ranges, every drawing anchor is turned
//! into a vertical coordinate and matched against them, and the picture it
//! embeds is cached under the matched row. Independently the header row is
//! located and its name column mapped. The data rows below the header are then
//! joined with the cache into `(name, image)` records.
//!
//! Everything lives for a single [`extract_photos`] call; nothing is shared
//! between calls.
use crate::error::SheetPhotosError;
use crate::spreadsheet::open_active_sheet;
use std::io::Cursor;
use thiserror::Error;
use zip::ZipArchive;

pub(crate) mod assembler;
pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod diagnostics;
pub(crate) mod drawing;
pub(crate) mod geometry;
pub(crate) mod header;
pub(crate) mod matcher;
pub(crate) mod resolver;

pub(crate) use assembler::PhotoRecord;
pub(crate) use config::{ExtractionConfig, MimePolicy};
pub(crate) use diagnostics::Diagnostics;

use assembler::assemble;
use cache::build_image_cache;
use geometry::RowGeometry;
use header::{locate_header, ColumnMapping};

/// Conditions that abort a whole extraction.
#[derive(Error, Debug)]
pub(crate) enum PhotoError {
    /// The bytes are not a readable spreadsheet package
    #[error("Invalid spreadsheet package: {0}")]
    InvalidPackage(Box<SheetPhotosError>),

    /// A header and at least one data row are needed
    #[error("Sheet has {rows} row(s), at least 2 are required")]
    NotEnoughRows { rows: usize },

    #[error("No header row with a '{label}' cell in the first {rows} row(s)")]
    HeaderRowNotFound { rows: usize, label: String },

    #[error("Header row {row} has no '{label}' column")]
    MissingNameColumn { row: usize, label: String },

    #[error("Header row {row} has more than one '{label}' column")]
    DuplicateNameColumn { row: usize, label: String },

    #[error("Header row {row} has no image column")]
    MissingImageColumn { row: usize },
}

impl PhotoError {
    fn invalid_package(error: impl Into<SheetPhotosError>) -> Self {
        Self::InvalidPackage(Box::new(error.into()))
    }
}

/// Records of one extraction, with the counters explaining what was skipped.
#[derive(Debug)]
pub(crate) struct PhotoExtraction {
    pub(crate) records: Vec<PhotoRecord>,
    pub(crate) diagnostics: Diagnostics,
}

/// Extracts `(name, image)` records from the bytes of a spreadsheet package.
///
/// Only the active sheet is read. The call is self-contained and may run
/// concurrently with other calls.
pub(crate) fn extract_photos(bytes: &[u8], config: &ExtractionConfig) -> Result<PhotoExtraction, PhotoError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes)).map_err(PhotoError::invalid_package)?;
    let sheet = open_active_sheet(&mut zip).map_err(PhotoError::invalid_package)?;
    if sheet.max_row() < 2 {
        return Err(PhotoError::NotEnoughRows { rows: sheet.max_row() });
    }

    let header_row = locate_header(&sheet, config)?;
    let mapping = ColumnMapping::from_header(header_row, sheet.row(header_row), config)?;
    log::debug!(
        "Header on row {header_row} of '{}': name column {}, image columns {:?}",
        sheet.name,
        mapping.name_col,
        mapping.image_cols
    );

    let geometry = RowGeometry::from_heights(sheet.heights(), config.default_row_height);
    let mut diagnostics = Diagnostics::default();
    let cache = build_image_cache(&mut zip, &geometry, config, &mut diagnostics);
    let records = assemble(&sheet, header_row, &mapping, &cache, &mut diagnostics);
    log::info!(
        "Sheet '{}': {} data row(s), {} image(s) cached, {} record(s)",
        sheet.name,
        diagnostics.rows,
        cache.len(),
        records.len()
    );
    Ok(PhotoExtraction { records, diagnostics })
}
