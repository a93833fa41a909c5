//! # DuckDB Sheet Photos Extension
//!
//! A DuckDB extension that pulls the photos floating over an Excel worksheet
//! and pairs each one with the row it covers.
//!
//! ## Features
//!
//! - **Row matching by layout**: drawing anchors are placed on the sheet's real
//!   row geometry, custom row heights included
//! - **Header detection**: the header row is found among the first rows by its
//!   name column label
//! - **Data URIs**: images come back base64 encoded, ready for display
//! - **Remote files**: workbooks can be read from any URL DuckDB's `read_blob` supports
//!
//! ## Table Functions
//!
//! - `read_sheet_photos`: returns `(name, image)` rows for a workbook
extern crate duckdb;
extern crate duckdb_loadable_macros;
extern crate libduckdb_sys;

mod bridge;
mod error;
mod extension;
mod helpers;
mod photos;
mod spreadsheet;
#[cfg(test)]
mod testing;

use crate::extension::read_sheet_photos_table_function::ReadSheetPhotosTableFunction;
use anyhow::{Context, Result};
use duckdb::Connection;
use duckdb_loadable_macros::duckdb_entrypoint_c_api;
use libduckdb_sys as ffi;

/// Extension entry point for DuckDB.
///
/// Installs the logger (honoring `RUST_LOG`) and registers `read_sheet_photos`.
///
/// # Errors
///
/// Returns an error if the table function fails to register with DuckDB.
#[duckdb_entrypoint_c_api()]
pub unsafe fn extension_entrypoint(connection: Connection) -> Result<()> {
    // Another extension may have installed a logger already
    let _ = env_logger::try_init();
    connection
        .register_table_function::<ReadSheetPhotosTableFunction>("read_sheet_photos")
        .context("Failed to register read_sheet_photos table function")?;
    Ok(())
}
