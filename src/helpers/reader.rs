use crate::error::SheetPhotosError;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub(crate) enum PackageSourceError {
    #[error("No data from remote file: '{0}'")]
    RemoteFileNoDataError(String),
}

/// Loads the raw package bytes from either a local path or a remote URL
///
/// Remote URLs are fetched through DuckDB's `read_blob`, which takes care of
/// protocols (http, https, s3, gs, hf, ...) and configured credentials.
pub(crate) fn read_package(file_name: &str) -> Result<Vec<u8>, SheetPhotosError> {
    if is_remote_url(file_name) {
        read_blob_with_duckdb(file_name)
    } else {
        Ok(std::fs::read(file_name)?)
    }
}

/// Checks if a file name represents a remote URL
///
/// Single-letter schemes are Windows drive letters (`C:\data\book.xlsx`), not URLs.
pub(crate) fn is_remote_url(file_name: &str) -> bool {
    match Url::parse(file_name) {
        Ok(url) => url.scheme() != "file" && url.scheme().len() > 1,
        Err(_) => false,
    }
}

fn read_blob_with_duckdb(file_name: &str) -> Result<Vec<u8>, SheetPhotosError> {
    let connection = duckdb::Connection::open_in_memory()?;
    let result: Result<Vec<u8>, _> = connection.query_row("SELECT content FROM read_blob(?)", [file_name], |row| row.get(0));
    connection.close().map_err(|(_, e)| e)?;

    let bytes = result?;
    if bytes.is_empty() {
        Err(PackageSourceError::RemoteFileNoDataError(file_name.to_owned()))?;
    }
    Ok(bytes)
}
