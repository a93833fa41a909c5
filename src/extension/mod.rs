//! # Extension Core Module
//!
//! Named parameter handling and error types of the `read_sheet_photos` table function.
use crate::bridge::ValueBridge;
use crate::extension::ExtensionError::InvalidParameter;
use crate::photos::ExtractionConfig;
use crate::photos::MimePolicy;
use duckdb::core::LogicalTypeHandle;
use duckdb::core::LogicalTypeId;
use duckdb::vtab::BindInfo;
use thiserror::Error;

pub(crate) mod read_sheet_photos_table_function;

/// Errors raised while reading table function parameters.
#[derive(Error, Debug)]
pub(crate) enum ExtensionError {
    /// Invalid parameter provided to a table function
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

/// Trait for handling named parameters in DuckDB table functions.
///
/// # Type Parameters
///
/// * `T` - The type of the parameter value
pub(crate) trait NamedParam<T> {
    /// Returns the parameter name as used in SQL
    fn name() -> &'static str;

    /// Returns the DuckDB logical type for this parameter
    fn kind() -> LogicalTypeHandle;

    /// Returns the complete parameter definition (name and type)
    fn definition() -> (String, LogicalTypeHandle) {
        (Self::name().to_string(), Self::kind())
    }

    /// Extracts the parameter value, `Ok(None)` when it was not provided
    fn read(bind: &BindInfo) -> Result<Option<T>, ExtensionError>;

    fn invalid(message: String) -> ExtensionError {
        InvalidParameter {
            name: Self::name().to_string(),
            message,
        }
    }
}

/// Header label of the name column
pub(crate) struct NameLabelParam;

/// Number of leading rows searched for the header
pub(crate) struct HeaderRowsParam;

/// Whether image MIME types are sniffed from the media bytes
pub(crate) struct SniffMimeParam;

impl NamedParam<String> for NameLabelParam {
    fn name() -> &'static str {
        "name_label"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Varchar)
    }

    fn read(bind: &BindInfo) -> Result<Option<String>, ExtensionError> {
        let Some(value) = bind.get_named_parameter(Self::name()) else {
            return Ok(None);
        };
        let label = value.to_varchar().trim().to_string();
        if label.is_empty() {
            return Err(Self::invalid("label must not be empty".to_string()));
        }
        Ok(Some(label))
    }
}

impl NamedParam<usize> for HeaderRowsParam {
    fn name() -> &'static str {
        "header_rows"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Integer)
    }

    fn read(bind: &BindInfo) -> Result<Option<usize>, ExtensionError> {
        let Some(value) = bind.get_named_parameter(Self::name()) else {
            return Ok(None);
        };
        let rows = value.to_int64();
        match usize::try_from(rows) {
            Ok(rows) if rows > 0 => Ok(Some(rows)),
            _ => Err(Self::invalid(format!("expected a positive row count, got {rows}"))),
        }
    }
}

impl NamedParam<MimePolicy> for SniffMimeParam {
    fn name() -> &'static str {
        "sniff_mime"
    }

    fn kind() -> LogicalTypeHandle {
        LogicalTypeHandle::from(LogicalTypeId::Boolean)
    }

    fn read(bind: &BindInfo) -> Result<Option<MimePolicy>, ExtensionError> {
        Ok(bind.get_named_parameter(Self::name()).map(|value| {
            if value.to_bool() {
                MimePolicy::Sniff
            } else {
                MimePolicy::Fixed
            }
        }))
    }
}

/// Builds the extraction configuration from the named parameters, defaults filling the gaps.
pub(crate) fn read_config(bind: &BindInfo) -> Result<ExtractionConfig, ExtensionError> {
    let mut config = ExtractionConfig::default();
    if let Some(label) = NameLabelParam::read(bind)? {
        config.name_label = label;
    }
    if let Some(rows) = HeaderRowsParam::read(bind)? {
        config.header_search_rows = rows;
    }
    if let Some(policy) = SniffMimeParam::read(bind)? {
        config.mime_policy = policy;
    }
    Ok(config)
}
