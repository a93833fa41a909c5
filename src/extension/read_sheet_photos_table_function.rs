//! # Sheet Photos Table Function
//!
//! Implements `read_sheet_photos`, which returns one `(name, image)` row per
//! person whose photo floats over their row in the active sheet.
use crate::error::ResultMessage;
use crate::error::SheetPhotosError;
use crate::extension::read_config;
use crate::extension::HeaderRowsParam;
use crate::extension::NameLabelParam;
use crate::extension::NamedParam;
use crate::extension::SniffMimeParam;
use crate::helpers::reader::read_package;
use crate::photos::extract_photos;
use crate::photos::ExtractionConfig;
use crate::photos::PhotoRecord;
use duckdb::core::DataChunkHandle;
use duckdb::core::Inserter;
use duckdb::core::LogicalTypeHandle;
use duckdb::core::LogicalTypeId;
use duckdb::vtab::BindInfo;
use duckdb::vtab::InitInfo;
use duckdb::vtab::TableFunctionInfo;
use duckdb::vtab::VTab;
use std::error::Error;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Rows written per output chunk
const STEP: usize = 2048;

/// Parameters of one `read_sheet_photos` call.
struct ReadSheetPhotosParameters {
    /// Local path or remote URL of the workbook
    file_name: String,
    config: ExtractionConfig,
}

impl TryFrom<&BindInfo> for ReadSheetPhotosParameters {
    type Error = SheetPhotosError;

    fn try_from(bind: &BindInfo) -> Result<Self, Self::Error> {
        Ok(ReadSheetPhotosParameters {
            file_name: bind.get_parameter(0).to_string(),
            config: read_config(bind)?,
        })
    }
}

/// Bind data: the whole extraction result, produced before any row is emitted.
#[repr(C)]
pub(crate) struct ReadSheetPhotosBindData {
    records: Vec<PhotoRecord>,
}

impl TryFrom<&ReadSheetPhotosParameters> for ReadSheetPhotosBindData {
    type Error = SheetPhotosError;

    fn try_from(parameters: &ReadSheetPhotosParameters) -> Result<Self, Self::Error> {
        let bytes = read_package(&parameters.file_name)?;
        let extraction = extract_photos(&bytes, &parameters.config)?;
        log::debug!("'{}': {:?}", parameters.file_name, extraction.diagnostics);
        Ok(ReadSheetPhotosBindData {
            records: extraction.records,
        })
    }
}

/// Initialization data: offset of the next record to emit.
#[repr(C)]
pub(crate) struct ReadSheetPhotosInitData {
    offset: AtomicUsize,
}

pub(crate) struct ReadSheetPhotosTableFunction;

impl VTab for ReadSheetPhotosTableFunction {
    type InitData = ReadSheetPhotosInitData;
    type BindData = ReadSheetPhotosBindData;

    /// Reads the workbook and runs the extraction; any fatal outcome fails the query here.
    fn bind(bind: &BindInfo) -> Result<Self::BindData, Box<dyn Error>> {
        let parameters = ReadSheetPhotosParameters::try_from(bind)?;
        let data = ReadSheetPhotosBindData::try_from(&parameters).with_prefix(parameters.file_name.as_str())?;
        bind.add_result_column("name", LogicalTypeHandle::from(LogicalTypeId::Varchar));
        bind.add_result_column("image", LogicalTypeHandle::from(LogicalTypeId::Varchar));
        Ok(data)
    }

    fn init(_: &InitInfo) -> Result<Self::InitData, Box<dyn Error>> {
        Ok(ReadSheetPhotosInitData {
            offset: AtomicUsize::new(0),
        })
    }

    /// Emits the next chunk of records, an empty chunk once all are out.
    fn func(
        func: &TableFunctionInfo<Self>,
        output: &mut DataChunkHandle,
    ) -> Result<(), Box<dyn Error>> {
        let bind = func.get_bind_data();
        let init = func.get_init_data();
        let start = init.offset.fetch_add(STEP, Ordering::Relaxed);
        let Some(chunk) = bind.records.get(start..(start + STEP).min(bind.records.len())) else {
            output.set_len(0);
            return Ok(());
        };

        let names = output.flat_vector(0);
        let images = output.flat_vector(1);
        for (index, record) in chunk.iter().enumerate() {
            names.insert(index, record.name.as_str());
            images.insert(index, record.image.as_str());
        }
        output.set_len(chunk.len());
        Ok(())
    }

    fn parameters() -> Option<Vec<LogicalTypeHandle>> {
        Some(vec![LogicalTypeHandle::from(LogicalTypeId::Varchar)])
    }

    fn named_parameters() -> Option<Vec<(String, LogicalTypeHandle)>> {
        Some(vec![
            NameLabelParam::definition(),
            HeaderRowsParam::definition(),
            SniffMimeParam::definition(),
        ])
    }
}
