//! ZIP archive helper utilities for Office Open XML packages
//! Provides convenient methods for accessing parts within the package

use crate::error::SheetPhotosError;
use crate::helpers::xml::XmlReader;
use std::collections::BTreeSet;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

/// Helper trait for package part access on top of a ZIP archive
pub(crate) trait ZipHelper<RS: Read + Seek> {
    /// Gets a part by name (case-insensitive, path separator agnostic)
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, SheetPhotosError>;

    /// Creates a streaming XML reader for a part
    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, SheetPhotosError>;

    /// Reads a whole part into memory
    fn read_bytes(&mut self, name: &str) -> Result<Option<Vec<u8>>, SheetPhotosError>;

    /// Reads a whole part as UTF-8 text
    fn read_string(&mut self, name: &str) -> Result<Option<String>, SheetPhotosError>;

    /// Lists the file entries below a directory prefix, deduplicated and sorted
    fn file_names_under(&self, prefix: &str) -> BTreeSet<String>;
}

impl<RS: Read + Seek> ZipHelper<RS> for ZipArchive<RS> {
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, SheetPhotosError> {
        let pattern = name.replace('\\', "/");
        let path = self.file_names()
            .find(|file_name| pattern.eq_ignore_ascii_case(&file_name.replace('\\', "/")))
            .map(|file_name| file_name.to_owned());
        match path.map(|file_name| self.by_name(&file_name)).transpose() {
            Ok(Some(file)) => Ok(Some(file)),
            Ok(None) | Err(ZipError::FileNotFound) => Ok(None),
            Err(error) => Err(error)?,
        }
    }

    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, SheetPhotosError> {
        let reader = self
            .file(name)?
            .map(|file| XmlReader::new(BufReader::new(file)));
        Ok(reader)
    }

    fn read_bytes(&mut self, name: &str) -> Result<Option<Vec<u8>>, SheetPhotosError> {
        let Some(mut file) = self.file(name)? else {
            return Ok(None);
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn read_string(&mut self, name: &str) -> Result<Option<String>, SheetPhotosError> {
        self.read_bytes(name)?
            .map(|bytes| String::from_utf8(bytes).map_err(|error| error.utf8_error().into()))
            .transpose()
    }

    fn file_names_under(&self, prefix: &str) -> BTreeSet<String> {
        self.file_names()
            .map(|file_name| file_name.replace('\\', "/"))
            .filter(|file_name| file_name.starts_with(prefix) && !file_name.ends_with('/'))
            .collect()
    }
}
