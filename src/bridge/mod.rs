use duckdb::vtab::Value;
use libduckdb_sys::duckdb_free;
use libduckdb_sys::duckdb_get_bool;
use libduckdb_sys::duckdb_get_int64;
use libduckdb_sys::duckdb_get_varchar;
use libduckdb_sys::duckdb_value;
use std::ffi::CStr;
use std::os::raw::c_void;

/// Typed reads of DuckDB parameter values that `Value` does not expose itself.
pub(crate) trait ValueBridge {
    /// Gets the raw pointer to the underlying DuckDB value
    ///
    /// # Safety
    /// Relies on `Value` being a plain wrapper around a single `duckdb_value`
    fn get_value_ptr(&self) -> duckdb_value;

    /// Converts the value to a boolean
    fn to_bool(&self) -> bool {
        unsafe { duckdb_get_bool(self.get_value_ptr()) }
    }

    /// Converts the value to a signed 64-bit integer
    fn to_int64(&self) -> i64 {
        unsafe { duckdb_get_int64(self.get_value_ptr()) }
    }

    /// Converts the value to an owned UTF-8 string
    fn to_varchar(&self) -> String {
        unsafe {
            let varchar = duckdb_get_varchar(self.get_value_ptr());
            let c_str = CStr::from_ptr(varchar);
            let string = c_str.to_string_lossy().into_owned();
            duckdb_free(varchar as *mut c_void);
            string
        }
    }
}

impl ValueBridge for Value {
    fn get_value_ptr(&self) -> duckdb_value {
        // Value holds nothing but the duckdb_value handle
        unsafe { *(self as *const Value as *const duckdb_value) }
    }
}
