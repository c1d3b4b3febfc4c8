//! Driving port for exporting every stored record.

use async_trait::async_trait;

use crate::domain::Error;

/// An encoded workbook ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetExport {
    /// Suggested download name.
    pub file_name: &'static str,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Encoded workbook.
    pub bytes: Vec<u8>,
    /// Number of data rows, excluding the header.
    pub row_count: usize,
}

/// Use-case port behind `GET /export`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormExportQuery: Send + Sync {
    /// Export every record, or fail with a not-found error when there are none.
    async fn export_all(&self) -> Result<SpreadsheetExport, Error>;
}

/// Fixture that behaves like an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFormExportQuery;

#[async_trait]
impl FormExportQuery for FixtureFormExportQuery {
    async fn export_all(&self) -> Result<SpreadsheetExport, Error> {
        Err(Error::not_found(crate::domain::NO_RECORDS_MESSAGE))
    }
}
