//! Export service: read every record, project, encode.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    FormExportQuery, FormRecordRepository, FormRecordRepositoryError, SpreadsheetExport,
    SpreadsheetWriter, SpreadsheetWriterError,
};
use crate::domain::{EXPORT_FILE_NAME, Error, SheetTable};

/// Client-facing message when the store holds no records.
pub const NO_RECORDS_MESSAGE: &str = "no records to export";

/// Client-facing message when the export cannot be produced.
pub const EXPORT_FAILED_MESSAGE: &str = "could not export form records";

/// Export service implementing [`FormExportQuery`].
#[derive(Clone)]
pub struct FormExportService<R, W> {
    repository: Arc<R>,
    writer: Arc<W>,
}

impl<R, W> FormExportService<R, W> {
    /// Create a new service.
    pub fn new(repository: Arc<R>, writer: Arc<W>) -> Self {
        Self { repository, writer }
    }
}

fn map_repository_error(error: FormRecordRepositoryError) -> Error {
    error!(error = %error, "form record listing failed");
    Error::internal(EXPORT_FAILED_MESSAGE).with_details(json!({
        "code": "store_error",
        "error": error.to_string(),
    }))
}

fn map_writer_error(error: SpreadsheetWriterError) -> Error {
    error!(error = %error, "spreadsheet encoding failed");
    Error::internal(EXPORT_FAILED_MESSAGE).with_details(json!({
        "code": "encode_error",
        "error": error.to_string(),
    }))
}

#[async_trait]
impl<R, W> FormExportQuery for FormExportService<R, W>
where
    R: FormRecordRepository,
    W: SpreadsheetWriter,
{
    async fn export_all(&self) -> Result<SpreadsheetExport, Error> {
        let records = self
            .repository
            .list_ordered()
            .await
            .map_err(map_repository_error)?;
        if records.is_empty() {
            return Err(Error::not_found(NO_RECORDS_MESSAGE));
        }

        let table = SheetTable::from_records(&records);
        let bytes = self.writer.render(&table).map_err(map_writer_error)?;
        info!(rows = records.len(), bytes = bytes.len(), "form records exported");

        Ok(SpreadsheetExport {
            file_name: EXPORT_FILE_NAME,
            content_type: self.writer.content_type(),
            bytes,
            row_count: records.len(),
        })
    }
}

#[cfg(test)]
#[path = "form_export_service_tests.rs"]
mod tests;
