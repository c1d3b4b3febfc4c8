//! Port for encoding a [`SheetTable`] into a downloadable workbook.

use crate::domain::SheetTable;

use super::define_port_error;

define_port_error! {
    /// Errors raised by spreadsheet encoders.
    pub enum SpreadsheetWriterError {
        /// The encoder rejected the table or failed to serialise it.
        Encode { message: String } => "spreadsheet encoding failed: {message}",
    }
}

/// Encodes tables into an in-memory workbook.
#[cfg_attr(test, mockall::automock)]
pub trait SpreadsheetWriter: Send + Sync {
    /// MIME type of the produced bytes.
    fn content_type(&self) -> &'static str;

    /// Encode `table` as a single-sheet workbook.
    fn render(&self, table: &SheetTable) -> Result<Vec<u8>, SpreadsheetWriterError>;
}
