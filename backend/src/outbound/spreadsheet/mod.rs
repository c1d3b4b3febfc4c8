//! Spreadsheet encoders implementing the `SpreadsheetWriter` port.

mod xlsx_writer;

pub use xlsx_writer::{XLSX_CONTENT_TYPE, XlsxSpreadsheetWriter};
