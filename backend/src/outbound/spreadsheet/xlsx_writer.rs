//! Office Open XML workbook encoder backed by `rust_xlsxwriter`.
//!
//! Writes a single worksheet: a bold header row followed by one row per
//! record. Empty cells are left unwritten so the sheet stays sparse.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::domain::SheetTable;
use crate::domain::ports::{SpreadsheetWriter, SpreadsheetWriterError};

/// MIME type for `.xlsx` workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Renders [`SheetTable`]s as in-memory `.xlsx` workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSpreadsheetWriter;

impl XlsxSpreadsheetWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }
}

fn encode_error(error: XlsxError) -> SpreadsheetWriterError {
    SpreadsheetWriterError::encode(error.to_string())
}

fn cell_index<T: TryFrom<usize>>(index: usize) -> Result<T, SpreadsheetWriterError> {
    T::try_from(index)
        .map_err(|_| SpreadsheetWriterError::encode(format!("cell index {index} out of range")))
}

fn write_row(
    sheet: &mut Worksheet,
    row: u32,
    cells: &[String],
    format: Option<&Format>,
) -> Result<(), SpreadsheetWriterError> {
    for (col, value) in cells.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        let col: u16 = cell_index(col)?;
        let written = match format {
            Some(format) => sheet.write_string_with_format(row, col, value, format),
            None => sheet.write_string(row, col, value),
        };
        written.map_err(encode_error)?;
    }
    Ok(())
}

impl SpreadsheetWriter for XlsxSpreadsheetWriter {
    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn render(&self, table: &SheetTable) -> Result<Vec<u8>, SpreadsheetWriterError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name(table.name()).map_err(encode_error)?;
        write_row(sheet, 0, table.header(), Some(&header_format))?;
        for (index, cells) in table.rows().iter().enumerate() {
            let row: u32 = cell_index(index + 1)?;
            write_row(sheet, row, cells, None)?;
        }
        sheet.autofit();

        workbook.save_to_buffer().map_err(encode_error)
    }
}
