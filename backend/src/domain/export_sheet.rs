//! Projection of stored records into the fixed export layout.
//!
//! The layout is part of the public contract: downstream users open the
//! workbook by column position, so the order of [`EXPORT_COLUMNS`] must not
//! change and normalised matching keys never appear.

use chrono::{DateTime, SecondsFormat, Utc};

use super::form_record::{CarModel, FormRecord};

/// Worksheet name.
pub const SHEET_NAME: &str = "RegistrosFormulario";

/// Download file name offered to browsers.
pub const EXPORT_FILE_NAME: &str = "todos_los_registros_formulario.xlsx";

/// Header row, in column order.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "First Name",
    "Last Name",
    "Favorite Sport",
    "Gender",
    "Departamento Residente",
    "21 or Older",
    "Car: Vado",
    "Car: Chrysler",
    "Car: Toyota",
    "Car: Nissan",
    "Last Updated",
];

const YES: &str = "Sí";
const NO: &str = "No";
const SELECTED: &str = "X";

/// Render a timestamp as UTC RFC 3339 with second precision.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use form_intake::domain::format_timestamp;
///
/// let at = Utc.with_ymd_and_hms(2026, 10, 16, 18, 37, 5).unwrap();
/// assert_eq!(format_timestamp(at), "2026-10-16T18:37:05Z");
/// ```
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Project one record into its export row.
pub fn project_record(record: &FormRecord) -> Vec<String> {
    let identity = &record.identity;
    let payload = &record.payload;

    let mut row = Vec::with_capacity(EXPORT_COLUMNS.len());
    row.push(identity.name().to_owned());
    row.push(identity.surname().to_owned());
    row.push(payload.favorite_sport().unwrap_or_default().to_owned());
    row.push(payload.gender().unwrap_or_default().to_owned());
    row.push(identity.department().to_owned());
    row.push(if payload.over_21() { YES } else { NO }.to_owned());
    row.extend(CarModel::ALL.into_iter().map(|model| {
        if payload.cars().contains(model) {
            SELECTED.to_owned()
        } else {
            String::new()
        }
    }));
    row.push(format_timestamp(record.updated_at));
    row
}

/// A single-sheet table: header plus data rows, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    name: String,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Build a table from explicit parts.
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// Project records, preserving their order, into the export layout.
    pub fn from_records(records: &[FormRecord]) -> Self {
        Self::new(
            SHEET_NAME,
            EXPORT_COLUMNS.iter().map(|&column| column.to_owned()).collect(),
            records.iter().map(project_record).collect(),
        )
    }

    /// Worksheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header cells.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
