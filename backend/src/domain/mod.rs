//! Domain primitives, services, and ports.
//!
//! Purpose: hold the form-intake rules (identity normalisation, deduplicating
//! upsert, export projection) independent of HTTP, PostgreSQL, or the xlsx
//! encoder.
//!
//! Public surface:
//! - [`FormSubmission`] / [`FormRecord`]: validated input and stored record.
//! - [`NormalizedKey`] / [`RecordKey`]: deduplication key and its store form.
//! - [`SheetTable`]: the fixed export layout.
//! - [`FormSubmissionService`] / [`FormExportService`]: driving port
//!   implementations.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod error;
pub mod export_sheet;
pub mod form_export_service;
pub mod form_record;
pub mod form_submission_service;
pub mod ports;
pub mod record_key;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::export_sheet::{
    EXPORT_COLUMNS, EXPORT_FILE_NAME, SHEET_NAME, SheetTable, format_timestamp, project_record,
};
pub use self::form_export_service::{EXPORT_FAILED_MESSAGE, FormExportService, NO_RECORDS_MESSAGE};
pub use self::form_record::{
    CarModel, CarSelection, FormField, FormIdentity, FormPayload, FormRecord, FormSubmission,
    FormValidationError, MAX_FIELD_CHARS,
};
pub use self::form_submission_service::{FormSubmissionService, SAVE_FAILED_MESSAGE};
pub use self::record_key::{NormalizedKey, RecordKey};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
