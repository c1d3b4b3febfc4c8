//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`FormSubmissionCommand`], [`FormExportQuery`]) are what the
//! HTTP adapter calls. Driven ports ([`FormRecordRepository`],
//! [`SpreadsheetWriter`]) are what the domain services call; each exposes a
//! typed error so adapters map failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod form_export_query;
mod form_record_repository;
mod form_submission_command;
mod spreadsheet_writer;

#[cfg(test)]
pub use form_export_query::MockFormExportQuery;
pub use form_export_query::{FixtureFormExportQuery, FormExportQuery, SpreadsheetExport};
#[cfg(test)]
pub use form_record_repository::MockFormRecordRepository;
pub use form_record_repository::{
    FormRecordDraft, FormRecordRepository, FormRecordRepositoryError, UpsertOutcome,
};
#[cfg(test)]
pub use form_submission_command::MockFormSubmissionCommand;
pub use form_submission_command::{
    FixtureFormSubmissionCommand, FormSubmissionCommand, SubmissionReceipt,
};
#[cfg(test)]
pub use spreadsheet_writer::MockSpreadsheetWriter;
pub use spreadsheet_writer::{SpreadsheetWriter, SpreadsheetWriterError};
