//! Port for form record persistence.
//!
//! The repository owns the deduplication guarantee: [`FormRecordRepository::upsert`]
//! must insert-or-update keyed on the draft's [`RecordKey`] as one atomic
//! operation, so concurrent submissions of the same identity triple can never
//! produce two records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{FormRecord, FormSubmission, RecordKey};

use super::define_port_error;

define_port_error! {
    /// Errors raised by form record repository adapters.
    pub enum FormRecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "form record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "form record repository query failed: {message}",
    }
}

/// Everything the store needs to apply one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecordDraft {
    /// Deduplication key derived from the identity triple.
    pub key: RecordKey,
    /// Identifier used only if the write creates a new record.
    pub candidate_id: Uuid,
    /// The validated submission.
    pub submission: FormSubmission,
    /// Service-clock time of the submission. Stores without a clock of their
    /// own stamp `updated_at` (and `created_at` on insert) with it; the
    /// PostgreSQL adapter uses the database clock instead.
    pub submitted_at: DateTime<Utc>,
}

impl FormRecordDraft {
    /// Build a draft, deriving the record key from the submission identity.
    pub fn new(submission: FormSubmission, candidate_id: Uuid, submitted_at: DateTime<Utc>) -> Self {
        Self {
            key: submission.identity.record_key(),
            candidate_id,
            submission,
            submitted_at,
        }
    }
}

/// Result of a deduplicating upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Identifier of the inserted or updated record.
    pub record_id: Uuid,
    /// `true` when the write inserted a new record.
    pub created: bool,
}

/// Port for form record storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormRecordRepository: Send + Sync {
    /// Insert a new record or overwrite the one sharing `draft.key`.
    ///
    /// On update the payload, display identity, and `updated_at` are replaced;
    /// the record id and `created_at` are kept.
    async fn upsert(&self, draft: &FormRecordDraft)
    -> Result<UpsertOutcome, FormRecordRepositoryError>;

    /// Every record, ascending by `updated_at` then id.
    async fn list_ordered(&self) -> Result<Vec<FormRecord>, FormRecordRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarSelection, FormIdentity, FormPayload};
    use rstest::rstest;

    #[rstest]
    fn draft_key_matches_identity_key() {
        let submission = FormSubmission {
            identity: FormIdentity::new("Ana ", "Pérez", "LIMA").expect("valid identity"),
            payload: FormPayload::new(None, None, false, CarSelection::default())
                .expect("valid payload"),
        };
        let expected = FormIdentity::new("ana", "pérez", "lima")
            .expect("valid identity")
            .record_key();

        let draft = FormRecordDraft::new(submission, Uuid::nil(), Utc::now());

        assert_eq!(draft.key, expected);
    }

    #[rstest]
    fn error_constructors_format_messages() {
        let err = FormRecordRepositoryError::connection("pool timed out");
        assert_eq!(
            err.to_string(),
            "form record repository connection failed: pool timed out"
        );
    }
}
