//! Driving port for accepting form submissions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, FormSubmission};

/// What the caller learns about a stored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Identifier of the record that now holds the submission.
    pub record_id: Uuid,
    /// `true` when no record existed for the identity triple.
    pub created: bool,
}

/// Use-case port behind `POST /submit`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormSubmissionCommand: Send + Sync {
    /// Store `submission`, merging into any record with the same identity triple.
    async fn submit(&self, submission: FormSubmission) -> Result<SubmissionReceipt, Error>;
}

/// Fixture that accepts everything and reports a fresh record.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFormSubmissionCommand;

#[async_trait]
impl FormSubmissionCommand for FixtureFormSubmissionCommand {
    async fn submit(&self, _submission: FormSubmission) -> Result<SubmissionReceipt, Error> {
        Ok(SubmissionReceipt {
            record_id: Uuid::nil(),
            created: true,
        })
    }
}
