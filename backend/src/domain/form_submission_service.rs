//! Deduplicating submission service.
//!
//! Implements [`FormSubmissionCommand`] on top of a [`FormRecordRepository`].
//! Normalisation and key derivation happen here; the insert-or-update choice
//! is delegated to the repository as a single atomic write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::{
    FormRecordDraft, FormRecordRepository, FormRecordRepositoryError, FormSubmissionCommand,
    SubmissionReceipt,
};
use crate::domain::{Error, FormSubmission};

/// Client-facing message when a submission cannot be stored.
pub const SAVE_FAILED_MESSAGE: &str = "could not save form submission";

/// Form submission service implementing the driving port.
#[derive(Clone)]
pub struct FormSubmissionService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FormSubmissionService<R> {
    /// Create a new service.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

fn map_repository_error(error: FormRecordRepositoryError) -> Error {
    let kind = match &error {
        FormRecordRepositoryError::Connection { .. } => "connection",
        FormRecordRepositoryError::Query { .. } => "query",
    };
    error!(error = %error, kind, "form submission write failed");
    Error::internal(SAVE_FAILED_MESSAGE).with_details(json!({
        "code": "store_error",
        "kind": kind,
        "error": error.to_string(),
    }))
}

#[async_trait]
impl<R> FormSubmissionCommand for FormSubmissionService<R>
where
    R: FormRecordRepository,
{
    async fn submit(&self, submission: FormSubmission) -> Result<SubmissionReceipt, Error> {
        let draft = FormRecordDraft::new(submission, Uuid::new_v4(), self.clock.utc());
        let outcome = self
            .repository
            .upsert(&draft)
            .await
            .map_err(map_repository_error)?;

        info!(
            record_id = %outcome.record_id,
            created = outcome.created,
            "form submission stored"
        );
        Ok(SubmissionReceipt {
            record_id: outcome.record_id,
            created: outcome.created,
        })
    }
}

#[cfg(test)]
#[path = "form_submission_service_tests.rs"]
mod tests;
