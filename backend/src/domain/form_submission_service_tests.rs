//! Tests for the form submission service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockFormRecordRepository, UpsertOutcome};
use crate::domain::{CarSelection, ErrorCode, FormIdentity, FormPayload};
use crate::test_support::{InMemoryFormRecordRepository, MutableClock};

fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn submission(name: &str, surname: &str, department: &str, sport: &str) -> FormSubmission {
    FormSubmission {
        identity: FormIdentity::new(name, surname, department).expect("valid identity"),
        payload: FormPayload::new(Some(sport), None, true, CarSelection::default())
            .expect("valid payload"),
    }
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    Arc::new(MutableClock::new(submitted_at()))
}

#[rstest]
#[tokio::test]
async fn submit_passes_key_and_clock_to_repository(clock: Arc<dyn Clock>) {
    let expected_key = FormIdentity::new("ana", "pérez", "lima")
        .expect("valid identity")
        .record_key();
    let mut repo = MockFormRecordRepository::new();
    repo.expect_upsert()
        .withf(move |draft| draft.key == expected_key && draft.submitted_at == submitted_at())
        .times(1)
        .returning(|draft| {
            Ok(UpsertOutcome {
                record_id: draft.candidate_id,
                created: true,
            })
        });

    let service = FormSubmissionService::new(Arc::new(repo), clock);
    let receipt = service
        .submit(submission(" Ana", "PÉREZ ", "Lima", "fútbol"))
        .await
        .expect("submission succeeds");

    assert!(receipt.created);
}

#[rstest]
#[tokio::test]
async fn submit_reports_existing_record_on_update(clock: Arc<dyn Clock>) {
    let existing = Uuid::new_v4();
    let mut repo = MockFormRecordRepository::new();
    repo.expect_upsert().times(1).returning(move |_| {
        Ok(UpsertOutcome {
            record_id: existing,
            created: false,
        })
    });

    let service = FormSubmissionService::new(Arc::new(repo), clock);
    let receipt = service
        .submit(submission("Ana", "Pérez", "Lima", "vóley"))
        .await
        .expect("submission succeeds");

    assert_eq!(
        receipt,
        SubmissionReceipt {
            record_id: existing,
            created: false
        }
    );
}

#[rstest]
#[case(FormRecordRepositoryError::connection("pool timed out"), "connection")]
#[case(FormRecordRepositoryError::query("constraint violated"), "query")]
#[tokio::test]
async fn store_failures_map_to_generic_internal_error(
    clock: Arc<dyn Clock>,
    #[case] failure: FormRecordRepositoryError,
    #[case] kind: &str,
) {
    let mut repo = MockFormRecordRepository::new();
    repo.expect_upsert()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = FormSubmissionService::new(Arc::new(repo), clock);
    let error = service
        .submit(submission("Ana", "Pérez", "Lima", "fútbol"))
        .await
        .expect_err("store failure surfaces");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), SAVE_FAILED_MESSAGE);
    let details = error.details().expect("details recorded for logs");
    assert_eq!(details["kind"], kind);
}

#[rstest]
#[tokio::test]
async fn resubmission_with_different_spelling_updates_single_record(clock: Arc<dyn Clock>) {
    let repo = Arc::new(InMemoryFormRecordRepository::default());
    let service = FormSubmissionService::new(repo.clone(), clock);

    let first = service
        .submit(submission("Ana ", "Pérez", "Lima", "fútbol"))
        .await
        .expect("first submission");
    let second = service
        .submit(submission("ana", " PÉREZ", "LIMA ", "vóley"))
        .await
        .expect("second submission");

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.record_id, second.record_id);

    let records = repo.list_ordered().await.expect("list succeeds");
    assert_eq!(records.len(), 1);
    let record = records.first().expect("one record");
    assert_eq!(record.payload.favorite_sport(), Some("vóley"));
}

#[rstest]
#[tokio::test]
async fn distinct_triples_create_distinct_records(clock: Arc<dyn Clock>) {
    let repo = Arc::new(InMemoryFormRecordRepository::default());
    let service = FormSubmissionService::new(repo.clone(), clock);

    let a = service
        .submit(submission("Ana", "Pérez", "Lima", "fútbol"))
        .await
        .expect("first submission");
    let b = service
        .submit(submission("Ana", "Pérez", "Cusco", "fútbol"))
        .await
        .expect("second submission");

    assert!(a.created && b.created);
    assert_ne!(a.record_id, b.record_id);
    assert_eq!(repo.list_ordered().await.expect("list succeeds").len(), 2);
}
