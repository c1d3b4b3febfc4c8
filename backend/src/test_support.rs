//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for `cfg(test)` and the `test-support` feature.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{
    FormRecordDraft, FormRecordRepository, FormRecordRepositoryError, UpsertOutcome,
};
use crate::domain::{FormRecord, RecordKey};

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// In-process [`FormRecordRepository`] keyed by [`RecordKey`].
///
/// The whole upsert runs under one lock, giving the same single-write
/// guarantee as the PostgreSQL adapter's conflict-checked insert.
#[derive(Default)]
pub struct InMemoryFormRecordRepository {
    records: Mutex<HashMap<RecordKey, FormRecord>>,
}

impl InMemoryFormRecordRepository {
    /// Seed the repository with existing records.
    pub fn with_records(records: impl IntoIterator<Item = FormRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.identity.record_key(), record))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    /// Whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.lock_records().is_empty()
    }

    fn lock_records(&self) -> MutexGuard<'_, HashMap<RecordKey, FormRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl FormRecordRepository for InMemoryFormRecordRepository {
    async fn upsert(
        &self,
        draft: &FormRecordDraft,
    ) -> Result<UpsertOutcome, FormRecordRepositoryError> {
        let mut records = self.lock_records();
        let submission = draft.submission.clone();
        if let Some(existing) = records.get_mut(&draft.key) {
            existing.identity = submission.identity;
            existing.payload = submission.payload;
            existing.updated_at = draft.submitted_at;
            return Ok(UpsertOutcome {
                record_id: existing.id,
                created: false,
            });
        }

        records.insert(
            draft.key.clone(),
            FormRecord {
                id: draft.candidate_id,
                identity: submission.identity,
                payload: submission.payload,
                created_at: draft.submitted_at,
                updated_at: draft.submitted_at,
            },
        );
        Ok(UpsertOutcome {
            record_id: draft.candidate_id,
            created: true,
        })
    }

    async fn list_ordered(&self) -> Result<Vec<FormRecord>, FormRecordRepositoryError> {
        let mut records: Vec<_> = self.lock_records().values().cloned().collect();
        records.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }
}
