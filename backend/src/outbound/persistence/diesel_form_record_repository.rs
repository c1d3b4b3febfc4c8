//! PostgreSQL-backed `FormRecordRepository` implementation using Diesel ORM.
//!
//! Deduplication is a single `INSERT ... ON CONFLICT (record_key) DO UPDATE`
//! statement, so the database's unique index arbitrates concurrent
//! submissions of the same identity triple. The statement returns the id of
//! the surviving row; when it equals the draft's fresh candidate id the row
//! was inserted, otherwise an existing row was updated.
//!
//! Timestamps come from the database, not the draft: inserts take the column
//! defaults and updates set `updated_at = clock_timestamp()`. The update
//! expression is evaluated after the conflicting row is locked, so the write
//! that commits last also carries the latest `updated_at`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    FormRecordDraft, FormRecordRepository, FormRecordRepositoryError, UpsertOutcome,
};
use crate::domain::{CarModel, CarSelection, FormIdentity, FormPayload, FormRecord};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FormRecordRow, FormRecordUpdate, NewFormRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::form_records;

diesel::define_sql_function! {
    /// Wall-clock time at evaluation, unlike `now()` which is fixed per transaction.
    fn clock_timestamp() -> diesel::sql_types::Timestamptz;
}

/// Diesel-backed implementation of the `FormRecordRepository` port.
#[derive(Clone)]
pub struct DieselFormRecordRepository {
    pool: DbPool,
}

impl DieselFormRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FormRecordRepositoryError {
    map_basic_pool_error(error, |message| {
        FormRecordRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> FormRecordRepositoryError {
    map_basic_diesel_error(
        error,
        |message| FormRecordRepositoryError::query(message),
        |message| FormRecordRepositoryError::connection(message),
    )
}

fn car_flag(cars: &CarSelection, model: CarModel) -> bool {
    cars.contains(model)
}

/// Convert a database row to a domain `FormRecord`.
fn row_to_record(row: FormRecordRow) -> Result<FormRecord, FormRecordRepositoryError> {
    let identity = FormIdentity::new(&row.first_name, &row.last_name, &row.department)
        .map_err(|err| FormRecordRepositoryError::query(format!("invalid stored identity: {err}")))?;

    let flags = [
        (CarModel::Vado, row.car_vado),
        (CarModel::Chrysler, row.car_chrysler),
        (CarModel::Toyota, row.car_toyota),
        (CarModel::Nissan, row.car_nissan),
    ];
    let cars: CarSelection = flags
        .into_iter()
        .filter_map(|(model, selected)| selected.then_some(model))
        .collect();

    let payload = FormPayload::new(
        row.favorite_sport.as_deref(),
        row.gender.as_deref(),
        row.over_21,
        cars,
    )
    .map_err(|err| FormRecordRepositoryError::query(format!("invalid stored payload: {err}")))?;

    Ok(FormRecord {
        id: row.id,
        identity,
        payload,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl FormRecordRepository for DieselFormRecordRepository {
    async fn upsert(
        &self,
        draft: &FormRecordDraft,
    ) -> Result<UpsertOutcome, FormRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let identity = &draft.submission.identity;
        let payload = &draft.submission.payload;
        let normalized = identity.normalized();
        let cars = payload.cars();

        let new_row = NewFormRecordRow {
            id: draft.candidate_id,
            record_key: draft.key.as_str(),
            first_name: identity.name(),
            last_name: identity.surname(),
            department: identity.department(),
            normalized_first_name: normalized.name(),
            normalized_last_name: normalized.surname(),
            normalized_department: normalized.department(),
            favorite_sport: payload.favorite_sport(),
            gender: payload.gender(),
            over_21: payload.over_21(),
            car_vado: car_flag(cars, CarModel::Vado),
            car_chrysler: car_flag(cars, CarModel::Chrysler),
            car_toyota: car_flag(cars, CarModel::Toyota),
            car_nissan: car_flag(cars, CarModel::Nissan),
        };

        let update = FormRecordUpdate {
            first_name: identity.name(),
            last_name: identity.surname(),
            department: identity.department(),
            favorite_sport: payload.favorite_sport(),
            gender: payload.gender(),
            over_21: payload.over_21(),
            car_vado: new_row.car_vado,
            car_chrysler: new_row.car_chrysler,
            car_toyota: new_row.car_toyota,
            car_nissan: new_row.car_nissan,
        };

        let record_id: uuid::Uuid = diesel::insert_into(form_records::table)
            .values(&new_row)
            .on_conflict(form_records::record_key)
            .do_update()
            .set((&update, form_records::updated_at.eq(clock_timestamp())))
            .returning(form_records::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let created = record_id == draft.candidate_id;
        debug!(%record_id, created, "form record upserted");
        Ok(UpsertOutcome { record_id, created })
    }

    async fn list_ordered(&self) -> Result<Vec<FormRecord>, FormRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FormRecordRow> = form_records::table
            .select(FormRecordRow::as_select())
            .order((form_records::updated_at.asc(), form_records::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row mapping and error translation; SQL paths need a live database.

    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn row() -> FormRecordRow {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        FormRecordRow {
            id: Uuid::from_u128(7),
            first_name: "Ana".to_owned(),
            last_name: "Pérez".to_owned(),
            department: "Lima".to_owned(),
            favorite_sport: Some("fútbol".to_owned()),
            gender: None,
            over_21: true,
            car_vado: true,
            car_chrysler: false,
            car_toyota: true,
            car_nissan: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn row_maps_to_domain_record(row: FormRecordRow) {
        let record = row_to_record(row).expect("row maps");

        assert_eq!(record.id, Uuid::from_u128(7));
        assert_eq!(record.identity.surname(), "Pérez");
        assert_eq!(record.payload.favorite_sport(), Some("fútbol"));
        assert_eq!(record.payload.gender(), None);
        assert!(record.payload.over_21());
        let cars: Vec<_> = record.payload.cars().iter().collect();
        assert_eq!(cars, vec![CarModel::Vado, CarModel::Toyota]);
    }

    #[rstest]
    fn blank_stored_identity_is_a_query_error(mut row: FormRecordRow) {
        row.first_name = "   ".to_owned();

        let err = row_to_record(row).expect_err("blank name rejected");

        assert!(matches!(err, FormRecordRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_checkout_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, FormRecordRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, FormRecordRepositoryError::query("record not found"));
    }
}
