//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::form_records;

/// Row struct for reading from the form_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = form_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FormRecordRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub favorite_sport: Option<String>,
    pub gender: Option<String>,
    pub over_21: bool,
    pub car_vado: bool,
    pub car_chrysler: bool,
    pub car_toyota: bool,
    pub car_nissan: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for first submissions.
///
/// Timestamps are omitted so the column defaults stamp them.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = form_records)]
pub(crate) struct NewFormRecordRow<'a> {
    pub id: Uuid,
    pub record_key: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub department: &'a str,
    pub normalized_first_name: &'a str,
    pub normalized_last_name: &'a str,
    pub normalized_department: &'a str,
    pub favorite_sport: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub over_21: bool,
    pub car_vado: bool,
    pub car_chrysler: bool,
    pub car_toyota: bool,
    pub car_nissan: bool,
}

/// Changeset applied when the record key already exists.
///
/// Optional text columns are always written so a resubmission without a
/// sport clears the previous one. `updated_at` is set alongside it from the
/// database clock.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = form_records)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FormRecordUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub department: &'a str,
    pub favorite_sport: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub over_21: bool,
    pub car_vado: bool,
    pub car_chrysler: bool,
    pub car_toyota: bool,
    pub car_nissan: bool,
}
