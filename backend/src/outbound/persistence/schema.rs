//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Submitted forms, one row per normalised identity triple.
    form_records (id) {
        /// Primary key: UUID v4 assigned on first submission.
        id -> Uuid,
        /// Hex SHA-256 of the normalised triple; unique.
        record_key -> Text,
        /// Given name as last submitted.
        first_name -> Text,
        /// Family name as last submitted.
        last_name -> Text,
        /// Department as last submitted.
        department -> Text,
        /// Lowercased, trimmed name.
        normalized_first_name -> Text,
        /// Lowercased, trimmed surname.
        normalized_last_name -> Text,
        /// Lowercased, trimmed department.
        normalized_department -> Text,
        /// Optional favourite sport.
        favorite_sport -> Nullable<Text>,
        /// Optional gender.
        gender -> Nullable<Text>,
        /// Declared 21 or older.
        over_21 -> Bool,
        car_vado -> Bool,
        car_chrysler -> Bool,
        car_toyota -> Bool,
        car_nissan -> Bool,
        /// First write.
        created_at -> Timestamptz,
        /// Most recent write.
        updated_at -> Timestamptz,
    }
}
