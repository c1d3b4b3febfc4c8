//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module, connections come from a `bb8` pool via
//! `diesel-async`, and every database failure is mapped into the port's
//! typed error.
//!
//! # Example
//!
//! ```ignore
//! use form_intake::outbound::persistence::{DbPool, DieselFormRecordRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/forms")).await?;
//! let repository = DieselFormRecordRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_form_record_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_form_record_repository::DieselFormRecordRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
