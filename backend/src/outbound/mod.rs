//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed form record repository using Diesel.
//! - **spreadsheet**: `.xlsx` encoder for the export workbook.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod spreadsheet;
