//! Form intake service: deduplicating form submissions stored in PostgreSQL
//! and exported as a single-sheet `.xlsx` workbook.
//!
//! Layout follows a hexagonal split: [`domain`] holds the rules and ports,
//! [`inbound`] adapts HTTP onto the driving ports, and [`outbound`]
//! implements the driven ports over Diesel and `rust_xlsxwriter`.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
