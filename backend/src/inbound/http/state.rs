//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureFormExportQuery, FixtureFormSubmissionCommand, FormExportQuery, FormSubmissionCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Deduplicating submission use-case.
    pub submissions: Arc<dyn FormSubmissionCommand>,
    /// Spreadsheet export use-case.
    pub exports: Arc<dyn FormExportQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        submissions: Arc<dyn FormSubmissionCommand>,
        exports: Arc<dyn FormExportQuery>,
    ) -> Self {
        Self {
            submissions,
            exports,
        }
    }

    /// State backed by fixture ports that touch no infrastructure.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureFormSubmissionCommand),
            Arc::new(FixtureFormExportQuery),
        )
    }
}
