//! HTTP inbound adapter exposing REST endpoints.

pub mod cors;
pub mod error;
pub mod export;
pub mod forms;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every form-intake route: banner, health checks, submit, and export.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>` and
/// wrap the app with tracing and CORS middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::banner)
        .service(health::ready)
        .service(health::live);
    forms::configure(cfg);
    export::configure(cfg);
}
