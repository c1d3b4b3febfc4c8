//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the submission, export, and health paths plus the
//! schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe domain
//! errors without coupling domain types to utoipa. Swagger UI serves the
//! document at `/docs` in debug builds.

use crate::inbound::http::forms::{FormSubmissionRequest, FormSubmissionResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Form intake API",
        description = "Deduplicating form submission and spreadsheet export."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::forms::submit_form,
        crate::inbound::http::export::export_forms,
        crate::inbound::http::health::banner,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        FormSubmissionRequest,
        FormSubmissionResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "forms", description = "Form submission and export"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
