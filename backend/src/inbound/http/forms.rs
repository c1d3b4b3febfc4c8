//! Form submission handlers.
//!
//! ```text
//! POST /submit         {"nombre":"Ana","apellido":"Pérez","departamentoResidente":"Lima"}
//! POST /guardar-datos  (legacy alias)
//! ```
//!
//! The request DTO mirrors the published front-end's field names. English
//! aliases are accepted; any other key is rejected.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    CarSelection, FormIdentity, FormPayload, FormSubmission, FormValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{form_validation_error, malformed_body_error};

/// Largest accepted JSON body.
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// Confirmation message returned on every successful save.
pub const SUBMISSION_SAVED_MESSAGE: &str = "form submission saved";

/// Request body for `POST /submit`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FormSubmissionRequest {
    #[serde(default, alias = "name")]
    #[schema(example = "Ana")]
    pub nombre: Option<String>,
    #[serde(default, alias = "surname", alias = "lastName")]
    #[schema(example = "Pérez")]
    pub apellido: Option<String>,
    #[serde(
        default,
        rename = "departamentoResidente",
        alias = "department",
        alias = "departamento"
    )]
    #[schema(example = "Lima")]
    pub departamento_residente: Option<String>,
    #[serde(default, rename = "deporteFavorito", alias = "favoriteSport")]
    pub deporte_favorito: Option<String>,
    #[serde(default, alias = "gender")]
    pub genero: Option<String>,
    /// Absent means `false`.
    #[serde(default, rename = "mas21Anos", alias = "over21")]
    pub mas21_anos: Option<bool>,
    /// Car model key to selected flag; absent means nothing selected.
    #[serde(default, rename = "modelosCoches", alias = "cars")]
    #[schema(example = json!({"vado": true, "nissan": false}))]
    pub modelos_coches: Option<BTreeMap<String, bool>>,
}

impl TryFrom<FormSubmissionRequest> for FormSubmission {
    type Error = FormValidationError;

    fn try_from(value: FormSubmissionRequest) -> Result<Self, Self::Error> {
        let identity = FormIdentity::new(
            value.nombre.as_deref().unwrap_or_default(),
            value.apellido.as_deref().unwrap_or_default(),
            value.departamento_residente.as_deref().unwrap_or_default(),
        )?;
        let cars = CarSelection::from_flags(value.modelos_coches.unwrap_or_default())?;
        let payload = FormPayload::new(
            value.deporte_favorito.as_deref(),
            value.genero.as_deref(),
            value.mas21_anos.unwrap_or(false),
            cars,
        )?;
        Ok(Self { identity, payload })
    }
}

/// Response body for a stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FormSubmissionResponse {
    #[schema(example = "form submission saved")]
    pub message: String,
    /// Identifier of the inserted or updated record.
    pub id: Uuid,
    /// `true` when this submission created the record.
    pub created: bool,
}

/// JSON extractor settings: body limit and shared error payloads.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(|err, _req: &HttpRequest| {
            debug!(error = %err, "rejected form submission body");
            malformed_body_error(&err).into()
        })
}

/// Save a form, merging it into the record that shares its identity triple.
#[utoipa::path(
    post,
    path = "/submit",
    request_body = FormSubmissionRequest,
    responses(
        (status = 200, description = "Submission stored", body = FormSubmissionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["forms"],
    operation_id = "submitForm"
)]
pub async fn submit_form(
    state: web::Data<HttpState>,
    payload: web::Json<FormSubmissionRequest>,
) -> ApiResult<web::Json<FormSubmissionResponse>> {
    let submission =
        FormSubmission::try_from(payload.into_inner()).map_err(form_validation_error)?;
    let receipt = state.submissions.submit(submission).await?;
    Ok(web::Json(FormSubmissionResponse {
        message: SUBMISSION_SAVED_MESSAGE.to_owned(),
        id: receipt.record_id,
        created: receipt.created,
    }))
}

/// Register the submission routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/submit", "/guardar-datos"])
            .app_data(json_config())
            .route(web::post().to(submit_form)),
    );
}

#[cfg(test)]
#[path = "forms_tests.rs"]
mod tests;
