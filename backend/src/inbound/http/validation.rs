//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::JsonPayloadError;
use serde_json::json;

use crate::domain::{Error, FormField, FormValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    FieldTooLong,
    InvalidCarModel,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::FieldTooLong => "field_too_long",
            ErrorCode::InvalidCarModel => "invalid_car_model",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Wire name of a form field in the JSON request body.
pub(crate) const fn wire_field(field: FormField) -> FieldName {
    FieldName::new(match field {
        FormField::Name => "nombre",
        FormField::Surname => "apellido",
        FormField::Department => "departamentoResidente",
        FormField::FavoriteSport => "deporteFavorito",
        FormField::Gender => "genero",
        FormField::CarModels => "modelosCoches",
    })
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn field_too_long_error(field: FieldName, max: usize) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be at most {max} characters"))
        .with_code(ErrorCode::FieldTooLong)
}

pub(crate) fn invalid_car_model_error(value: &str) -> Error {
    let field = wire_field(FormField::CarModels);
    let field = field.as_str();
    ValidationError::new(field, format!("{field} contains an unknown car model"))
        .with_value(ErrorCode::InvalidCarModel, value)
}

/// Translate a domain validation failure into a 400 payload naming the wire
/// field.
pub(crate) fn form_validation_error(error: FormValidationError) -> Error {
    match error {
        FormValidationError::Empty { field } => missing_field_error(wire_field(field)),
        FormValidationError::TooLong { field, max } => field_too_long_error(wire_field(field), max),
        FormValidationError::UnknownCarModel { value } => invalid_car_model_error(&value),
    }
}

/// Map a JSON extractor failure into the shared error payload.
///
/// The serde message is kept because it names the offending field or type
/// without echoing secrets.
pub(crate) fn malformed_body_error(error: &JsonPayloadError) -> Error {
    let message = match error {
        JsonPayloadError::Deserialize(err) => format!("request body is invalid: {err}"),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "request body is too large".to_owned()
        }
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        _ => "request body could not be read".to_owned(),
    };
    Error::invalid_request(message).with_details(json!({
        "code": ErrorCode::MalformedBody.as_str(),
    }))
}
