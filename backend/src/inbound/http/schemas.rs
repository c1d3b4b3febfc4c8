//! OpenAPI mirrors of the domain error payload.
//!
//! The domain keeps `utoipa` out of its types; these shadows describe the
//! JSON that `ResponseError for Error` writes.

use utoipa::ToSchema;

/// Wire form of [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Body failed to parse or a field failed validation (400).
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Nothing to export yet (404).
    #[schema(rename = "not_found")]
    NotFound,
    /// Store or encoder failure (500).
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Wire form of [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "fields are read by the utoipa derive only")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "missing required field: nombre")]
    message: String,
    /// Same value as the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// `{field, code}` for validation failures; `value` is added for an
    /// unknown car model. Absent on internal errors.
    #[schema(example = json!({"field": "nombre", "code": "missing_field"}))]
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in ["invalid_request", "not_found", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "schema should use camelCase");
        assert!(schema_json.contains("details"));
    }
}
