//! Domain errors rendered as JSON HTTP responses.
//!
//! Every error response echoes the request's `trace-id` header when the error
//! carries one, and is marked `no-store` so a proxy never replays a failed
//! export as if it were the workbook. Internal errors lose their `details`
//! before serialisation; the raw cause has already been logged by the
//! service that produced it.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for form and export handlers.
pub type ApiResult<T> = Result<T, Error>;

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidRequest => Self::BAD_REQUEST,
            ErrorCode::NotFound => Self::NOT_FOUND,
            ErrorCode::InternalError => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The payload a client is allowed to see for `error`.
fn client_payload(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => error.clone().without_details(),
        ErrorCode::InvalidRequest | ErrorCode::NotFound => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().into()
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        response.insert_header((header::CACHE_CONTROL, "no-store"));
        if let Some(trace_id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_owned()));
        }
        response.json(client_payload(self))
    }
}
