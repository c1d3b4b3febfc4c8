//! Cross-origin policy for the published front-ends.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Browser origins allowed to call the API.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "https://aljulio.github.io"];

/// Seconds a browser may cache a preflight answer.
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the CORS middleware: listed origins, `GET`/`POST`, `Content-Type` only.
pub fn cors_policy() -> Cors {
    ALLOWED_ORIGINS
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
