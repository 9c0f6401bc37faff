//! API module for ORS Monitor
//!
//! HTTP surface of the scoring server: `/api/calculate-ors` and
//! `/api/research/cases`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::core::ScoringError;

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::configure;

/// Errors returned to API callers as `{"error": "..."}` with status 400.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Payload(String),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
