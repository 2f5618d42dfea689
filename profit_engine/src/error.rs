//! Error types for the service shell.
//!
//! The estimator itself is total and never returns an error.
//! [`ApiError`] covers request handling and maps onto HTTP responses;
//! [`ConfigError`] covers startup configuration and never reaches a
//! client.

use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a socket address: {value}")]
    InvalidBindAddr { key: &'static str, value: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ScenarioNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(serde_json::json!({"error": self.to_string()}));
        (self.status_code(), body).into_response()
    }
}
