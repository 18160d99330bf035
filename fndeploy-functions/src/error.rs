// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Handler error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejecting request");
        (self.status(), self.to_string()).into_response()
    }
}
