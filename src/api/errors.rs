// Copyright (c) 2025 - Cowboy AI, Inc.
//! Mapping of composite failures to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::{CompositeError, HttpErrorInfo};

/// A terminal failure of one request, rendered as [`HttpErrorInfo`]
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    path: String,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
            message: message.into(),
        }
    }

    /// NotFound 404, InvalidInput 422, Transient and publish failures 500
    pub fn from_composite(error: CompositeError, path: impl Into<String>) -> Self {
        let status = match &error {
            CompositeError::NotFound(_) => StatusCode::NOT_FOUND,
            CompositeError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CompositeError::Transient(_) | CompositeError::Publish(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, path, error.to_string())
    }

    pub fn bad_request(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, path, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = HttpErrorInfo::new(self.status.as_u16(), self.path, self.message);
        (self.status, Json(body)).into_response()
    }
}
