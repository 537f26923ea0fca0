// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::label_image::UploadError;
use crate::labels::LabelingError;

/// Error payload returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Externally visible error kinds
///
/// Every failure is delivered with a 200 status and an `{ "error": string }`
/// body. Labeling failures share one generic message; provider detail is
/// only logged server-side.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    InvalidUpload(String),
    LabelingFailed,
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::InvalidUpload(msg) => format!("Invalid image upload: {}", msg),
            ApiError::LabelingFailed => "Image labeling failed".to_string(),
        };

        ErrorResponse { error }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_response().error)
    }
}

impl std::error::Error for ApiError {}

impl From<LabelingError> for ApiError {
    fn from(error: LabelingError) -> Self {
        match error {
            LabelingError::NoLabel
            | LabelingError::Translation { .. }
            | LabelingError::Classification(_) => ApiError::LabelingFailed,
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        ApiError::InvalidUpload(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
