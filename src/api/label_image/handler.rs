// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label image endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::{debug, warn};

use super::request::{ImageUpload, UploadError};
use super::response::LabelImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /v1/label-image - Label an uploaded image
///
/// # Request
/// `multipart/form-data` carrying exactly one image file field.
///
/// # Response
/// - `name`, `category`: Selected label in the target language
/// - `confidence`: Floored confidence (0-100)
/// - `english`: Untranslated `name` and `category`
///
/// # Errors
/// All failures return 200 with `{ "error": string }`. Upload problems are
/// described; no-label and provider failures share one generic message.
pub async fn label_image_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<LabelImageResponse>, ApiError> {
    let multipart = multipart.map_err(|e| {
        warn!("Label request rejected: {}", e);
        ApiError::from(UploadError::NotMultipart(e.to_string()))
    })?;

    let upload = ImageUpload::from_multipart(multipart, state.max_upload_bytes)
        .await
        .map_err(|e| {
            warn!("Invalid image upload: {}", e);
            ApiError::from(e)
        })?;

    debug!(
        "Label request: file={:?}, type={}, {} bytes",
        upload.file_name,
        upload.content_type,
        upload.bytes.len()
    );

    let labeled = state
        .labeling_service
        .label_image(&upload.bytes)
        .await
        .map_err(|e| {
            warn!("Image labeling failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(LabelImageResponse::from(labeled)))
}

