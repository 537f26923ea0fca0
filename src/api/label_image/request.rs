// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image upload extraction and validation

use axum::body::Bytes;
use axum_extra::extract::Multipart;
use thiserror::Error;

/// Content type sent by clients that do not know the file type
const OCTET_STREAM: &str = "application/octet-stream";

/// Errors raised while reading the uploaded image
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("request must be multipart/form-data: {0}")]
    NotMultipart(String),

    #[error("malformed multipart body: {0}")]
    Malformed(String),

    #[error("exactly one image file is required, none was provided")]
    MissingFile,

    #[error("exactly one image file is required, more than one was provided")]
    MultipleFiles,

    #[error("image file is empty")]
    Empty,

    #[error("image is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("unsupported content type '{0}', expected an image")]
    UnsupportedType(String),
}

/// The single image file carried by a label request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Form field name
    pub field_name: Option<String>,
    /// Client-side file name
    pub file_name: Option<String>,
    /// Resolved image media type (e.g. `image/png`)
    pub content_type: String,
    /// Raw image bytes
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Read exactly one image file from a multipart body
    ///
    /// Text fields are ignored. A field counts as a file when it has a
    /// file name or an `image/*` content type.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_bytes: usize,
    ) -> Result<Self, UploadError> {
        let mut upload: Option<ImageUpload> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| UploadError::Malformed(e.to_string()))?
        {
            let file_name = field.file_name().map(str::to_string);
            let declared_type = field.content_type().map(str::to_string);
            let is_file = file_name.is_some() || declared_type.as_deref().is_some_and(is_image_type);

            if !is_file {
                continue;
            }

            if upload.is_some() {
                return Err(UploadError::MultipleFiles);
            }

            let field_name = field.name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| UploadError::Malformed(e.to_string()))?;
            let content_type = validate_image(declared_type.as_deref(), &bytes, max_bytes)?;

            upload = Some(ImageUpload {
                field_name,
                file_name,
                content_type,
                bytes,
            });
        }

        upload.ok_or(UploadError::MissingFile)
    }
}

/// Validate image bytes and resolve their media type
///
/// An `image/*` declared type is trusted. A missing or generic type is
/// resolved by sniffing the magic bytes.
pub fn validate_image(
    declared_type: Option<&str>,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<String, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }

    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge(bytes.len(), max_bytes));
    }

    match declared_type.map(|t| t.trim().to_lowercase()) {
        Some(t) if is_image_type(&t) => Ok(t),
        Some(t) if t != OCTET_STREAM => Err(UploadError::UnsupportedType(t)),
        _ => image::guess_format(bytes)
            .map(|format| format.to_mime_type().to_string())
            .map_err(|_| {
                UploadError::UnsupportedType(declared_type.unwrap_or("unknown").to_string())
            }),
    }
}

fn is_image_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}
