// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label image API endpoint module
//!
//! Provides POST /v1/label-image for labeling an uploaded image.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::label_image_handler;
pub use request::{validate_image, ImageUpload, UploadError};
pub use response::{LabelImageResponse, SourceLabel};
