// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir Image Labeler

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-label-selection-2025-10-18";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-18";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "multipart-upload",
    "rekognition-labels",
    "configurable-selection-policy",
    "aws-translate",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Image Labeler {} ({})", VERSION_NUMBER, BUILD_DATE)
}
