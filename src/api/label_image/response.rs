// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label image response types

use serde::{Deserialize, Serialize};

use crate::labels::LabeledImage;

/// Untranslated label as returned by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLabel {
    pub name: String,
    pub category: String,
}

/// Response from image labeling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelImageResponse {
    /// Label name in the target language
    pub name: String,
    /// Label category in the target language
    pub category: String,
    /// Floored confidence (0-100)
    pub confidence: u8,
    /// Original label in the source language
    pub english: SourceLabel,
}

impl From<LabeledImage> for LabelImageResponse {
    fn from(labeled: LabeledImage) -> Self {
        Self {
            name: labeled.translated_name,
            category: labeled.translated_category,
            confidence: labeled.label.confidence,
            english: SourceLabel {
                name: labeled.label.name,
                category: labeled.label.category,
            },
        }
    }
}
