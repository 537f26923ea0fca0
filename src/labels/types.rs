// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label types shared by the classifier, the selector and the API

use serde::{Deserialize, Serialize};

/// Bounding box of a detected instance, as ratios of the image size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

/// A concrete, localized detection of a labeled object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Coarser grouping attached to a label by the classifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LabelCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// One classification result as returned by an image classifier
///
/// Order of `categories` and `instances` is the provider's order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateLabel {
    #[serde(default)]
    pub name: Option<String>,
    /// Confidence score (0-100)
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub categories: Vec<LabelCategory>,
    #[serde(default)]
    pub instances: Vec<LabelInstance>,
}

impl CandidateLabel {
    /// Create a label with a name and confidence and no categories or instances
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: Some(name.into()),
            confidence: Some(confidence),
            categories: Vec::new(),
            instances: Vec::new(),
        }
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(LabelCategory::named(name));
        self
    }

    pub fn with_instance(mut self, instance: LabelInstance) -> Self {
        self.instances.push(instance);
        self
    }

    /// Whether the label refers to a located object rather than a scene tag
    pub fn has_instances(&self) -> bool {
        !self.instances.is_empty()
    }

    /// Name of the first category, if any
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().and_then(|c| c.name.as_deref())
    }
}

/// The single label picked for an image, normalized for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedLabel {
    pub name: String,
    pub category: String,
    /// Floored confidence (0-100)
    pub confidence: u8,
}

impl From<&CandidateLabel> for SelectedLabel {
    fn from(label: &CandidateLabel) -> Self {
        Self {
            name: label.name.clone().unwrap_or_default(),
            category: label.primary_category().unwrap_or_default().to_string(),
            confidence: floor_confidence(label.confidence),
        }
    }
}

/// Floor a provider confidence into the 0-100 integer range
///
/// NaN saturates to 0 through the float-to-int cast.
pub fn floor_confidence(confidence: Option<f32>) -> u8 {
    confidence
        .map(|c| c.floor().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}
