// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Labeling service orchestration
//!
//! Coordinates one request: classify the image, pick a label, translate
//! its name and category.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::selector::SelectionPolicy;
use super::types::SelectedLabel;
use crate::config::{LabelerConfig, LanguagePair};
use crate::providers::{ClassifyOptions, ImageClassifier, ProviderError, Translator};

/// Which label field a translation was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Name,
    Category,
}

impl std::fmt::Display for LabelField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelField::Name => f.write_str("name"),
            LabelField::Category => f.write_str("category"),
        }
    }
}

/// Errors that can occur while labeling an image
#[derive(Debug, Error)]
pub enum LabelingError {
    /// The classifier returned no candidate labels
    #[error("No label detected in image")]
    NoLabel,

    /// The classification provider call failed
    #[error("Classification failed: {0}")]
    Classification(#[source] ProviderError),

    /// A translation call failed or produced no text
    #[error("Translation of label {field} failed: {source}")]
    Translation {
        field: LabelField,
        #[source]
        source: ProviderError,
    },
}

/// Result of labeling one image
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledImage {
    /// Selected label in the source language
    pub label: SelectedLabel,
    /// `label.name` in the target language
    pub translated_name: String,
    /// `label.category` in the target language
    pub translated_category: String,
    /// Wall-clock time for the whole request
    pub processing_time_ms: u64,
}

/// Service that turns an image into one translated label
pub struct LabelingService {
    classifier: Arc<dyn ImageClassifier>,
    translator: Arc<dyn Translator>,
    policy: SelectionPolicy,
    options: ClassifyOptions,
    languages: LanguagePair,
}

impl LabelingService {
    pub fn new(
        classifier: Arc<dyn ImageClassifier>,
        translator: Arc<dyn Translator>,
        policy: SelectionPolicy,
        options: ClassifyOptions,
        languages: LanguagePair,
    ) -> Self {
        Self {
            classifier,
            translator,
            policy,
            options,
            languages,
        }
    }

    /// Create a service using the policy, options and languages from configuration
    pub fn from_config(
        config: &LabelerConfig,
        classifier: Arc<dyn ImageClassifier>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self::new(
            classifier,
            translator,
            config.selection.clone(),
            config.classify,
            config.languages.clone(),
        )
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Classify an image, select one label and translate it
    pub async fn label_image(&self, image: &[u8]) -> Result<LabeledImage, LabelingError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        debug!(
            "[{}] Classifying {} bytes with {}",
            request_id,
            image.len(),
            self.classifier.name()
        );

        let candidates = self
            .classifier
            .classify(image, &self.options)
            .await
            .map_err(|e| {
                warn!("[{}] Classifier {} failed: {}", request_id, self.classifier.name(), e);
                LabelingError::Classification(e)
            })?;

        debug!("[{}] {} candidate labels", request_id, candidates.len());

        let label = self.policy.select(&candidates).ok_or_else(|| {
            warn!("[{}] No label detected", request_id);
            LabelingError::NoLabel
        })?;

        debug!(
            "[{}] Selected '{}' ({}) at {}%",
            request_id, label.name, label.category, label.confidence
        );

        let (translated_name, translated_category) = tokio::try_join!(
            self.translate_field(LabelField::Name, &label.name),
            self.translate_field(LabelField::Category, &label.category),
        )
        .map_err(|e| {
            warn!("[{}] {}", request_id, e);
            e
        })?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "[{}] Labeled image as '{}' -> '{}' ({}%, {}) in {}ms",
            request_id,
            label.name,
            translated_name,
            label.confidence,
            self.languages,
            processing_time_ms
        );

        Ok(LabeledImage {
            label,
            translated_name,
            translated_category,
            processing_time_ms,
        })
    }

    /// Translate one field; empty fields and identity pairs skip the provider
    async fn translate_field(&self, field: LabelField, text: &str) -> Result<String, LabelingError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        if self.languages.is_identity() {
            return Ok(text.to_string());
        }

        self.translator
            .translate(text, &self.languages)
            .await
            .map_err(|source| LabelingError::Translation { field, source })
    }
}
