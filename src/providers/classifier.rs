// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image classifier trait definition

use async_trait::async_trait;

use super::types::{ClassifyOptions, ProviderError};
use crate::labels::CandidateLabel;

/// Trait for implementing image classification providers
///
/// Implementations must return labels in the provider's own order;
/// the selector relies on "first match wins".
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Detect labels in raw image bytes
    ///
    /// # Arguments
    /// * `image` - Encoded image bytes (PNG, JPEG, ...)
    /// * `options` - Maximum labels and minimum confidence
    async fn classify(
        &self,
        image: &[u8],
        options: &ClassifyOptions,
    ) -> Result<Vec<CandidateLabel>, ProviderError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}
