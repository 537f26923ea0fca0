// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Translator trait definition

use async_trait::async_trait;

use super::types::ProviderError;
use crate::config::LanguagePair;

/// Trait for implementing text translation providers
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from the pair's source language to its target language
    ///
    /// Returns `ProviderError::EmptyResult` when the provider produces no text.
    async fn translate(&self, text: &str, languages: &LanguagePair)
        -> Result<String, ProviderError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}
