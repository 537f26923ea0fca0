// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared types for external labeling and translation providers

use thiserror::Error;

/// Default maximum number of labels requested from the classifier
pub const DEFAULT_MAX_LABELS: i32 = 5;

/// Default minimum confidence (0-100) for a label to be returned
pub const DEFAULT_MIN_CONFIDENCE: f32 = 50.0;

/// Tunable parameters sent with every classification call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifyOptions {
    /// Maximum number of labels to return
    pub max_labels: i32,
    /// Minimum confidence for a label to be included
    pub min_confidence: f32,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_labels: DEFAULT_MAX_LABELS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Errors that can occur when calling an external provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider call failed (network, auth, quota, service error)
    #[error("{provider} request failed: {message}")]
    Request {
        /// Name of the provider
        provider: String,
        /// Error detail from the provider SDK
        message: String,
    },

    /// The provider answered but produced nothing usable
    #[error("{provider} returned an empty result")]
    EmptyResult {
        /// Name of the provider
        provider: String,
    },

    /// The input was rejected before calling the provider
    #[error("Invalid input for {provider}: {reason}")]
    InvalidInput {
        /// Name of the provider
        provider: String,
        /// Reason the input is invalid
        reason: String,
    },
}

impl ProviderError {
    pub fn request(provider: &str, message: impl Into<String>) -> Self {
        ProviderError::Request {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn empty_result(provider: &str) -> Self {
        ProviderError::EmptyResult {
            provider: provider.to_string(),
        }
    }

    pub fn invalid_input(provider: &str, reason: impl Into<String>) -> Self {
        ProviderError::InvalidInput {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }
}
