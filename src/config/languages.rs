// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Translation language configuration

use std::fmt;

/// Language codes accepted by the translation provider
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "am", "ar", "az", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "es",
    "es-MX", "et", "fa", "fa-AF", "fi", "fr", "fr-CA", "ga", "gu", "ha", "he", "hi", "hr", "ht",
    "hu", "hy", "id", "is", "it", "ja", "ka", "kk", "kn", "ko", "lt", "lv", "mk", "ml", "mn",
    "mr", "ms", "mt", "nl", "no", "pa", "pl", "ps", "pt", "pt-PT", "ro", "ru", "si", "sk", "sl",
    "so", "sq", "sr", "sv", "sw", "ta", "te", "th", "tl", "tr", "uk", "ur", "uz", "vi", "zh",
    "zh-TW",
];

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";
pub const DEFAULT_TARGET_LANGUAGE: &str = "ja";

/// Whether a language code is accepted by the translation provider
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// Fixed source/target language pair used for every translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Validate both codes against the supported list
    pub fn validate(&self) -> Result<(), String> {
        for (field, code) in [("source", &self.source), ("target", &self.target)] {
            if !is_supported_language(code) {
                return Err(format!("unsupported {} language '{}'", field, code));
            }
        }
        Ok(())
    }

    /// Translating would be a no-op
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}
