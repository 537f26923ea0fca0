// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration loaded from environment variables

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::languages::{LanguagePair, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE};
use crate::labels::selector::{PolicyError, SelectionPolicy, DEFAULT_HIGH_CONFIDENCE_THRESHOLD};
use crate::providers::types::{ClassifyOptions, DEFAULT_MAX_LABELS, DEFAULT_MIN_CONFIDENCE};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SELECTION_RULES: &str = "high-confidence,instance,first";

/// Rekognition accepts at most 5MB of raw image bytes
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Upper bound on labels per classification call
const MAX_LABELS_LIMIT: i32 = 1000;

/// Errors raised while loading configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid selection policy: {0}")]
    Policy(#[from] PolicyError),
}

/// Credentials and region for the AWS providers
#[derive(Clone, Default)]
pub struct AwsSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration for the image labeler service
#[derive(Debug, Clone)]
pub struct LabelerConfig {
    /// Bind address for the HTTP server
    pub host: String,
    /// Bind port for the HTTP server
    pub port: u16,
    /// Provider credentials
    pub aws: AwsSettings,
    /// Translation source and target
    pub languages: LanguagePair,
    /// Parameters sent with every classification call
    pub classify: ClassifyOptions,
    /// Rule chain used to pick one label
    pub selection: SelectionPolicy,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

impl LabelerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let aws = AwsSettings {
            region: required(&lookup, "AWS_REGION")?,
            access_key_id: required(&lookup, "AWS_ACCESS_KEY_ID")?,
            secret_access_key: required(&lookup, "AWS_SECRET_ACCESS_KEY")?,
            session_token: optional(&lookup, "AWS_SESSION_TOKEN"),
        };

        let threshold = parse_or(
            &lookup,
            "HIGH_CONFIDENCE_THRESHOLD",
            DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
        )?;
        let rules = optional(&lookup, "LABEL_SELECTION_RULES")
            .unwrap_or_else(|| DEFAULT_SELECTION_RULES.to_string());

        let config = Self {
            host: optional(&lookup, "LABELER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            aws,
            languages: LanguagePair::new(
                optional(&lookup, "SOURCE_LANGUAGE")
                    .unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string()),
                optional(&lookup, "TARGET_LANGUAGE")
                    .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
            ),
            classify: ClassifyOptions {
                max_labels: parse_or(&lookup, "MAX_LABELS", DEFAULT_MAX_LABELS)?,
                min_confidence: parse_or(&lookup, "MIN_CONFIDENCE", DEFAULT_MIN_CONFIDENCE)?,
            },
            selection: SelectionPolicy::parse(&rules, threshold)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aws.region.is_empty() {
            return Err(ConfigError::Missing("AWS_REGION"));
        }
        if self.aws.access_key_id.is_empty() {
            return Err(ConfigError::Missing("AWS_ACCESS_KEY_ID"));
        }
        if self.aws.secret_access_key.is_empty() {
            return Err(ConfigError::Missing("AWS_SECRET_ACCESS_KEY"));
        }

        if let Err(reason) = self.languages.validate() {
            return Err(ConfigError::Invalid {
                var: "SOURCE_LANGUAGE/TARGET_LANGUAGE",
                value: self.languages.to_string(),
                reason,
            });
        }

        if self.classify.max_labels < 1 || self.classify.max_labels > MAX_LABELS_LIMIT {
            return Err(ConfigError::Invalid {
                var: "MAX_LABELS",
                value: self.classify.max_labels.to_string(),
                reason: format!("must be between 1 and {}", MAX_LABELS_LIMIT),
            });
        }

        if !(0.0..=100.0).contains(&self.classify.min_confidence) {
            return Err(ConfigError::Invalid {
                var: "MIN_CONFIDENCE",
                value: self.classify.min_confidence.to_string(),
                reason: "must be between 0 and 100".to_string(),
            });
        }

        if self.max_upload_bytes == 0 || self.max_upload_bytes > DEFAULT_MAX_UPLOAD_BYTES {
            return Err(ConfigError::Invalid {
                var: "MAX_UPLOAD_BYTES",
                value: self.max_upload_bytes.to_string(),
                reason: format!("must be between 1 and {}", DEFAULT_MAX_UPLOAD_BYTES),
            });
        }

        Ok(())
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            aws: AwsSettings::default(),
            languages: LanguagePair::default(),
            classify: ClassifyOptions::default(),
            selection: SelectionPolicy::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional(lookup, key) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
