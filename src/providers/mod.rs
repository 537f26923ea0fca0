// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! External providers for image labeling and translation
//!
//! Both collaborators sit behind traits so the labeling service can be
//! driven by AWS in production and by in-process fakes in tests:
//! - `ImageClassifier` - AWS Rekognition `DetectLabels`
//! - `Translator` - AWS Translate `TranslateText`
//!
//! Clients are built once at startup from environment credentials and
//! shared read-only across requests.

pub mod aws;
pub mod aws_translate;
pub mod classifier;
pub mod rekognition;
pub mod translator;
pub mod types;

pub use aws::load_sdk_config;
pub use aws_translate::AwsTranslator;
pub use classifier::ImageClassifier;
pub use rekognition::RekognitionClassifier;
pub use translator::Translator;
pub use types::{ClassifyOptions, ProviderError};
