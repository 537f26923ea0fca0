// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod labeler;
pub mod languages;

pub use labeler::{AwsSettings, ConfigError, LabelerConfig};
pub use languages::{is_supported_language, LanguagePair, SUPPORTED_LANGUAGES};
