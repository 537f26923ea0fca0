// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod labels;
pub mod providers;
pub mod version;

pub use api::{create_app, AppState};
pub use config::{LabelerConfig, LanguagePair};
pub use labels::{CandidateLabel, LabelingError, LabelingService, SelectedLabel, SelectionPolicy};
pub use providers::{ClassifyOptions, ImageClassifier, ProviderError, Translator};
