// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image labeling
//!
//! Turns classifier output into a single translated label:
//! - `types` - candidate and selected label records
//! - `selector` - ordered rule chain picking one candidate
//! - `service` - classify, select, translate for one request

pub mod selector;
pub mod service;
pub mod types;

pub use selector::{PolicyError, SelectionPolicy, SelectionRule};
pub use service::{LabelField, LabeledImage, LabelingError, LabelingService};
pub use types::{
    floor_confidence, BoundingBox, CandidateLabel, LabelCategory, LabelInstance, SelectedLabel,
};
