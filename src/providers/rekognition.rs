// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AWS Rekognition image classifier
//!
//! Calls `DetectLabels` with the raw image bytes and maps each returned
//! label into a `CandidateLabel`, keeping the provider's order.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{self as rekognition, Image};
use aws_sdk_rekognition::Client;
use tracing::debug;

use super::classifier::ImageClassifier;
use super::types::{ClassifyOptions, ProviderError};
use crate::labels::{BoundingBox, CandidateLabel, LabelCategory, LabelInstance};

const PROVIDER_NAME: &str = "rekognition";

/// Image classifier backed by AWS Rekognition
pub struct RekognitionClassifier {
    client: Client,
}

impl RekognitionClassifier {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageClassifier for RekognitionClassifier {
    async fn classify(
        &self,
        image: &[u8],
        options: &ClassifyOptions,
    ) -> Result<Vec<CandidateLabel>, ProviderError> {
        if image.is_empty() {
            return Err(ProviderError::invalid_input(PROVIDER_NAME, "image is empty"));
        }

        let output = self
            .client
            .detect_labels()
            .image(Image::builder().bytes(Blob::new(image.to_vec())).build())
            .max_labels(options.max_labels)
            .min_confidence(options.min_confidence)
            .send()
            .await
            .map_err(|e| ProviderError::request(PROVIDER_NAME, DisplayErrorContext(&e).to_string()))?;

        let labels: Vec<CandidateLabel> = output.labels().iter().map(candidate_from_label).collect();
        debug!("Rekognition returned {} labels", labels.len());

        Ok(labels)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

fn candidate_from_label(label: &rekognition::Label) -> CandidateLabel {
    CandidateLabel {
        name: label.name().map(str::to_string),
        confidence: label.confidence(),
        categories: label
            .categories()
            .iter()
            .map(|c| LabelCategory {
                name: c.name().map(str::to_string),
            })
            .collect(),
        instances: label
            .instances()
            .iter()
            .map(|i| LabelInstance {
                bounding_box: i.bounding_box().map(bounding_box_from),
                confidence: i.confidence(),
            })
            .collect(),
    }
}

fn bounding_box_from(b: &rekognition::BoundingBox) -> BoundingBox {
    BoundingBox {
        width: b.width().unwrap_or(0.0),
        height: b.height().unwrap_or(0.0),
        left: b.left().unwrap_or(0.0),
        top: b.top().unwrap_or(0.0),
    }
}
