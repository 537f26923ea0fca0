// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared AWS SDK configuration for the Rekognition and Translate clients

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_rekognition::config::Credentials;
use tracing::info;

use crate::config::AwsSettings;

const CREDENTIALS_PROVIDER_NAME: &str = "image-labeler-env";

/// Build the SDK configuration from startup credentials
///
/// Called once at startup; the resulting clients are shared by all requests.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let credentials = Credentials::new(
        settings.access_key_id.clone(),
        settings.secret_access_key.clone(),
        settings.session_token.clone(),
        None,
        CREDENTIALS_PROVIDER_NAME,
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    info!("AWS SDK configured for region {}", settings.region);
    sdk_config
}
