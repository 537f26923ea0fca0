// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::api::label_image::validate_image;
use crate::api::{start_server, AppState, LabelImageResponse};
use crate::config::LabelerConfig;
use crate::labels::LabelingService;
use crate::providers::{load_sdk_config, AwsTranslator, RekognitionClassifier};

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides LABELER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments for the label command
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Path to the image file
    pub path: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Build the labeling service and its provider clients from configuration
pub async fn build_labeling_service(config: &LabelerConfig) -> Arc<LabelingService> {
    let sdk_config = load_sdk_config(&config.aws).await;

    let classifier = Arc::new(RekognitionClassifier::new(&sdk_config));
    let translator = Arc::new(AwsTranslator::new(&sdk_config));

    info!(
        "Selection policy: [{}], high-confidence threshold {}",
        config
            .selection
            .rules()
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        config.selection.high_confidence_threshold()
    );

    Arc::new(LabelingService::from_config(config, classifier, translator))
}

/// Run the HTTP service until Ctrl-C
pub async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = LabelerConfig::from_env().context("Invalid configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let service = build_labeling_service(&config).await;
    let state = AppState::new(service, config.max_upload_bytes);

    start_server(&config, state)
        .await
        .map_err(|e| anyhow!("Server error: {}", e))
}

/// Label one local image and print the response JSON
pub async fn label(args: LabelArgs) -> Result<()> {
    let config = LabelerConfig::from_env().context("Invalid configuration")?;

    let bytes = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let content_type = validate_image(None, &bytes, config.max_upload_bytes)?;
    info!("Labeling {} ({})", args.path.display(), content_type);

    let service = build_labeling_service(&config).await;
    let labeled = service.label_image(&bytes).await?;
    let response = LabelImageResponse::from(labeled);

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
