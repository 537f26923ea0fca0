// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::label_image::label_image_handler;
use crate::config::LabelerConfig;
use crate::labels::LabelingService;
use crate::version;

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared state for all handlers
///
/// The labeling service and its provider clients are built once at
/// startup and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub labeling_service: Arc<LabelingService>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(labeling_service: Arc<LabelingService>, max_upload_bytes: usize) -> Self {
        Self {
            labeling_service,
            max_upload_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/label-image", post(label_image_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    config: &LabelerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(state);

    let addr = config.bind_address().parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        "Image labeler listening on {} ({}, languages {})",
        addr,
        version::VERSION,
        config.languages
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Image labeler stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::VERSION.to_string(),
    })
}
