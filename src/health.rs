// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Liveness endpoint and the smoke check that probes it.
//!
//! The service side is a single route, `GET /health`, answering
//! `{"status": "Ok"}` regardless of request headers or body. The client side,
//! [`check_health`], is what `kindling verify` and the end-to-end test use to
//! confirm the deployed application is reachable through the ingress.

use crate::constants::{HEALTH_CHECK_TIMEOUT_SECS, HEALTH_PATH, HEALTH_STATUS_OK};
use crate::errors::BootstrapError;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, info};
use url::Url;

/// Body of the liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: HEALTH_STATUS_OK.to_string(),
        }
    }
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Router exposing `GET /health`.
#[must_use]
pub fn router() -> Router {
    Router::new().route(HEALTH_PATH, get(health))
}

/// Serve the health router on `listener` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(address = %addr, "Health service listening");
    }

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    // A failed handler install means Ctrl-C cannot be observed; keep serving.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping health service");
}

/// Probe `url` and require `200 {"status": "Ok"}`.
///
/// # Errors
///
/// Returns [`BootstrapError::HealthCheck`] if the request fails, the status is
/// not 200, or the body is anything other than the expected JSON.
pub async fn check_health(url: &Url) -> Result<(), BootstrapError> {
    let failed = |reason: String| BootstrapError::HealthCheck {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
        .build()
        .map_err(|e| failed(format!("cannot build HTTP client: {e}")))?;

    debug!(url = %url, "Probing health endpoint");
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| failed(format!("request failed: {e}")))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(failed(format!("unexpected status {status}")));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| failed(format!("body is not JSON: {e}")))?;
    let expected = serde_json::json!({ "status": HEALTH_STATUS_OK });
    if body != expected {
        return Err(failed(format!("unexpected body {body}")));
    }

    info!(url = %url, "Health check passed");
    Ok(())
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod health_tests;
