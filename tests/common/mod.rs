// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common utilities for tests that need a bootstrapped kind cluster

#![allow(dead_code)]

use kindling::config::BootstrapConfig;
use kube::Client;

/// Load the configuration the cluster was bootstrapped with.
///
/// Honors `KINDLING_CONFIG` the same way the CLI does.
pub async fn bootstrap_config() -> BootstrapConfig {
    match std::env::var("KINDLING_CONFIG") {
        Ok(path) => BootstrapConfig::load(std::path::Path::new(&path))
            .await
            .expect("KINDLING_CONFIG should be valid"),
        Err(_) => BootstrapConfig::default(),
    }
}

/// Get a client for the kind cluster, or skip the test if it is not running
pub async fn get_kube_client_or_skip() -> Option<Client> {
    match bootstrap_config().await.kube_client().await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test: no kind cluster available: {e}");
            None
        }
    }
}
