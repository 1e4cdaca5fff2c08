// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end bootstrap of the local environment.
//!
//! Steps run strictly in sequence; the first fatal error aborts the run and
//! nothing already done is rolled back:
//!
//! 1. Create the kind cluster (reused if it already exists) and export its kubeconfig
//! 2. Build the application image and load it into the cluster
//! 3. Install MetalLB (with its address pool) and ingress-nginx
//! 4. Install the application chart
//! 5. Reconcile the hosts file, retrying until every endpoint has an IP
//! 6. Optionally probe the application's health endpoint

use crate::config::{BootstrapConfig, CopyMode};
use crate::dependencies::install_dependencies;
use crate::errors::BootstrapError;
use crate::health::check_health;
use crate::hosts::{DirectCopy, HostsInstaller, HostsReconciler, PrivilegedCopy, ReconcileOutcome};
use crate::tools::helm::{self, HelmRelease};
use crate::tools::{docker, kind, CommandRunner, ToolOutcome};
use kube::Client;
use std::sync::Arc;
use tracing::info;

/// Ensure the cluster exists and its kubeconfig is on disk.
///
/// # Errors
///
/// Returns an error if kind fails for a reason other than the cluster already
/// existing, or if the kubeconfig directory cannot be created.
pub async fn create_cluster(
    runner: &dyn CommandRunner,
    config: &BootstrapConfig,
) -> Result<ToolOutcome, BootstrapError> {
    let outcome =
        kind::create_cluster(runner, &config.cluster_name, &config.cluster_wait).await?;

    if let Some(parent) = config.kubeconfig.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            BootstrapError::Config(format!(
                "cannot create kubeconfig directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    kind::export_kubeconfig(runner, &config.cluster_name, &config.kubeconfig).await?;

    info!(cluster = %config.cluster_name, outcome = ?outcome, "Kind Cluster Created");
    Ok(outcome)
}

/// Build the application image and side-load it into every kind node.
///
/// # Errors
///
/// Returns an error if the build or the load fails.
pub async fn build_and_load_image(
    runner: &dyn CommandRunner,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    let image = config.image_ref();

    docker::build_image(runner, &config.build_context, &image).await?;
    info!(image = %image, "Docker Image Built");

    kind::load_docker_image(runner, &image, &config.cluster_name).await?;
    info!(image = %image, cluster = %config.cluster_name, "Docker Image Loaded to Kind");
    Ok(())
}

/// Install or upgrade the application chart.
///
/// # Errors
///
/// Returns an error if helm fails or times out.
pub async fn deploy_app(
    runner: &dyn CommandRunner,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    let release = config.app_values().into_iter().fold(
        HelmRelease::new(&config.app_release, &config.app_chart, &config.helm_timeout),
        |release, (key, value)| release.set(key, value),
    );
    helm::upgrade_install(runner, &release, &config.kubeconfig).await?;

    info!(release = %config.app_release, "Application Helm Chart Installed");
    Ok(())
}

/// Hosts reconciler for the configured file and copy mode.
#[must_use]
pub fn hosts_reconciler(config: &BootstrapConfig, runner: Arc<dyn CommandRunner>) -> HostsReconciler {
    let installer: Arc<dyn HostsInstaller> = match config.copy_mode {
        CopyMode::Sudo => Arc::new(PrivilegedCopy::new(runner)),
        CopyMode::Direct => Arc::new(DirectCopy),
    };
    HostsReconciler::new(&config.hosts_file, installer)
}

/// Reconcile the hosts file under the configured retry policy.
///
/// # Errors
///
/// Returns [`BootstrapError::RetryExhausted`] if no attempt succeeded.
pub async fn reconcile_hosts(
    reconciler: &HostsReconciler,
    client: &Client,
    config: &BootstrapConfig,
) -> Result<ReconcileOutcome, BootstrapError> {
    let outcome = config
        .retry_policy()
        .run("create Hosts", move |_| reconciler.reconcile_cluster(client))
        .await?;

    info!(path = %reconciler.hosts_path().display(), outcome = ?outcome, "Hosts Created");
    Ok(outcome)
}

/// Run the whole bootstrap.
///
/// # Errors
///
/// Returns the first fatal error; earlier steps are left in place.
pub async fn run(
    config: &BootstrapConfig,
    runner: Arc<dyn CommandRunner>,
) -> Result<(), BootstrapError> {
    info!(cluster = %config.cluster_name, "Starting bootstrap");

    create_cluster(runner.as_ref(), config).await?;
    build_and_load_image(runner.as_ref(), config).await?;

    let client = config.kube_client().await?;
    install_dependencies(runner.as_ref(), &client, config).await?;
    deploy_app(runner.as_ref(), config).await?;

    let reconciler = hosts_reconciler(config, runner);
    reconcile_hosts(&reconciler, &client, config).await?;

    if config.verify {
        check_health(&config.health_url()?).await?;
    }

    info!(cluster = %config.cluster_name, "Bootstrap complete");
    Ok(())
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod bootstrap_tests;
