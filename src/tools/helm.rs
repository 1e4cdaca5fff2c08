// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Helm repository management and idempotent chart installs.
//!
//! Every call carries `--kubeconfig` explicitly so the bootstrap never touches
//! the operator's default kube context.

use super::{run_checked, CommandRunner};
use crate::errors::ToolError;
use std::path::Path;
use tracing::info;

const HELM: &str = "helm";

/// A chart release installed with `helm upgrade --install --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmRelease {
    /// Release name
    pub name: String,
    /// Chart reference (`repo/chart`) or local chart path
    pub chart: String,
    /// Value passed to `--timeout` (e.g. `5m`)
    pub timeout: String,
    /// `--set key=value` pairs, in order
    pub values: Vec<(String, String)>,
}

impl HelmRelease {
    #[must_use]
    pub fn new(name: impl Into<String>, chart: impl Into<String>, timeout: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chart: chart.into(),
            timeout: timeout.into(),
            values: Vec::new(),
        }
    }

    /// Add a `--set key=value` override.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Arguments for `helm upgrade --install` of this release.
    #[must_use]
    pub fn upgrade_install_args(&self, kubeconfig: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "upgrade".into(),
            "--install".into(),
            self.name.clone(),
            self.chart.clone(),
            "--wait".into(),
            "--timeout".into(),
            self.timeout.clone(),
        ];

        for (key, value) in &self.values {
            args.push("--set".into());
            args.push(format!("{key}={value}"));
        }

        args.push("--kubeconfig".into());
        args.push(kubeconfig.display().to_string());
        args
    }
}

/// Register a chart repository.
///
/// Helm itself treats re-adding an identical repository as a no-op.
///
/// # Errors
///
/// Returns an error if helm exits unsuccessfully.
pub async fn repo_add(
    runner: &dyn CommandRunner,
    name: &str,
    url: &str,
    kubeconfig: &Path,
) -> Result<(), ToolError> {
    let args: Vec<String> = vec![
        "repo".into(),
        "add".into(),
        name.into(),
        url.into(),
        "--kubeconfig".into(),
        kubeconfig.display().to_string(),
    ];

    run_checked(runner, HELM, &args).await?;
    Ok(())
}

/// Refresh the local index of every registered repository.
///
/// # Errors
///
/// Returns an error if helm exits unsuccessfully.
pub async fn repo_update(runner: &dyn CommandRunner, kubeconfig: &Path) -> Result<(), ToolError> {
    let args: Vec<String> = vec![
        "repo".into(),
        "update".into(),
        "--kubeconfig".into(),
        kubeconfig.display().to_string(),
    ];

    run_checked(runner, HELM, &args).await?;
    Ok(())
}

/// Install or upgrade `release` and wait for it to become ready.
///
/// # Errors
///
/// Returns an error if helm fails, including when `--timeout` expires.
pub async fn upgrade_install(
    runner: &dyn CommandRunner,
    release: &HelmRelease,
    kubeconfig: &Path,
) -> Result<(), ToolError> {
    run_checked(runner, HELM, &release.upgrade_install_args(kubeconfig)).await?;
    info!(release = %release.name, chart = %release.chart, "Helm release installed");
    Ok(())
}

#[cfg(test)]
#[path = "helm_tests.rs"]
mod helm_tests;
