// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! kind cluster operations.

use super::{command_line, run_checked, CommandRunner, ToolOutcome};
use crate::errors::ToolError;
use std::path::Path;
use tracing::info;

const KIND: &str = "kind";

/// Whether kind's output reports that the cluster is already there.
///
/// kind offers no structured status for this case, so the check stays a
/// substring match, kept in this one place.
#[must_use]
pub fn is_already_exists(output: &str) -> bool {
    output.contains("already exist")
}

/// Ensure a kind cluster named `name` exists.
///
/// # Errors
///
/// Returns an error if kind fails for any reason other than the cluster
/// already existing.
pub async fn create_cluster(
    runner: &dyn CommandRunner,
    name: &str,
    wait: &str,
) -> Result<ToolOutcome, ToolError> {
    let args: Vec<String> = vec![
        "create".into(),
        "cluster".into(),
        "--name".into(),
        name.into(),
        "--wait".into(),
        wait.into(),
    ];

    let output = runner.run(KIND, &args).await?;
    if output.success {
        info!(cluster = name, "Created kind cluster");
        return Ok(ToolOutcome::Completed);
    }

    let combined = output.combined();
    if is_already_exists(&combined) {
        info!(cluster = name, "kind cluster already exists, reusing it");
        return Ok(ToolOutcome::AlreadyExists);
    }

    Err(ToolError::CommandFailed {
        command: command_line(KIND, &args),
        status: output.status,
        output: combined,
    })
}

/// Write the cluster's kubeconfig to `kubeconfig`.
///
/// # Errors
///
/// Returns an error if kind exits unsuccessfully.
pub async fn export_kubeconfig(
    runner: &dyn CommandRunner,
    name: &str,
    kubeconfig: &Path,
) -> Result<(), ToolError> {
    let args: Vec<String> = vec![
        "export".into(),
        "kubeconfig".into(),
        "--name".into(),
        name.into(),
        "--kubeconfig".into(),
        kubeconfig.display().to_string(),
    ];

    run_checked(runner, KIND, &args).await?;
    Ok(())
}

/// Load a locally built image into every node of the cluster.
///
/// # Errors
///
/// Returns an error if kind exits unsuccessfully.
pub async fn load_docker_image(
    runner: &dyn CommandRunner,
    image: &str,
    name: &str,
) -> Result<(), ToolError> {
    let args: Vec<String> = vec![
        "load".into(),
        "docker-image".into(),
        image.into(),
        "--name".into(),
        name.into(),
    ];

    run_checked(runner, KIND, &args).await?;
    Ok(())
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod kind_tests;
