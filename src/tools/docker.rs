// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Docker image builds and network inspection.

use super::{command_line, run_checked, CommandRunner};
use crate::errors::ToolError;
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::info;

const DOCKER: &str = "docker";

/// Subset of `docker network inspect` output we care about.
#[derive(Debug, Deserialize)]
struct NetworkInspect {
    #[serde(rename = "IPAM", default)]
    ipam: Ipam,
}

#[derive(Debug, Default, Deserialize)]
struct Ipam {
    #[serde(rename = "Config", default)]
    config: Option<Vec<IpamConfig>>,
}

#[derive(Debug, Deserialize)]
struct IpamConfig {
    #[serde(rename = "Subnet", default)]
    subnet: Option<String>,
}

/// Build an image from `context` and tag it `tag`.
///
/// # Errors
///
/// Returns an error if the build fails.
pub async fn build_image(
    runner: &dyn CommandRunner,
    context: &Path,
    tag: &str,
) -> Result<(), ToolError> {
    let args: Vec<String> = vec![
        "build".into(),
        "--tag".into(),
        tag.into(),
        context.display().to_string(),
    ];

    run_checked(runner, DOCKER, &args).await?;
    info!(image = tag, "Built docker image");
    Ok(())
}

/// Return the IPv4 subnet (CIDR) of the docker network `network`.
///
/// # Errors
///
/// Returns an error if `docker network inspect` fails or reports no IPv4
/// subnet.
pub async fn network_subnet(runner: &dyn CommandRunner, network: &str) -> Result<String, ToolError> {
    let args: Vec<String> = vec!["network".into(), "inspect".into(), network.into()];

    let output = run_checked(runner, DOCKER, &args).await?;

    parse_network_subnet(&output.stdout).map_err(|reason| ToolError::UnexpectedOutput {
        command: command_line(DOCKER, &args),
        reason,
    })
}

/// Extract the first IPv4 subnet from `docker network inspect` JSON.
///
/// kind networks are dual-stack on most hosts; the IPv6 config may come
/// first, so it is skipped.
///
/// # Errors
///
/// Returns a description of the problem if the JSON is malformed or carries
/// no IPv4 subnet.
pub fn parse_network_subnet(json: &str) -> Result<String, String> {
    let networks: Vec<NetworkInspect> =
        serde_json::from_str(json).map_err(|e| format!("invalid inspect JSON: {e}"))?;

    networks
        .iter()
        .flat_map(|network| network.ipam.config.iter().flatten())
        .filter_map(|config| config.subnet.as_deref())
        .find(|subnet| {
            subnet
                .split_once('/')
                .is_some_and(|(addr, _)| addr.parse::<Ipv4Addr>().is_ok())
        })
        .map(str::to_string)
        .ok_or_else(|| "no IPv4 subnet in network IPAM config".to_string())
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod docker_tests;
