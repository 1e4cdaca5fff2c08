// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for kindling.
//!
//! This module provides the error taxonomy of a bootstrap run:
//! - Tool invocation failures (kind, docker, helm)
//! - Hosts reconciliation failures, including the recoverable "not ready" case
//! - Kubernetes API and configuration failures surfaced by the orchestrator
//!
//! Idempotency conflicts are not errors here: they are reported through
//! [`crate::tools::ToolOutcome`] and [`crate::upsert::UpsertOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while invoking an external command-line tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program could not be started at all (not installed, not executable)
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    ///
    /// `output` carries stdout and stderr combined so the operator sees
    /// whatever the tool printed.
    #[error("command '{command}' exited with {status}: {output}")]
    CommandFailed {
        /// Full command line
        command: String,
        /// Exit status description
        status: String,
        /// Captured output
        output: String,
    },

    /// A file operation performed in place of an external program failed
    #[error("{operation} failed: {source}")]
    Io {
        /// Description of the operation
        operation: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program succeeded but printed something we could not interpret
    #[error("unexpected output from '{command}': {reason}")]
    UnexpectedOutput {
        /// Full command line
        command: String,
        /// Explanation of what was wrong
        reason: String,
    },
}

/// Errors raised by a hosts reconciliation pass.
#[derive(Error, Debug)]
pub enum HostsError {
    /// Some ingresses or services have no load-balancer IP yet.
    ///
    /// Recoverable: entries that were ready have already been written, and the
    /// caller is expected to retry.
    #[error("load-balancer IP not assigned yet for: {}", pending.join(", "))]
    NotReady {
        /// Source objects still waiting for an IP (e.g. `ingress/default/web`)
        pending: Vec<String>,
    },

    /// Reading the live file or rendering the candidate file failed
    #[error("hosts file I/O error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Replacing the live file failed
    #[error("failed to install hosts file {path}: {source}")]
    Install {
        /// Destination of the copy
        path: PathBuf,
        /// Underlying tool error
        #[source]
        source: ToolError,
    },

    /// Listing ingresses or services failed
    #[error("failed to list {kind} from the cluster: {source}")]
    ClusterQuery {
        /// Resource kind being listed
        kind: &'static str,
        /// Underlying API error
        #[source]
        source: kube::Error,
    },
}

/// Top-level errors of a bootstrap run.
///
/// Every variant is fatal for the run; there is no rollback.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Hosts(#[from] HostsError),

    #[error("kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("failed to load kubeconfig {path}: {reason}")]
    Kubeconfig {
        /// Kubeconfig file
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The docker network subnet cannot host a MetalLB address pool
    #[error("cannot derive an address pool from subnet '{subnet}': {reason}")]
    InvalidSubnet {
        /// Subnet reported by docker
        subnet: String,
        /// Explanation of what is invalid
        reason: String,
    },

    /// A bounded retry ran out of attempts
    #[error("{operation} failed after {attempts} attempts: {last_error}")]
    RetryExhausted {
        /// Human-readable operation name
        operation: String,
        /// Number of attempts made
        attempts: u32,
        /// Display form of the last error
        last_error: String,
    },

    /// The deployed service did not answer its health endpoint as expected
    #[error("health check against {url} failed: {reason}")]
    HealthCheck {
        /// URL that was probed
        url: String,
        /// Explanation of the failure
        reason: String,
    },
}

/// Result alias used across the bootstrap.
pub type Result<T, E = BootstrapError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
