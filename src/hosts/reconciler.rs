// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! One hosts reconciliation pass.
//!
//! A pass reads the live file, folds the observed endpoints into it, renders a
//! candidate into a temporary file and only replaces the live file when the
//! bytes differ. Ready endpoints are always written, even when others are
//! still waiting for an IP; the pass then reports [`HostsError::NotReady`] so
//! the caller can try again later.

use super::endpoints::{ClusterState, ObservedEndpoints};
use super::file::{HostEntry, HostsFile};
use super::install::HostsInstaller;
use crate::errors::HostsError;
use kube::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// What a pass did to the live file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The rendered file matched the live one; nothing was installed
    Unchanged,
    /// The live file was replaced
    Updated,
}

/// Keeps a hosts file in line with the cluster's load-balancer endpoints.
#[derive(Clone)]
pub struct HostsReconciler {
    hosts_path: PathBuf,
    installer: Arc<dyn HostsInstaller>,
}

impl HostsReconciler {
    #[must_use]
    pub fn new(hosts_path: impl Into<PathBuf>, installer: Arc<dyn HostsInstaller>) -> Self {
        Self {
            hosts_path: hosts_path.into(),
            installer,
        }
    }

    /// The file being reconciled.
    #[must_use]
    pub fn hosts_path(&self) -> &Path {
        &self.hosts_path
    }

    /// Fetch the cluster state and run one pass.
    ///
    /// # Errors
    ///
    /// See [`HostsReconciler::reconcile`]; listing failures surface as
    /// [`HostsError::ClusterQuery`].
    pub async fn reconcile_cluster(&self, client: &Client) -> Result<ReconcileOutcome, HostsError> {
        let state = ClusterState::fetch(client).await?;
        self.reconcile(&state).await
    }

    /// Run one pass against an already fetched cluster snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::NotReady`] after writing the ready entries if any
    /// object is still waiting for an IP. I/O and install failures are
    /// returned as-is.
    pub async fn reconcile(&self, state: &ClusterState) -> Result<ReconcileOutcome, HostsError> {
        let observed = ObservedEndpoints::from_state(state);
        let outcome = self.apply(&observed.entries).await?;

        if observed.pending.is_empty() {
            Ok(outcome)
        } else {
            Err(HostsError::NotReady {
                pending: observed.pending,
            })
        }
    }

    /// Fold `desired` into the live file, installing only on change.
    ///
    /// A missing live file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::Io`] if reading the live file or writing the
    /// candidate fails, and [`HostsError::Install`] if replacing it fails.
    pub async fn apply(&self, desired: &[HostEntry]) -> Result<ReconcileOutcome, HostsError> {
        let current = match tokio::fs::read_to_string(&self.hosts_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.hosts_path.display(), "Hosts file missing, starting empty");
                String::new()
            }
            Err(source) => {
                return Err(HostsError::Io {
                    path: self.hosts_path.clone(),
                    source,
                })
            }
        };

        let mut file = HostsFile::parse(&current);
        file.reconcile(desired);
        let rendered = file.render();

        if rendered == current {
            debug!(path = %self.hosts_path.display(), "Hosts file already up to date");
            return Ok(ReconcileOutcome::Unchanged);
        }

        let candidate = write_candidate(&rendered)?;

        self.installer
            .install(candidate.path(), &self.hosts_path)
            .await
            .map_err(|source| HostsError::Install {
                path: self.hosts_path.clone(),
                source,
            })?;

        info!(
            path = %self.hosts_path.display(),
            entries = desired.len(),
            "Hosts file updated"
        );
        Ok(ReconcileOutcome::Updated)
    }
}

fn write_candidate(rendered: &str) -> Result<tempfile::NamedTempFile, HostsError> {
    let mut candidate = tempfile::Builder::new()
        .prefix("kindling-hosts-")
        .tempfile()
        .map_err(|source| HostsError::Io {
            path: std::env::temp_dir(),
            source,
        })?;

    candidate
        .write_all(rendered.as_bytes())
        .and_then(|()| candidate.flush())
        .map_err(|source| HostsError::Io {
            path: candidate.path().to_path_buf(),
            source,
        })?;

    Ok(candidate)
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod reconciler_tests;
