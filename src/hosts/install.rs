// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Strategies for replacing the live hosts file with a rendered candidate.

use crate::errors::ToolError;
use crate::tools::{run_checked, CommandRunner};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Copies a rendered hosts file over the live one.
#[async_trait]
pub trait HostsInstaller: Send + Sync {
    /// Replace `target` with the content of `rendered`.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    async fn install(&self, rendered: &Path, target: &Path) -> Result<(), ToolError>;
}

/// `sudo cp -f <rendered> <target>`, for files owned by root.
#[derive(Clone)]
pub struct PrivilegedCopy {
    runner: Arc<dyn CommandRunner>,
}

impl PrivilegedCopy {
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl HostsInstaller for PrivilegedCopy {
    async fn install(&self, rendered: &Path, target: &Path) -> Result<(), ToolError> {
        let args: Vec<String> = vec![
            "cp".into(),
            "-f".into(),
            rendered.display().to_string(),
            target.display().to_string(),
        ];

        run_checked(self.runner.as_ref(), "sudo", &args).await?;
        Ok(())
    }
}

/// Plain rewrite, for files the current user can already write.
///
/// Only the content is replaced: an existing target keeps its mode, so a
/// world-readable hosts file stays world-readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectCopy;

#[async_trait]
impl HostsInstaller for DirectCopy {
    async fn install(&self, rendered: &Path, target: &Path) -> Result<(), ToolError> {
        let content = tokio::fs::read(rendered)
            .await
            .map_err(|source| ToolError::Io {
                operation: format!("read {}", rendered.display()),
                source,
            })?;
        tokio::fs::write(target, content)
            .await
            .map_err(|source| ToolError::Io {
                operation: format!("write {}", target.display()),
                source,
            })?;
        Ok(())
    }
}
