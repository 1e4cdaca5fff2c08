// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wrappers around the external command-line tools the bootstrap drives.
//!
//! Every invocation goes through a [`CommandRunner`], passed explicitly to each
//! call. Production code uses [`SystemRunner`]; tests substitute a recording
//! fake so argument lists and outcome handling can be checked without kind,
//! docker or helm installed.
//!
//! # Modules
//!
//! - [`kind`] - cluster creation, kubeconfig export, image loading
//! - [`docker`] - image builds and network inspection
//! - [`helm`] - repository management and `upgrade --install`

pub mod docker;
pub mod helm;
pub mod kind;

#[cfg(test)]
pub(crate) mod test_utils;

use crate::errors::ToolError;
use async_trait::async_trait;
use tracing::debug;

/// Result of a tool call that tolerates an idempotency conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool did the work
    Completed,
    /// The target already existed; nothing was changed
    AlreadyExists,
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Human-readable exit status (e.g. `exit status: 1`)
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr, for substring checks and error messages.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            ("", err) => err.to_string(),
            (out, "") => out.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }
}

/// Runs external programs to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and capture its output.
    ///
    /// A non-zero exit is *not* an error at this level; it is reported through
    /// [`CommandOutput::success`] so callers can inspect the output first.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] if the program cannot be started.
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ToolError>;
}

/// [`CommandRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ToolError> {
        debug!(command = %command_line(program, args), "Running command");

        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Render a command line for logs and error messages.
#[must_use]
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command and turn a non-zero exit into [`ToolError::CommandFailed`].
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or exits unsuccessfully.
pub async fn run_checked(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[String],
) -> Result<CommandOutput, ToolError> {
    let output = runner.run(program, args).await?;

    if output.success {
        Ok(output)
    } else {
        Err(ToolError::CommandFailed {
            command: command_line(program, args),
            status: output.status.clone(),
            output: output.combined(),
        })
    }
}
