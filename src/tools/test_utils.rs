// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Recording [`CommandRunner`] fake for unit tests.

use super::{CommandOutput, CommandRunner};
use crate::errors::ToolError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Build an owned argument vector from string slices.
pub(crate) fn to_args<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

/// Records every invocation and replays scripted outputs in order.
///
/// When the script runs out, every further call succeeds with empty output.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<Vec<String>>>,
    responses: Mutex<VecDeque<CommandOutput>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response with the given stdout.
    pub(crate) fn push_success(&self, stdout: &str) -> &Self {
        self.push(CommandOutput {
            success: true,
            status: "exit status: 0".to_string(),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    /// Queue a failed response with the given stderr.
    pub(crate) fn push_failure(&self, stderr: &str) -> &Self {
        self.push(CommandOutput {
            success: false,
            status: "exit status: 1".to_string(),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    pub(crate) fn push(&self, output: CommandOutput) -> &Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(output);
        self
    }

    /// Every call made so far, as `[program, args...]`.
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Every call rendered as a single command line.
    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|call| call.join(" ")).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ToolError> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.lock().expect("calls lock poisoned").push(call);

        let scripted = self
            .responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front();

        Ok(scripted.unwrap_or(CommandOutput {
            success: true,
            status: "exit status: 0".to_string(),
            ..CommandOutput::default()
        }))
    }
}
