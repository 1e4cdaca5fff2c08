// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Fixed-count, fixed-delay retry policy.
//!
//! The bootstrap has exactly one polling loop: waiting for load-balancer IPs to
//! show up so the hosts file can be reconciled. This module keeps that loop
//! independent of the operation it wraps, so it can be reused and tested with
//! a fake operation instead of real infrastructure.
//!
//! There is no backoff and no jitter: every failed attempt is
//! followed by the same delay, and the policy gives up after `max_attempts`.

use crate::constants::{HOSTS_MAX_ATTEMPTS, HOSTS_RETRY_DELAY_SECS};
use crate::errors::BootstrapError;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Bounded retry with a constant delay after each failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay after every failed attempt, the last one included
    pub delay: Duration,
}

impl Default for RetryPolicy {
    /// Hosts reconciliation policy: 10 attempts, 5 seconds apart.
    fn default() -> Self {
        Self::new(
            HOSTS_MAX_ATTEMPTS,
            Duration::from_secs(HOSTS_RETRY_DELAY_SECS),
        )
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and delay.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Worst-case time spent sleeping before the policy gives up.
    #[must_use]
    pub fn max_total_delay(&self) -> Duration {
        self.delay * self.max_attempts
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// The closure receives the zero-based attempt number. Every error is
    /// treated as retryable; the caller decides what is fatal by what it
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::RetryExhausted`] carrying the last error's
    /// message once `max_attempts` attempts have failed.
    pub async fn run<T, E, F, Fut>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> Result<T, BootstrapError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut last_error = String::from("no attempts were made");

        for attempt in 0..self.max_attempts {
            match operation(attempt).await {
                Ok(value) => {
                    debug!(
                        operation = operation_name,
                        attempt = attempt,
                        "Operation succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    warn!("Attempt {attempt} to {operation_name}: {e}");
                    last_error = e.to_string();
                    tokio::time::sleep(self.delay).await;
                }
            }
        }

        error!(
            operation = operation_name,
            attempts = self.max_attempts,
            error = %last_error,
            "Retry budget exhausted, giving up"
        );

        Err(BootstrapError::RetryExhausted {
            operation: operation_name.to_string(),
            attempts: self.max_attempts,
            last_error,
        })
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod retry_tests;
