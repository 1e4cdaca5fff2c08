// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # kindling - local kind cluster bootstrap
//!
//! kindling turns an empty workstation into a working local Kubernetes
//! environment for one application: a kind cluster, MetalLB handing out
//! addresses on the kind docker network, ingress-nginx, the application chart,
//! and `/etc/hosts` entries so every ingress host resolves.
//!
//! ## Modules
//!
//! - [`bootstrap`] - the end-to-end sequence
//! - [`dependencies`] - MetalLB and ingress-nginx installation
//! - [`hosts`] - hosts file reconciliation
//! - [`upsert`] - create-then-patch-on-conflict for custom resources
//! - [`metallb`] - `IPAddressPool` and `L2Advertisement` types
//! - [`retry`] - bounded fixed-delay retry
//! - [`tools`] - kind, docker and helm wrappers
//! - [`health`] - the `GET /health` service and its smoke check
//! - [`logging`] - subscriber setup for both binaries
//!
//! ## Example
//!
//! ```rust,no_run
//! use kindling::bootstrap;
//! use kindling::config::BootstrapConfig;
//! use kindling::tools::SystemRunner;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), kindling::errors::BootstrapError> {
//! let config = BootstrapConfig::default();
//! bootstrap::run(&config, Arc::new(SystemRunner)).await?;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dependencies;
pub mod errors;
pub mod health;
pub mod hosts;
pub mod logging;
pub mod metallb;
pub mod retry;
pub mod tools;
pub mod upsert;
