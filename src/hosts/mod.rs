// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Host-resolution file reconciliation.
//!
//! Makes every ingress host and `LoadBalancer` service of the cluster resolve
//! on the workstation by writing entries into the system hosts file.
//!
//! # Modules
//!
//! - [`file`] - parsing, collision eviction and rendering
//! - [`endpoints`] - deriving desired entries from the cluster
//! - [`install`] - replacing the live file (privileged or direct copy)
//! - [`reconciler`] - one full reconciliation pass

pub mod endpoints;
pub mod file;
pub mod install;
pub mod reconciler;

pub use endpoints::{ClusterState, ObservedEndpoints};
pub use file::{EntryType, HostEntry, HostsFile};
pub use install::{DirectCopy, HostsInstaller, PrivilegedCopy};
pub use reconciler::{HostsReconciler, ReconcileOutcome};
