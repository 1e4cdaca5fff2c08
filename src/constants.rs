// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for kindling.
//!
//! This module contains the defaults for every external collaborator the
//! bootstrap talks to. Constants are organized by category; most of them are
//! the serde defaults behind [`crate::config::BootstrapConfig`].

// ============================================================================
// Cluster Constants
// ============================================================================

/// Default kind cluster name
pub const DEFAULT_CLUSTER_NAME: &str = "ci-example";

/// How long `kind create cluster` waits for the control plane
pub const DEFAULT_CLUSTER_WAIT: &str = "5m";

/// Default kubeconfig location, relative to the working directory
pub const DEFAULT_KUBECONFIG_PATH: &str = "scripts/kubeconfig";

/// Docker network kind attaches its nodes to
pub const KIND_DOCKER_NETWORK: &str = "kind";

// ============================================================================
// Image Constants
// ============================================================================

/// Default image repository for the application
pub const DEFAULT_IMAGE_NAME: &str = "ghcr.io/joan-mido-qa/ci-example";

/// Default image tag for local development builds
pub const DEFAULT_IMAGE_TAG: &str = "dev";

/// Default docker build context
pub const DEFAULT_BUILD_CONTEXT: &str = ".";

// ============================================================================
// Helm Constants
// ============================================================================

/// Timeout passed to `helm upgrade --install --wait`
pub const DEFAULT_HELM_TIMEOUT: &str = "5m";

/// Helm repository name for MetalLB
pub const METALLB_REPO_NAME: &str = "metallb";

/// Helm repository URL for MetalLB
pub const METALLB_REPO_URL: &str = "https://metallb.github.io/metallb";

/// MetalLB release name and chart reference
pub const METALLB_RELEASE: &str = "metallb";
pub const METALLB_CHART: &str = "metallb/metallb";

/// Helm repository name for ingress-nginx
pub const INGRESS_NGINX_REPO_NAME: &str = "ingress-nginx";

/// Helm repository URL for ingress-nginx
pub const INGRESS_NGINX_REPO_URL: &str = "https://kubernetes.github.io/ingress-nginx";

/// ingress-nginx release name and chart reference
pub const INGRESS_NGINX_RELEASE: &str = "ingress-nginx";
pub const INGRESS_NGINX_CHART: &str = "ingress-nginx/ingress-nginx";

/// Application release name
pub const DEFAULT_APP_RELEASE: &str = "ci-example";

/// Application chart path, relative to the working directory
pub const DEFAULT_APP_CHART: &str = "charts/ci-example";

/// Ingress class the application chart is pointed at
pub const DEFAULT_INGRESS_CLASS: &str = "nginx";

// ============================================================================
// MetalLB Custom Resource Constants
// ============================================================================

/// Name of the address pool carved out of the kind network
pub const ADDRESS_POOL_NAME: &str = "kind-address-pool";

/// Name of the layer 2 advertisement
pub const L2_ADVERTISEMENT_NAME: &str = "kind-advertisement";

/// Namespace MetalLB resources are created in (the chart is installed without `--namespace`)
pub const DEFAULT_METALLB_NAMESPACE: &str = "default";

/// Prefix length of the address pool handed to MetalLB
pub const ADDRESS_POOL_PREFIX_LEN: u8 = 24;

// ============================================================================
// Hosts File Constants
// ============================================================================

/// Default host-resolution file
pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";

/// Domain suffix synthesized for `LoadBalancer` services
pub const SERVICE_HOST_SUFFIX: &str = "local";

/// Prefix of the comment written next to managed hosts entries
pub const HOSTS_COMMENT_PREFIX: &str = "kindling: kubectl get";

/// Maximum number of hosts reconciliation attempts
pub const HOSTS_MAX_ATTEMPTS: u32 = 10;

/// Fixed delay between hosts reconciliation attempts (5 seconds)
pub const HOSTS_RETRY_DELAY_SECS: u64 = 5;

// ============================================================================
// Health Service Constants
// ============================================================================

/// Port the health service binds by default
pub const HEALTH_SERVER_PORT: u16 = 80;

/// Bind address for the health service
pub const HEALTH_SERVER_BIND_ADDRESS: &str = "0.0.0.0";

/// Path of the liveness endpoint
pub const HEALTH_PATH: &str = "/health";

/// Status value reported by the liveness endpoint
pub const HEALTH_STATUS_OK: &str = "Ok";

/// Default host the smoke check targets
pub const DEFAULT_APP_HOST: &str = "ci-example.local";

/// Timeout for a single smoke check request
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Logging Constants
// ============================================================================

/// Environment variable selecting the log output format (`text` or `json`)
pub const LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";
