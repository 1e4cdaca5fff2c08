// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Bootstrap configuration.
//!
//! Every field has a default taken from [`crate::constants`], so an empty YAML
//! document (or no file at all) yields a working configuration for the
//! `ci-example` project. Command-line flags are applied on top by the binary.
//!
//! # Example
//!
//! ```yaml
//! clusterName: my-cluster
//! imageTag: feature-x
//! hostsFile: /tmp/hosts
//! copyMode: direct
//! ```

use crate::constants::{
    DEFAULT_APP_CHART, DEFAULT_APP_HOST, DEFAULT_APP_RELEASE, DEFAULT_BUILD_CONTEXT,
    DEFAULT_CLUSTER_NAME, DEFAULT_CLUSTER_WAIT, DEFAULT_HELM_TIMEOUT, DEFAULT_HOSTS_FILE,
    DEFAULT_IMAGE_NAME, DEFAULT_IMAGE_TAG, DEFAULT_INGRESS_CLASS, DEFAULT_KUBECONFIG_PATH,
    DEFAULT_METALLB_NAMESPACE, HEALTH_PATH, HOSTS_MAX_ATTEMPTS, HOSTS_RETRY_DELAY_SECS,
};
use crate::errors::BootstrapError;
use crate::retry::RetryPolicy;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// How the rendered hosts file replaces the live one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    /// `sudo cp`, for a root-owned `/etc/hosts`
    #[default]
    Sudo,
    /// Plain copy, for a file the current user can write
    Direct,
}

/// Everything a bootstrap run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BootstrapConfig {
    /// kind cluster name
    pub cluster_name: String,
    /// `kind create cluster --wait` duration
    pub cluster_wait: String,
    /// Kubeconfig written by kind and used by helm and the API client
    pub kubeconfig: PathBuf,

    /// Application image repository, without tag
    pub image_name: String,
    pub image_tag: String,
    /// Docker build context
    pub build_context: PathBuf,

    /// `helm --timeout` for every release
    pub helm_timeout: String,
    pub app_release: String,
    pub app_chart: String,
    pub ingress_class: String,

    /// Namespace of the MetalLB custom resources
    pub metallb_namespace: String,

    pub hosts_file: PathBuf,
    pub copy_mode: CopyMode,

    /// Hostname the application ingress answers on
    pub app_host: String,
    /// Run the health smoke check as the last bootstrap step
    pub verify: bool,

    /// Hosts reconciliation attempts
    pub retry_attempts: u32,
    /// Seconds between hosts reconciliation attempts
    pub retry_delay_secs: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            cluster_wait: DEFAULT_CLUSTER_WAIT.to_string(),
            kubeconfig: PathBuf::from(DEFAULT_KUBECONFIG_PATH),
            image_name: DEFAULT_IMAGE_NAME.to_string(),
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            build_context: PathBuf::from(DEFAULT_BUILD_CONTEXT),
            helm_timeout: DEFAULT_HELM_TIMEOUT.to_string(),
            app_release: DEFAULT_APP_RELEASE.to_string(),
            app_chart: DEFAULT_APP_CHART.to_string(),
            ingress_class: DEFAULT_INGRESS_CLASS.to_string(),
            metallb_namespace: DEFAULT_METALLB_NAMESPACE.to_string(),
            hosts_file: PathBuf::from(DEFAULT_HOSTS_FILE),
            copy_mode: CopyMode::default(),
            app_host: DEFAULT_APP_HOST.to_string(),
            verify: false,
            retry_attempts: HOSTS_MAX_ATTEMPTS,
            retry_delay_secs: HOSTS_RETRY_DELAY_SECS,
        }
    }
}

impl BootstrapConfig {
    /// Load a configuration from a YAML file; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] if the file cannot be read, is not
    /// valid YAML, or fails [`BootstrapConfig::validate`].
    pub async fn load(path: &Path) -> Result<Self, BootstrapError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            BootstrapError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parse a YAML document; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] on invalid YAML or values.
    pub fn from_yaml(content: &str) -> Result<Self, BootstrapError> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| BootstrapError::Config(format!("invalid YAML: {e}")))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        let required = [
            ("clusterName", &self.cluster_name),
            ("imageName", &self.image_name),
            ("imageTag", &self.image_tag),
            ("appRelease", &self.app_release),
            ("appChart", &self.app_chart),
            ("appHost", &self.app_host),
            ("metallbNamespace", &self.metallb_namespace),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(BootstrapError::Config(format!("{field} must not be empty")));
        }

        if self.retry_attempts == 0 {
            return Err(BootstrapError::Config(
                "retryAttempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Full image reference, `<name>:<tag>`.
    #[must_use]
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image_name, self.image_tag)
    }

    /// `--set` values passed to the application chart.
    #[must_use]
    pub fn app_values(&self) -> Vec<(String, String)> {
        vec![
            ("image.tag".to_string(), self.image_tag.clone()),
            ("ingress.enabled".to_string(), "true".to_string()),
            ("ingress.className".to_string(), self.ingress_class.clone()),
        ]
    }

    /// Retry policy for hosts reconciliation.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_secs(self.retry_delay_secs),
        )
    }

    /// `http://<app-host>/health`
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] if `app_host` does not form a valid URL.
    pub fn health_url(&self) -> Result<Url, BootstrapError> {
        let invalid = |e: url::ParseError| {
            BootstrapError::Config(format!("invalid app host '{}': {e}", self.app_host))
        };
        Url::parse(&format!("http://{}", self.app_host))
            .and_then(|base| base.join(HEALTH_PATH))
            .map_err(invalid)
    }

    /// Build an API client from the kubeconfig kind exported.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Kubeconfig`] if the file cannot be read or
    /// does not describe a usable cluster.
    pub async fn kube_client(&self) -> Result<Client, BootstrapError> {
        let kubeconfig_error = |reason: String| BootstrapError::Kubeconfig {
            path: self.kubeconfig.clone(),
            reason,
        };

        let kubeconfig =
            Kubeconfig::read_from(&self.kubeconfig).map_err(|e| kubeconfig_error(e.to_string()))?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| kubeconfig_error(e.to_string()))?;

        Client::try_from(config).map_err(|e| kubeconfig_error(e.to_string()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
