// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command-line interface.
//!
//! Flags override values from `--config`, which in turn override the built-in
//! defaults.

use crate::bootstrap::{self, hosts_reconciler, reconcile_hosts};
use crate::config::{BootstrapConfig, CopyMode};
use crate::errors::BootstrapError;
use crate::health::check_health;
use crate::tools::{CommandRunner, SystemRunner};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "kindling",
    version,
    about = "Bootstrap a local kind cluster with MetalLB, ingress-nginx and /etc/hosts entries"
)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "KINDLING_CONFIG")]
    pub config: Option<PathBuf>,

    /// kind cluster name
    #[arg(long, global = true, env = "KINDLING_CLUSTER_NAME")]
    pub cluster_name: Option<String>,

    /// Kubeconfig written by kind and used by helm and the API client
    #[arg(long, global = true, env = "KINDLING_KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Host-resolution file to reconcile
    #[arg(long, global = true, env = "KINDLING_HOSTS_FILE")]
    pub hosts_file: Option<PathBuf>,

    /// How the rendered hosts file replaces the live one
    #[arg(long, global = true, value_enum, env = "KINDLING_COPY_MODE")]
    pub copy_mode: Option<CopyMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the cluster, install everything and update the hosts file
    Up {
        /// Probe the application's health endpoint once everything is up
        #[arg(long)]
        verify: bool,

        /// Override the application image tag
        #[arg(long)]
        image_tag: Option<String>,
    },
    /// Reconcile the hosts file against an existing cluster
    Hosts,
    /// Probe the application's health endpoint
    Verify {
        /// Full URL to probe instead of http://<app-host>/health
        #[arg(long)]
        url: Option<Url>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Resolve the effective configuration: defaults, then file, then flags.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] if the file cannot be loaded or the
    /// result is invalid.
    pub async fn resolve_config(&self) -> Result<BootstrapConfig, BootstrapError> {
        let mut config = match &self.config {
            Some(path) => BootstrapConfig::load(path).await?,
            None => BootstrapConfig::default(),
        };

        if let Some(cluster_name) = &self.cluster_name {
            config.cluster_name.clone_from(cluster_name);
        }
        if let Some(kubeconfig) = &self.kubeconfig {
            config.kubeconfig.clone_from(kubeconfig);
        }
        if let Some(hosts_file) = &self.hosts_file {
            config.hosts_file.clone_from(hosts_file);
        }
        if let Some(copy_mode) = self.copy_mode {
            config.copy_mode = copy_mode;
        }
        if let Commands::Up { verify, image_tag } = &self.command {
            config.verify |= *verify;
            if let Some(tag) = image_tag {
                config.image_tag.clone_from(tag);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Run the selected subcommand.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's first fatal error.
    pub async fn run(self) -> Result<(), BootstrapError> {
        if let Commands::Completions { shell } = self.command {
            clap_complete::generate(shell, &mut Cli::command(), "kindling", &mut std::io::stdout());
            return Ok(());
        }

        let config = self.resolve_config().await?;
        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);

        match self.command {
            Commands::Up { .. } => bootstrap::run(&config, runner).await,
            Commands::Hosts => {
                let client = config.kube_client().await?;
                let reconciler = hosts_reconciler(&config, runner);
                reconcile_hosts(&reconciler, &client, &config).await?;
                Ok(())
            }
            Commands::Verify { url } => {
                let url = match url {
                    Some(url) => url,
                    None => config.health_url()?,
                };
                check_health(&url).await
            }
            Commands::Completions { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
