// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Cluster add-ons the application relies on: MetalLB and ingress-nginx.
//!
//! The steps run strictly in order, because each one needs the previous one:
//! the MetalLB CRDs must exist before the address pool can be created, and
//! ingress-nginx only gets an external IP once MetalLB has a pool to hand out.

use crate::config::BootstrapConfig;
use crate::constants::{
    INGRESS_NGINX_CHART, INGRESS_NGINX_RELEASE, INGRESS_NGINX_REPO_NAME, INGRESS_NGINX_REPO_URL,
    KIND_DOCKER_NETWORK, METALLB_CHART, METALLB_RELEASE, METALLB_REPO_NAME, METALLB_REPO_URL,
};
use crate::errors::BootstrapError;
use crate::metallb::{
    address_pool, address_pool_cidr, l2_advertisement, IPAddressPool, L2Advertisement,
};
use crate::tools::helm::{self, HelmRelease};
use crate::tools::{docker, CommandRunner};
use crate::upsert::create_or_patch_spec;
use kube::{Api, Client};
use tracing::{debug, info};

/// Add the MetalLB and ingress-nginx chart repositories and refresh them.
///
/// # Errors
///
/// Returns an error if any helm call fails.
pub async fn download_dependencies(
    runner: &dyn CommandRunner,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    helm::repo_add(runner, METALLB_REPO_NAME, METALLB_REPO_URL, &config.kubeconfig).await?;
    helm::repo_add(
        runner,
        INGRESS_NGINX_REPO_NAME,
        INGRESS_NGINX_REPO_URL,
        &config.kubeconfig,
    )
    .await?;
    helm::repo_update(runner, &config.kubeconfig).await?;

    debug!("Chart repositories refreshed");
    Ok(())
}

/// Install MetalLB and give it an address pool on the kind network.
///
/// Returns the CIDR handed to MetalLB.
///
/// # Errors
///
/// Returns an error if the chart install, the subnet lookup or either
/// custom-resource upsert fails.
pub async fn install_metallb(
    runner: &dyn CommandRunner,
    client: &Client,
    config: &BootstrapConfig,
) -> Result<String, BootstrapError> {
    let release = HelmRelease::new(METALLB_RELEASE, METALLB_CHART, &config.helm_timeout);
    helm::upgrade_install(runner, &release, &config.kubeconfig).await?;
    info!("Dependencies Downloaded");

    let cidr = configure_address_pool(runner, client, &config.metallb_namespace).await?;

    info!(pool = %cidr, "Dependencies Installed: MetalLB");
    Ok(cidr)
}

/// Derive the pool from the kind network and upsert the pool and advertisement.
///
/// # Errors
///
/// Returns an error if the subnet cannot be read or turned into a pool, or if
/// the API server rejects either resource.
pub async fn configure_address_pool(
    runner: &dyn CommandRunner,
    client: &Client,
    namespace: &str,
) -> Result<String, BootstrapError> {
    let subnet = docker::network_subnet(runner, KIND_DOCKER_NETWORK).await?;
    let cidr = address_pool_cidr(&subnet)?;
    debug!(subnet = %subnet, pool = %cidr, "Derived MetalLB address pool");

    let pools: Api<IPAddressPool> = Api::namespaced(client.clone(), namespace);
    let pool = address_pool(&cidr);
    create_or_patch_spec(&pools, &pool, &pool.spec).await?;

    let advertisements: Api<L2Advertisement> = Api::namespaced(client.clone(), namespace);
    let advertisement = l2_advertisement();
    create_or_patch_spec(&advertisements, &advertisement, &advertisement.spec).await?;

    Ok(cidr)
}

/// Install the ingress-nginx controller.
///
/// # Errors
///
/// Returns an error if the chart install fails or times out.
pub async fn install_ingress_nginx(
    runner: &dyn CommandRunner,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    let release = HelmRelease::new(
        INGRESS_NGINX_RELEASE,
        INGRESS_NGINX_CHART,
        &config.helm_timeout,
    );
    helm::upgrade_install(runner, &release, &config.kubeconfig).await?;

    info!("Dependencies Installed: Ingress-Nginx");
    Ok(())
}

/// Run every dependency step in order.
///
/// # Errors
///
/// Returns the first step's error; nothing is rolled back.
pub async fn install_dependencies(
    runner: &dyn CommandRunner,
    client: &Client,
    config: &BootstrapConfig,
) -> Result<(), BootstrapError> {
    download_dependencies(runner, config).await?;
    install_metallb(runner, client, config).await?;
    install_ingress_nginx(runner, config).await
}

#[cfg(test)]
#[path = "dependencies_tests.rs"]
mod dependencies_tests;
