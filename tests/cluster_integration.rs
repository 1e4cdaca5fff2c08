// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Integration tests against a kind cluster bootstrapped by `kindling up`.
//!
//! Run with: cargo test --test cluster_integration -- --ignored

mod common;

use kindling::hosts::{ClusterState, HostsFile, ObservedEndpoints};
use kindling::metallb::{address_pool, l2_advertisement, IPAddressPool, L2Advertisement};
use kindling::upsert::{create_or_patch_spec, UpsertOutcome};
use kube::Api;

#[tokio::test]
#[ignore = "requires a kind cluster with MetalLB installed"]
async fn test_upsert_existing_pool_is_patched() {
    let Some(client) = common::get_kube_client_or_skip().await else {
        return;
    };
    let namespace = common::bootstrap_config().await.metallb_namespace;

    let pools: Api<IPAddressPool> = Api::namespaced(client.clone(), &namespace);
    let current = pools
        .get(kindling::constants::ADDRESS_POOL_NAME)
        .await
        .expect("bootstrap should have created the address pool");

    let pool = address_pool(&current.spec.addresses[0]);
    let outcome = create_or_patch_spec(&pools, &pool, &pool.spec)
        .await
        .expect("upsert should succeed");
    assert_eq!(outcome, UpsertOutcome::Patched);

    let advertisements: Api<L2Advertisement> = Api::namespaced(client, &namespace);
    let advertisement = l2_advertisement();
    let outcome = create_or_patch_spec(&advertisements, &advertisement, &advertisement.spec)
        .await
        .expect("upsert should succeed");
    assert_eq!(outcome, UpsertOutcome::Patched);
}

#[tokio::test]
#[ignore = "requires a bootstrapped kind cluster"]
async fn test_every_endpoint_is_in_hosts_file() {
    let Some(client) = common::get_kube_client_or_skip().await else {
        return;
    };
    let config = common::bootstrap_config().await;

    let state = ClusterState::fetch(&client).await.expect("list should succeed");
    let observed = ObservedEndpoints::from_state(&state);
    assert!(observed.pending.is_empty(), "pending: {:?}", observed.pending);

    let content = std::fs::read_to_string(&config.hosts_file).expect("hosts file readable");
    let file = HostsFile::parse(&content);
    for expected in &observed.entries {
        assert!(
            file.entries().any(|entry| entry.address == expected.address
                && expected.names.is_subset(&entry.names)),
            "missing hosts entry: {expected}"
        );
    }
}
