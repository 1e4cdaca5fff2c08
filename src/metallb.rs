// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! MetalLB custom resources used to hand out load-balancer IPs on kind.
//!
//! kind nodes sit on a docker bridge network. MetalLB is given the last /24 of
//! that network as its address pool and announces it over layer 2, so
//! `LoadBalancer` services and the ingress controller get addresses that are
//! routable from the host.
//!
//! # Example
//!
//! ```rust
//! use kindling::metallb::address_pool_cidr;
//!
//! assert_eq!(address_pool_cidr("172.18.0.0/16").unwrap(), "172.18.255.0/24");
//! ```

use crate::constants::{ADDRESS_POOL_NAME, ADDRESS_POOL_PREFIX_LEN, L2_ADVERTISEMENT_NAME};
use crate::errors::BootstrapError;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// `IPAddressPool` declares the addresses MetalLB may assign.
///
/// # Example
///
/// ```yaml
/// apiVersion: metallb.io/v1beta1
/// kind: IPAddressPool
/// metadata:
///   name: kind-address-pool
/// spec:
///   addresses:
///     - 172.18.255.0/24
/// ```
#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "metallb.io",
    version = "v1beta1",
    kind = "IPAddressPool",
    plural = "ipaddresspools",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct IPAddressPoolSpec {
    /// CIDRs or `start-end` ranges handed out to services.
    pub addresses: Vec<String>,
}

/// `L2Advertisement` announces pool addresses on the local network segment.
///
/// An empty spec advertises every pool.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "metallb.io",
    version = "v1beta1",
    kind = "L2Advertisement",
    plural = "l2advertisements",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct L2AdvertisementSpec {
    /// Pools to advertise; all pools when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_address_pools: Vec<String>,
}

/// Build the address pool covering `cidr`.
#[must_use]
pub fn address_pool(cidr: &str) -> IPAddressPool {
    IPAddressPool::new(
        ADDRESS_POOL_NAME,
        IPAddressPoolSpec {
            addresses: vec![cidr.to_string()],
        },
    )
}

/// Build the layer 2 advertisement for every pool.
#[must_use]
pub fn l2_advertisement() -> L2Advertisement {
    L2Advertisement::new(L2_ADVERTISEMENT_NAME, L2AdvertisementSpec::default())
}

/// Derive the MetalLB pool from a docker network subnet: its last /24.
///
/// `172.18.0.0/16` becomes `172.18.255.0/24`; a /24 network maps to itself.
///
/// # Errors
///
/// Returns [`BootstrapError::InvalidSubnet`] if `subnet` is not an IPv4 CIDR
/// or is narrower than a /24.
pub fn address_pool_cidr(subnet: &str) -> Result<String, BootstrapError> {
    let invalid = |reason: &str| BootstrapError::InvalidSubnet {
        subnet: subnet.to_string(),
        reason: reason.to_string(),
    };

    let (addr, prefix) = subnet
        .split_once('/')
        .ok_or_else(|| invalid("missing prefix length"))?;
    let addr: Ipv4Addr = addr.parse().map_err(|_| invalid("not an IPv4 address"))?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid("invalid prefix length"))?;

    if prefix > ADDRESS_POOL_PREFIX_LEN {
        return Err(invalid("network is smaller than a /24"));
    }

    let network_mask = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    let pool_mask = u32::MAX << (32 - u32::from(ADDRESS_POOL_PREFIX_LEN));
    let broadcast = (u32::from(addr) & network_mask) | !network_mask;
    let pool = Ipv4Addr::from(broadcast & pool_mask);

    Ok(format!("{pool}/{ADDRESS_POOL_PREFIX_LEN}"))
}

#[cfg(test)]
#[path = "metallb_tests.rs"]
mod metallb_tests;
