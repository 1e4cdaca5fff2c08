// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Load-balancer endpoints observed in the cluster.
//!
//! Two sources feed the hosts file:
//! - Ingresses: `spec.rules[0].host` → `status.loadBalancer.ingress[0].ip`
//! - `LoadBalancer` services: `{name}.{namespace}.local` → `status.loadBalancer.ingress[0].ip`
//!
//! Endpoints are recomputed on every pass and never persisted.

use super::file::HostEntry;
use crate::constants::{HOSTS_COMMENT_PREFIX, SERVICE_HOST_SUFFIX};
use crate::errors::HostsError;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::ListParams;
use kube::{Api, Client, ResourceExt};
use std::net::IpAddr;
use tracing::{debug, warn};

const SERVICE_TYPE_LOAD_BALANCER: &str = "LoadBalancer";

/// Snapshot of the cluster objects the hosts file is derived from.
#[derive(Debug, Clone, Default)]
pub struct ClusterState {
    pub ingresses: Vec<Ingress>,
    pub services: Vec<Service>,
}

impl ClusterState {
    /// List ingresses and services across all namespaces.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::ClusterQuery`] if either list call fails.
    pub async fn fetch(client: &Client) -> Result<Self, HostsError> {
        let ingresses = Api::<Ingress>::all(client.clone())
            .list(&ListParams::default())
            .await
            .map_err(|source| HostsError::ClusterQuery {
                kind: "ingresses",
                source,
            })?
            .items;

        let services = Api::<Service>::all(client.clone())
            .list(&ListParams::default())
            .await
            .map_err(|source| HostsError::ClusterQuery {
                kind: "services",
                source,
            })?
            .items;

        debug!(
            ingresses = ingresses.len(),
            services = services.len(),
            "Fetched cluster state"
        );

        Ok(Self {
            ingresses,
            services,
        })
    }
}

/// Desired entries plus the objects still waiting for a load-balancer IP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedEndpoints {
    pub entries: Vec<HostEntry>,
    /// `kind/namespace/name` of every object without an IP yet
    pub pending: Vec<String>,
}

impl ObservedEndpoints {
    /// Derive endpoints from a cluster snapshot.
    #[must_use]
    pub fn from_state(state: &ClusterState) -> Self {
        let mut observed = Self::default();

        for ingress in &state.ingresses {
            observed.add_ingress(ingress);
        }
        for service in &state.services {
            observed.add_service(service);
        }

        observed
    }

    fn add_ingress(&mut self, ingress: &Ingress) {
        let name = ingress.name_any();
        let id = object_id("ingress", ingress.namespace(), &name);

        let host = ingress
            .spec
            .as_ref()
            .and_then(|spec| spec.rules.as_ref())
            .and_then(|rules| rules.first())
            .and_then(|rule| rule.host.clone());
        let Some(host) = host else {
            warn!(ingress = %id, "Ingress has no host in its first rule, skipping");
            return;
        };

        let ip = ingress
            .status
            .as_ref()
            .and_then(|status| status.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref())
            .and_then(|lb_ingress| lb_ingress.first())
            .and_then(|lb_ingress| lb_ingress.ip.as_deref());

        self.push(id, ip, host, format!("{HOSTS_COMMENT_PREFIX} ingress/{name}"));
    }

    fn add_service(&mut self, service: &Service) {
        let is_load_balancer = service
            .spec
            .as_ref()
            .and_then(|spec| spec.type_.as_deref())
            == Some(SERVICE_TYPE_LOAD_BALANCER);
        if !is_load_balancer {
            return;
        }

        let name = service.name_any();
        let namespace = service.namespace().unwrap_or_else(|| "default".to_string());
        let id = object_id("service", Some(namespace.clone()), &name);

        let ip = service
            .status
            .as_ref()
            .and_then(|status| status.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref())
            .and_then(|lb_ingress| lb_ingress.first())
            .and_then(|lb_ingress| lb_ingress.ip.as_deref());

        let host = format!("{name}.{namespace}.{SERVICE_HOST_SUFFIX}");
        self.push(id, ip, host, format!("{HOSTS_COMMENT_PREFIX} service/{name}"));
    }

    fn push(&mut self, id: String, ip: Option<&str>, host: String, comment: String) {
        let Some(ip) = ip else {
            debug!(object = %id, "No load-balancer IP assigned yet");
            self.pending.push(id);
            return;
        };

        match ip.parse::<IpAddr>() {
            Ok(address) => self
                .entries
                .push(HostEntry::new(address, [host], Some(comment))),
            Err(e) => warn!(object = %id, ip = ip, error = %e, "Invalid load-balancer IP, skipping"),
        }
    }
}

fn object_id(kind: &str, namespace: Option<String>, name: &str) -> String {
    format!("{kind}/{}/{name}", namespace.unwrap_or_default())
}

#[cfg(test)]
#[path = "endpoints_tests.rs"]
mod endpoints_tests;
