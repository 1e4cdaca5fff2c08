// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `endpoints.rs`

#[cfg(test)]
mod tests {
    use crate::hosts::endpoints::{ClusterState, ObservedEndpoints};
    use crate::hosts::file::HostEntry;
    use k8s_openapi::api::core::v1::Service;
    use k8s_openapi::api::networking::v1::Ingress;
    use serde_json::json;

    fn ingress(name: &str, host: Option<&str>, ip: Option<&str>) -> Ingress {
        let rules = host.map_or_else(|| json!([]), |h| json!([{ "host": h }]));
        let lb_ingress = ip.map_or_else(|| json!([]), |ip| json!([{ "ip": ip }]));

        serde_json::from_value(json!({
            "apiVersion": "networking.k8s.io/v1",
            "kind": "Ingress",
            "metadata": { "name": name, "namespace": "default" },
            "spec": { "rules": rules },
            "status": { "loadBalancer": { "ingress": lb_ingress } }
        }))
        .expect("valid ingress")
    }

    fn service(name: &str, namespace: &str, type_: &str, ip: Option<&str>) -> Service {
        let lb_ingress = ip.map_or_else(|| json!([]), |ip| json!([{ "ip": ip }]));

        serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": { "name": name, "namespace": namespace },
            "spec": { "type": type_ },
            "status": { "loadBalancer": { "ingress": lb_ingress } }
        }))
        .expect("valid service")
    }

    #[test]
    fn test_ingress_maps_first_rule_host_to_ip() {
        let state = ClusterState {
            ingresses: vec![ingress("ci-example", Some("ci-example.local"), Some("172.18.255.1"))],
            services: vec![],
        };

        let observed = ObservedEndpoints::from_state(&state);

        assert_eq!(
            observed.entries,
            vec![HostEntry::new(
                "172.18.255.1".parse().unwrap(),
                ["ci-example.local"],
                Some("kindling: kubectl get ingress/ci-example".to_string()),
            )]
        );
        assert!(observed.pending.is_empty());
    }

    #[test]
    fn test_load_balancer_service_gets_synthesized_name() {
        let state = ClusterState {
            ingresses: vec![],
            services: vec![
                service("ingress-nginx-controller", "default", "LoadBalancer", Some("172.18.255.2")),
                service("kubernetes", "default", "ClusterIP", None),
            ],
        };

        let observed = ObservedEndpoints::from_state(&state);

        assert_eq!(observed.entries.len(), 1, "ClusterIP services are ignored");
        let entry = &observed.entries[0];
        assert_eq!(entry.address.to_string(), "172.18.255.2");
        assert!(entry.names.contains("ingress-nginx-controller.default.local"));
        assert_eq!(
            entry.comment.as_deref(),
            Some("kindling: kubectl get service/ingress-nginx-controller")
        );
    }

    #[test]
    fn test_missing_ip_is_pending() {
        let state = ClusterState {
            ingresses: vec![ingress("web", Some("web.local"), None)],
            services: vec![service("api", "demo", "LoadBalancer", None)],
        };

        let observed = ObservedEndpoints::from_state(&state);

        assert!(observed.entries.is_empty());
        assert_eq!(
            observed.pending,
            vec!["ingress/default/web".to_string(), "service/demo/api".to_string()]
        );
    }

    #[test]
    fn test_ingress_without_host_is_skipped() {
        let state = ClusterState {
            ingresses: vec![ingress("catch-all", None, Some("172.18.255.1"))],
            services: vec![],
        };

        let observed = ObservedEndpoints::from_state(&state);

        assert!(observed.entries.is_empty());
        assert!(observed.pending.is_empty(), "A hostless ingress never becomes ready");
    }

    #[test]
    fn test_invalid_ip_is_skipped() {
        let state = ClusterState {
            ingresses: vec![],
            services: vec![service("api", "demo", "LoadBalancer", Some("not-an-ip"))],
        };

        let observed = ObservedEndpoints::from_state(&state);

        assert!(observed.entries.is_empty());
        assert!(observed.pending.is_empty());
    }
}
