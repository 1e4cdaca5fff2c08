// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `file.rs`

#[cfg(test)]
mod tests {
    use crate::hosts::file::{EntryType, HostEntry, HostsFile};
    use std::net::IpAddr;

    const SYSTEM_HOSTS: &str = "\
# Static table lookup for hostnames.
127.0.0.1\tlocalhost
::1         localhost ip6-localhost ip6-loopback

192.168.1.10  nas.home nas   # storage box
not-an-ip some-name
";

    fn ip(s: &str) -> IpAddr {
        s.parse().expect("valid IP in test")
    }

    fn entry(address: &str, names: &[&str]) -> HostEntry {
        HostEntry::new(ip(address), names.iter().copied(), None)
    }

    /// Pairs of (address, sorted names) for compact assertions
    fn mappings(file: &HostsFile) -> Vec<(String, Vec<String>)> {
        file.entries()
            .map(|e| (e.address.to_string(), e.names.iter().cloned().collect()))
            .collect()
    }

    #[test]
    fn test_parse_and_render_preserves_content() {
        let file = HostsFile::parse(SYSTEM_HOSTS);

        assert_eq!(file.render(), SYSTEM_HOSTS);
        assert_eq!(file.entries().count(), 3);
    }

    #[test]
    fn test_parse_inline_comment() {
        let file = HostsFile::parse("192.168.1.10  nas.home nas   # storage box\n");
        let parsed = file.entries().next().expect("one entry");

        assert_eq!(parsed.address, ip("192.168.1.10"));
        assert!(parsed.names.contains("nas.home"));
        assert!(parsed.names.contains("nas"));
        assert_eq!(parsed.comment.as_deref(), Some("storage box"));
    }

    #[test]
    fn test_entry_type_follows_address() {
        assert_eq!(entry("10.0.0.1", &["a"]).entry_type(), EntryType::Ipv4);
        assert_eq!(entry("fd00::1", &["a"]).entry_type(), EntryType::Ipv6);
    }

    #[test]
    fn test_display_format() {
        let e = HostEntry::new(
            ip("172.18.255.1"),
            ["ci-example.local"],
            Some("kindling: kubectl get ingress/ci-example".to_string()),
        );

        assert_eq!(
            e.to_string(),
            "172.18.255.1\tci-example.local # kindling: kubectl get ingress/ci-example"
        );
    }

    #[test]
    fn test_address_collision_evicts() {
        let mut file = HostsFile::parse("1.2.3.4\told.local\n");
        file.reconcile(&[entry("1.2.3.4", &["new.local"])]);

        assert_eq!(
            mappings(&file),
            vec![("1.2.3.4".to_string(), vec!["new.local".to_string()])]
        );
    }

    #[test]
    fn test_name_collision_evicts_even_with_different_address() {
        let mut file = HostsFile::parse("9.9.9.9\tsvc.local\n");
        file.reconcile(&[entry("1.1.1.1", &["svc.local"])]);

        assert_eq!(
            mappings(&file),
            vec![("1.1.1.1".to_string(), vec!["svc.local".to_string()])]
        );
    }

    #[test]
    fn test_multi_name_entry_evicted_on_single_name_collision() {
        let mut file = HostsFile::parse("10.0.0.5\tapi.local admin.local\n");
        let removed = file.remove_colliding(&entry("10.0.0.9", &["admin.local"]));

        assert_eq!(removed, 1);
        assert_eq!(file.entries().count(), 0);
    }

    #[test]
    fn test_non_colliding_entries_survive_in_place() {
        let mut file = HostsFile::parse(SYSTEM_HOSTS);
        file.reconcile(&[entry("172.18.255.1", &["ci-example.local"])]);

        let rendered = file.render();
        assert!(rendered.starts_with(SYSTEM_HOSTS));
        assert!(rendered.ends_with("172.18.255.1\tci-example.local\n"));
    }

    #[test]
    fn test_last_write_wins_within_desired_set() {
        let mut file = HostsFile::default();
        file.reconcile(&[
            entry("172.18.255.1", &["web.local"]),
            entry("172.18.255.2", &["web.local"]),
        ]);

        assert_eq!(
            mappings(&file),
            vec![("172.18.255.2".to_string(), vec!["web.local".to_string()])]
        );
    }

    #[test]
    fn test_shared_address_merges_names() {
        let mut file = HostsFile::parse("127.0.0.1\tlocalhost\n");
        file.reconcile(&[
            HostEntry::new(
                ip("172.18.255.200"),
                ["ci-example.local"],
                Some("kindling: kubectl get ingress/ci-example".to_string()),
            ),
            HostEntry::new(
                ip("172.18.255.200"),
                ["ingress-nginx-controller.default.local"],
                Some("kindling: kubectl get service/ingress-nginx-controller".to_string()),
            ),
        ]);

        assert_eq!(
            file.render(),
            "127.0.0.1\tlocalhost\n\
             172.18.255.200\tci-example.local ingress-nginx-controller.default.local \
             # kindling: kubectl get ingress/ci-example\n"
        );
    }

    #[test]
    fn test_merged_entry_is_stable_across_passes() {
        let desired = vec![
            entry("172.18.255.200", &["ci-example.local"]),
            entry("172.18.255.200", &["ingress-nginx-controller.default.local"]),
        ];

        let mut first = HostsFile::default();
        first.reconcile(&desired);
        let once = first.render();

        let mut second = HostsFile::parse(&once);
        second.reconcile(&desired);

        assert_eq!(second.render(), once);
        assert_eq!(second.entries().count(), 1);
    }

    #[test]
    fn test_result_is_independent_of_desired_order() {
        let desired = vec![
            entry("172.18.255.3", &["c.default.local"]),
            entry("172.18.255.1", &["a.local"]),
            entry("172.18.255.2", &["b.local"]),
        ];
        let mut reversed = desired.clone();
        reversed.reverse();

        let mut first = HostsFile::parse(SYSTEM_HOSTS);
        first.reconcile(&desired);
        let mut second = HostsFile::parse(SYSTEM_HOSTS);
        second.reconcile(&reversed);

        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_result_is_preserved_minus_colliding_union_desired() {
        let mut file = HostsFile::parse(
            "127.0.0.1\tlocalhost\n1.2.3.4\told.local\n9.9.9.9\tsvc.default.local\n5.5.5.5\tkeep.local\n",
        );
        file.reconcile(&[
            entry("1.2.3.4", &["new.local"]),
            entry("1.1.1.1", &["svc.default.local"]),
        ]);

        assert_eq!(
            mappings(&file),
            vec![
                ("127.0.0.1".to_string(), vec!["localhost".to_string()]),
                ("5.5.5.5".to_string(), vec!["keep.local".to_string()]),
                ("1.1.1.1".to_string(), vec!["svc.default.local".to_string()]),
                ("1.2.3.4".to_string(), vec!["new.local".to_string()]),
            ]
        );
    }

    #[test]
    fn test_reconcile_twice_is_byte_identical() {
        let desired = vec![
            HostEntry::new(
                ip("172.18.255.1"),
                ["ci-example.local"],
                Some("kindling: kubectl get ingress/ci-example".to_string()),
            ),
            entry("172.18.255.2", &["ingress-nginx-controller.default.local"]),
        ];

        let mut first = HostsFile::parse(SYSTEM_HOSTS);
        first.reconcile(&desired);
        let once = first.render();

        let mut second = HostsFile::parse(&once);
        second.reconcile(&desired);

        assert_eq!(second.render(), once);
    }

    #[test]
    fn test_render_adds_trailing_newline() {
        let file = HostsFile::parse("127.0.0.1 localhost");
        assert_eq!(file.render(), "127.0.0.1 localhost\n");
        assert_eq!(HostsFile::parse("").render(), "");
    }
}
