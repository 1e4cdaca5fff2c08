// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `config.rs`

#[cfg(test)]
mod tests {
    use crate::config::{BootstrapConfig, CopyMode};
    use crate::errors::BootstrapError;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_defaults_match_ci_example_project() {
        let config = BootstrapConfig::default();

        assert_eq!(config.cluster_name, "ci-example");
        assert_eq!(config.image_ref(), "ghcr.io/joan-mido-qa/ci-example:dev");
        assert_eq!(config.kubeconfig, PathBuf::from("scripts/kubeconfig"));
        assert_eq!(config.hosts_file, PathBuf::from("/etc/hosts"));
        assert_eq!(config.copy_mode, CopyMode::Sudo);
        assert_eq!(config.metallb_namespace, "default");
        assert!(!config.verify);
    }

    #[test]
    fn test_default_retry_policy_is_ten_by_five_seconds() {
        let policy = BootstrapConfig::default().retry_policy();

        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = BootstrapConfig::from_yaml(
            "clusterName: dev\nimageTag: feature-x\ncopyMode: direct\nhostsFile: /tmp/hosts\n",
        )
        .expect("valid config");

        assert_eq!(config.cluster_name, "dev");
        assert_eq!(config.image_ref(), "ghcr.io/joan-mido-qa/ci-example:feature-x");
        assert_eq!(config.copy_mode, CopyMode::Direct);
        assert_eq!(config.hosts_file, PathBuf::from("/tmp/hosts"));
        assert_eq!(config.app_release, "ci-example");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = BootstrapConfig::from_yaml("").expect("empty is valid");
        assert_eq!(config, BootstrapConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = BootstrapConfig::from_yaml("retryAttempts: many").unwrap_err();
        assert!(matches!(err, BootstrapError::Config(_)));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = BootstrapConfig::from_yaml("retryAttempts: 0").unwrap_err();
        assert!(err.to_string().contains("retryAttempts"));
    }

    #[test]
    fn test_empty_cluster_name_rejected() {
        let err = BootstrapConfig::from_yaml("clusterName: ''").unwrap_err();
        assert!(err.to_string().contains("clusterName"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "appHost: demo.local").expect("write");

        let config = BootstrapConfig::load(file.path()).await.expect("load");

        assert_eq!(config.app_host, "demo.local");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_config_error() {
        let err = BootstrapConfig::load(std::path::Path::new("/nonexistent/kindling.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Config(_)));
    }

    #[test]
    fn test_app_values() {
        let values = BootstrapConfig::default().app_values();

        assert_eq!(
            values,
            vec![
                ("image.tag".to_string(), "dev".to_string()),
                ("ingress.enabled".to_string(), "true".to_string()),
                ("ingress.className".to_string(), "nginx".to_string()),
            ]
        );
    }

    #[test]
    fn test_health_url() {
        let url = BootstrapConfig::default().health_url().expect("valid url");
        assert_eq!(url.as_str(), "http://ci-example.local/health");
    }

    #[tokio::test]
    async fn test_kube_client_with_missing_kubeconfig() {
        let config = BootstrapConfig {
            kubeconfig: PathBuf::from("/nonexistent/kubeconfig"),
            ..BootstrapConfig::default()
        };

        let err = config
            .kube_client()
            .await
            .err()
            .expect("expected kube_client to fail");

        assert!(matches!(err, BootstrapError::Kubeconfig { .. }));
    }
}
