//! Configuration loading tests

#[cfg(test)]
mod tests {
    use ingest_gateway::config::{GatewayConfig, Validate};
    use ingest_gateway::{Config, GatewayError};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"auth:\n  api_key: from-file\nserver:\n  port: 9100\n")
            .unwrap();

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.auth().api_key, "from-file");
        assert_eq!(config.server().port, 9100);
        assert_eq!(config.auth().api_key_header, "api-key");
        assert_eq!(config.ingest().default_batch_size, 5);
        assert!(!config.notify().is_enabled());
    }

    #[tokio::test]
    async fn test_invalid_yaml_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server: [not, a, map").unwrap();

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, GatewayError::Config(_) | GatewayError::Yaml(_)));
    }

    #[test]
    fn test_env_overrides_win() {
        let mut gateway = GatewayConfig::default();
        gateway.auth.api_key = "from-file".to_string();

        assert_ok!(gateway.apply_overrides(&vars(&[
            ("INGEST_API_KEY", "from-env"),
            ("INGEST_PORT", "9200"),
            ("NOTIFY_RELAY_URL", "https://relay.example.com/notify"),
            ("INGEST_DEFAULT_BATCH_SIZE", "25"),
            ("REDIS_ENABLED", "false"),
        ])));

        assert_eq!(gateway.auth.api_key, "from-env");
        assert_eq!(gateway.server.port, 9200);
        assert!(gateway.notify.is_enabled());
        assert_eq!(gateway.ingest.default_batch_size, 25);
        assert!(!gateway.storage.redis.enabled);
        assert!(gateway.validate().is_ok());
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut gateway = GatewayConfig::default();
        gateway.auth.api_key = "kept".to_string();
        assert_ok!(gateway.apply_overrides(&vars(&[("INGEST_API_KEY", "")])));
        assert_eq!(gateway.auth.api_key, "kept");
    }

    #[test]
    fn test_unparseable_env_value_is_config_error() {
        let mut gateway = GatewayConfig::default();
        let err = assert_err!(gateway.apply_overrides(&vars(&[("INGEST_PORT", "eighty")])));
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_validation_catches_bad_relay_url() {
        let mut gateway = GatewayConfig::default();
        gateway.auth.api_key = "k".to_string();
        gateway.notify.base_url = Some("ftp://relay".to_string());
        assert!(gateway.validate().is_err());
    }
}
