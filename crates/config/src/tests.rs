use crate::{AppConfig, ElasticsearchSettings, RetrySettings};
use figment::{
    Figment, Jail,
    providers::{Format, Toml},
};
use secrecy::{ExposeSecret, Secret};

const CONFIG: &str = r#"
    app_name = "docsearch"
    app_env = "test"

    [elasticsearch]
    hosts = ["http://es1:9200", "http://es2:9200"]
    username = "elastic"
    password = "changeme"
    index_prefix = "test-"
    refresh_policy = "wait_for"

    [elasticsearch.retry]
    max_attempts = 5

    [query]
    default_page_size = 20
"#;

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let settings = ElasticsearchSettings {
        hosts: vec!["http://localhost:9200".to_string()],
        username: Some("elastic".to_string()),
        password: Some(Secret::new("changeme".to_string())),
        index_prefix: None,
        request_timeout_secs: 30,
        refresh_policy: "none".to_string(),
        retry: RetrySettings::default(),
    };
    let debug_output = format!("{:?}", settings);
    assert!(!debug_output.contains("changeme"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_load_from_toml() {
    let config = AppConfig::from_figment(Figment::new().merge(Toml::string(CONFIG))).unwrap();

    assert_eq!(config.elasticsearch.hosts.len(), 2);
    assert_eq!(config.elasticsearch.index_prefix.as_deref(), Some("test-"));
    assert_eq!(
        config
            .elasticsearch
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_str()),
        Some("changeme")
    );
    assert_eq!(config.elasticsearch.retry.max_attempts, 5);
    assert_eq!(config.elasticsearch.retry.initial_delay_ms, 100);
    assert_eq!(config.query.default_page_size, 20);
    assert_eq!(config.query.max_result_window, 10_000);
    assert_eq!(config.telemetry.log_level, "info");
    assert!(!config.is_production());
}

#[test]
fn test_env_overrides_files() {
    Jail::expect_with(|jail| {
        jail.create_file("default.toml", CONFIG)?;
        jail.create_file("production.toml", "app_env = \"production\"")?;
        jail.set_env("DOCSEARCH_ELASTICSEARCH__INDEX_PREFIX", "prod-");
        jail.set_env("DOCSEARCH_TELEMETRY__JSON", "true");

        let config = AppConfig::from_figment(AppConfig::figment(".", "production"))
            .map_err(|e| e.to_string())?;

        assert!(config.is_production());
        assert_eq!(config.elasticsearch.index_prefix.as_deref(), Some("prod-"));
        assert!(config.telemetry.json);
        Ok(())
    });
}

#[test]
fn test_missing_section_fails() {
    let result = AppConfig::from_figment(Figment::new().merge(Toml::string("app_name = \"x\"")));
    assert!(result.is_err());
}
