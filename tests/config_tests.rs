//! Configuration loading from files on disk.

use std::fs;

use slotwatch::application::{PollerConfig, SubscriptionRules};
use slotwatch::error::{ConfigError, Error};
use slotwatch::infrastructure::config::Config;

fn load(contents: &str) -> Result<Config, Error> {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write config");
    Config::load(&path)
}

#[test]
fn example_config_is_valid() {
    let contents = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml"))
        .expect("read example config");
    let config = load(&contents).expect("example config parses");
    assert_eq!(config.poller.interval_secs, 15);
    assert_eq!(config.telegram.max_message_chars, 4096);
}

#[test]
fn sections_convert_into_runtime_settings() {
    let config = load(
        r#"
[poller]
interval_secs = 30
retry_delay_secs = 5
dedupe_within_cycle = false

[matching]
min_name_score = 80
box_types = ["Короба", "Монопаллеты"]
max_coefficient_limit = 10
"#,
    )
    .expect("valid config");

    let poller = PollerConfig::from(&config.poller);
    assert_eq!(poller.interval.as_secs(), 30);
    assert_eq!(poller.retry_delay.as_secs(), 5);
    assert!(!poller.dedupe_within_cycle);

    let rules = SubscriptionRules::from(&config.matching);
    assert_eq!(rules.min_name_score, 80);
    assert_eq!(rules.box_types.len(), 2);
    assert_eq!(rules.max_coefficient_limit, 10);
}

#[test]
fn token_in_the_file_is_ignored() {
    // Tokens only come from the environment.
    let config = load("[provider]\ntoken = \"from-file\"\n").expect("unknown keys are ignored");
    assert_ne!(config.provider.token.as_deref(), Some("from-file"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn empty_database_path_is_rejected() {
    let result = load("database = \"  \"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField { field: "database" }))
    ));
}
