use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokenwatch::domain::Region;
use tokenwatch::error::{ConfigError, Error};
use tokenwatch::infrastructure::config::settings::Config;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("tokenwatch-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

fn load(contents: &str) -> tokenwatch::error::Result<Config> {
    let path = write_temp_config(contents);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    result
}

#[test]
fn config_loads_full_file() {
    let toml = r#"
database = "/var/lib/tokenwatch/alerts.db"

[logging]
level = "debug"
format = "json"

[scheduler]
interval_minutes = 10

[upstream]
oauth_url = "https://{region}.battle.net/oauth/token"
api_url = "https://{region}.api.blizzard.com/data/wow/token/index"
locale = "en_GB"
token_safety_margin_secs = 600

[upstream.http]
timeout_ms = 2000
connect_timeout_ms = 1000

[alerts]
regions = ["us", "eu"]
default_region = "eu"
min_threshold = 500
max_threshold = 2000000

[telegram]
enabled = false
"#;

    let config = load(toml).expect("config should load");

    assert_eq!(config.database, "/var/lib/tokenwatch/alerts.db");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.upstream.locale, "en_GB");
    assert_eq!(config.upstream.token_safety_margin(), Duration::from_secs(600));
    assert_eq!(config.alerts.default_region(), Region::new("eu"));
    assert_eq!(config.regions(), vec![Region::new("us"), Region::new("eu")]);
    assert!(!config.telegram.enabled);
}

#[test]
fn config_empty_file_uses_defaults() {
    let config = load("").expect("empty config should load");

    assert_eq!(config.alerts.default_region, "us");
    assert_eq!(config.alerts.min_threshold, 1_000);
    assert_eq!(config.alerts.max_threshold, 1_000_000);
    assert_eq!(config.upstream.locale, "en_US");
}

#[test]
fn config_rejects_url_without_region_placeholder() {
    let toml = r#"
[upstream]
api_url = "https://us.api.blizzard.com/data/wow/token/index"
"#;

    let result = load(toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field: "api_url", .. }))
    ));
}

#[test]
fn config_rejects_default_region_outside_regions() {
    let toml = r#"
[alerts]
regions = ["us", "eu"]
default_region = "kr"
"#;

    let result = load(toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "default_region",
            ..
        }))
    ));
}

#[test]
fn config_rejects_inverted_threshold_range() {
    let toml = r#"
[alerts]
min_threshold = 5000
max_threshold = 1000
"#;

    let result = load(toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "max_threshold",
            ..
        }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let result = load("[scheduler\ninterval_minutes = 5");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_missing_file_is_read_error() {
    let mut path = std::env::temp_dir();
    path.push("tokenwatch-config-test-does-not-exist.toml");

    let result = Config::load(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
