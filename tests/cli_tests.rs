use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Config file and database in a private temp directory.
struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new(extra: &str) -> Self {
        let mut dir = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        dir.push(format!("tokenwatch-cli-test-{nanos}-{suffix}"));
        fs::create_dir_all(&dir).expect("create temp dir");

        let database = dir.join("alerts.db");
        let contents = format!(
            "database = \"{}\"\n{extra}",
            database.display().to_string().replace('\\', "/")
        );
        fs::write(dir.join("config.toml"), contents).expect("write temp config");
        Self { dir }
    }

    fn config(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    fn run(&self, args: &[&str]) -> Output {
        run_with_config(&self.config(), args)
    }

    fn json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "command {args:?} failed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().last().expect("json output line");
        serde_json::from_str(line).expect("valid json")
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn run_with_config(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tokenwatch"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("POLL_INTERVAL_MINUTES")
        .env_remove("RUST_LOG")
        .output()
        .expect("run tokenwatch")
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let workspace = Workspace::new("[scheduler]\ninterval_minutes = 0\n");

    let output = workspace.run(&["config", "validate"]);

    assert!(!output.status.success(), "Expected nonzero exit code");
    let text = combined(&output);
    assert!(
        text.contains("interval_minutes"),
        "Expected error message about invalid config.\n{text}"
    );
}

#[test]
fn cli_validates_good_config() {
    let workspace = Workspace::new("");

    let value = workspace.json(&["config", "validate"]);

    assert_eq!(value["command"], "config.validate");
    assert_eq!(value["valid"], true);
}

#[test]
fn cli_missing_explicit_config_fails() {
    let workspace = Workspace::new("");
    let missing = workspace.dir.join("missing.toml");

    let output = run_with_config(&missing, &["config", "validate"]);

    assert!(!output.status.success());
    assert!(combined(&output).contains("failed to read config file"));
}

#[test]
fn cli_config_show_reports_effective_values() {
    let workspace = Workspace::new("[alerts]\ndefault_region = \"eu\"\n");

    let value = workspace.json(&["config", "show"]);

    assert_eq!(value["config"]["alerts"]["default_region"], "eu");
    assert_eq!(value["config"]["scheduler"]["interval_minutes"], 5);
}

#[test]
fn cli_alert_lifecycle() {
    let workspace = Workspace::new("");

    let created = workspace.json(&[
        "alert", "set", "-s", "u1", "-d", "1001", "-p", "5000", "--direction", "below",
    ]);
    assert_eq!(created["alert"]["id"], "u1-1");
    assert_eq!(created["alert"]["direction"], "below");
    assert_eq!(created["alert"]["region"], "us");
    assert_eq!(created["alert"]["threshold"], 5000);

    let listed = workspace.json(&["alert", "list", "-s", "u1"]);
    assert_eq!(listed["alerts"].as_array().map(Vec::len), Some(1));

    let shown = workspace.json(&["alert", "show", "u1-1"]);
    assert_eq!(shown["alert"]["triggered"], false);

    let foreign = workspace.json(&["alert", "remove", "-s", "u2", "u1-1"]);
    assert_eq!(foreign["removed"], false);

    let removed = workspace.json(&["alert", "remove", "-s", "u1", "u1-1"]);
    assert_eq!(removed["removed"], true);

    let listed = workspace.json(&["alert", "list", "-s", "u1"]);
    assert_eq!(listed["alerts"].as_array().map(Vec::len), Some(0));
    let shown = workspace.json(&["alert", "show", "u1-1"]);
    assert!(shown["alert"].is_null());
}

#[test]
fn cli_alert_ids_continue_across_invocations() {
    let workspace = Workspace::new("");

    workspace.json(&["alert", "set", "-s", "u1", "-d", "1", "-p", "5000"]);
    let second = workspace.json(&["alert", "set", "-s", "u2", "-d", "2", "-p", "6000"]);

    assert_eq!(second["alert"]["id"], "u2-2");
}

#[test]
fn cli_rejects_out_of_range_threshold() {
    let workspace = Workspace::new("");

    let output = workspace.run(&["alert", "set", "-s", "u1", "-d", "1", "-p", "999"]);

    assert!(!output.status.success());
    assert!(combined(&output).contains("999"));
}

#[test]
fn cli_rejects_unknown_region() {
    let workspace = Workspace::new("");

    let output = workspace.run(&[
        "alert", "set", "-s", "u1", "-d", "1", "-p", "5000", "-r", "cn",
    ]);

    assert!(!output.status.success());
    assert!(combined(&output).contains("cn"));
}

#[test]
fn cli_rejects_bad_direction() {
    let workspace = Workspace::new("");

    let output = workspace.run(&[
        "alert", "set", "-s", "u1", "-d", "1", "-p", "5000", "--direction", "sideways",
    ]);

    assert!(!output.status.success());
    assert!(combined(&output).contains("sideways"));
}
