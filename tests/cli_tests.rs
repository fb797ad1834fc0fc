//! CLI integration tests. None of these reach the network.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slotwatch(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("slotwatch");
    cmd.current_dir(dir)
        .env_remove("WB_TOKEN")
        .env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace(extra: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = dir.path().join("slots.db");
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("database = \"{}\"\n{extra}", db.display().to_string().replace('\\', "/")),
    )
    .expect("write config");
    (dir, config)
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().expect("create temp dir");
    slotwatch(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("subscriptions"));
}

#[test]
fn check_config_reports_missing_tokens() {
    let (dir, config) = workspace("[telegram]\nenabled = true\n");
    slotwatch(dir.path())
        .args(["check", "config", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("WB_TOKEN"))
        .stdout(predicate::str::contains("TELEGRAM_BOT_TOKEN"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let (dir, config) = workspace("[poller]\ninterval_secs = 0\n");
    slotwatch(dir.path())
        .args(["check", "config", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_secs"));
}

#[test]
fn search_without_provider_token_fails() {
    let (dir, config) = workspace("");
    slotwatch(dir.path())
        .args(["search", "--box-type", "Короба", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("WB_TOKEN"));
}

#[test]
fn search_rejects_unknown_box_type() {
    let (dir, config) = workspace("");
    slotwatch(dir.path())
        .args(["search", "--box-type", "Ящики", "--config"])
        .arg(&config)
        .env("WB_TOKEN", "unused")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown box type"))
        .stderr(predicate::str::contains("Монопаллеты"));
}

#[test]
fn search_accepts_box_type_in_any_case() {
    let (dir, config) = workspace("");
    slotwatch(dir.path())
        .args(["search", "--box-type", "КОРОБА", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("WB_TOKEN"))
        .stderr(predicate::str::contains("unknown box type").not());
}

#[test]
fn wildcard_subscription_round_trip() {
    let (dir, config) = workspace("");
    let add = |args: &[&str]| {
        let mut cmd = slotwatch(dir.path());
        cmd.args(["subscriptions", "add", "--config"])
            .arg(&config)
            .args(args);
        cmd
    };

    add(&[
        "--owner",
        "-100500",
        "--warehouse",
        "*",
        "--max-coefficient",
        "2",
        "--lead-days",
        "1",
        "--box-type",
        "короба",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Subscription #1 added"));

    slotwatch(dir.path())
        .args(["--json", "subscriptions", "list", "--owner", "-100500", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"box_types\":[\"Короба\"]"))
        .stdout(predicate::str::contains("\"max_coefficient\":2"));

    slotwatch(dir.path())
        .args(["subscriptions", "remove", "--owner", "-100500", "--warehouse", "*", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 subscription(s)"));
}

#[test]
fn named_subscription_needs_a_synced_directory() {
    let (dir, config) = workspace("");
    slotwatch(dir.path())
        .args([
            "subscriptions",
            "add",
            "--owner",
            "1",
            "--warehouse",
            "Казань",
            "--max-coefficient",
            "1",
            "--lead-days",
            "0",
            "--box-type",
            "Короба",
            "--config",
        ])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no warehouse resembles"));
}

#[test]
fn coefficient_above_the_limit_is_rejected() {
    let (dir, config) = workspace("[matching]\nmax_coefficient_limit = 5\n");
    slotwatch(dir.path())
        .args([
            "subscriptions",
            "add",
            "--owner",
            "1",
            "--warehouse",
            "*",
            "--max-coefficient",
            "6",
            "--lead-days",
            "0",
            "--box-type",
            "Короба",
            "--config",
        ])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 0..=5"));
}

#[test]
fn empty_directory_listing_hints_at_sync() {
    let (dir, config) = workspace("");
    slotwatch(dir.path())
        .args(["warehouses", "list", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("warehouses sync"));
}
