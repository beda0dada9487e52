use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("beacon-init");
    let output = cmd
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("genconfig"), "help missing genconfig");
    assert!(text.contains("checkconfig"), "help missing checkconfig");
    assert!(text.contains("show"), "help missing show");
}

#[test]
fn genconfig_prompts_and_writes_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");

    cargo_bin_cmd!("beacon-init")
        .arg("genconfig")
        .arg("--config")
        .arg(&path)
        .write_stdin("chat\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Enter your project name: "));

    let written = fs::read_to_string(&path).expect("read generated");
    assert!(written.starts_with("projects:\n  - name: chat\n    secret: "));
}

#[test]
fn genconfig_refuses_existing_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "keep me").expect("seed");

    cargo_bin_cmd!("beacon-init")
        .arg("genconfig")
        .arg("-c")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&path).expect("read"), "keep me");
}

#[test]
fn genconfig_rejects_unknown_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.txt");

    cargo_bin_cmd!("beacon-init")
        .arg("genconfig")
        .arg("-c")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("json, toml, yaml, yml"));

    assert!(!path.exists());
}

#[test]
fn checkconfig_reports_project_count() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[[projects]]\nname = \"chat\"\nsecret = \"s\"\n\n[[projects]]\nname = \"feed\"\nsecret = \"t\"\n",
    )
    .expect("seed");

    cargo_bin_cmd!("beacon-init")
        .arg("checkconfig")
        .arg("-c")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 projects)"));
}

#[test]
fn checkconfig_fails_on_unparseable_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{").expect("seed");

    cargo_bin_cmd!("beacon-init")
        .arg("checkconfig")
        .arg("-c")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to locate config file"));
}

#[test]
fn show_prints_resolved_config() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"name": "edge-1", "channel_prefix": "demo", "node_ping_interval": 4}"#,
    )
    .expect("seed");

    let output = cargo_bin_cmd!("beacon-init")
        .arg("show")
        .arg("-c")
        .arg(&path)
        .env_remove("BEACON_NAME")
        .env_remove("BEACON_CHANNEL_PREFIX")
        .env_remove("BEACON_NODE_PING_INTERVAL")
        .env("BEACON_INSECURE", "true")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let resolved: serde_json::Value =
        serde_json::from_slice(&output).expect("json output");
    assert_eq!(resolved["name"], "edge-1");
    assert_eq!(resolved["admin_channel"], "demo.admin");
    assert_eq!(resolved["control_channel"], "demo.control");
    assert_eq!(resolved["node_info_clean_interval"], 12);
    assert_eq!(resolved["node_info_max_delay"], 9);
    assert_eq!(resolved["insecure"], true);
}
