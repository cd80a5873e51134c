//! Runs the `shopseed` binary and inspects its JSON report.

use std::process::Command;

use serde_json::Value;

fn run(envs: &[(&str, &str)]) -> (bool, Value, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shopseed"));
    cmd.env_remove("SHOPSEED_CONFIG")
        .env("RUST_LOG", "warn")
        .envs(envs.iter().copied());
    let output = cmd.output().expect("failed to run shopseed");
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let json = if output.status.success() {
        serde_json::from_str(&stdout).expect("stdout is not JSON")
    } else {
        Value::Null
    };
    (output.status.success(), json, stderr)
}

#[test]
fn default_run_prints_seeded_product() {
    let (ok, json, stderr) = run(&[]);
    assert!(ok, "shopseed failed: {stderr}");

    let pass = &json[0];
    let product = &pass["products"][0];
    assert_eq!(product["sku"], "simple-product");
    assert_eq!(product["name"], "Simple Product");
    assert_eq!(product["status"], "enabled");
    assert_eq!(product["visibility"], "catalog_and_search");
    assert_eq!(product["category_ids"], serde_json::json!([2]));
    assert_eq!(pass["source_items"][0]["quantity"], 100);
    assert_eq!(pass["report"]["patches"][0]["status"]["state"], "applied");
}

#[test]
fn second_pass_is_recorded_as_already_applied() {
    let (ok, json, stderr) = run(&[("SHOPSEED_RUNS", "2")]);
    assert!(ok, "shopseed failed: {stderr}");

    assert_eq!(json.as_array().map(Vec::len), Some(2));
    assert_eq!(
        json[1]["report"]["patches"][0]["status"]["state"],
        "already_recorded"
    );
    assert_eq!(json[1]["products"].as_array().map(Vec::len), Some(1));
}

#[test]
fn env_overrides_reach_the_seed() {
    let (ok, json, stderr) = run(&[
        ("SHOPSEED_SOURCE_QTY", "90"),
        ("SHOPSEED_ATTRIBUTE_SET_ID", "4"),
    ]);
    assert!(ok, "shopseed failed: {stderr}");
    assert_eq!(json[0]["source_items"][0]["quantity"], 90);
    assert_eq!(json[0]["products"][0]["attribute_set_id"], 4);
}

#[test]
fn unknown_attribute_set_fails_the_install() {
    let (ok, _, stderr) = run(&[("SHOPSEED_ATTRIBUTE_SET_NAME", "Bags")]);
    assert!(!ok);
    assert!(stderr.contains("attribute set"), "stderr: {stderr}");
}

#[test]
fn invalid_config_value_is_reported() {
    let (ok, _, stderr) = run(&[("SHOPSEED_STOCK_QTY", "lots")]);
    assert!(!ok);
    assert!(stderr.contains("SHOPSEED_STOCK_QTY"), "stderr: {stderr}");
}
