//! End-to-end tests of the `yieldlab` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn yieldlab() -> Command {
    let mut cmd = Command::cargo_bin("yieldlab").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("YIELDLAB_CONFIG");
    cmd
}

fn bond() -> Value {
    json!({
        "issuer": "Acme Corp",
        "currency": "USD",
        "faceValue": 1000,
        "issueDate": "2025-01-15",
        "maturityDate": "2035-01-15",
        "couponRate": 5.0,
        "frequency": 2,
        "dayCount": "30/360"
    })
}

fn at_par() -> Value {
    json!({
        "bond": bond(),
        "settlementDate": "2025-01-15",
        "marketPrice": 100.0
    })
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn calc_reads_a_request_file() {
    let input = write_temp(&at_par().to_string());
    let output = yieldlab()
        .args(["calc", "--input"])
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let envelope = stdout_json(&output);
    assert_eq!(envelope["status"], "success");
    let ytm = envelope["result"]["yieldToMaturity"].as_f64().unwrap();
    assert!((ytm - 5.0).abs() < 1e-6, "ytm = {ytm}");
    assert_eq!(envelope["result"]["cashFlows"].as_array().unwrap().len(), 20);
}

#[test]
fn calc_reads_stdin() {
    yieldlab()
        .arg("calc")
        .write_stdin(at_par().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "success""#));
}

#[test]
fn error_envelope_exits_with_status_one() {
    let request = json!({
        "bond": bond(),
        "settlementDate": "2025-01-15",
        "marketPrice": 100.0,
        "targetYield": 5.0
    });
    let output = yieldlab()
        .arg("calc")
        .write_stdin(request.to_string())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let envelope = stdout_json(&output);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "AmbiguousInputError");
}

#[test]
fn malformed_json_is_a_validation_error() {
    yieldlab()
        .arg("calc")
        .write_stdin("{ not json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ValidationError"));
}

#[test]
fn table_format_lists_metrics() {
    yieldlab()
        .args(["--format", "table", "calc"])
        .write_stdin(at_par().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Yield to Maturity"))
        .stdout(predicate::str::contains("5.0000%"))
        .stdout(predicate::str::contains("DV01"));
}

#[test]
fn table_format_reports_errors_on_stderr() {
    let request = json!({ "bond": bond(), "settlementDate": "2036-01-15", "marketPrice": 100.0 });
    yieldlab()
        .args(["calc", "--format", "table"])
        .write_stdin(request.to_string())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ValidationError"));
}

#[test]
fn schedule_without_locked_input() {
    let request = json!({
        "bond": bond(),
        "amortization": [{ "date": "2031-01-15", "percent": 50 }]
    });
    let output = yieldlab()
        .arg("schedule")
        .write_stdin(request.to_string())
        .output()
        .unwrap();

    assert!(output.status.success());
    let envelope = stdout_json(&output);
    let flows = envelope["cashFlows"].as_array().unwrap();
    assert_eq!(flows.len(), 20);
    assert_eq!(flows[11]["paymentType"], "AMORTIZATION");
    assert_eq!(flows[19]["paymentType"], "MATURITY");
}

#[test]
fn schedule_as_table() {
    yieldlab()
        .args(["--format", "table", "schedule"])
        .write_stdin(json!({ "bond": bond() }).to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Outstanding"))
        .stdout(predicate::str::contains("2035-01-15"))
        .stdout(predicate::str::contains("Maturity"));
}

#[test]
fn batch_keeps_order_and_flags_failures() {
    let requests = json!([
        at_par(),
        { "bond": bond(), "settlementDate": "2025-01-15" },
        { "bond": bond(), "settlementDate": "2025-01-15", "targetYield": 6.0 }
    ]);
    let input = write_temp(&requests.to_string());
    let output = yieldlab()
        .args(["batch", "--input"])
        .arg(input.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let responses = stdout_json(&output);
    let statuses: Vec<&str> = responses
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["success", "error", "success"]);
    assert!(responses[2]["result"]["cleanPrice"].as_f64().unwrap() < 100.0);
}

#[test]
fn batch_rejects_a_non_array() {
    let input = write_temp(&at_par().to_string());
    yieldlab()
        .args(["batch", "--input"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn config_file_narrows_the_solver_domain() {
    let config = write_temp("yield_floor = 0.0\nyield_cap = 0.2\n");
    let request = json!({ "bond": bond(), "settlementDate": "2025-01-15", "marketPrice": 130.0 });

    yieldlab()
        .arg("--config")
        .arg(config.path())
        .arg("calc")
        .write_stdin(request.to_string())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NoSolutionError"));

    yieldlab()
        .arg("calc")
        .write_stdin(request.to_string())
        .assert()
        .success();
}

#[test]
fn invalid_config_is_reported() {
    let config = write_temp("max_clamp_hits = 0\n");
    yieldlab()
        .arg("--config")
        .arg(config.path())
        .arg("calc")
        .write_stdin(at_par().to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_clamp_hits"));
}

#[test]
fn missing_input_file() {
    yieldlab()
        .args(["calc", "--input", "/nonexistent/request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/request.json"));
}

#[test]
fn verbose_logs_state_transitions_to_stderr() {
    yieldlab()
        .args(["--verbose", "calc"])
        .write_stdin(at_par().to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("calculation state"))
        .stdout(predicate::str::contains("calculation state").not());
}
