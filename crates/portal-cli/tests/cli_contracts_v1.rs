#![allow(clippy::single_match_else)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use ulid::Ulid;

fn brgy_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_brgy"))
}

fn brgy_output(args: &[&str]) -> Output {
    let mut command = Command::new(brgy_binary_path());
    for arg in args {
        command.arg(arg);
    }
    match command.output() {
        Ok(output) => output,
        Err(err) => panic!("failed to run brgy command {args:?}: {err}"),
    }
}

fn stdout_json(output: &Output) -> Value {
    match serde_json::from_slice::<Value>(&output.stdout) {
        Ok(value) => value,
        Err(err) => panic!(
            "failed to parse stdout as JSON: {err}\nstdout={}\nstderr={}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

fn write_script(ops: &Value) -> PathBuf {
    let path = std::env::temp_dir().join(format!("brgy-script-{}.json", Ulid::new()));
    let serialized = match serde_json::to_string_pretty(ops) {
        Ok(value) => value,
        Err(err) => panic!("failed to serialize script fixture: {err}"),
    };
    if let Err(err) = std::fs::write(&path, serialized) {
        panic!("failed to write script fixture: {err}");
    }
    path
}

fn run_script_file(path: &Path, extra: &[&str]) -> Output {
    let path_str = match path.to_str() {
        Some(value) => value,
        None => panic!("temp path must be valid UTF-8"),
    };
    let mut args = vec!["script", "--file", path_str];
    args.extend_from_slice(extra);
    brgy_output(&args)
}

#[test]
fn help_contract_lists_expected_subcommands() {
    let output = brgy_output(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for required in ["script", "demo", "catalog"] {
        assert!(
            stdout.contains(required),
            "expected help output to contain subcommand {required}; output={stdout}"
        );
    }
}

#[test]
fn catalog_json_contract_is_stable_v1() {
    let output = brgy_output(&["catalog", "--json"]);
    assert!(output.status.success());
    let value = stdout_json(&output);

    assert_eq!(value["contract_version"], json!("portal_catalog.v1"));
    let document_types = match value["catalog"]["document_types"].as_array() {
        Some(entries) => entries,
        None => panic!("catalog must list document types: {value}"),
    };
    assert!(!document_types.is_empty());
    let clearance = document_types
        .iter()
        .find(|entry| entry["name"] == json!("Barangay Clearance"));
    match clearance {
        Some(entry) => assert_eq!(entry["fee"], json!(50)),
        None => panic!("builtin catalog must list Barangay Clearance"),
    }
    assert!(value["catalog"]["officials"]
        .as_array()
        .is_some_and(|officials| !officials.is_empty()));
}

#[test]
fn demo_contract_seeds_every_kind() {
    let output = brgy_output(&["demo", "--start", "2025-10-08T09:00:00Z"]);
    assert!(output.status.success());
    let value = stdout_json(&output);

    assert_eq!(value["contract_version"], json!("portal_demo.v1"));
    assert_eq!(value["started_at"], json!("2025-10-08T09:00:00Z"));
    assert_eq!(value["records"]["documents"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["records"]["incidents"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        value["records"]["appointments"].as_array().map(Vec::len),
        Some(1)
    );
    assert_eq!(
        value["records"]["invitations"].as_array().map(Vec::len),
        Some(1)
    );
    // Pre-seeded demo records include the `none` status that never appears
    // on submitted documents.
    assert_eq!(value["records"]["documents"][0]["status"], json!("none"));
    assert_eq!(value["records"]["invitations"][0]["id"], json!("MTG-2025-001"));
}

#[test]
fn session_contract_shape_is_stable_v1() {
    let script = write_script(&json!([
        {"op": "submit_document",
         "draft": {"document_type": "Barangay Clearance", "purpose": "Employment"}},
        {"op": "advance", "ms": 600},
        {"op": "poll"},
        {"op": "query_documents", "query": {"status": "in_progress"}}
    ]));
    let output = run_script_file(&script, &["--start", "2025-10-08T09:00:00Z"]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value = stdout_json(&output);

    assert_eq!(value["contract_version"], json!("portal_session.v1"));
    assert_eq!(value["started_at"], json!("2025-10-08T09:00:00Z"));
    assert_eq!(value["latency_ms"], json!(600));

    let steps = match value["steps"].as_array() {
        Some(steps) => steps,
        None => panic!("report must carry steps: {value}"),
    };
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["op"], json!("submit_document"));
    assert_eq!(steps[0]["ok"], json!(true));
    assert!(steps[0]["outcome"]["ticket"].is_string());
    assert_eq!(steps[2]["op"], json!("poll"));
    assert_eq!(
        steps[2]["outcome"][0]["record"]["kind"],
        json!("document")
    );
    assert_eq!(steps[3]["outcome"][0]["id"], json!("REQ-2025-001"));
    assert_eq!(steps[3]["outcome"][0]["fee"], json!(50));

    // Created at start + latency; fractional-second rendering is the time
    // crate's business.
    let requested_at = value["records"]["documents"][0]["requested_at"]
        .as_str()
        .unwrap_or_default();
    assert!(
        requested_at.starts_with("2025-10-08T09:00:00"),
        "requested_at={requested_at}"
    );

    let _ = std::fs::remove_file(&script);
}

#[test]
fn validation_error_shape_is_recorded_not_fatal() {
    let script = write_script(&json!([
        {"op": "submit_incident",
         "draft": {"incident_type": "Noise Complaint",
                    "incident_date": "2025-10-08",
                    "location": "",
                    "description": "Karaoke past midnight"}}
    ]));
    let output = run_script_file(
        &script,
        &["--start", "2025-10-08T09:00:00Z", "--latency-ms", "0"],
    );
    assert!(output.status.success());
    let value = stdout_json(&output);

    assert_eq!(value["steps"][0]["ok"], json!(false));
    let message = value["steps"][0]["outcome"]["error"]
        .as_str()
        .unwrap_or_default();
    assert!(
        message.contains("missing required fields") && message.contains("location"),
        "error was: {message}"
    );
    assert_eq!(value["records"]["incidents"].as_array().map(Vec::len), Some(0));

    let _ = std::fs::remove_file(&script);
}

#[test]
fn illegal_transition_exits_nonzero() {
    let script = write_script(&json!([
        {"op": "seed_demo"},
        {"op": "transition_document", "id": "REQ-2025-003", "to": "rejected"}
    ]));
    // REQ-2025-003 is seeded already for_pickup (terminal).
    let output = run_script_file(
        &script,
        &["--start", "2025-10-08T09:00:00Z", "--latency-ms", "0"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("illegal document transition"),
        "stderr={stderr}"
    );

    let _ = std::fs::remove_file(&script);
}
