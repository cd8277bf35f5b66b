use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{json, Value};
use ulid::Ulid;

fn run_script(ops: &Value, latency_ms: u64) -> Value {
    let path = std::env::temp_dir().join(format!("brgy-scenario-{}.json", Ulid::new()));
    let serialized = match serde_json::to_string_pretty(ops) {
        Ok(value) => value,
        Err(err) => panic!("failed to serialize script fixture: {err}"),
    };
    if let Err(err) = std::fs::write(&path, serialized) {
        panic!("failed to write script fixture: {err}");
    }

    let output = brgy(&path, latency_ms);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value = match serde_json::from_slice::<Value>(&output.stdout) {
        Ok(value) => value,
        Err(err) => panic!(
            "failed to parse stdout as JSON: {err}\nstdout={}",
            String::from_utf8_lossy(&output.stdout)
        ),
    };
    let _ = std::fs::remove_file(&path);
    value
}

fn brgy(script: &PathBuf, latency_ms: u64) -> Output {
    let path_str = match script.to_str() {
        Some(value) => value,
        None => panic!("temp path must be valid UTF-8"),
    };
    let result = Command::new(env!("CARGO_BIN_EXE_brgy"))
        .args([
            "script",
            "--file",
            path_str,
            "--start",
            "2025-10-08T09:00:00Z",
            "--latency-ms",
            &latency_ms.to_string(),
        ])
        .output();
    match result {
        Ok(output) => output,
        Err(err) => panic!("failed to run brgy: {err}"),
    }
}

#[test]
fn date_sort_is_stable_in_both_directions_end_to_end() {
    // Store order A(10-10), B(10-08), C(10-08); ties must keep store order.
    let incident = |date: &str, location: &str| {
        json!({"op": "submit_incident",
               "draft": {"incident_type": "Noise Complaint",
                          "incident_date": date,
                          "location": location,
                          "description": "fixture"}})
    };
    let value = run_script(
        &json!([
            incident("2025-10-10", "A"),
            {"op": "poll"},
            incident("2025-10-08", "B"),
            {"op": "poll"},
            incident("2025-10-08", "C"),
            {"op": "poll"},
            {"op": "query_incidents", "query": {"sort": "asc"}},
            {"op": "query_incidents", "query": {"sort": "desc"}}
        ]),
        0,
    );

    let locations = |step: usize| -> Vec<String> {
        match value["steps"][step]["outcome"].as_array() {
            Some(records) => records
                .iter()
                .map(|record| {
                    record["location"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string()
                })
                .collect(),
            None => panic!("query step {step} must return a list"),
        }
    };
    assert_eq!(locations(6), vec!["B", "C", "A"]);
    assert_eq!(locations(7), vec!["A", "B", "C"]);
}

#[test]
fn in_flight_guard_and_resubmission_after_completion() {
    let submit = json!({"op": "submit_document", "form": "doc",
                        "draft": {"document_type": "Barangay Clearance",
                                   "purpose": "Employment"}});
    let value = run_script(
        &json!([
            submit,
            submit,
            {"op": "advance", "ms": 600},
            {"op": "poll"},
            submit,
            {"op": "advance", "ms": 600},
            {"op": "poll"}
        ]),
        600,
    );

    assert_eq!(value["steps"][0]["ok"], json!(true));
    assert_eq!(value["steps"][1]["ok"], json!(false));
    assert!(value["steps"][1]["outcome"]["error"]
        .as_str()
        .unwrap_or_default()
        .contains("already in flight"));
    assert_eq!(value["steps"][4]["ok"], json!(true));

    let ids: Vec<&str> = match value["records"]["documents"].as_array() {
        Some(records) => records
            .iter()
            .map(|record| record["id"].as_str().unwrap_or_default())
            .collect(),
        None => panic!("documents must be listed"),
    };
    assert_eq!(ids, vec!["REQ-2025-001", "REQ-2025-002"]);
}

#[test]
fn invitation_accept_promotes_and_decline_does_not() {
    let deliver = |purpose: &str| {
        json!({"op": "deliver_invitation",
               "delivery": {"from_official": "Hon. Ramon dela Cruz",
                             "date": "2025-10-20",
                             "time": "14:00",
                             "location": "Session Room",
                             "purpose": purpose}})
    };
    let value = run_script(
        &json!([
            deliver("Budget hearing"),
            deliver("Fiesta planning"),
            {"op": "respond_invitation", "id": "MTG-2025-001", "response": "accepted"},
            {"op": "respond_invitation", "id": "MTG-2025-002", "response": "declined"},
            {"op": "query_appointments", "query": {}}
        ]),
        0,
    );

    let appointments = match value["steps"][4]["outcome"].as_array() {
        Some(records) => records,
        None => panic!("query must return a list"),
    };
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["status"], json!("confirmed"));
    assert_eq!(appointments[0]["origin_invitation"], json!("MTG-2025-001"));
    assert_eq!(appointments[0]["purpose"], json!("Budget hearing"));

    assert_eq!(
        value["records"]["invitations"][0]["status"],
        json!("accepted")
    );
    assert_eq!(
        value["records"]["invitations"][1]["status"],
        json!("declined")
    );
}

#[test]
fn appointment_lifecycle_with_reschedule() {
    let value = run_script(
        &json!([
            {"op": "submit_appointment",
             "draft": {"meeting_with": "Maria Santos",
                        "date": "2025-11-03",
                        "time": "09:00",
                        "subject": "Business permit renewal",
                        "purpose": "Clarify requirements"}},
            {"op": "poll"},
            {"op": "transition_appointment", "id": "APT-2025-001", "to": "confirmed"},
            {"op": "reschedule_appointment", "id": "APT-2025-001",
             "date": "2025-11-10", "time": "13:00"},
            {"op": "transition_appointment", "id": "APT-2025-001", "to": "confirmed"},
            {"op": "transition_appointment", "id": "APT-2025-001", "to": "completed"}
        ]),
        0,
    );

    for step in 0..6 {
        assert_eq!(
            value["steps"][step]["ok"],
            json!(true),
            "step {step}: {}",
            value["steps"][step]["outcome"]
        );
    }
    let record = &value["records"]["appointments"][0];
    assert_eq!(record["status"], json!("completed"));
    assert_eq!(record["date"], json!("2025-11-10"));
    assert_eq!(record["time"], json!("13:00"));
}

#[test]
fn pay_now_without_proof_is_blocked_with_proof_accepted() {
    let value = run_script(
        &json!([
            {"op": "submit_document",
             "draft": {"document_type": "Barangay Clearance",
                        "purpose": "Employment",
                        "payment": {"method": "pay_now", "proof_attached": false}}},
            {"op": "submit_document",
             "draft": {"document_type": "Barangay Clearance",
                        "purpose": "Employment",
                        "payment": {"method": "pay_now", "proof_attached": true}}},
            {"op": "poll"}
        ]),
        0,
    );

    assert_eq!(value["steps"][0]["ok"], json!(false));
    assert!(value["steps"][0]["outcome"]["error"]
        .as_str()
        .unwrap_or_default()
        .contains("payment proof"));
    assert_eq!(value["steps"][1]["ok"], json!(true));
    assert_eq!(
        value["records"]["documents"].as_array().map(Vec::len),
        Some(1)
    );
}
