use httpmock::prelude::*;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_posta-track"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run posta-track")
}

#[test]
fn test_missing_tracking_number_exits_with_invalid_arguments() {
    let output = run_cli(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No tracking number given"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_flag_exits_with_invalid_arguments() {
    let output = run_cli(&["--bogus", "ABC123"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_prints_table_without_header() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/").body("kodi=ABC123");
        then.status(200).json_body(serde_json::json!([
            {"Data": "10-01-2023 09:00 AM", "Ngjarja": "Accepted", "Zyra": "Tirana", "Destinacioni": "Durres"},
            {"Data": "11-01-2023 10:00 AM", "Ngjarja": "In transit", "Zyra": "Durres", "Destinacioni": "Vlore"}
        ]));
    });

    let endpoint = server.url("/api/");
    let output = run_cli(&[
        "--endpoint",
        &endpoint,
        "--no-header",
        "--descending",
        "--delimiter",
        "|",
        "ABC123",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "1|ABC123|2023-01-11 10:00 AM|In transit|Durres|Vlore\n\
         2|ABC123|2023-01-10 09:00 AM|Accepted  |Tirana|Durres\n"
    );
}

#[test]
fn test_no_events_found_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200).json_body(serde_json::json!([]));
    });

    let endpoint = server.url("/api/");
    let output = run_cli(&["--endpoint", &endpoint, "ABC123"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("No events found for ABC123").count(), 1);

    let output = run_cli(&["--endpoint", &endpoint, "--allow-empty", "ABC123"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "#  Tracking-Number  Date  Description  Location  Destination\n"
    );
}

#[test]
fn test_null_response_is_no_events_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("null");
    });

    let endpoint = server.url("/api/");
    let output = run_cli(&["--endpoint", &endpoint, "ABC123"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_service_failure_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/");
        then.status(503);
    });

    let endpoint = server.url("/api/");
    let output = run_cli(&["--endpoint", &endpoint, "ABC123"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_endpoint_exit_code() {
    let output = run_cli(&["--endpoint", "ftp://example.com", "ABC123"]);
    assert_eq!(output.status.code(), Some(1));
}
