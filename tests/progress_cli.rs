use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn tracker(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_skcc-tracker"));
    for var in [
        "OPERATOR_CALLSIGN",
        "OPERATOR_CENTURION_DATE",
        "OPERATOR_TRIBUNE_X8_DATE",
        "OPERATOR_DXCC",
        "AWARD_CACHE_TTL_SECS",
        "ROSTER_DIR",
        "RUST_LOG",
    ] {
        command.env_remove(var);
    }
    command
        .env("APP_LOG_LEVEL", "warn")
        .args(args)
        .output()
        .expect("tracker runs")
}

fn write_log(name: &str, members: u32) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("skcc-tracker-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir created");
    let mut csv = String::from("callsign,qso_date,time_on,band,mode,member_number,key_type\n");
    for n in 1..=members {
        csv.push_str(&format!("W{}AB,20200101,1200,40M,CW,{n},STRAIGHT\n", n % 10));
    }
    let path = dir.join("log.csv");
    fs::write(&path, csv).expect("log written");
    path
}

#[test]
fn awards_lists_every_slug() {
    let output = tracker(&["awards"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8 output");
    assert_eq!(stdout.lines().count(), 13);
    assert!(stdout.contains("rag_chew"));
    assert!(stdout.contains("SKCC Canadian Maple"));
}

#[test]
fn tiers_emit_the_ladder_as_json() {
    let output = tracker(&["tiers", "Centurion", "--json"]);
    assert!(output.status.success());
    let view: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(view["award"], "centurion");
    assert_eq!(view["base_requirement"], 100);
    assert_eq!(view["tiers"][0]["label"], "Centurion");
}

#[test]
fn progress_reports_centurion_from_a_log() {
    let log = write_log("centurion", 120);
    let output = tracker(&[
        "progress",
        "--contacts",
        log.to_str().expect("utf8 path"),
        "--award",
        "centurion",
        "--award",
        "tribune",
        "--json",
    ]);
    assert!(output.status.success());

    let reports: Value = serde_json::from_slice(&output.stdout).expect("json output");
    let reports = reports.as_array().expect("report list");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["award"], "centurion");
    assert_eq!(reports[0]["current"], 120);
    assert_eq!(reports[0]["endorsement"], "Centurion");
    assert_eq!(reports[1]["award"], "tribune");
    assert_eq!(reports[1]["current"], 0);

    if let Some(dir) = log.parent() {
        fs::remove_dir_all(dir).ok();
    }
}

#[test]
fn unknown_award_exits_with_usage_code() {
    let log = write_log("unknown", 1);
    let output = tracker(&[
        "progress",
        "--contacts",
        log.to_str().expect("utf8 path"),
        "--award",
        "Marathon",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("unknown award 'Marathon'"));

    if let Some(dir) = log.parent() {
        fs::remove_dir_all(dir).ok();
    }
}

#[test]
fn missing_log_fails() {
    let output = tracker(&["progress", "--contacts", "/nonexistent/log.csv"]);
    assert!(!output.status.success());
}
