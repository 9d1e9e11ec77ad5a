//! End-to-end tests driving the `club` binary.

use std::io::Write;
use std::process::Command;

use tempfile::{NamedTempFile, TempDir};

fn club_binary() -> String {
    env!("CARGO_BIN_EXE_club").to_string()
}

fn input_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Runs `club` with an isolated home so no user config leaks in.
fn club(home: &TempDir) -> Command {
    let mut command = Command::new(club_binary());
    command
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("CLUB_FORMAT")
        .env_remove("RUST_LOG");
    command
}

const DAY: &str = "1
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 1
11:35 4 client1
";

/// Test the documented single-table day end to end.
#[test]
fn test_replay_single_table_day() {
    let home = TempDir::new().unwrap();
    let input = input_file(DAY);

    let output = club(&home).arg("replay").arg(input.path()).output().unwrap();

    assert!(
        output.status.success(),
        "club replay should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    let expected = "09:00
08:48 1 client1
08:48 13 NotOpenYet
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:52 13 ICanWaitNoLonger!
09:54 2 client1 1
10:25 2 client2 1
10:25 13 PlaceIsBusy
11:35 4 client1
19:00 11 client2
19:00
1 20 01:41
";
    assert_eq!(stdout, expected);
}

/// Test that a malformed event line aborts with only that line on stdout.
#[test]
fn test_replay_malformed_line_fails() {
    let home = TempDir::new().unwrap();
    let input = input_file("1\n09:00 19:00\n10\n09:41 1 client1\n09:48 13 client2\n10:00 4 client1\n");

    let output = club(&home).arg("replay").arg(input.path()).output().unwrap();

    assert!(!output.status.success(), "malformed input must fail");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "09:48 13 client2\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 5"), "stderr should locate the line: {stderr}");
}

/// Test that `--json` switches the report format.
#[test]
fn test_replay_json_flag() {
    let home = TempDir::new().unwrap();
    let input = input_file(DAY);

    let output = club(&home)
        .arg("replay")
        .arg(input.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["open"], "09:00");
    assert_eq!(report["events"].as_array().unwrap().len(), 11);
    assert_eq!(report["tables"][0]["revenue"], 20);
    assert_eq!(report["tables"][0]["usage"], "01:41");
}

/// Test that the config file picks the default format.
#[test]
fn test_config_file_selects_json() {
    let home = TempDir::new().unwrap();
    let input = input_file(DAY);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, r#"format = "json""#).unwrap();
    config.flush().unwrap();

    let output = club(&home)
        .arg("--config")
        .arg(config.path())
        .arg("replay")
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["close"], "19:00");
}

/// Test that the environment overrides the format.
#[test]
fn test_env_selects_json() {
    let home = TempDir::new().unwrap();
    let input = input_file(DAY);

    let output = club(&home)
        .env("CLUB_FORMAT", "json")
        .arg("replay")
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
}

/// Test that `check` validates without replaying.
#[test]
fn test_check_command() {
    let home = TempDir::new().unwrap();
    let input = input_file(DAY);

    let output = club(&home).arg("check").arg(input.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "ok: 1 tables, 7 events\n"
    );

    let bad = input_file("0\n09:00 19:00\n10\n");
    let output = club(&home).arg("check").arg(bad.path()).output().unwrap();
    assert!(!output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "0\n");
}

/// Test that verbose logging goes to stderr, leaving the report intact.
#[test]
fn test_verbose_logs_to_stderr() {
    let home = TempDir::new().unwrap();
    let input = input_file(DAY);

    let output = club(&home)
        .arg("-v")
        .arg("replay")
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("09:00\n"));
    assert!(stdout.ends_with("1 20 01:41\n"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("request rejected"), "expected debug logs: {stderr}");
}
