//! CLI integration tests for regsim
//!
//! Every test runs against a fresh home directory with `--offline`, so
//! reads come from the bundled demo data and writes fail the way they do
//! when the backend is down.

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the regsim binary, isolated in `home`
fn regsim_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("regsim"));
    cmd.env("REGSIM_HOME", home.path())
        .env_remove("REGSIM_SERVER")
        .env_remove("REGSIM_LOG")
        .arg("--offline");
    cmd
}

fn setup_home() -> TempDir {
    TempDir::new().unwrap()
}

// =============================================================================
// Bucket Tests
// =============================================================================

#[test]
fn test_bucket_list_falls_back_to_demo_data() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["bucket", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default bucket"))
        .stdout(predicate::str::contains("Plan B"))
        .stderr(predicate::str::contains("demo data"));
}

#[test]
fn test_bucket_list_json_reports_source() {
    let home = setup_home();

    let output = regsim_cmd(&home)
        .args(["--format", "json", "bucket", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "fixture");
    assert_eq!(json["buckets"].as_array().unwrap().len(), 2);
}

#[test]
fn test_bucket_create_rejects_blank_name() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["bucket", "create", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bucket name cannot be empty"));
}

#[test]
fn test_bucket_create_fails_offline() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["bucket", "create", "Spring plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Offline mode"));
}

#[test]
fn test_bucket_select_shows_courses() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["bucket", "select", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Structures"))
        .stdout(predicate::str::contains("Operating Systems"));
}

#[test]
fn test_move_survives_failed_save() {
    let home = setup_home();

    regsim_cmd(&home).args(["bucket", "select", "1"]).assert().success();

    regsim_cmd(&home)
        .args(["bucket", "move", "1", "down"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unsaved changes"));

    // Save fails offline, the draft stays
    regsim_cmd(&home)
        .args(["bucket", "save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Offline mode"));

    let output = regsim_cmd(&home)
        .args(["--format", "json", "bucket", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dirty"], true);
    let elements = json["elements"].as_array().unwrap();
    assert_eq!(elements[0]["courseName"], "Ethics in Modern Society");
    assert_eq!(elements[0]["priority"], 1);
    assert_eq!(elements[1]["courseName"], "Data Structures");
    assert_eq!(elements[1]["priority"], 2);
}

#[test]
fn test_select_prints_bucket_name() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["bucket", "select", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bucket: Default bucket"));
}

#[test]
fn test_reselecting_same_bucket_requires_discard_when_dirty() {
    let home = setup_home();

    regsim_cmd(&home).args(["bucket", "select", "1"]).assert().success();
    regsim_cmd(&home).args(["bucket", "move", "1", "down"]).assert().success();

    regsim_cmd(&home)
        .args(["bucket", "select", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--discard"));

    let output = regsim_cmd(&home)
        .args(["--format", "json", "bucket", "show"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dirty"], true);
    assert_eq!(json["elements"][0]["courseName"], "Ethics in Modern Society");

    let output = regsim_cmd(&home)
        .args(["--format", "json", "bucket", "select", "1", "--discard"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dirty"], false);
    assert_eq!(json["elements"][0]["courseName"], "Data Structures");
}

#[test]
fn test_move_past_the_end_warns() {
    let home = setup_home();

    regsim_cmd(&home).args(["bucket", "select", "1"]).assert().success();

    regsim_cmd(&home)
        .args(["bucket", "move", "3", "down"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cannot move down"))
        .stdout(predicate::str::contains("Unsaved changes").not());
}

#[test]
fn test_select_other_bucket_requires_discard_when_dirty() {
    let home = setup_home();

    regsim_cmd(&home).args(["bucket", "select", "1"]).assert().success();
    regsim_cmd(&home).args(["bucket", "move", "2", "up"]).assert().success();

    regsim_cmd(&home)
        .args(["bucket", "select", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--discard"));

    regsim_cmd(&home)
        .args(["bucket", "select", "2", "--discard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bucket is empty"));
}

#[test]
fn test_discard_restores_order() {
    let home = setup_home();

    regsim_cmd(&home).args(["bucket", "select", "1"]).assert().success();
    regsim_cmd(&home).args(["bucket", "move", "3", "up"]).assert().success();

    regsim_cmd(&home)
        .args(["bucket", "discard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discarded"));

    regsim_cmd(&home)
        .args(["bucket", "save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to save"));
}

#[test]
fn test_move_out_of_range() {
    let home = setup_home();

    regsim_cmd(&home).args(["bucket", "select", "1"]).assert().success();

    regsim_cmd(&home)
        .args(["bucket", "move", "9", "up"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_move_without_selection() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["bucket", "move", "1", "down"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bucket selected"));
}

// =============================================================================
// Lecture Tests
// =============================================================================

#[test]
fn test_lectures_filter_by_grade() {
    let home = setup_home();

    let output = regsim_cmd(&home)
        .args(["--format", "json", "lectures", "--grade", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "fixture");
    assert_eq!(json["hasNext"], false);
    let names: Vec<&str> = json["lectures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["courseName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Operating Systems", "Databases"]);
}

#[test]
fn test_lectures_by_professor() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["lectures", "--professor", "Lee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithms"))
        .stdout(predicate::str::contains("Ethics in Modern Society"))
        .stdout(predicate::str::contains("Operating Systems").not());
}

#[test]
fn test_lectures_name_and_professor_conflict() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["lectures", "--name", "x", "--professor", "y"])
        .assert()
        .failure();
}

// =============================================================================
// Results Tests
// =============================================================================

#[test]
fn test_results_list() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["results"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-15 10:00"))
        .stdout(predicate::str::contains("100%"));
}

#[test]
fn test_results_detail() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["results", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run 7"))
        .stdout(predicate::str::contains("5/6 registered (83%)"))
        .stdout(predicate::str::contains("Class full"));
}

// =============================================================================
// Account Tests
// =============================================================================

#[test]
fn test_whoami_requires_login() {
    let home = setup_home();

    regsim_cmd(&home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_onboard_requires_login() {
    let home = setup_home();

    regsim_cmd(&home)
        .args([
            "onboard",
            "--college",
            "1",
            "--department",
            "3",
            "--grade",
            "2",
            "--student-number",
            "20241234",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_onboard_rejects_bad_student_number() {
    let home = setup_home();

    regsim_cmd(&home)
        .args([
            "onboard",
            "--college",
            "1",
            "--department",
            "3",
            "--grade",
            "2",
            "--student-number",
            "123",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("8 digits"));
}

#[test]
fn test_signup_password_mismatch() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["signup", "kim", "secret1", "secret2", "Kim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match"));
}

#[test]
fn test_logout_when_not_logged_in() {
    let home = setup_home();

    regsim_cmd(&home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_set_and_show() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["config", "set", "server_url", "https://reg.example.com/"])
        .assert()
        .success();

    regsim_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server_url     = https://reg.example.com\n"));

    assert!(home.path().join("config.toml").is_file());
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_rejects_invalid_url() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["config", "set", "server_url", "ftp://nope"])
        .assert()
        .failure();

    assert!(!home.path().join("config.toml").exists());
}

#[test]
fn test_config_default_format_json() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["config", "set", "default_format", "json"])
        .assert()
        .success();

    let output = regsim_cmd(&home).args(["results"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_path() {
    let home = setup_home();

    regsim_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
