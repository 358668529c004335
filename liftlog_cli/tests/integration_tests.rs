//! Integration tests for the liftlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Interactive session entry and the written session file
//! - Replay of stored sessions into muscle totals
//! - Progression output, SVG and CSV export
//! - Configuration errors

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary, isolated from the user's config
fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftlog"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

fn write_session(data_dir: &Path, file: &str, json: &str) {
    let dir = data_dir.join("past_workouts");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), json).unwrap();
}

const BENCH_SESSION: &str = r#"{
    "date": "2024-01-01",
    "exercises": [
        {"exercise_name": "bench press", "reps": [10, 8, 6], "weight": [60, 65, 70]}
    ]
}"#;

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Strength training log with per-muscle progression tracking",
        ));
}

#[test]
fn test_add_writes_session_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .arg("add")
        .arg("--data-dir")
        .arg(&data_dir)
        .write_stdin("2024-01-01\n1\nbench press\n10,8,6\n60,65,70\n\n\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session saved"));

    let path = data_dir.join("past_workouts/2024-01-01.txt");
    let content = fs::read_to_string(&path).expect("Failed to read session file");
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["date"], "2024-01-01");
    assert_eq!(json["exercises"][0]["exercise_name"], "bench press");
    assert_eq!(json["exercises"][0]["reps"], serde_json::json!([10, 8, 6]));
    assert!(json["exercises"][0].get("grip").is_none());
}

#[test]
fn test_add_same_date_keeps_both_sessions() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    for _ in 0..2 {
        cli(temp_dir.path())
            .arg("add")
            .arg("--data-dir")
            .arg(&data_dir)
            .write_stdin("2024-01-01\n1\nsquat\n5\n100\n\n\n\n")
            .assert()
            .success();
    }

    assert!(data_dir.join("past_workouts/2024-01-01.txt").exists());
    assert!(data_dir.join("past_workouts/2024-01-01_2.txt").exists());
}

#[test]
fn test_add_aborts_on_closed_input() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .arg("add")
        .arg("--data-dir")
        .arg(&data_dir)
        .write_stdin("2024-01-01\n")
        .assert()
        .failure();

    assert!(!data_dir.join("past_workouts").exists());
}

#[test]
fn test_muscles_reflect_replayed_sessions() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_session(&data_dir, "2024-01-01.txt", BENCH_SESSION);

    cli(temp_dir.path())
        .arg("muscles")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest: 3 sets, 24 reps, 1540 kg total"))
        .stdout(predicate::str::contains("Triceps: 3 sets, 24 reps, 1540 kg total"))
        .stdout(predicate::str::contains("Quads: 0 sets, 0 reps, 0 kg total"));
}

#[test]
fn test_unknown_exercise_is_skipped_not_fatal() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_session(
        &data_dir,
        "2024-01-02.txt",
        r#"{
            "date": "2024-01-02",
            "exercises": [
                {"exercise_name": "zercher carry", "reps": [5], "weight": [80]},
                {"exercise_name": "squat", "reps": [5, 5], "weight": [100, 100]}
            ]
        }"#,
    );
    write_session(&data_dir, "broken.txt", "{ not json");

    cli(temp_dir.path())
        .arg("muscles")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quads: 2 sets, 10 reps, 1000 kg total"))
        .stderr(predicate::str::contains("zercher carry"))
        .stderr(predicate::str::contains("broken.txt"));
}

#[test]
fn test_progress_merges_same_day() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_session(
        &data_dir,
        "2024-01-01.txt",
        r#"{"date": "2024-01-01", "exercises": [{"exercise_name": "squat", "reps": [5, 3], "weight": [100, 110]}]}"#,
    );
    write_session(
        &data_dir,
        "2024-01-01_2.txt",
        r#"{"date": "2024-01-01", "exercises": [{"exercise_name": "squat", "reps": [5], "weight": [90]}]}"#,
    );

    cli(temp_dir.path())
        .args(["progress", "squat", "--metric", "reps"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat progression (reps)"))
        .stdout(predicate::str::contains("2024-01-01  13"));
}

#[test]
fn test_progress_empty_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .args(["progress", "calves"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data to plot for calves (weight)"));
}

#[test]
fn test_progress_invalid_metric_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .args(["progress", "chest", "--metric", "tonnage"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tonnage"));
}

#[test]
fn test_progress_unknown_name_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .args(["progress", "neck"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure();
}

#[test]
fn test_progress_writes_svg_and_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_session(&data_dir, "2024-01-01.txt", BENCH_SESSION);

    let svg_path = temp_dir.path().join("out/chest.svg");
    let csv_path = temp_dir.path().join("out/chest.csv");

    cli(temp_dir.path())
        .args(["progress", "chest", "--metric", "volume"])
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--svg")
        .arg(&svg_path)
        .arg("--csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01  1540"));

    let svg = fs::read_to_string(&svg_path).expect("SVG not written");
    assert!(svg.contains("<svg"));

    let csv = fs::read_to_string(&csv_path).expect("CSV not written");
    assert!(csv.starts_with("date,value"));
    assert!(csv.contains("2024-01-01,1540"));
}

#[test]
fn test_history_shows_variant_snapshot() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_session(
        &data_dir,
        "2024-01-03.txt",
        r#"{"date": "2024-01-03", "exercises": [{"exercise_name": "bench press", "reps": [8], "weight": [40], "equipment": "dumbbell", "grip": "neutral"}]}"#,
    );

    cli(temp_dir.path())
        .args(["history", "bench press"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-03"))
        .stdout(predicate::str::contains("(dumbbell, neutral, simultaneous)"));
}

#[test]
fn test_exercises_filter_by_equipment() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .args(["exercises", "--equipment", "barbell"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("squat"))
        .stdout(predicate::str::contains("bench press"))
        .stdout(predicate::str::contains("lunge").not());
}

#[test]
fn test_exercises_filter_no_match() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");

    cli(temp_dir.path())
        .args(["exercises", "--equipment", "kettlebell"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No exercises match."));
}

#[test]
fn test_config_custom_exercise() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("liftlog.toml");
    fs::write(
        &config_path,
        r#"
[data]
sessions_subdir = "sessions"

[[catalog.custom]]
name = "face pull"
usual_equipment = ["cable"]
default_equipment = "cable"
default_grip = "neutral"
default_execution = "simultaneous"
muscles = ["shoulders", "upper back"]
"#,
    )
    .unwrap();

    let sessions = data_dir.join("sessions");
    fs::create_dir_all(&sessions).unwrap();
    fs::write(
        sessions.join("2024-02-01.txt"),
        r#"{"date": "2024-02-01", "exercises": [{"exercise_name": "face pull", "reps": [15, 15], "weight": [20, 20]}]}"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("muscles")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Shoulders: 2 sets, 30 reps, 600 kg total"));
}

#[test]
fn test_config_unknown_muscle_is_fatal() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("liftlog.toml");
    fs::write(
        &config_path,
        r#"
[[catalog.custom]]
name = "neck curl"
usual_equipment = ["plate"]
default_equipment = "plate"
default_grip = "neutral"
default_execution = "simultaneous"
muscles = ["neck"]
"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("muscles")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("neck"));
}

#[test]
fn test_add_rejects_invalid_catalog() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("liftlog.toml");
    fs::write(
        &config_path,
        r#"
[[catalog.custom]]
name = "neck curl"
usual_equipment = ["plate"]
default_equipment = "plate"
default_grip = "neutral"
default_execution = "simultaneous"
muscles = ["neck"]
"#,
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("add")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--config")
        .arg(&config_path)
        .write_stdin("2024-01-01\n1\nneck curl\n12\n10\n\n\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-existent muscle 'neck'"));

    assert!(!data_dir.join("past_workouts").exists());
}

#[test]
fn test_malformed_record_keeps_rest_of_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    write_session(
        &data_dir,
        "2024-01-01.txt",
        r#"{"date": "2024-01-01", "exercises": [
            {"exercise_name": "squat", "reps": [5, 5], "weight": [100, 100]},
            {"exercise_name": "bench press", "reps": [-5], "weight": [60]}
        ]}"#,
    );

    cli(temp_dir.path())
        .arg("muscles")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quads: 2 sets, 10 reps, 1000 kg total"))
        .stdout(predicate::str::contains("Chest: 0 sets, 0 reps, 0 kg total"))
        .stderr(predicate::str::contains("Skipped 2024-01-01.txt (bench press)"));
}
