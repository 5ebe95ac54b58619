//! Integration tests for the planstore binary

use assert_cmd::Command;
use planstore::{PlanStore, ScheduleWeek, identity};
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(temp: &TempDir) -> std::path::PathBuf {
    let store_path = temp.path().join("user_data");
    let config_path = temp.path().join("planstore.yml");
    std::fs::write(&config_path, format!("store-path: {}\n", store_path.display())).unwrap();
    config_path
}

#[test]
fn test_id_matches_library() {
    let expected = identity::user_id("Ada", "CS undergrad", "become a data scientist");

    Command::cargo_bin("planstore")
        .unwrap()
        .args(["id", "Ada", "CS undergrad", "become a data scientist"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_list_empty_store() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    Command::cargo_bin("planstore")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found"));
}

#[test]
fn test_show_stored_record() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    let store = PlanStore::open(temp.path().join("user_data")).unwrap();
    let id = identity::user_id("ada", "cs", "ml");
    let schedule: Vec<_> = (1..=6).map(|w| ScheduleWeek::new(w, ["study"])).collect();
    store.put(&id, &[], &schedule).unwrap();

    Command::cargo_bin("planstore")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"user_id\": \"{}\"", id)));
}

#[test]
fn test_show_missing_record_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    Command::cargo_bin("planstore")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["show", "000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No live record"));
}
