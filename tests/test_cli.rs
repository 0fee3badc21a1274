//! End-to-end CLI tests — drive the real binary with scripted stdin against
//! a file-backed store, then parse the store document it wrote.
//!
//! `--store` points at a temp file (and skips the privilege guard);
//! `--mock-devices` pins the inventory to KBD1/MOU1; `USBLOCK_LOG_DIR`
//! keeps the journal out of the real home directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;
use usblock::policy::usb::{
    ALLOW_LIST_VALUE, DEVICE_INSTALL_PATH, REMOVABLE_STORAGE_PATH, RESTRICTION_FLAGS,
    START_VALUE, STORAGE_DRIVER_PATH,
};
use usblock::store::{FileStore, KeyPath, PolicyStore, Value};

fn usblock(tmp: &TempDir, store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("usblock").unwrap();
    cmd.env("USBLOCK_LOG_DIR", tmp.path().join("logs"))
        .arg("--store")
        .arg(store)
        .arg("--mock-devices");
    cmd
}

fn store_doc(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_menu_invalid_choice_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    usblock(&tmp, &store)
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice"));

    assert!(!store.exists());
}

#[test]
fn test_menu_hid_only_writes_full_lockdown() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    usblock(&tmp, &store)
        .write_stdin("1\nY\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("restart is required"));

    let doc = store_doc(&store);
    assert_eq!(
        doc[REMOVABLE_STORAGE_PATH]["Deny_All"],
        serde_json::json!({ "Integer": 1 })
    );
    assert_eq!(
        doc[REMOVABLE_STORAGE_PATH]["Allow_CDROM"],
        serde_json::json!({ "Integer": 0 })
    );
    assert_eq!(
        doc[STORAGE_DRIVER_PATH][START_VALUE],
        serde_json::json!({ "Integer": 4 })
    );
    assert_eq!(
        doc[DEVICE_INSTALL_PATH][ALLOW_LIST_VALUE],
        serde_json::json!({ "StringList": ["KBD1", "MOU1"] })
    );
}

#[test]
fn test_menu_cancellation_leaves_store_unmodified() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    usblock(&tmp, &store)
        .write_stdin("2\nN\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled"));

    // No mutation means the store file was never created
    assert!(!store.exists());
}

#[test]
fn test_lowercase_y_cancels() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    usblock(&tmp, &store)
        .write_stdin("2\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled"));

    assert!(!store.exists());
}

#[test]
fn test_apply_restore_clears_seeded_flags() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    // Seed a locked-down store through the library
    {
        let mut seeded = FileStore::open(&store).unwrap();
        let restrictions = KeyPath::new(REMOVABLE_STORAGE_PATH);
        for (name, flag) in RESTRICTION_FLAGS {
            seeded
                .set_value(&restrictions, name, Value::Integer(flag))
                .unwrap();
        }
        seeded
            .set_value(
                &KeyPath::new(STORAGE_DRIVER_PATH),
                START_VALUE,
                Value::Integer(4),
            )
            .unwrap();
    }

    usblock(&tmp, &store)
        .arg("apply")
        .arg("restore")
        .write_stdin("Y\n")
        .assert()
        .success();

    let doc = store_doc(&store);
    for (name, _) in RESTRICTION_FLAGS {
        assert!(doc[REMOVABLE_STORAGE_PATH].get(name).is_none());
    }
    assert_eq!(
        doc[STORAGE_DRIVER_PATH][START_VALUE],
        serde_json::json!({ "Integer": 3 })
    );
}

#[test]
fn test_apply_unknown_scenario_fails() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    usblock(&tmp, &store)
        .arg("apply")
        .arg("everything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario"));
}

#[test]
fn test_journal_records_the_run() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    usblock(&tmp, &store)
        .arg("apply")
        .arg("storage-only")
        .write_stdin("Y\n")
        .assert()
        .success();

    usblock(&tmp, &store)
        .arg("log")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded sessions"));

    usblock(&tmp, &store)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("storage-only"))
        .stdout(predicate::str::contains("Deny_All"));
}

#[test]
fn test_log_limit_shows_most_recent_entries() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store.json");

    // storage-only journals five writes; the driver start mode is last
    usblock(&tmp, &store)
        .arg("apply")
        .arg("storage-only")
        .write_stdin("Y\n")
        .assert()
        .success();

    usblock(&tmp, &store)
        .arg("log")
        .arg("--limit")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains(START_VALUE))
        .stdout(predicate::str::contains("Deny_All").not())
        .stdout(predicate::str::contains("4 earlier entries"));
}
