use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const HEADER: &str = "date,todaySales,boxActual,prevChange,takenSaving,leftOver,expectedBox,variance";

fn tillbook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tillbook").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TILLBOOK_LOG");
    cmd
}

fn init(home: &Path) -> PathBuf {
    let data_dir = home.join("ledger");
    tillbook(home)
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tillbook at"));
    data_dir
}

fn add_first_day(home: &Path) {
    tillbook(home)
        .args([
            "add", "--date", "2025-01-15", "--prev-change", "500", "--sales", "1000", "--box",
            "1500", "--saving", "200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exact match"))
        .stdout(predicate::str::contains("Saved entry #1"));
}

#[test]
fn commands_require_init() {
    let home = tempfile::tempdir().unwrap();
    tillbook(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run `tillbook init`"));
}

#[test]
fn init_creates_database() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = init(home.path());
    assert!(data_dir.join("tillbook.db").exists());
    assert!(home.path().join(".config/tillbook/settings.json").exists());
    tillbook(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries:       0"));
}

#[test]
fn status_hides_ledger_when_locked() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());

    let settings_path = home.path().join(".config/tillbook/settings.json");
    let mut settings: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_path).unwrap()).unwrap();
    settings["passcode_hash"] = serde_json::Value::String("00$00".into());
    std::fs::write(&settings_path, settings.to_string()).unwrap();

    tillbook(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Passcode:   set"))
        .stdout(predicate::str::contains("Ledger is locked"))
        .stdout(predicate::str::contains("Leftover:").not())
        .stdout(predicate::str::contains("Entries:").not());
}

#[test]
fn add_then_list() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    tillbook(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-15"))
        .stdout(predicate::str::contains("1,300"));
}

#[test]
fn next_day_seeds_previous_change() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    // 1,300 carried over + 100 sales = 1,400 expected
    tillbook(home.path())
        .args(["add", "--date", "2025-01-16", "--sales", "100", "--box", "1400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exact match"))
        .stdout(predicate::str::contains("Saved entry #2"));
}

#[test]
fn negative_leftover_blocks_save() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    tillbook(home.path())
        .args([
            "add", "--prev-change", "500", "--sales", "1000", "--box", "1500", "--saving", "1600",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Negative values are not allowed"));
    tillbook(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet"));
}

#[test]
fn invalid_amount_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    tillbook(home.path())
        .args(["add", "--sales", "ten", "--box", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid non-negative numbers"));
}

#[test]
fn edit_updates_in_place() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    tillbook(home.path())
        .args(["edit", "1", "--saving", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated entry #1"));
    tillbook(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1,200"));
}

#[test]
fn delete_out_of_range_fails() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    tillbook(home.path())
        .args(["delete", "5", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry #5"));
}

#[test]
fn delete_needs_confirmation() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    tillbook(home.path())
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));
    tillbook(home.path())
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry #1 (2025-01-15)"));
    tillbook(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No entries yet"));
}

#[test]
fn export_writes_csv() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    let out = home.path().join("out.csv");
    tillbook(home.path())
        .args(["export", "--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text, format!("{HEADER}\n2025-01-15,1000,1500,500,200,1300,1500,0\n"));
}

#[test]
fn staged_import_previews_then_replaces() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());

    let mut csv = format!("{HEADER}\n");
    for day in 1..=12 {
        csv.push_str(&format!("2024-03-{day:02},100,100,0,0,100,100,0\n"));
    }
    let file = home.path().join("import.csv");
    std::fs::write(&file, csv).unwrap();

    tillbook(home.path())
        .args(["import", "stage", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing first 10 of 12 rows."));

    // nothing changes until confirmed
    tillbook(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("2025-01-15"));

    tillbook(home.path())
        .args(["import", "confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 12 entries (1 previous entries replaced)"));

    tillbook(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-12"))
        .stdout(predicate::str::contains("2025-01-15").not());
}

#[test]
fn cancelled_import_leaves_ledger() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    let file = home.path().join("import.csv");
    std::fs::write(&file, format!("{HEADER}\n2024-03-01,1,1,0,0,1,1,0\n")).unwrap();

    tillbook(home.path())
        .args(["import", "stage", file.to_str().unwrap()])
        .assert()
        .success();
    tillbook(home.path())
        .args(["import", "cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Import cancelled"));
    tillbook(home.path())
        .args(["import", "confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No import is being previewed"));
    tillbook(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("2025-01-15"));
}

#[test]
fn empty_import_file_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    let file = home.path().join("empty.csv");
    std::fs::write(&file, "").unwrap();
    tillbook(home.path())
        .args(["import", "stage", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV file is empty"));
}

#[test]
fn precision_setting() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    tillbook(home.path())
        .args(["config", "set-precision", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decimal_digits must be 0 or 2"));
    tillbook(home.path())
        .args(["config", "set-precision", "2"])
        .assert()
        .success();
    tillbook(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decimal_digits:  2"));

    tillbook(home.path())
        .args(["add", "--date", "2025-01-15", "--sales", "10.50", "--box", "10.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exact match"));
}

#[test]
fn backup_copies_database() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    add_first_day(home.path());
    let out = home.path().join("copy.db");
    tillbook(home.path())
        .args(["backup", "--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved to"));
    assert!(out.exists());
}
