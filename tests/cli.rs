use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "sitebook";

fn sitebook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SITEBOOK_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run a command that prints `ID: <id>` and return the id
fn created_id(data_dir: &TempDir, args: &[&str]) -> String {
    let output = sitebook(data_dir).args(args).output().expect("runs");
    assert!(output.status.success(), "{:?} failed", args);
    String::from_utf8(output.stdout)
        .expect("utf-8 output")
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: ").map(str::to_string))
        .expect("an ID line")
}

#[test]
fn cli_without_command_prints_overview() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .assert()
        .success()
        .stdout(contains("sitebook --help"));
}

#[test]
fn cli_income_shows_in_list_and_dashboard() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["income", "add", "50000", "--by", "mujahir", "--date", "2025-04-01"])
        .assert()
        .success()
        .stdout(contains("Recorded income: ₹50000.00 from Master Mujahir"));

    sitebook(&dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(contains("2025-04-01").and(contains("Master Mujahir")));

    sitebook(&dir)
        .args(["expense", "add", "1200", "--to", "Cement depot", "--date", "2025-04-02"])
        .assert()
        .success();

    sitebook(&dir)
        .args(["report", "dashboard"])
        .assert()
        .success()
        .stdout(contains("₹48800.00"));
}

#[test]
fn cli_rejects_bad_amounts() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["income", "add", "lots", "--by", "salik"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));

    sitebook(&dir)
        .args(["income", "add", "92233720368547759", "--by", "salik"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount").and(contains("panicked").not()));

    sitebook(&dir)
        .args(["income", "add", "0", "--by", "salik"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn cli_history_refuses_to_delete_partner_expense() {
    let dir = TempDir::new().unwrap();
    let expense_id = created_id(
        &dir,
        &[
            "expense", "add", "3000", "--to", "Sharma Sand", "--by", "salik", "--date", "2025-05-10",
        ],
    );

    sitebook(&dir)
        .args(["income", "history"])
        .assert()
        .success()
        .stdout(contains("Spent on: Sharma Sand (Material)"));

    sitebook(&dir)
        .args(["income", "delete", &expense_id])
        .assert()
        .failure()
        .stderr(contains("Expenses section"));

    sitebook(&dir)
        .args(["expense", "show", &expense_id])
        .assert()
        .success()
        .stdout(contains("Sharma Sand"));
}

#[test]
fn cli_labour_balance_after_attendance_and_payment() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["labour", "add", "Ramesh", "--wage", "600", "--type", "Mistry"])
        .assert()
        .success();

    sitebook(&dir)
        .args(["labour", "attend", "ramesh", "--date", "2025-06-01"])
        .assert()
        .success();
    sitebook(&dir)
        .args(["labour", "attend", "Ramesh", "--status", "half-day", "--date", "2025-06-02"])
        .assert()
        .success();

    sitebook(&dir)
        .args(["labour", "pay", "Ramesh", "500", "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("Balance due: ₹400.00"));

    sitebook(&dir)
        .args(["report", "labour"])
        .assert()
        .success()
        .stdout(contains("Ramesh").and(contains("₹900.00")));
}

#[test]
fn cli_sync_without_url_explains_setup() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["sync", "push"])
        .assert()
        .failure()
        .stderr(contains("sync-url"));

    sitebook(&dir)
        .args(["sync", "script"])
        .assert()
        .success()
        .stdout(contains("function doPost"));
}

#[test]
fn cli_export_report_has_sections() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["income", "add", "1000", "--by", "pool"])
        .assert()
        .success();

    let out = dir.path().join("report.csv");
    sitebook(&dir)
        .args(["export", "report"])
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with('\u{feff}'));
    assert!(csv.contains("SECTION: DIRECT INCOME"));
    assert!(csv.contains("SECTION: LABOUR PAYMENTS"));
}

#[test]
fn cli_export_reset_import_restores_records() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["income", "add", "7500", "--by", "salik", "--remarks", "first cheque"])
        .assert()
        .success();

    let snapshot = dir.path().join("snapshot.json");
    sitebook(&dir)
        .args(["export", "all", "--pretty"])
        .arg(&snapshot)
        .assert()
        .success();

    sitebook(&dir)
        .args(["reset", "--confirm"])
        .assert()
        .success()
        .stdout(contains("Deleted 1 record(s)."));
    sitebook(&dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(contains("No income recorded."));

    sitebook(&dir)
        .arg("import")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(contains("--confirm"));
    sitebook(&dir)
        .arg("import")
        .arg(&snapshot)
        .arg("--confirm")
        .assert()
        .success()
        .stdout(contains("Imported 1 record(s)."));

    sitebook(&dir)
        .args(["income", "list"])
        .assert()
        .success()
        .stdout(contains("first cheque"));
}

#[test]
fn cli_settings_round_trip() {
    let dir = TempDir::new().unwrap();
    sitebook(&dir)
        .args(["settings", "set", "project-name", "Madrasa Block B"])
        .assert()
        .success();
    sitebook(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(contains("Madrasa Block B"));
}
