use assert_cmd::Command;
use predicates::str::contains;

fn engram() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("engram"))
}

#[test]
fn test_cli_help() {
    engram()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Engram"));
}

#[test]
fn test_cli_version() {
    engram().arg("--version").assert().success();
}

#[test]
fn test_stats_on_fresh_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("engram.db");

    engram()
        .args(["--db-path", db_path.to_str().unwrap(), "stats"])
        .assert()
        .success()
        .stdout(contains("Memories: 0"));
}

#[test]
fn test_config_enable_persists() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("engram.db");
    let db = db_path.to_str().unwrap();

    engram()
        .args([
            "--db-path",
            db,
            "config",
            "enable",
            "--provider",
            "openai",
            "--model",
            "text-embedding-3-small",
        ])
        .assert()
        .success();

    engram()
        .args(["--db-path", db, "config", "show"])
        .assert()
        .success()
        .stdout(contains("Enabled:    true"))
        .stdout(contains("openai"));
}

#[test]
fn test_store_fails_when_disabled() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("engram.db");

    engram()
        .args(["--db-path", db_path.to_str().unwrap(), "store", "hello"])
        .assert()
        .failure()
        .stderr(contains("disabled"));
}
