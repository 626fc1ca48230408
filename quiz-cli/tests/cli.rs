//! Binary-level checks for zimble-quiz.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn quiz() -> Command {
    let mut cmd = Command::cargo_bin("zimble-quiz").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn help_lists_commands() {
    quiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn config_shows_file_values() {
    let file = config_file("base_url = \"http://quiz.example:9000\"\nretry_delay_ms = 250\n");

    quiz()
        .arg("--config")
        .arg(file.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded from"))
        .stdout(predicate::str::contains("base_url = \"http://quiz.example:9000\""))
        .stdout(predicate::str::contains("retry_delay_ms = 250"));
}

#[test]
fn server_flag_overrides_config_file() {
    let file = config_file("base_url = \"http://quiz.example:9000\"\n");

    quiz()
        .args(["config", "--server", "http://127.0.0.1:1"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url = \"http://127.0.0.1:1\""));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    quiz()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn play_without_game_rejects_answers() {
    quiz()
        .args(["--server", "http://127.0.0.1:1", "play"])
        .write_stdin("4\n:next\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Type :start to begin a new game."))
        .stdout(predicate::str::contains("! Start a game first.").count(2));
}

#[test]
fn play_reports_unknown_commands() {
    quiz()
        .args(["--server", "http://127.0.0.1:1"])
        .write_stdin(":jump\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command :jump"));
}
