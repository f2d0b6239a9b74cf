//! Integration tests for the hyph command-line tools.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURES: &str = "tests/fixtures";

fn hyphenate() -> Command {
    let mut cmd = Command::cargo_bin("hyph-hyphenate").unwrap();
    cmd.env_remove("HYPH_PATTERN_PATH").env_remove("RUST_LOG");
    cmd
}

fn dehyphenate() -> Command {
    let mut cmd = Command::cargo_bin("hyph-dehyphenate").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn hyphenates_arguments_with_visible_separator() {
    hyphenate()
        .args(["-l", "en", "--patterns", FIXTURES, "--separator", "-"])
        .arg("hyphenation")
        .assert()
        .success()
        .stdout("hy-phen-a-tion\n");
}

#[test]
fn hyphenates_stdin_lines_with_soft_hyphens() {
    hyphenate()
        .args(["-l", "en-GB", "--patterns", FIXTURES])
        .write_stdin("on hyphenation\nassociate\n")
        .assert()
        .success()
        .stdout("on hy\u{AD}phen\u{AD}a\u{AD}tion\nas\u{AD}so\u{AD}ciate\n");
}

#[test]
fn shows_raw_break_pattern() {
    hyphenate()
        .args(["-l", "en", "--patterns", FIXTURES, "--pattern", "hyphenation"])
        .assert()
        .success()
        .stdout("hyphenation   -   --   \n");
}

#[test]
fn pattern_directory_from_environment() {
    hyphenate()
        .env("HYPH_PATTERN_PATH", FIXTURES)
        .args(["-l", "en", "--separator", "="])
        .arg("hyphenation")
        .assert()
        .success()
        .stdout("hy=phen=a=tion\n");
}

#[test]
fn lists_available_languages() {
    hyphenate()
        .args(["-l", "en", "--patterns", FIXTURES, "--list"])
        .assert()
        .success()
        .stdout("en\n");
}

#[test]
fn unsupported_language_fails() {
    hyphenate()
        .args(["-l", "fr", "--patterns", FIXTURES, "bonjour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported language: fr"));
}

#[test]
fn missing_pattern_directory_fails() {
    hyphenate()
        .args(["-l", "en", "--patterns", "tests/no-such-dir", "word"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn settings_file_changes_word_length() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(&settings, r#"{ "min_word_length": 20 }"#).unwrap();

    hyphenate()
        .args(["-l", "en", "--patterns", FIXTURES, "--separator", "-"])
        .arg("--settings")
        .arg(&settings)
        .arg("hyphenation")
        .assert()
        .success()
        .stdout("hyphenation\n");
}

#[test]
fn unknown_settings_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(&settings, r#"{ "minWordLength": 4 }"#).unwrap();

    hyphenate()
        .args(["-l", "en", "--patterns", FIXTURES])
        .arg("--settings")
        .arg(&settings)
        .arg("hyphenation")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings"));
}

#[test]
fn dehyphenate_strips_markers() {
    dehyphenate()
        .write_stdin("hy\u{AD}phen\u{AD}a\u{AD}tion at https://\u{200B}example.\u{200B}com\n")
        .assert()
        .success()
        .stdout("hyphenation at https://example.com\n");
}

#[test]
fn round_trip_through_both_tools() {
    let output = hyphenate()
        .args(["-l", "en", "--patterns", FIXTURES])
        .arg("well-known hyphenation")
        .output()
        .unwrap();
    assert!(output.status.success());

    dehyphenate()
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("well-known hyphenation\n");
}
