//! Integration tests for the psminimize binary.
//!
//! Each test points HOME at a temp dir so a user config file can never leak
//! into the run.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{load_fixture, run_psminimize, temp_fixture};

const SAMPLE_MINIFIED: &str = "$A=0;$C=GET-CHILDITEM -PATH $ENV:TEMP;FOREACH($B IN $C){IF($B.LENGTH-GT1024){$A=$A+$B.LENGTH;}}WRITE-HOST \"TOTAL: $A\";";

fn psminimize(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("psminimize").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Missing arguments
// ============================================================================

#[test]
fn missing_script_path_reports_and_succeeds() {
    let home = TempDir::new().unwrap();
    psminimize(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("no file provided"));
}

#[test]
fn missing_output_path_reports_and_succeeds() {
    let (dir, script) = temp_fixture("sample.ps1");
    psminimize(&dir)
        .args(["-s", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no output file provided"));
}

#[test]
fn version_flag_prints_version() {
    let home = TempDir::new().unwrap();
    psminimize(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("psminimize "));
}

// ============================================================================
// Minification
// ============================================================================

#[test]
fn minifies_script_to_output_file() {
    let (dir, script) = temp_fixture("sample.ps1");
    let output = dir.path().join("sample.min.ps1");

    psminimize(&dir)
        .args(["-s", script.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("minimization completed in"))
        .stdout(predicate::str::contains("seconds and reduced by"));

    assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_MINIFIED);
    assert_eq!(fs::read_to_string(&script).unwrap(), load_fixture("sample.ps1"));
}

#[test]
fn long_flags_are_accepted() {
    let (dir, script) = temp_fixture("sample.ps1");
    let output = dir.path().join("out.ps1");

    let (_, stderr, exit_code) = run_psminimize(
        &dir,
        &[
            "--script-path",
            script.to_str().unwrap(),
            "--output-path",
            output.to_str().unwrap(),
        ],
    );

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_MINIFIED);
}

#[test]
fn compare_prints_side_by_side() {
    let (dir, script) = temp_fixture("sample.ps1");
    let output = dir.path().join("out.ps1");

    let (stdout, stderr, exit_code) = run_psminimize(
        &dir,
        &["-s", script.to_str().unwrap(), "-o", output.to_str().unwrap(), "-c"],
    );

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let first = stdout.lines().next().unwrap();
    assert!(first.starts_with("# Sum the sizes of large files"));
    assert!(first.contains(" | $A=0;"), "got: {first}");
    assert_eq!(first.find(" | "), Some(120));
}

#[test]
fn missing_script_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.ps1");

    psminimize(&dir)
        .args(["-s", "does-not-exist.ps1", "-o", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));

    assert!(!output.exists());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_file_disables_stages() {
    let (dir, script) = temp_fixture("sample.ps1");
    let output = dir.path().join("out.ps1");
    let config = dir.path().join("psminimize.toml");
    fs::write(
        &config,
        "[pipeline]\nrename_variables = false\ncompact_spacing = false\njoin_lines = false\n",
    )
    .unwrap();

    psminimize(&dir)
        .args(["-s", script.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("$total = 0\n"));
    assert!(!written.contains("# Sum"));
    assert!(!written.contains("skip small"));
}

#[test]
fn default_config_location_is_used() {
    let (dir, script) = temp_fixture("sample.ps1");
    let output = dir.path().join("out.ps1");
    let config_dir = dir.path().join(".config").join("psminimize");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[rename]\nextra_reserved = [\"$total\"]\n",
    )
    .unwrap();

    psminimize(&dir)
        .args(["-s", script.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("$TOTAL=0;"), "got: {written}");
}

#[test]
fn invalid_config_fails_without_output() {
    let (dir, script) = temp_fixture("sample.ps1");
    let output = dir.path().join("out.ps1");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[rename]\nextra_reserved = [\"total\"]\n").unwrap();

    psminimize(&dir)
        .args(["-s", script.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));

    assert!(!output.exists());
}
