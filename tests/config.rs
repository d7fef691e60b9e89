use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn program_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

fn cargo_bin(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env("BF_CONFIG", config)
        .env_remove("BF_MEMORY_SIZE")
        .env_remove("BF_TAPE")
        .env_remove("BF_EOF")
        .env_remove("BF_TRACE");
    cmd
}

#[test]
fn config_file_selects_wrapping_tape() {
    let config = program_file("[interpreter]\nmemory_size = 4\ntape = \"wrap\"\n");
    // Cell -1 wraps to cell 3; four steps right lands on it again.
    let tf = program_file(&format!("<{}>>>>.", "+".repeat(66)));
    cargo_bin(config.path()).arg(tf.path()).assert().success().stdout("B");
}

#[test]
fn environment_overrides_config_file() {
    let config = program_file("[interpreter]\ntape = \"wrap\"\n");
    let tf = program_file("<+");
    cargo_bin(config.path())
        .env("BF_TAPE", "trap")
        .arg(tf.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pointer out of bounds"));
}

#[test]
fn growing_tape_runs_past_default_size() {
    let config = program_file("");
    let tf = program_file(&format!("{}+++.", ">".repeat(150)));
    cargo_bin(config.path())
        .env("BF_TAPE", "grow")
        .arg(tf.path())
        .assert()
        .success()
        .stdout(vec![3u8]);
}

#[test]
fn invalid_setting_is_a_usage_error() {
    let config = program_file("[interpreter]\neof = \"sometimes\"\n");
    let tf = program_file("+");
    cargo_bin(config.path())
        .arg(tf.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration error").and(predicate::str::contains("sometimes")));
}

#[test]
fn trace_goes_to_stderr_only() {
    let config = program_file("[interpreter]\ntrace = true\n");
    let tf = program_file(">+.");
    cargo_bin(config.path())
        .arg(tf.path())
        .assert()
        .success()
        .stdout(vec![1u8])
        .stderr(
            predicate::str::contains("STEP | IP")
                .and(predicate::str::contains("Moved pointer head to index 1"))
                .and(predicate::str::contains("Output byte 1")),
        );
}

#[test]
fn oversized_memory_is_a_configuration_error() {
    let config = program_file("");
    let tf = program_file("+");
    cargo_bin(config.path())
        .env("BF_MEMORY_SIZE", usize::MAX.to_string())
        .arg(tf.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration error").and(predicate::str::contains("BF_MEMORY_SIZE")));
}
