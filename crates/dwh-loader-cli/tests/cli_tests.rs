//! CLI integration tests for dwh-loader.
//!
//! These tests verify command-line argument parsing, usage output, the
//! show_sql command, and exit codes for various error conditions. None of
//! them require a reachable warehouse.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the dwh-loader binary.
fn cmd() -> Command {
    Command::cargo_bin("dwh-loader").unwrap()
}

/// Write a complete configuration to a temp file.
fn full_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"CLUSTER:
  HOST: 127.0.0.1
  DB_NAME: dwh
  DB_USER: loader
  DB_PASSWORD: secret
  DB_PORT: 5439
S3:
  LOG_DATA: s3://bucket/log_data
  SONG_DATA: s3://bucket/song_data
  LOG_JSONPATH: s3://bucket/log_json_path.json
IAM_ROLE:
  ARN: arn:aws:iam::123456789012:role/dwhRole
"#
    )
    .unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create_schema"))
        .stdout(predicate::str::contains("do_etl"))
        .stdout(predicate::str::contains("show_sql"))
        .stdout(predicate::str::contains("health_check"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dwh-loader"));
}

#[test]
fn test_config_default_path() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: dwh.yaml]"));
}

#[test]
fn test_log_flags_exist() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("--verbosity"));
}

// =============================================================================
// Misuse Tests - usage output, non-zero exit, no warehouse work
// =============================================================================

#[test]
fn test_no_subcommand_shows_usage_and_fails() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_subcommand_shows_usage_and_fails() {
    cmd()
        .arg("bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_unknown_show_sql_group_rejected() {
    let file = full_config();
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "show_sql", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// =============================================================================
// Exit Code Tests - Config Errors
// =============================================================================

#[test]
fn test_missing_config_exits_with_code_7() {
    // Missing file is an IO error (code 7), not a config error (code 1)
    cmd()
        .args(["--config", "nonexistent_dwh_config.yaml", "create_schema"])
        .assert()
        .code(7);
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "invalid: yaml: content: [").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "create_schema"])
        .assert()
        .code(1);
}

#[test]
fn test_missing_storage_section_exits_with_code_1() {
    // show_sql copy templates the copy statements from the S3 section
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "CLUSTER:").unwrap();
    writeln!(file, "  HOST: h").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "show_sql", "copy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration incomplete"));
}

// =============================================================================
// show_sql Tests - no database required
// =============================================================================

#[test]
fn test_show_sql_prints_all_groups() {
    let file = full_config();
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "show_sql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s_events_table_drop"))
        .stdout(predicate::str::contains("s_events_table_create"))
        .stdout(predicate::str::contains("s_events_copy"))
        .stdout(predicate::str::contains("f_songplay_table_insert"));
}

#[test]
fn test_show_sql_single_group() {
    let file = full_config();
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "show_sql", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create table if not exists f_songplays"))
        .stdout(predicate::str::contains("Showing you sql text for d_time_table_create"));
}

#[test]
fn test_show_sql_copy_embeds_config_values() {
    let file = full_config();
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "show_sql", "copy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copy s_events from 's3://bucket/log_data'"))
        .stdout(predicate::str::contains("aws_iam_role=arn:aws:iam::123456789012:role/dwhRole"));
}

#[test]
fn test_show_sql_prints_banners() {
    let file = full_config();
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "show_sql", "drop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*** start - "))
        .stdout(predicate::str::contains("=== end - "));
}

// =============================================================================
// Exit Code Tests - Connection Errors
// =============================================================================

#[test]
fn test_unreachable_warehouse_exits_with_code_2() {
    // Discard-protocol port on loopback: nothing is listening there
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"CLUSTER:
  HOST: 127.0.0.1
  DB_NAME: dwh
  DB_USER: loader
  DB_PASSWORD: secret
  DB_PORT: 9
"#
    )
    .unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "health_check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Connection failed"));
}
