#![cfg(unix)]

// CLI guard rails for sauce-browsers. Only offline sources are exercised.
mod support;

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

use support::fixture_path;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sauce-browsers"))
}

#[test]
fn normalize_from_fixture_prints_descriptor_list() -> Result<()> {
    let output = cli()
        .args(["normalize", "--source", "file", "--file"])
        .arg(fixture_path("platforms.json"))
        .output()
        .context("running sauce-browsers normalize")?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: Value = serde_json::from_slice(&output.stdout)?;
    let list = value.as_array().context("expected JSON array")?;
    assert_eq!(list.len(), 12);
    assert_eq!(list[4]["version"], "11");
    Ok(())
}

#[test]
fn file_source_without_path_fails() -> Result<()> {
    let output = cli().args(["normalize", "--source", "file"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--file"));
    Ok(())
}

#[test]
fn static_source_is_rejected_at_parse_time() -> Result<()> {
    let output = cli().args(["normalize", "--source", "static"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value"));
    Ok(())
}

#[test]
fn validate_accepts_normalized_output_on_stdin() -> Result<()> {
    let normalized = cli()
        .args(["normalize", "--source", "file", "--file"])
        .arg(fixture_path("platforms.json"))
        .output()?;
    assert!(normalized.status.success());

    let mut child = cli()
        .arg("validate")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning sauce-browsers validate")?;
    child
        .stdin
        .take()
        .context("stdin handle")?
        .write_all(&normalized.stdout)?;
    let output = child.wait_with_output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}

#[test]
fn validate_rejects_raw_manifests() -> Result<()> {
    let output = cli()
        .args(["validate", "--file"])
        .arg(fixture_path("platforms.json"))
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema validation"));
    Ok(())
}
