//! End-to-end outdated detection against a real Git repository. Skipped when
//! `git` is not installed.

use std::process::Command;

use anyhow::{Result, ensure};

use crate::{CliTest, stderr, stdout, strings};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(test: &CliTest, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(["-c", "user.name=Tester", "-c", "user.email=tester@example.com"])
        .args(args)
        .current_dir(test.root())
        .output()?;
    ensure!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}

fn commit(test: &CliTest, message: &str) -> Result<()> {
    git(test, &["add", "-A"])?;
    git(test, &["commit", "-q", "-m", message])
}

fn repository() -> Result<CliTest> {
    let test = CliTest::new()?;
    git(&test, &["init", "-q"])?;
    test.write_file(".xlaterc.json", r#"{ "vcs": "git" }"#)?;
    test.write_strings("values", &strings(&[("greeting", "Hello"), ("farewell", "Bye")]))?;
    commit(&test, "add master strings")?;
    test.write_strings("values-fr", &strings(&[("greeting", "Bonjour"), ("farewell", "Salut")]))?;
    commit(&test, "translate to french")?;
    Ok(test)
}

#[test]
fn test_translation_after_master_is_current() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let test = repository()?;

    let output = test.check_command().output()?;

    assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout(&output), stderr(&output));

    Ok(())
}

#[test]
fn test_master_change_makes_translation_outdated() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let test = repository()?;
    test.write_strings("values", &strings(&[("greeting", "Hello there"), ("farewell", "Bye")]))?;
    commit(&test, "reword greeting")?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(out.contains("error: \"greeting\"  outdated"));
    assert!(out.contains("--> res/values-fr/strings.xml:2"));
    assert!(!out.contains("\"farewell\""));

    let output = test
        .untranslated_command()
        .args(["--format", "json"])
        .output()?;
    let value: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(value, serde_json::json!({ "fr": ["greeting"] }));

    Ok(())
}

#[test]
fn test_retranslation_clears_outdated() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let test = repository()?;
    test.write_strings("values", &strings(&[("greeting", "Hello there"), ("farewell", "Bye")]))?;
    commit(&test, "reword greeting")?;
    test.write_strings(
        "values-fr",
        &strings(&[("greeting", "Bonjour à tous"), ("farewell", "Salut")]),
    )?;
    commit(&test, "update french")?;

    let output = test.check_command().output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));

    Ok(())
}

#[test]
fn test_keep_parent_pinned_to_current_master() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let test = repository()?;
    test.write_strings(
        "values",
        &strings(&[("greeting", "Hello"), ("farewell", "Bye"), ("brand", "Tracks")]),
    )?;
    commit(&test, "add brand")?;
    test.write_strings(
        "values-fr",
        "<resources>\n  <string name=\"greeting\">Bonjour</string>\n  <string name=\"farewell\">Salut</string>\n  <!-- KEEP_PARENT name=\"brand\" -->\n</resources>\n",
    )?;
    commit(&test, "keep brand untranslated")?;

    let output = test.check_command().output()?;

    assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout(&output), stderr(&output));

    Ok(())
}

#[test]
fn test_uncommitted_master_edit_is_unattributed() -> Result<()> {
    if !git_available() {
        return Ok(());
    }
    let test = repository()?;
    test.write_strings("values", &strings(&[("greeting", "Hello there"), ("farewell", "Bye")]))?;

    let output = test.check_command().output()?;
    let out = stdout(&output);

    assert!(output.status.success(), "stdout: {}\nstderr: {}", out, stderr(&output));
    assert!(out.contains("warning: \"greeting\"  unattributed"));
    assert!(!out.contains("\"farewell\""));

    Ok(())
}
