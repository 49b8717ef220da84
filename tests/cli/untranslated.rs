use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout, strings};

fn project() -> Result<CliTest> {
    CliTest::with_resources(&[
        (
            "values",
            &strings(&[("app_name", "Tracks"), ("start", "Start"), ("stop", "Stop")]),
        ),
        ("values-fr", &strings(&[("app_name", "Traces")])),
        (
            "values-de",
            &strings(&[("app_name", "Tracks"), ("start", "Start"), ("stop", "Stopp")]),
        ),
    ])
}

#[test]
fn test_untranslated_text() -> Result<()> {
    let test = project()?;

    let output = test.untranslated_command().arg("--no-history").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "fr (2)\n  start\n  stop\n");

    Ok(())
}

#[test]
fn test_untranslated_json() -> Result<()> {
    let test = project()?;

    let output = test
        .untranslated_command()
        .args(["--format", "json", "--no-history"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(value, json!({ "de": [], "fr": ["start", "stop"] }));

    Ok(())
}

#[test]
fn test_untranslated_selected_language() -> Result<()> {
    let test = project()?;

    let output = test
        .untranslated_command()
        .args(["de", "--format", "json", "--no-history"])
        .output()?;

    let value: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(value, json!({ "de": [] }));

    Ok(())
}
