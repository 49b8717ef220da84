use anyhow::Result;

use crate::{CliTest, stderr, stdout, strings};

fn master() -> String {
    strings(&[("app_name", "Tracks"), ("start", "Start"), ("stop", "Stop")])
}

#[test]
fn test_complete_translations_pass() -> Result<()> {
    let test = CliTest::with_resources(&[
        ("values", &master()),
        (
            "values-fr",
            &strings(&[("app_name", "Traces"), ("start", "Démarrer"), ("stop", "Arrêter")]),
        ),
    ])?;

    let output = test.check_command().arg("--no-history").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Checked 1 language against 'en' - no issues found"));

    Ok(())
}

#[test]
fn test_missing_keys_fail() -> Result<()> {
    let test = CliTest::with_resources(&[
        ("values", &master()),
        (
            "values-fr",
            &strings(&[("app_name", "Traces"), ("pause", "Pause")]),
        ),
    ])?;

    let output = test.check_command().arg("--no-history").output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("error: \"start\"  missing-in-language"));
    assert!(out.contains("error: \"stop\"  missing-in-language"));
    assert!(out.contains("--> res/values/strings.xml:3"));
    assert!(out.contains("error: \"pause\"  missing-in-master"));
    assert!(out.contains("--> res/values-fr/strings.xml:3"));
    assert!(out.contains("fr: 2 missing, 1 not in master"));
    assert!(out.contains("3 problems (3 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_selected_languages_only() -> Result<()> {
    let test = CliTest::with_resources(&[
        ("values", &master()),
        ("values-fr", &master()),
        ("values-de", &strings(&[("app_name", "Tracks")])),
    ])?;

    let output = test.check_command().args(["fr", "--no-history"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = test.check_command().args(["de", "--no-history"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_unknown_language_is_error() -> Result<()> {
    let test = CliTest::with_resources(&[("values", &master()), ("values-fr", &master())])?;

    let output = test.check_command().args(["ja", "--no-history"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("language 'ja' not found"));

    Ok(())
}

#[test]
fn test_malformed_file_is_error() -> Result<()> {
    let test = CliTest::with_resources(&[
        ("values", &master()),
        ("values-fr", "<resources>\n  <string name=\"app_name\">Traces\n"),
    ])?;

    let output = test.check_command().arg("--no-history").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("values-fr"));

    Ok(())
}

#[test]
fn test_missing_resources_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.check_command().arg("--no-history").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}

#[test]
fn test_config_file_is_used() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".xlaterc.json",
        r#"{ "resourcesRoot": "app/res", "ignoreLanguages": ["de"] }"#,
    )?;
    test.write_file("app/res/values/strings.xml", &master())?;
    test.write_file("app/res/values-fr/strings.xml", &master())?;
    test.write_file("app/res/values-de/strings.xml", "<resources/>")?;

    let output = test.check_command().arg("--no-history").output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));

    Ok(())
}

#[test]
fn test_resources_root_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xlaterc.json", r#"{ "resourcesRoot": "nowhere" }"#)?;
    test.write_file("android/values/strings.xml", &master())?;
    test.write_file("android/values-fr/strings.xml", &master())?;

    let output = test
        .check_command()
        .args(["--resources-root", "android", "--no-history"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
