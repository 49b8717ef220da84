use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout, strings};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .xlaterc.json"));

    let content = test.read_file(".xlaterc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["resourcesRoot"], "./res");
    assert_eq!(parsed["masterLanguage"], "en");
    assert_eq!(parsed["vcs"], "hg");
    assert_eq!(parsed["historyTimeoutSecs"], 60);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xlaterc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".xlaterc.json already exists"));
    assert_eq!(test.read_file(".xlaterc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_strings("values", &strings(&[("app_name", "Tracks")]))?;
    test.write_strings("values-fr", &strings(&[("app_name", "Traces")]))?;

    let output = test.check_command().arg("--no-history").output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
