use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["rootPaths"], serde_json::json!(["source/class"]));
    assert_eq!(parsed["extension"], ".js");
    assert!(
        parsed.get("namespaceMap").is_some(),
        "Config should have 'namespaceMap' field"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.subcommand("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .classdepsrc.json"));

    assert!(test.root().join(".classdepsrc.json").exists());
    let content = test.read_file(".classdepsrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".classdepsrc.json", "{}")?;

    let output = test.subcommand("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".classdepsrc.json already exists"));
    assert_eq!(test.read_file(".classdepsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.subcommand("init").output()?;
    test.write_class("source/class", "app.Main", "// #require(app.Base)\n")?;
    test.write_class("source/class", "app.Base", "")?;

    let output = test.subcommand("order").arg("app.Main").output()?;
    assert!(
        output.status.success(),
        "order should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(stdout(&output), "app.Base\napp.Main\n");

    Ok(())
}
