use anyhow::Result;

use crate::{CliTest, stderr, stdout};

fn asset_project() -> Result<CliTest> {
    CliTest::with_classes(&[
        (
            "app.Main",
            "/*\n#require(app.Icons)\n#asset(app/main.png)\n#cldr\n*/\n",
        ),
        ("app.Icons", "// #asset(app/icons/*)\n"),
    ])
}

#[test]
fn test_hints_index() -> Result<()> {
    let test = asset_project()?;
    let output = test.subcommand("hints").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "asset:\n  app.Icons\n  app.Main\ncldr:\n  app.Main\nrequire:\n  app.Main\n"
    );
    Ok(())
}

#[test]
fn test_hints_single_kind_json() -> Result<()> {
    let test = asset_project()?;
    let output = test
        .subcommand("hints")
        .args(["app.Main", "--kind", "asset", "--format", "json"])
        .output()?;

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value, serde_json::json!({ "asset": ["app.Icons", "app.Main"] }));
    Ok(())
}

#[test]
fn test_hints_custom_resource_kind() -> Result<()> {
    let test = CliTest::with_classes(&[("app.Main", "// #font(Roboto)\n")])?;
    test.write_file(
        ".classdepsrc.json",
        r#"{ "resourceHints": ["asset", "font"] }"#,
    )?;
    let output = test.subcommand("hints").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "font:\n  app.Main\n");
    Ok(())
}
