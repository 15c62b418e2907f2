use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_graph_text() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.Main", "// #require(app.Base)\n// #use(app.Util)\n"),
        ("app.Base", ""),
        ("app.Util", ""),
    ])?;
    let output = test.subcommand("graph").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "app.Main source/class/app/Main.js\n  load: app.Base\n  use: app.Util\n\
         app.Base source/class/app/Base.js\n\
         app.Util source/class/app/Util.js\n"
    );
    Ok(())
}

#[test]
fn test_graph_json_tolerates_cycles() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.A", "// #require(app.B)\n"),
        ("app.B", "// #require(app.A)\n"),
    ])?;
    let output = test
        .subcommand("graph")
        .args(["app.A", "--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["entries"], serde_json::json!(["app.A"]));
    assert_eq!(value["classes"][0]["load"], serde_json::json!(["app.B"]));
    assert_eq!(value["classes"][1]["load"], serde_json::json!(["app.A"]));
    assert_eq!(value["classes"][0]["hints"][0]["kind"], "require");
    Ok(())
}
