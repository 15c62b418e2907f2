use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

fn chain_project() -> Result<CliTest> {
    CliTest::with_classes(&[
        (
            "app.Main",
            "/**\n * #require(app.Base)\n * #use(app.Util)\n */\napp.Main = {};\n",
        ),
        ("app.Base", "// #use(app.Util)\napp.Base = {};\n"),
        ("app.Util", "app.Util = {};\n"),
    ])
}

#[test]
fn test_order_load_edges() -> Result<()> {
    let test = chain_project()?;
    let output = test.subcommand("order").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "app.Base\napp.Main\napp.Util\n");
    assert!(stderr(&output).is_empty());
    Ok(())
}

#[test]
fn test_order_use_edges() -> Result<()> {
    let test = chain_project()?;
    let output = test
        .subcommand("order")
        .args(["app.Main", "--edges", "use"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "app.Util\napp.Main\napp.Base\n");
    Ok(())
}

#[test]
fn test_order_is_stable_across_runs_and_parallel() -> Result<()> {
    let test = chain_project()?;
    let first = test.subcommand("order").arg("app.Main").output()?;
    let second = test.subcommand("order").arg("app.Main").output()?;
    let parallel = test
        .subcommand("order")
        .args(["app.Main", "--parallel"])
        .output()?;

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stdout, parallel.stdout);
    Ok(())
}

#[test]
fn test_order_json() -> Result<()> {
    let test = chain_project()?;
    let output = test
        .subcommand("order")
        .args(["app.Main", "--format", "json"])
        .output()?;

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        value,
        serde_json::json!(["app.Base", "app.Main", "app.Util"])
    );
    Ok(())
}

#[test]
fn test_order_entries_from_config() -> Result<()> {
    let test = chain_project()?;
    test.write_file(".classdepsrc.json", r#"{ "entries": ["app.Main"] }"#)?;
    let output = test.subcommand("order").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "app.Base\napp.Main\napp.Util\n");
    Ok(())
}

#[test]
fn test_order_cycle_fails() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.A", "// #require(app.B)\n"),
        ("app.B", "// #require(app.A)\n"),
    ])?;
    let output = test.subcommand("order").arg("app.A").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("cyclic-dependency"), "stderr: {err}");
    assert!(err.contains("app.A -> app.B -> app.A"), "stderr: {err}");
    Ok(())
}

#[test]
fn test_order_unresolved_dependency_fails() -> Result<()> {
    let test = CliTest::with_classes(&[("app.Main", "// #require(app.Missing)\n")])?;
    let output = test.subcommand("order").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("'app.Missing' required by 'app.Main' not found"));
    assert!(err.contains("unresolved-dependency"));
    Ok(())
}

#[test]
fn test_order_ignore_hint_suppresses_missing_class() -> Result<()> {
    let test = CliTest::with_classes(&[(
        "app.Main",
        "// #require(app.Missing)\n// #ignore(app.Missing)\n",
    )])?;
    let output = test.subcommand("order").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_snapshot!(stdout(&output).trim_end(), @"app.Main");
    Ok(())
}

#[test]
fn test_order_missing_optional_warns() -> Result<()> {
    let test = CliTest::with_classes(&[("app.Main", "// #optional(app.Extra)\n")])?;
    let output = test.subcommand("order").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "app.Main\n");
    let err = stderr(&output);
    assert!(err.contains("warning: optional 'app.Extra' not found"), "stderr: {err}");
    assert!(err.contains("1 problem (0 errors, 1 warning)"), "stderr: {err}");
    Ok(())
}

#[test]
fn test_order_malformed_hint_strict_and_lenient() -> Result<()> {
    let test = CliTest::with_classes(&[(
        "app.Main",
        "/**\n * #require(app.Base\n * #require(app.Base)\n */\n",
    )])?;
    test.write_class("source/class", "app.Base", "")?;

    let strict = test.subcommand("order").arg("app.Main").output()?;
    assert_eq!(strict.status.code(), Some(1));
    let err = stderr(&strict);
    assert!(err.contains("hint-parse"), "stderr: {err}");
    assert!(err.contains("Main.js:2:4"), "stderr: {err}");

    let lenient = test
        .subcommand("order")
        .args(["app.Main", "--lenient-hints"])
        .output()?;
    assert_eq!(lenient.status.code(), Some(0));
    assert_eq!(stdout(&lenient), "app.Base\napp.Main\n");
    assert!(stderr(&lenient).contains("warning: unclosed parenthesis"));
    Ok(())
}

#[test]
fn test_order_wildcard_entries() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.ui.Zoom", "// #require(app.ui.Button)\n"),
        ("app.ui.Button", ""),
    ])?;
    let output = test.subcommand("order").arg("app.ui.*").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "app.ui.Button\napp.ui.Zoom\n");
    Ok(())
}

#[test]
fn test_order_without_entries_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.subcommand("order").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No entry classes given"));
    Ok(())
}

#[test]
fn test_order_namespace_alias() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.Main", "// #require(q.core.Object)\n"),
        ("qx.core.Object", ""),
    ])?;
    test.write_file(
        ".classdepsrc.json",
        r#"{ "namespaceMap": { "q": "qx" } }"#,
    )?;
    let output = test.subcommand("order").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "qx.core.Object\napp.Main\n");
    Ok(())
}

#[test]
fn test_order_pattern_entries_under_namespace_alias() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.v2.Main", "// #require(app.Util)\n"),
        ("app.v2.Util", ""),
    ])?;
    test.write_file(
        ".classdepsrc.json",
        r#"{ "namespaceMap": { "app": "app.v2" } }"#,
    )?;
    let output = test.subcommand("order").arg("app.v2.*").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "app.v2.Util\napp.v2.Main\n");
    Ok(())
}
