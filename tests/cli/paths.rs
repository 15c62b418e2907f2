use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_paths_in_load_order() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.Main", "// #require(app.Base)\n"),
        ("app.Base", ""),
    ])?;
    let output = test.subcommand("paths").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "source/class/app/Base.js\nsource/class/app/Main.js\n"
    );
    Ok(())
}

#[test]
fn test_paths_first_root_wins() -> Result<()> {
    let test = CliTest::new()?;
    test.write_class("lib", "app.Main", "// #require(app.Util)\n")?;
    test.write_class("lib", "app.Util", "")?;
    test.write_class("vendor", "app.Util", "")?;
    test.write_class("vendor", "app.Extra", "")?;

    let output = test
        .subcommand("paths")
        .args(["app.Main", "--root", "lib", "--root", "vendor"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "lib/app/Util.js\nlib/app/Main.js\n");
    let err = stderr(&output);
    assert!(err.contains("'app.Util' found under more than one root"), "stderr: {err}");
    assert!(err.contains("vendor/app/Util.js"), "stderr: {err}");
    Ok(())
}

#[test]
fn test_paths_config_roots() -> Result<()> {
    let test = CliTest::new()?;
    test.write_class("src", "app.Main", "// #require(other.Dep)\n")?;
    test.write_class("deps", "other.Dep", "")?;
    test.write_file(
        ".classdepsrc.json",
        r#"{ "rootPaths": ["src", "deps"], "entries": ["app.Main"] }"#,
    )?;

    let output = test.subcommand("paths").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "deps/other/Dep.js\nsrc/app/Main.js\n");
    Ok(())
}

#[test]
fn test_paths_missing_entry() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.subcommand("paths").arg("app.Nowhere").output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("entry 'app.Nowhere' not found"), "stderr: {err}");
    assert!(err.contains("root directory source/class does not exist"));
    Ok(())
}

#[test]
fn test_paths_alias_onto_own_subnamespace() -> Result<()> {
    let test = CliTest::with_classes(&[
        ("app.v2.Main", "// #require(app.Util)\n"),
        ("app.v2.Util", ""),
    ])?;
    test.write_file(
        ".classdepsrc.json",
        r#"{ "namespaceMap": { "app": "app.v2" } }"#,
    )?;
    let output = test.subcommand("paths").arg("app.Main").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "source/class/app/v2/Util.js\nsource/class/app/v2/Main.js\n"
    );
    Ok(())
}
