//! Tests that run the cleanscript binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn cleanscript(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cleanscript"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cleanscript")
}

#[test]
fn test_compile_single_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hello.csc"), "console.log(\"hi\");\n").unwrap();

    let output = cleanscript(dir.path(), &["compile", "hello.csc"]);
    assert!(output.status.success());

    let js = fs::read_to_string(dir.path().join("hello.js")).unwrap();
    assert_eq!(
        js,
        "/* Compiled by Cleanscript */\n\n\"use strict\";\nconsole.log(\"hi\");\n"
    );
}

#[test]
fn test_stdout_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csc"), "x = 1;\n").unwrap();

    let output = cleanscript(dir.path(), &["compile", "a.csc", "--stdout", "--no-banner"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\"use strict\";\nx = 1;\n");
    assert!(!dir.path().join("a.js").exists());
}

#[test]
fn test_errors_fail_the_run() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.csc"), "x = ;\n").unwrap();

    let output = cleanscript(dir.path(), &["compile", "."]);
    assert!(!output.status.success());
    assert!(!dir.path().join("bad.js").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expect expression."), "stderr: {stderr}");
}

#[test]
fn test_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cleanscript.toml"),
        "output_extension = \"mjs\"\nbanner = false\n",
    )
    .unwrap();
    fs::write(dir.path().join("m.csc"), "m();\n").unwrap();

    let output = cleanscript(dir.path(), &["compile", "m.csc"]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("m.mjs")).unwrap(),
        "\"use strict\";\nm();\n"
    );
}

#[test]
fn test_missing_target() {
    let dir = TempDir::new().unwrap();
    let output = cleanscript(dir.path(), &["compile", "nowhere.csc"]);
    assert!(!output.status.success());
}
