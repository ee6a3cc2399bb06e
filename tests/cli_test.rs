//! Exit status and console output of the `md2pdf` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const THEMES: &str = "\
[DEFAULT]
heading_line_color = #d1d9e0

[Standard]
accent_color = #0969da
";

fn md2pdf(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_md2pdf"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .env_remove("CHROME")
        .output()
        .unwrap()
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("themes.ini"), THEMES).unwrap();
    fs::write(dir.path().join("doc.md"), "# Doc\n\nBody.\n").unwrap();
    dir
}

#[test]
fn test_unknown_theme_exits_with_error() {
    let dir = workspace();
    let output = md2pdf(
        dir.path(),
        &["doc.md", "out.pdf", "--config", "themes.ini", "--theme", "Nope"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
    assert!(stderr.contains("Nope"));
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join("out.pdf").exists());
}

#[test]
fn test_missing_input_exits_with_error() {
    let dir = workspace();
    let output = md2pdf(dir.path(), &["missing.md", "--html"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
    assert!(!dir.path().join("missing.html").exists());
}

#[test]
fn test_html_output_reports_created_path() {
    let dir = workspace();
    let output = md2pdf(dir.path(), &["doc.md", "--html"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Created doc.html");
    assert!(dir.path().join("doc.html").is_file());
}
