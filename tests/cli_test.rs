//! Integration tests for the tagdown CLI.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tagdown"))
}

#[test]
fn test_basic_stdin() {
    cli()
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("# Title\n\nContent\n");
}

#[test]
fn test_dash_reads_stdin() {
    cli()
        .arg("-")
        .write_stdin("<p>Dash test</p>")
        .assert()
        .success()
        .stdout("Dash test\n");
}

#[test]
fn test_file_input_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.html");
    let output_path = temp_dir.path().join("output.md");
    fs::write(&input_path, "<ul><li>One<li>Two</ul>").unwrap();

    cli()
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let output = fs::read_to_string(&output_path).unwrap();
    assert_eq!(output, "  * One\n  * Two\n");
}

#[test]
fn test_legacy_encoding_decoded() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("latin1.html");
    fs::write(
        &input_path,
        b"<meta charset=\"iso-8859-1\"><p>caf\xe9</p>".as_slice(),
    )
    .unwrap();

    cli().arg(&input_path).assert().success().stdout("café\n");
}

#[test]
fn test_width_and_link_flags() {
    cli()
        .args(["-w", "20", "-l", "endnote"])
        .write_stdin(r#"<p>the quick brown fox jumps over <a href="http://x">it</a></p>"#)
        .assert()
        .success()
        .stdout("the quick brown fox\njumps over [it][1]\n\n[1]: http://x\n");
}

#[test]
fn test_base_url_flag() {
    cli()
        .args(["--base-url", "http://example.org/a/", "--skip-local-fragments"])
        .write_stdin(r##"<p><a href="b.html">B</a> <a href="#c">C</a></p>"##)
        .assert()
        .success()
        .stdout("[B](http://example.org/a/b.html) C\n");
}

#[test]
fn test_config_file_with_flag_override() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("tagdown.json");
    fs::write(
        &config_path,
        r#"{"link_placement": "paragraph", "column_width": 40}"#,
    )
    .unwrap();

    let html = r#"<p><a href="http://x">x</a></p>"#;
    cli()
        .arg("--config")
        .arg(&config_path)
        .write_stdin(html)
        .assert()
        .success()
        .stdout("[x][1]\n\n[1]: http://x\n");

    cli()
        .arg("--config")
        .arg(&config_path)
        .args(["-l", "inline"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout("[x](http://x)\n");
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.json");
    fs::write(&config_path, r#"{"colour": "blue"}"#).unwrap();

    cli()
        .arg("--config")
        .arg(&config_path)
        .write_stdin("<p>x</p>")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn test_unknown_placement_warns() {
    cli()
        .args(["-l", "sideways"])
        .write_stdin("<p>x</p>")
        .assert()
        .success()
        .stdout("x\n")
        .stderr(predicate::str::contains("warning:").and(predicate::str::contains("sideways")));
}

#[test]
fn test_quiet_suppresses_warnings() {
    cli()
        .args(["-q", "-l", "sideways"])
        .write_stdin("<p>x</p>")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .arg(temp_dir.path().join("missing.html"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn test_strict_and_xhtml_errors() {
    cli()
        .arg("--strict")
        .write_stdin("<p>a</p b>")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Tokenization failed"));

    cli()
        .arg("--xhtml")
        .write_stdin("<p><em>a</p>")
        .assert()
        .code(1);
}
