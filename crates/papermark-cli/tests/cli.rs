use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PAPER: &str = "# Paper\n\n![fig](a.png)\n\nAs @image[[fig]] shows, see @[[knuth]].\n";

fn papermark(config_dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("papermark");
    // Keep the user's own settings file out of the tests.
    cmd.arg("--config").arg(config_dir.join("config.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_renders_html_next_to_the_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.md");
    fs::write(&input, PAPER).unwrap();

    papermark(temp_dir.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("paper.html"));

    let html = fs::read_to_string(temp_dir.path().join("paper.html")).unwrap();
    assert!(html.contains("<h1 class=\"head1\">Paper</h1>"));
    assert!(html.contains("<span class=\"image-ref\">图1</span>"));
    assert!(html.contains("<h2 class=\"head2\">1 参考文献</h2>"));
}

#[test]
fn test_explicit_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper");
    let output = temp_dir.path().join("out").with_extension("htm");
    fs::write(&input, PAPER).unwrap();

    papermark(temp_dir.path())
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
    assert!(!temp_dir.path().join("paper.html").exists());
}

#[test]
fn test_no_references_flag() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.md");
    fs::write(&input, PAPER).unwrap();

    papermark(temp_dir.path())
        .args(["--no-references", "--outline"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("<Ref key=knuth number=1>"))
        .stdout(predicate::str::contains("参考文献").not());
}

#[test]
fn test_settings_can_disable_references() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.md");
    fs::write(&input, PAPER).unwrap();
    fs::write(temp_dir.path().join("config.toml"), "references_list = false\n").unwrap();

    papermark(temp_dir.path())
        .arg("--outline")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("参考文献").not());
}

#[test]
fn test_outline_does_not_write_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.md");
    fs::write(&input, PAPER).unwrap();

    papermark(temp_dir.path())
        .arg("--outline")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<Section level=1 number=1>\n  <Title text=Paper>\n"));

    assert!(!temp_dir.path().join("paper.html").exists());
}

#[test]
fn test_style_sheet_then_front_matter() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.md");
    let sheet = temp_dir.path().join("thesis.yaml");
    fs::write(
        &input,
        "---\nh2:\n  format: \"Part {s1}: {text}\"\n---\n# Paper\n## Intro\n",
    )
    .unwrap();
    fs::write(
        &sheet,
        "h2:\n  format: \"Ignored {text}\"\n  color: red\nreferencesList:\n  title: Bibliography\n",
    )
    .unwrap();

    papermark(temp_dir.path())
        .arg("--print-style")
        .arg("--style")
        .arg(&sheet)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Part {s1}: {text}"))
        .stdout(predicate::str::contains("title: Bibliography"));
}

#[test]
fn test_parse_error_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bad.md");
    fs::write(&input, "# Paper\n| a | b |\n").unwrap();

    papermark(temp_dir.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("line 2: table needs a name"));
}

#[test]
fn test_dangling_reference_fails_to_render() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.md");
    fs::write(&input, "# Paper\nsee @table[[missing]]\n").unwrap();

    papermark(temp_dir.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no table named `missing`"));
}

#[test]
fn test_missing_input() {
    let temp_dir = TempDir::new().unwrap();

    papermark(temp_dir.path())
        .arg(temp_dir.path().join("absent.md"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_refuses_to_overwrite_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("paper.html");
    fs::write(&input, PAPER).unwrap();

    papermark(temp_dir.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite the input"));
}
