//! End-to-end tests driving the `codelineage` binary.

use std::path::Path;
use std::process::{Command, Output};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn codelineage(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codelineage"))
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("LINEAGE_OUTPUT_FORMAT")
        .env_remove("LINEAGE_SOURCE_SUFFIX")
        .env_remove("LINEAGE_TEST_SUFFIX")
        .env_remove("LINEAGE_RESPECT_GITIGNORE")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "main.go",
        r#"package main

import "mylib"

func main() {
	start()
	mylib.Run()
}

func start() { start(); helper() }
"#,
    );
    write(
        tmp.path(),
        "helper.go",
        r"package main

type T struct{}

func (t T) M() { t.N() }

func (t T) N() {}

func helper() {}
",
    );
    write(
        tmp.path(),
        "helper_test.go",
        "package main\n\nfunc TestHelper() { helper() }\n",
    );
    tmp
}

#[test]
fn analyze_prints_text_graph() {
    let tmp = project();
    let output = codelineage(&["analyze", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "T.M calls:\nT.N calls:\nhelper calls:\nmain calls:\n  - start\nstart calls:\n  - start\n  - helper\n"
    );
}

#[test]
fn analyze_json_to_file() {
    let tmp = project();
    let out = tmp.path().join("graph.json");
    let output = codelineage(&[
        "analyze",
        tmp.path().to_str().unwrap(),
        "--format",
        "json",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["main"], serde_json::json!(["start"]));
    assert_eq!(json["T.M"], serde_json::json!([]));
    assert!(json.get("TestHelper").is_none());
}

#[test]
fn analyze_is_deterministic() {
    let tmp = project();
    let dir = tmp.path().to_str().unwrap();
    let first = codelineage(&["analyze", dir, "--format", "dot"]);
    let second = codelineage(&["analyze", dir, "--format", "dot"]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(stdout(&first).contains("\"main\" -> \"start\";"));
}

#[test]
fn analyze_exclude_flag() {
    let tmp = project();
    let output = codelineage(&[
        "analyze",
        tmp.path().to_str().unwrap(),
        "--exclude",
        "helper.go",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "main calls:\n  - start\nstart calls:\n  - start\n"
    );
}

#[test]
fn config_file_sets_default_format() {
    let tmp = project();
    write(
        tmp.path(),
        ".lineage/config.toml",
        "[output]\nformat = \"json\"\n",
    );
    let output = codelineage(&["analyze", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["start"], serde_json::json!(["start", "helper"]));
}

#[test]
fn unknown_format_fails() {
    let tmp = project();
    let output = codelineage(&[
        "analyze",
        tmp.path().to_str().unwrap(),
        "--format",
        "mermaid",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown format"));
}

#[test]
fn syntax_error_fails_without_output() {
    let tmp = project();
    write(tmp.path(), "broken.go", "package main\n\nfunc broken() {\n");
    let output = codelineage(&["analyze", tmp.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken.go"));
}

#[test]
fn callers_lists_transitive_lineage() {
    let tmp = project();
    let output = codelineage(&["callers", "helper", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("helper is reached by 2 callers (max depth 2):"));
    assert!(text.contains("  [1] start (main.go:10)"));
    assert!(text.contains("  [2] main (main.go:5)"));
}

#[test]
fn callers_of_undeclared_name_fails() {
    let tmp = project();
    let output = codelineage(&["callers", "mylib.Run", tmp.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not declared"));
}

#[test]
fn info_counts() {
    let tmp = project();
    let output = codelineage(&["info", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Files: 2\n"));
    assert!(text.contains("Declarations: 5\n"));
    assert!(text.contains("  Methods: 2\n"));
    assert!(text.contains("Call edges: 3\n"));
    assert!(text.contains("Qualified names: 5\n"));
}

#[test]
fn info_counts_repeated_main_once_per_file() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "cmd/a/main.go", "package main\n\nfunc main() {}\n");
    write(tmp.path(), "cmd/b/main.go", "package main\n\nfunc main() {}\n");
    let output = codelineage(&["info", tmp.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Declarations: 2\n"));
    assert!(text.contains("Qualified names: 1\n"));
}
