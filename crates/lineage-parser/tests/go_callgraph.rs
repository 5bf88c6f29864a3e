use lineage_core::error::AnalysisError;
use lineage_core::graph::CallGraph;
use lineage_parser::pipeline::analyze_sources;

fn graph_of(files: &[(&str, &str)]) -> CallGraph {
    analyze_sources(
        files
            .iter()
            .map(|(path, src)| ((*path).to_string(), (*src).to_string())),
    )
    .unwrap()
    .graph
}

fn callees<'g>(graph: &'g CallGraph, caller: &str) -> Vec<&'g str> {
    graph
        .callees(caller)
        .unwrap_or_else(|| panic!("{caller} should be a key"))
        .iter()
        .map(String::as_str)
        .collect()
}

#[test]
fn go_simple_call() {
    let graph = graph_of(&[(
        "a.go",
        r"package main

func A() { B() }

func B() {}
",
    )]);
    assert_eq!(graph.len(), 2);
    assert_eq!(callees(&graph, "A"), vec!["B"]);
    assert!(callees(&graph, "B").is_empty());
}

#[test]
fn go_self_recursion() {
    let graph = graph_of(&[("a.go", "package main\n\nfunc A() { A() }\n")]);
    assert_eq!(callees(&graph, "A"), vec!["A"]);
}

#[test]
fn go_method_through_receiver_variable_is_not_captured() {
    let graph = graph_of(&[(
        "t.go",
        r"package main

type T struct{}

func (t T) M() { t.N() }

func (t T) N() {}
",
    )]);
    assert_eq!(graph.len(), 2);
    assert!(callees(&graph, "T.M").is_empty());
    assert!(callees(&graph, "T.N").is_empty());
}

#[test]
fn go_library_calls_produce_no_edges() {
    let graph = graph_of(&[(
        "main.go",
        r#"package main

import (
	"fmt"
	"strings"
)

func main() {
	fmt.Println(strings.ToUpper("x"))
}
"#,
    )]);
    assert!(callees(&graph, "main").is_empty());
    assert!(!graph.contains("fmt.Println"));
}

#[test]
fn go_repeated_calls_collapse_to_first() {
    let graph = graph_of(&[(
        "a.go",
        r"package main

func run() {
	load()
	save()
	load()
}

func load() {}
func save() {}
",
    )]);
    assert_eq!(callees(&graph, "run"), vec!["load", "save"]);
}

#[test]
fn go_calls_resolve_across_files() {
    let graph = graph_of(&[
        ("cmd.go", "package main\n\nfunc main() { serve() }\n"),
        ("server.go", "package main\n\nfunc serve() { listen() }\n\nfunc listen() {}\n"),
    ]);
    assert_eq!(callees(&graph, "main"), vec!["serve"]);
    assert_eq!(callees(&graph, "serve"), vec!["listen"]);
    assert!(callees(&graph, "listen").is_empty());
}

#[test]
fn go_same_caller_in_two_files_merges() {
    let graph = graph_of(&[
        ("a.go", "package main\n\nfunc init() { setupA() }\n\nfunc setupA() {}\n"),
        (
            "b.go",
            "package main\n\nfunc init() { setupB(); setupA() }\n\nfunc setupB() {}\n",
        ),
    ]);
    assert_eq!(graph.len(), 3);
    assert_eq!(callees(&graph, "init"), vec!["setupA", "setupB"]);
}

#[test]
fn go_pointer_and_value_receivers_share_names() {
    let graph = graph_of(&[(
        "store.go",
        r"package main

type Store struct{}

func (s *Store) Put() { Store.Flush(Store{}) }

func (s Store) Flush() {}
",
    )]);
    assert_eq!(callees(&graph, "Store.Put"), vec!["Store.Flush"]);
}

#[test]
fn go_every_declaration_is_a_key() {
    let graph = graph_of(&[(
        "a.go",
        r"package main

type Queue struct{}

func NewQueue() *Queue { return &Queue{} }
func (q *Queue) Push() {}
func (q *Queue) Pop() {}
func unused() {}
",
    )]);
    let keys: Vec<&str> = graph.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["NewQueue", "Queue.Pop", "Queue.Push", "unused"]);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn go_parse_error_aborts_run() {
    let result = analyze_sources([
        ("ok.go".to_string(), "package main\n\nfunc ok() {}\n".to_string()),
        ("bad.go".to_string(), "package main\n\nfunc bad( {\n".to_string()),
    ]);
    match result {
        Err(AnalysisError::Parse { path, .. }) => {
            assert_eq!(path, std::path::PathBuf::from("bad.go"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn go_run_is_idempotent() {
    let files = [
        ("b.go", "package main\n\nfunc b() { a(); c() }\n\nfunc c() {}\n"),
        ("a.go", "package main\n\nfunc a() { b() }\n"),
    ];
    let first = serde_json::to_string(&graph_of(&files)).unwrap();
    let second = serde_json::to_string(&graph_of(&files)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn go_declaration_locations_recorded() {
    let analysis = analyze_sources([(
        "svc/handler.go".to_string(),
        "package svc\n\ntype H struct{}\n\nfunc (h *H) Serve() {}\n".to_string(),
    )])
    .unwrap();
    let decl = analysis.declarations.get("H.Serve").unwrap();
    assert_eq!(decl.file, std::path::PathBuf::from("svc/handler.go"));
    assert_eq!(decl.line, 5);
    assert_eq!(analysis.files.len(), 1);
}
