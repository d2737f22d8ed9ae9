//! End-to-end scenarios driven through `FileParser` against real temp files,
//! exercising the full pipeline: lex -> parse -> symbol table -> block
//! validation.

use sigmafox::ast::{Expr, GlobalDecl, Stmt};
use sigmafox::diagnostics::ErrorCode;
use sigmafox::parser::FileParser;
use sigmafox::project::{DependencyGraph, ParsedUnit, Settings};
use tempfile::tempdir;

fn write(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

fn parse_root(dir: &std::path::Path, name: &str, contents: &str) -> (DependencyGraph, FileParser) {
    let path = write(dir, name, contents);
    let mut graph = DependencyGraph::new(Settings::default());
    let file = graph.register_root(&path).expect("register root file");
    let parser = FileParser::new(file);
    parser.parse_as_root(&mut graph);
    (graph, parser)
}

#[test]
fn declares_and_initializes_a_scalar_variable() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "BEGIN;
  VARIABLE x 4 := 1 + 2;
END;",
    );

    assert!(parser.diagnostics(&graph).is_empty(), "{:?}", parser.diagnostics(&graph));

    let Some(ParsedUnit::Root(root, _)) = graph.cached_unit(parser.file()) else {
        panic!("expected a cached Root unit");
    };
    assert_eq!(root.main.body.len(), 1);
    let Stmt::VariableDecl(decl) = &root.main.body[0] else {
        panic!("expected a variable declaration");
    };
    assert!(decl.storage.is_some());
    assert!(decl.initializer.is_some());
}

#[test]
fn calling_a_global_function_resolves_its_return_type() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "FUNCTION square n;
  square := n * n;
ENDFUNCTION;
BEGIN;
  VARIABLE result := square(5);
END;",
    );

    assert!(parser.diagnostics(&graph).is_empty(), "{:?}", parser.diagnostics(&graph));

    let Some(ParsedUnit::Root(root, _)) = graph.cached_unit(parser.file()) else {
        panic!("expected a cached Root unit");
    };
    assert_eq!(root.globals.len(), 1);
    assert!(matches!(&root.globals[0], GlobalDecl::Function(f) if f.name.as_str() == "square"));
    let Stmt::VariableDecl(decl) = &root.main.body[0] else {
        panic!("expected a variable declaration");
    };
    assert!(matches!(decl.initializer, Some(Expr::FunctionCall(_))));
}

#[test]
fn reassigning_a_variable_to_the_same_value_is_idempotent() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "BEGIN;
  VARIABLE z := 1;
  z := 2;
  z := 2;
END;",
    );

    assert!(parser.diagnostics(&graph).is_empty(), "{:?}", parser.diagnostics(&graph));
}

#[test]
fn cyclical_includes_are_reported_and_do_not_hang() {
    let dir = tempdir().unwrap();
    write(dir.path(), "b.fox", "INCLUDE \"a.fox\";\n");
    let (graph, parser) = parse_root(
        dir.path(),
        "a.fox",
        "INCLUDE \"b.fox\";
BEGIN;
END;",
    );

    let codes: Vec<_> = parser.diagnostics(&graph).iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::CyclicalInclude), "{codes:?}");
}

#[test]
fn diamond_includes_share_one_cached_module() {
    let dir = tempdir().unwrap();
    write(dir.path(), "leaf.fox", "VARIABLE shared := 1;\n");
    write(dir.path(), "left.fox", "INCLUDE \"leaf.fox\";\n");
    write(dir.path(), "right.fox", "INCLUDE \"leaf.fox\";\n");
    let (graph, parser) = parse_root(
        dir.path(),
        "root.fox",
        "INCLUDE \"left.fox\";
INCLUDE \"right.fox\";
BEGIN;
END;",
    );

    assert!(parser.diagnostics(&graph).is_empty(), "{:?}", parser.diagnostics(&graph));
    let Some(ParsedUnit::Root(root, _)) = graph.cached_unit(parser.file()) else {
        panic!("expected a cached Root unit");
    };
    assert_eq!(root.includes[0].module, root.includes[1].module);
    let left_module = root.includes[0].module;
    let _ = FileParser::new(left_module);
}

#[test]
fn sibling_if_and_elseif_scopes_may_each_declare_the_same_name() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "BEGIN;
  IF 1 = 1;
    VARIABLE q := 1;
  ELSEIF 1 = 2;
    VARIABLE q := 2;
  ENDIF;
END;",
    );

    let codes: Vec<_> = parser.diagnostics(&graph).iter().map(|d| d.code).collect();
    assert!(
        !codes.contains(&ErrorCode::RedeclarationInSameScope),
        "sibling scopes should not collide: {codes:?}"
    );
}

#[test]
fn adding_an_integer_and_a_string_is_a_type_mismatch() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "BEGIN;
  VARIABLE a 4 := 1 + \"hi\";
END;",
    );

    let codes: Vec<_> = parser.diagnostics(&graph).iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::TypeMismatch), "{codes:?}");
}

#[test]
fn a_function_that_never_assigns_its_return_value_is_flagged() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "FUNCTION broken n;
  VARIABLE unused := n;
ENDFUNCTION;
BEGIN;
END;",
    );

    let codes: Vec<_> = parser.diagnostics(&graph).iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::NoReturnValue), "{codes:?}");
}

#[test]
fn using_an_undeclared_identifier_is_reported_but_still_produces_a_tree() {
    let dir = tempdir().unwrap();
    let (graph, parser) = parse_root(
        &dir,
        "program.fox",
        "BEGIN;
  VARIABLE x := missing + 1;
END;",
    );

    let codes: Vec<_> = parser.diagnostics(&graph).iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::UndeclaredIdentifier), "{codes:?}");
    assert!(graph.cached_unit(parser.file()).is_some());
}
