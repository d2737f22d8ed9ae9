//! Front-end core for a small structured, statically-scoped language in the
//! COSY/SigmaFox family: lexer, multi-file dependency graph, recursive-
//! descent parser, scoped symbol table, and a post-parse semantic pass.
//!
//! Module dependency order, bottom-up:
//!
//! - [`base`] — interning, source buffers/cursors, file ids, locations.
//!   No dependency on anything else in this crate.
//! - [`diagnostics`] — the structured diagnostic record and its taxonomy.
//!   Depends only on `base`.
//! - [`error`] — exceptional, non-diagnostic failures (I/O, cycles).
//! - [`ast`] — the typed tree and its visitor protocol. Depends on `base`
//!   and `symbols` (nodes carry `SymbolId`s, not names).
//! - [`symbols`] — the scoped symbol table.
//! - [`semantic`] — expression typing and the post-parse block validator.
//!   Depends on `ast` and `symbols`.
//! - [`project`] — the dependency graph tying files, buffers, and parsed
//!   units together.
//! - [`parser`] — the lexer, token stream, and grammar; ties every layer
//!   above together behind the [`parser::FileParser`] handle.
//!
//! A typical driver builds a [`project::DependencyGraph`], registers a root
//! file, and drives parsing through [`parser::FileParser`]:
//!
//! ```no_run
//! use sigmafox::parser::FileParser;
//! use sigmafox::project::{DependencyGraph, Settings};
//!
//! let mut graph = DependencyGraph::new(Settings::default());
//! let file = graph.register_root(std::path::Path::new("program.fox"))?;
//! let parser = FileParser::new(file);
//! let ok = parser.parse_as_root(&mut graph);
//! for diagnostic in parser.diagnostics(&graph) {
//!     eprintln!("{diagnostic}");
//! }
//! assert!(ok || !parser.diagnostics(&graph).is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod base;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod project;
pub mod semantic;
pub mod symbols;

pub use diagnostics::{Diagnostic, ErrorCode, Severity};
pub use error::FrontendError;
