use crate::ast::{MainBlock, Module, Root, Visitor};
use crate::base::{FileId, Interner, Name, SourceBuffer};
use crate::diagnostics::{Diagnostic, ErrorCode, Severity};
use crate::project::{DependencyGraph, ParsedUnit, Settings};
use crate::semantic::{BlockValidator, CallableParams};

use super::stream::TokenStream;
use super::token::{Token, TokenKind};

/// The driver-facing parser handle: just enough to find its file's cached
/// result back in the owning [`DependencyGraph`].
///
/// A stateful parser object can't also own a mutable handle into the graph
/// it recurses through to resolve includes, so it carries only a
/// [`FileId`]; every method takes the graph explicitly, and the actual
/// parse state (tokens, scopes, diagnostics) lives in a private [`Parser`]
/// that exists only for the duration of one `parse_as_root`/
/// `parse_as_module` call.
#[derive(Debug, Clone, Copy)]
pub struct FileParser {
    file: FileId,
}

impl FileParser {
    pub fn new(file: FileId) -> Self {
        Self { file }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// Parse this file as a root unit (includes, globals, and exactly one
    /// `MAIN` block). Returns `true` iff the resulting error count is zero.
    pub fn parse_as_root(&self, graph: &mut DependencyGraph) -> bool {
        if graph.cached_unit(self.file).is_none() {
            let buffer = graph.buffer(self.file).clone();
            let settings = *graph.settings();
            let mut parser = Parser::new(self.file, &buffer, settings);
            graph.begin_parsing(self.file);
            let root = parser.parse_root(graph);
            graph.end_parsing(self.file);
            let token_count = parser.stream.token_count();
            let mut diagnostics = parser.diagnostics;
            if !diagnostics.iter().any(|d| d.severity == Severity::Error) {
                let validator = BlockValidator::new(&mut parser.symbols, &parser.callable_params);
                diagnostics.extend(validator.validate_root(&root));
            }
            tracing::debug!(
                file = %graph.path(self.file).display(),
                tokens = token_count,
                errors = diagnostics.iter().filter(|d| d.severity == Severity::Error).count(),
                "parsed root unit",
            );
            graph.cache_unit(self.file, ParsedUnit::Root(root, diagnostics));
        }
        self.error_count(graph) == 0
    }

    /// Parse this file as a module unit (includes and globals, no `MAIN`).
    pub fn parse_as_module(&self, graph: &mut DependencyGraph) -> bool {
        if graph.cached_unit(self.file).is_none() {
            let buffer = graph.buffer(self.file).clone();
            let settings = *graph.settings();
            let mut parser = Parser::new(self.file, &buffer, settings);
            graph.begin_parsing(self.file);
            let module = parser.parse_module(graph);
            graph.end_parsing(self.file);
            if parser.symbols.depth() != 1 {
                let location = parser.stream.current().location;
                parser.diagnostics.push(Diagnostic::new(
                    location,
                    ErrorCode::IncludeDidNotFullyPopScopes,
                    "module left its scope stack unbalanced",
                    "",
                ));
            }
            let token_count = parser.stream.token_count();
            let mut diagnostics = parser.diagnostics;
            if !diagnostics.iter().any(|d| d.severity == Severity::Error) {
                let validator = BlockValidator::new(&mut parser.symbols, &parser.callable_params);
                diagnostics.extend(validator.validate_module(&module));
            }
            tracing::debug!(
                file = %graph.path(self.file).display(),
                tokens = token_count,
                errors = diagnostics.iter().filter(|d| d.severity == Severity::Error).count(),
                "parsed module unit",
            );
            graph.cache_unit(self.file, ParsedUnit::Module(module, diagnostics));
        }
        self.error_count(graph) == 0
    }

    /// Invoke the visitor protocol over this file's cached AST. A no-op if
    /// this file hasn't been parsed yet.
    pub fn visit<V: Visitor>(&self, graph: &DependencyGraph, visitor: &mut V) {
        match graph.cached_unit(self.file) {
            Some(ParsedUnit::Root(root, _)) => {
                root.accept(visitor);
            }
            Some(ParsedUnit::Module(module, _)) => {
                module.accept(visitor);
            }
            None => {}
        }
    }

    pub fn error_count(&self, graph: &DependencyGraph) -> usize {
        let Some(unit) = graph.cached_unit(self.file) else {
            return 0;
        };
        let warnings_as_errors = graph.settings().warnings_as_errors;
        unit.diagnostics()
            .iter()
            .filter(|d| d.severity == Severity::Error || (warnings_as_errors && d.severity == Severity::Warning))
            .count()
    }

    pub fn diagnostics<'g>(&self, graph: &'g DependencyGraph) -> &'g [Diagnostic] {
        graph
            .cached_unit(self.file)
            .map(ParsedUnit::diagnostics)
            .unwrap_or(&[])
    }
}

/// Internal, single-use parsing state for one `parse_as_root`/
/// `parse_as_module` call: a token cursor plus error accumulation
/// (`bump`/`eat`/`expect`/`synchronize_to`), building a typed [`Root`]/
/// [`Module`] tree directly instead of a lossless concrete syntax tree.
pub(crate) struct Parser {
    pub(crate) file: FileId,
    pub(crate) stream: TokenStream,
    pub(crate) symbols: crate::symbols::SymbolTable,
    pub(crate) interner: Interner,
    pub(crate) settings: Settings,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) callable_params: CallableParams,
}

impl Parser {
    pub(crate) fn new(file: FileId, buffer: &SourceBuffer, settings: Settings) -> Self {
        Self {
            file,
            stream: TokenStream::new(buffer),
            symbols: crate::symbols::SymbolTable::new(),
            interner: Interner::new(),
            settings,
            diagnostics: Vec::new(),
            callable_params: CallableParams::new(),
        }
    }

    fn parse_root(&mut self, graph: &mut DependencyGraph) -> Root {
        let includes = self.parse_includes(graph);
        let globals = self.parse_globals(graph);
        let main = self.parse_main(graph);
        Root {
            includes,
            globals,
            main,
        }
    }

    fn parse_module(&mut self, graph: &mut DependencyGraph) -> Module {
        let includes = self.parse_includes(graph);
        let globals = self.parse_globals(graph);
        Module { includes, globals }
    }

    fn parse_main(&mut self, graph: &mut DependencyGraph) -> MainBlock {
        let location = self.current().location;
        self.expect_kind(TokenKind::Begin, ErrorCode::MissingTerminatorKeyword, "`BEGIN`");
        self.expect_semicolon();
        self.symbols.push();
        let body = self.parse_body_stmts(graph, &[TokenKind::End]);
        self.expect_kind(TokenKind::End, ErrorCode::MissingTerminatorKeyword, "`END`");
        self.expect_semicolon();
        self.symbols.pop();
        MainBlock { body, location }
    }

    // --- token plumbing -----------------------------------------------

    pub(crate) fn current(&self) -> &Token {
        self.stream.current()
    }

    pub(crate) fn peek(&self) -> &Token {
        self.stream.peek()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current().kind)
    }

    pub(crate) fn bump(&mut self) -> Token {
        self.stream.shift()
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Consume `kind` if present; otherwise report `code` at the current
    /// token's location and leave the stream untouched so the caller's
    /// recovery logic decides what to skip.
    pub(crate) fn expect_kind(&mut self, kind: TokenKind, code: ErrorCode, what: &str) -> Option<Token> {
        if let Some(tok) = self.eat(kind) {
            Some(tok)
        } else {
            let current = self.current().clone();
            self.error(code, format!("expected {what}, found {}", current.kind), &current);
            None
        }
    }

    pub(crate) fn expect_semicolon(&mut self) -> Option<Token> {
        self.expect_kind(TokenKind::Semicolon, ErrorCode::MissingSemicolon, "`;`")
    }

    pub(crate) fn expect_identifier(&mut self) -> Option<Token> {
        self.expect_kind(TokenKind::Identifier, ErrorCode::MissingIdentifier, "identifier")
    }

    pub(crate) fn intern_current_identifier(&mut self) -> Option<(Name, Token)> {
        let tok = self.expect_identifier()?;
        let name = self.interner.intern(&tok.lexeme);
        Some((name, tok))
    }

    /// Look up `name` from the current scope outward; if it isn't declared
    /// anywhere, report it and declare it on the spot so the rest of the
    /// parse has a usable `SymbolId` to attach to this reference.
    pub(crate) fn resolve_or_declare(&mut self, name: Name, location: crate::base::Location, lexeme: &str) -> crate::symbols::SymbolId {
        if let Some(id) = self.symbols.lookup_any(&name) {
            return id;
        }
        self.diagnostics.push(Diagnostic::new(
            location,
            ErrorCode::UndeclaredIdentifier,
            format!("`{name}` is not declared"),
            lexeme,
        ));
        let (id, _) = self.symbols.insert_local(name, crate::symbols::SymbolKind::Declared, location);
        id
    }

    /// Compare a call site's argument count against the callee's stored
    /// arity, reporting `ArityMismatch` on a disagreement. The call node is
    /// still built either way — a wrong argument count doesn't stop the
    /// rest of the parse.
    pub(crate) fn check_arity(&mut self, symbol: crate::symbols::SymbolId, call_args: usize, name: &Name, location: crate::base::Location, lexeme: &str) {
        let expected = self.symbols.get(symbol).arity;
        if expected != call_args {
            self.diagnostics.push(Diagnostic::new(
                location,
                ErrorCode::ArityMismatch,
                format!("`{name}` expects {expected} argument(s), found {call_args}"),
                lexeme,
            ));
        }
    }

    pub(crate) fn error(&mut self, code: ErrorCode, message: impl Into<String>, at: &Token) {
        self.diagnostics.push(Diagnostic::new(at.location, code, message, at.lexeme.clone()));
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        let diagnostic = if self.settings.warnings_as_errors && diagnostic.severity == Severity::Warning {
            diagnostic.with_severity(Severity::Error)
        } else {
            diagnostic
        };
        if diagnostic.severity == Severity::Warning {
            tracing::warn!(code = ?diagnostic.code, lexeme = %diagnostic.lexeme, "{}", diagnostic.message);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Panic-mode recovery: discard tokens up to and including the next
    /// occurrence of `terminator` (or EOF).
    pub(crate) fn synchronize_to(&mut self, terminator: TokenKind) {
        while !self.at(TokenKind::Eof) {
            if self.eat(terminator).is_some() {
                return;
            }
            self.bump();
        }
    }
}
