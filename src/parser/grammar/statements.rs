use crate::ast::{
    Block, ElseIfStmt, FunctionDecl, GlobalDecl, IfStmt, IncludeStmt, LoopStmt, ProcedureDecl,
    ReadStmt, Stmt, StructureKind, VariableDecl, WhileStmt, WriteStmt,
};
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::error::FrontendError;
use crate::parser::parser::Parser;
use crate::parser::token::TokenKind;
use crate::project::DependencyGraph;
use crate::semantic::evaluate_type;
use crate::symbols::SymbolKind;

/// Statement-level grammar productions: the body of a `MAIN`/`SCOPE`/
/// `IF`/`WHILE`/`LOOP`/callable, plus top-level includes and global
/// declarations.
impl Parser {
    pub(crate) fn parse_includes(&mut self, graph: &mut DependencyGraph) -> Vec<IncludeStmt> {
        let mut includes = Vec::new();
        while self.at(TokenKind::Include) {
            let location = self.current().location;
            self.bump();
            let path_tok = self.expect_kind(TokenKind::String, ErrorCode::UnexpectedToken, "string literal path");
            self.expect_semicolon();
            let Some(path_tok) = path_tok else {
                continue;
            };
            let written_path = unquote(&path_tok.lexeme);
            match graph.resolve_include(self.file, &written_path) {
                Ok(file_id) => {
                    let canonical_path = graph.path(file_id).to_path_buf();
                    let sub_parser = crate::parser::FileParser::new(file_id);
                    sub_parser.parse_as_module(graph);
                    if sub_parser.error_count(graph) > 0 {
                        let cyclical = sub_parser
                            .diagnostics(graph)
                            .iter()
                            .any(|d| d.code == ErrorCode::CyclicalInclude);
                        if cyclical {
                            self.diagnostics.push(Diagnostic::new(
                                location,
                                ErrorCode::CyclicalInclude,
                                format!("include of `{written_path}` is part of a cyclical dependency"),
                                written_path.clone(),
                            ));
                        } else {
                            self.diagnostics.push(Diagnostic::new(
                                location,
                                ErrorCode::IncludeFailedToParse,
                                format!("included file `{written_path}` failed to parse"),
                                written_path.clone(),
                            ));
                        }
                    }
                    includes.push(IncludeStmt {
                        canonical_path,
                        written_path,
                        module: file_id,
                        location,
                    });
                }
                Err(FrontendError::CyclicalDependency { from, to }) => {
                    tracing::error!(from = %from.display(), to = %to.display(), "rejected cyclical include");
                    self.diagnostics.push(Diagnostic::new(
                        location,
                        ErrorCode::CyclicalInclude,
                        format!("include of `{}` from `{}` would create a cycle", to.display(), from.display()),
                        written_path,
                    ));
                }
                Err(_) => {
                    self.diagnostics.push(Diagnostic::new(
                        location,
                        ErrorCode::IncludeFailedToParse,
                        format!("could not read `{written_path}`"),
                        written_path,
                    ));
                }
            }
        }
        includes
    }

    pub(crate) fn parse_globals(&mut self, graph: &mut DependencyGraph) -> Vec<GlobalDecl> {
        let mut globals = Vec::new();
        loop {
            if self.at(TokenKind::Function) {
                globals.push(GlobalDecl::Function(self.parse_function_decl(graph, true)));
            } else if self.at(TokenKind::Procedure) {
                globals.push(GlobalDecl::Procedure(self.parse_procedure_decl(graph, true)));
            } else {
                break;
            }
        }
        globals
    }

    pub(crate) fn parse_body_stmts(&mut self, graph: &mut DependencyGraph, stop: &[TokenKind]) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.at_any(stop) && !self.at(TokenKind::Eof) {
            if let Some(stmt) = self.parse_body_stmt(graph) {
                stmts.push(stmt);
            }
        }
        stmts
    }

    fn parse_body_stmt(&mut self, graph: &mut DependencyGraph) -> Option<Stmt> {
        match self.current().kind {
            TokenKind::Variable => Some(Stmt::VariableDecl(self.parse_variable_decl())),
            TokenKind::Scope => Some(Stmt::Scope(self.parse_scope_stmt(graph))),
            TokenKind::If => Some(Stmt::If(self.parse_if_stmt(graph))),
            TokenKind::While => Some(Stmt::While(self.parse_while_stmt(graph))),
            TokenKind::Loop => Some(Stmt::Loop(self.parse_loop_stmt(graph))),
            TokenKind::Read => Some(Stmt::Read(self.parse_read_stmt())),
            TokenKind::Write => Some(Stmt::Write(self.parse_write_stmt())),
            TokenKind::Function => Some(Stmt::FunctionDecl(self.parse_function_decl(graph, false))),
            TokenKind::Procedure => Some(Stmt::ProcedureDecl(self.parse_procedure_decl(graph, false))),
            TokenKind::Eof => None,
            _ => {
                let expr = self.parse_expression();
                self.expect_semicolon();
                Some(Stmt::Expression(expr))
            }
        }
    }

    fn parse_variable_decl(&mut self) -> VariableDecl {
        let location = self.current().location;
        self.bump(); // VARIABLE
        let name = self
            .intern_current_identifier()
            .map(|(name, _)| name)
            .unwrap_or_else(|| self.interner.intern("<error>"));

        let storage = if self.at(TokenKind::Assign) || self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_non_assign_expression())
        };

        let mut dimensions = Vec::new();
        while !self.at(TokenKind::Assign) && !self.at(TokenKind::Semicolon) && !self.at(TokenKind::Eof) {
            dimensions.push(self.parse_non_assign_expression());
        }

        let initializer = if self.eat(TokenKind::Assign).is_some() {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect_semicolon();

        let structure = if dimensions.is_empty() {
            StructureKind::Scalar
        } else {
            StructureKind::Array
        };
        let kind = if structure == StructureKind::Array {
            SymbolKind::Array
        } else {
            SymbolKind::Variable
        };
        let (symbol, diag) = self.symbols.insert_local(name.clone(), kind, location);
        if let Some(d) = diag {
            self.push_diagnostic(d);
        }
        let data_type = match &initializer {
            Some(expr) => evaluate_type(expr, &self.symbols),
            None => crate::semantic::DataType::Unknown,
        };
        self.symbols.get_mut(symbol).data_type = data_type;

        VariableDecl {
            name,
            symbol,
            storage,
            dimensions,
            initializer,
            structure,
            data_type,
            location,
        }
    }

    fn parse_scope_stmt(&mut self, graph: &mut DependencyGraph) -> Block {
        let location = self.current().location;
        self.bump(); // SCOPE
        self.expect_semicolon();
        self.symbols.push();
        let body = self.parse_body_stmts(graph, &[TokenKind::EndScope]);
        self.expect_kind(TokenKind::EndScope, ErrorCode::MissingTerminatorKeyword, "`ENDSCOPE`");
        self.expect_semicolon();
        self.symbols.pop();
        Block { body, location }
    }

    fn parse_if_stmt(&mut self, graph: &mut DependencyGraph) -> IfStmt {
        let location = self.current().location;
        self.bump(); // IF
        let condition = self.parse_expression();
        self.expect_semicolon();
        self.symbols.push();
        let body = self.parse_body_stmts(graph, &[TokenKind::ElseIf, TokenKind::EndIf]);
        self.symbols.pop();
        let else_if = if self.at(TokenKind::ElseIf) {
            Some(Box::new(self.parse_else_if(graph)))
        } else {
            None
        };
        if else_if.is_none() {
            self.expect_kind(TokenKind::EndIf, ErrorCode::MissingTerminatorKeyword, "`ENDIF`");
            self.expect_semicolon();
        }
        IfStmt {
            condition,
            body,
            else_if,
            location,
        }
    }

    fn parse_else_if(&mut self, graph: &mut DependencyGraph) -> ElseIfStmt {
        let location = self.current().location;
        self.bump(); // ELSEIF
        let condition = self.parse_expression();
        self.expect_semicolon();
        self.symbols.push();
        let body = self.parse_body_stmts(graph, &[TokenKind::ElseIf, TokenKind::EndIf]);
        self.symbols.pop();
        let else_if = if self.at(TokenKind::ElseIf) {
            Some(Box::new(self.parse_else_if(graph)))
        } else {
            None
        };
        if else_if.is_none() {
            self.expect_kind(TokenKind::EndIf, ErrorCode::MissingTerminatorKeyword, "`ENDIF`");
            self.expect_semicolon();
        }
        ElseIfStmt {
            condition,
            body,
            else_if,
            location,
        }
    }

    fn parse_while_stmt(&mut self, graph: &mut DependencyGraph) -> WhileStmt {
        let location = self.current().location;
        self.bump(); // WHILE
        let condition = self.parse_expression();
        self.expect_semicolon();
        self.symbols.push();
        let body = self.parse_body_stmts(graph, &[TokenKind::EndWhile]);
        self.symbols.pop();
        self.expect_kind(TokenKind::EndWhile, ErrorCode::MissingTerminatorKeyword, "`ENDWHILE`");
        self.expect_semicolon();
        WhileStmt {
            condition,
            body,
            location,
        }
    }

    fn parse_loop_stmt(&mut self, graph: &mut DependencyGraph) -> LoopStmt {
        let location = self.current().location;
        self.bump(); // LOOP
        self.symbols.push();
        let iter_name = self
            .intern_current_identifier()
            .map(|(name, _)| name)
            .unwrap_or_else(|| self.interner.intern("<error>"));
        let (iter_symbol, diag) = self.symbols.insert_local(iter_name.clone(), SymbolKind::Variable, location);
        if let Some(d) = diag {
            self.push_diagnostic(d);
        }
        let initial = self.parse_expression();
        let terminal = self.parse_expression();
        let step = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression())
        };
        self.expect_semicolon();
        let iterator = VariableDecl {
            name: iter_name,
            symbol: iter_symbol,
            storage: None,
            dimensions: Vec::new(),
            initializer: None,
            structure: StructureKind::Scalar,
            data_type: crate::semantic::DataType::Integer,
            location,
        };
        self.symbols.get_mut(iter_symbol).data_type = crate::semantic::DataType::Integer;
        let body = self.parse_body_stmts(graph, &[TokenKind::EndLoop]);
        self.expect_kind(TokenKind::EndLoop, ErrorCode::MissingTerminatorKeyword, "`ENDLOOP`");
        self.expect_semicolon();
        self.symbols.pop();
        LoopStmt {
            iterator,
            initial,
            terminal,
            step,
            body,
            location,
        }
    }

    fn parse_read_stmt(&mut self) -> ReadStmt {
        let location = self.current().location;
        self.bump(); // READ
        let unit = self.parse_expression();
        let target_tok = self.expect_identifier();
        let (target_name, target_symbol) = match target_tok {
            Some(tok) => {
                let name = self.interner.intern(&tok.lexeme);
                let symbol = self.resolve_or_declare(name.clone(), tok.location, &tok.lexeme);
                (name, symbol)
            }
            None => {
                let name = self.interner.intern("<error>");
                let symbol = self.resolve_or_declare(name.clone(), location, "<error>");
                (name, symbol)
            }
        };
        self.expect_semicolon();
        ReadStmt {
            unit,
            target_symbol,
            target_name,
            location,
        }
    }

    fn parse_write_stmt(&mut self) -> WriteStmt {
        let location = self.current().location;
        self.bump(); // WRITE
        let unit = self.parse_expression();
        let mut values = Vec::new();
        if !self.at(TokenKind::Semicolon) {
            values.push(self.parse_expression());
            while self.eat(TokenKind::Comma).is_some() {
                values.push(self.parse_expression());
            }
        }
        self.expect_semicolon();
        WriteStmt { unit, values, location }
    }

    fn parse_param_list(&mut self) -> Vec<VariableDecl> {
        let mut params = Vec::new();
        while self.at(TokenKind::Identifier) {
            let location = self.current().location;
            let (name, _) = self
                .intern_current_identifier()
                .expect("loop guard confirmed an identifier token");
            let (symbol, diag) = self.symbols.insert_local(name.clone(), SymbolKind::Parameter, location);
            if let Some(d) = diag {
                self.push_diagnostic(d);
            }
            params.push(VariableDecl {
                name,
                symbol,
                storage: None,
                dimensions: Vec::new(),
                initializer: None,
                structure: StructureKind::Scalar,
                data_type: crate::semantic::DataType::Unknown,
                location,
            });
        }
        params
    }

    fn parse_function_decl(&mut self, graph: &mut DependencyGraph, is_global: bool) -> FunctionDecl {
        let location = self.current().location;
        self.bump(); // FUNCTION
        let name = self
            .intern_current_identifier()
            .map(|(name, _)| name)
            .unwrap_or_else(|| self.interner.intern("<error>"));
        let (own_symbol, diag) = self.symbols.insert_local(name.clone(), SymbolKind::Function, location);
        if let Some(d) = diag {
            self.push_diagnostic(d);
        }

        self.symbols.push();
        let params = self.parse_param_list();
        self.symbols.get_mut(own_symbol).arity = params.len();
        self.callable_params
            .insert(own_symbol, params.iter().map(|p| p.symbol).collect());

        // A function's return value is assigned through an identifier that
        // shares the function's own name but lives in its own body scope;
        // it starts `Declared` and is promoted to `Variable` wherever the
        // body assigns it (see `parse_identifier_primary`'s assignment-
        // target handling).
        let (return_symbol, _) = self.symbols.insert_local(name.clone(), SymbolKind::Declared, location);

        self.expect_semicolon();
        let body = self.parse_body_stmts(graph, &[TokenKind::EndFunction]);
        self.expect_kind(TokenKind::EndFunction, ErrorCode::MissingTerminatorKeyword, "`ENDFUNCTION`");
        self.expect_semicolon();
        self.symbols.pop();

        let return_slot = VariableDecl {
            name: name.clone(),
            symbol: return_symbol,
            storage: None,
            dimensions: Vec::new(),
            initializer: None,
            structure: StructureKind::Scalar,
            data_type: crate::semantic::DataType::Unknown,
            location,
        };

        FunctionDecl {
            name,
            symbol: own_symbol,
            params,
            body,
            return_slot,
            is_global,
            location,
        }
    }

    fn parse_procedure_decl(&mut self, graph: &mut DependencyGraph, is_global: bool) -> ProcedureDecl {
        let location = self.current().location;
        self.bump(); // PROCEDURE
        let name = self
            .intern_current_identifier()
            .map(|(name, _)| name)
            .unwrap_or_else(|| self.interner.intern("<error>"));
        let (own_symbol, diag) = self.symbols.insert_local(name.clone(), SymbolKind::Procedure, location);
        if let Some(d) = diag {
            self.push_diagnostic(d);
        }

        self.symbols.push();
        let params = self.parse_param_list();
        self.symbols.get_mut(own_symbol).arity = params.len();
        self.callable_params
            .insert(own_symbol, params.iter().map(|p| p.symbol).collect());

        self.expect_semicolon();
        let body = self.parse_body_stmts(graph, &[TokenKind::EndProcedure]);
        self.expect_kind(TokenKind::EndProcedure, ErrorCode::MissingTerminatorKeyword, "`ENDPROCEDURE`");
        self.expect_semicolon();
        self.symbols.pop();

        ProcedureDecl {
            name,
            symbol: own_symbol,
            params,
            body,
            is_global,
            location,
        }
    }
}

fn unquote(lexeme: &str) -> String {
    if lexeme.len() >= 2 {
        lexeme[1..lexeme.len() - 1].to_string()
    } else {
        lexeme.to_string()
    }
}
