use std::collections::HashMap;

use crate::ast::{
    AssignExpr, BinaryExpr, Block, CallExpr, ElseIfStmt, Expr, FunctionDecl, GroupingExpr,
    IdentifierExpr, IfStmt, IncludeStmt, IndexExpr, LiteralExpr, LoopStmt, MainBlock, Module,
    ProcedureDecl, ReadStmt, Root, Stmt, UnaryExpr, Visitor, WhileStmt, WriteStmt,
};
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::symbols::{SymbolId, SymbolKind, SymbolTable};

use super::evaluator::evaluate_type;
use super::types::DataType;

/// Maps a function/procedure's own `SymbolId` to its parameters'
/// `SymbolId`s in declaration order, so call sites can refine parameter
/// types without borrowing the callee's declaration alongside the call
/// expression. Built by the parser as it registers each declaration.
pub type CallableParams = HashMap<SymbolId, Vec<SymbolId>>;

/// Finalizes declaration kinds and surfaces type-mismatch diagnostics after
/// a successful parse.
///
/// Implements [`Visitor`] to get "one callback per node variant" for free,
/// but only the statement-shaped callbacks do real work: expression typing
/// is a distinct bottom-up fold ([`evaluate_type`]), not a tree walk, so
/// the expression-node callbacks are trivial stubs. Recursion into
/// children is explicit in each statement callback, per the no-automatic-
/// descent contract.
pub struct BlockValidator<'a> {
    symbols: &'a mut SymbolTable,
    callable_params: &'a CallableParams,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> BlockValidator<'a> {
    pub fn new(symbols: &'a mut SymbolTable, callable_params: &'a CallableParams) -> Self {
        Self {
            symbols,
            callable_params,
            diagnostics: Vec::new(),
        }
    }

    pub fn validate_root(mut self, root: &Root) -> Vec<Diagnostic> {
        root.accept(&mut self);
        self.diagnostics
    }

    pub fn validate_module(mut self, module: &Module) -> Vec<Diagnostic> {
        module.accept(&mut self);
        self.diagnostics
    }

    fn check_initializer(&mut self, decl: &crate::ast::VariableDecl) {
        if let Some(init) = &decl.initializer {
            let ty = evaluate_type(init, self.symbols);
            if ty == DataType::Error {
                self.diagnostics.push(Diagnostic::new(
                    decl.location,
                    ErrorCode::TypeMismatch,
                    format!(
                        "initializer for `{}` does not produce a consistent type",
                        decl.name
                    ),
                    decl.name.as_str(),
                ));
            }
        }
    }

    /// Refine a callee's parameter types from the types of the arguments at
    /// one call site: an unrefined (`Unknown`) parameter takes on the
    /// argument's resolved type.
    fn refine_call_site(&mut self, call: &CallExpr) {
        let Some(param_ids) = self.callable_params.get(&call.symbol).cloned() else {
            return;
        };
        for (param_id, arg) in param_ids.iter().zip(call.args.iter()) {
            let arg_ty = evaluate_type(arg, self.symbols);
            let symbol = self.symbols.get_mut(*param_id);
            if symbol.data_type == DataType::Unknown {
                symbol.data_type = arg_ty;
            }
        }
    }

    fn walk_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            stmt.accept(self);
        }
    }

    fn refine_calls_in_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.refine_calls_in_expr(expr),
            Stmt::VariableDecl(decl) => {
                if let Some(init) = &decl.initializer {
                    self.refine_calls_in_expr(init);
                }
            }
            Stmt::Write(write) => {
                self.refine_calls_in_expr(&write.unit);
                for value in &write.values {
                    self.refine_calls_in_expr(value);
                }
            }
            Stmt::Read(read) => self.refine_calls_in_expr(&read.unit),
            Stmt::If(if_stmt) => self.refine_calls_in_if(if_stmt),
            Stmt::While(w) => {
                self.refine_calls_in_expr(&w.condition);
                for s in &w.body {
                    self.refine_calls_in_stmt(s);
                }
            }
            Stmt::Loop(l) => {
                self.refine_calls_in_expr(&l.initial);
                self.refine_calls_in_expr(&l.terminal);
                if let Some(step) = &l.step {
                    self.refine_calls_in_expr(step);
                }
                for s in &l.body {
                    self.refine_calls_in_stmt(s);
                }
            }
            Stmt::Scope(b) => {
                for s in &b.body {
                    self.refine_calls_in_stmt(s);
                }
            }
            Stmt::FunctionDecl(_) | Stmt::ProcedureDecl(_) => {}
        }
    }

    fn refine_calls_in_if(&mut self, if_stmt: &IfStmt) {
        self.refine_calls_in_expr(&if_stmt.condition);
        for s in &if_stmt.body {
            self.refine_calls_in_stmt(s);
        }
        let mut next = if_stmt.else_if.as_deref();
        while let Some(else_if) = next {
            self.refine_calls_in_expr(&else_if.condition);
            for s in &else_if.body {
                self.refine_calls_in_stmt(s);
            }
            next = else_if.else_if.as_deref();
        }
    }

    fn refine_calls_in_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::FunctionCall(call) | Expr::ProcedureCall(call) => {
                self.refine_call_site(call);
                for arg in &call.args {
                    self.refine_calls_in_expr(arg);
                }
            }
            Expr::ArrayIndex(index) => {
                for idx in &index.indices {
                    self.refine_calls_in_expr(idx);
                }
            }
            Expr::Binary(b) => {
                self.refine_calls_in_expr(&b.left);
                self.refine_calls_in_expr(&b.right);
            }
            Expr::Unary(u) => self.refine_calls_in_expr(&u.operand),
            Expr::Assign(a) => {
                self.refine_calls_in_expr(&a.target);
                self.refine_calls_in_expr(&a.value);
            }
            Expr::Grouping(g) => self.refine_calls_in_expr(&g.inner),
            Expr::Literal(_) | Expr::Identifier(_) => {}
        }
    }
}

impl<'a> Visitor for BlockValidator<'a> {
    type Output = ();

    fn visit_root(&mut self, node: &Root) -> Self::Output {
        for global in &node.globals {
            global.accept(self);
        }
        node.main.accept(self);
    }

    fn visit_module(&mut self, node: &Module) -> Self::Output {
        for global in &node.globals {
            global.accept(self);
        }
    }

    fn visit_main(&mut self, node: &MainBlock) -> Self::Output {
        self.walk_stmts(&node.body);
        for stmt in &node.body {
            self.refine_calls_in_stmt(stmt);
        }
    }

    fn visit_include(&mut self, _node: &IncludeStmt) -> Self::Output {}

    fn visit_function_decl(&mut self, node: &FunctionDecl) -> Self::Output {
        self.walk_stmts(&node.body);
        let return_symbol = self.symbols.get(node.return_slot.symbol);
        if return_symbol.kind != SymbolKind::Variable {
            self.diagnostics.push(Diagnostic::new(
                node.location,
                ErrorCode::NoReturnValue,
                format!("function `{}` never assigns its return value", node.name),
                node.name.as_str(),
            ));
        }
        for stmt in &node.body {
            self.refine_calls_in_stmt(stmt);
        }
    }

    fn visit_procedure_decl(&mut self, node: &ProcedureDecl) -> Self::Output {
        self.walk_stmts(&node.body);
        for stmt in &node.body {
            self.refine_calls_in_stmt(stmt);
        }
    }

    fn visit_variable_decl(&mut self, node: &crate::ast::VariableDecl) -> Self::Output {
        self.check_initializer(node);
    }

    fn visit_scope(&mut self, node: &Block) -> Self::Output {
        self.walk_stmts(&node.body);
    }

    fn visit_if(&mut self, node: &IfStmt) -> Self::Output {
        self.walk_stmts(&node.body);
        if let Some(else_if) = &node.else_if {
            else_if.accept(self);
        }
    }

    fn visit_else_if(&mut self, node: &ElseIfStmt) -> Self::Output {
        self.walk_stmts(&node.body);
        if let Some(else_if) = &node.else_if {
            else_if.accept(self);
        }
    }

    fn visit_while(&mut self, node: &WhileStmt) -> Self::Output {
        self.walk_stmts(&node.body);
    }

    fn visit_loop(&mut self, node: &LoopStmt) -> Self::Output {
        self.walk_stmts(&node.body);
    }

    fn visit_read(&mut self, _node: &ReadStmt) -> Self::Output {}

    fn visit_write(&mut self, _node: &WriteStmt) -> Self::Output {}

    fn visit_expression_stmt(&mut self, _node: &Expr) -> Self::Output {}

    fn visit_literal(&mut self, _node: &LiteralExpr) -> Self::Output {}
    fn visit_identifier(&mut self, _node: &IdentifierExpr) -> Self::Output {}
    fn visit_unary(&mut self, _node: &UnaryExpr) -> Self::Output {}
    fn visit_binary(&mut self, _node: &BinaryExpr) -> Self::Output {}
    fn visit_assign(&mut self, _node: &AssignExpr) -> Self::Output {}
    fn visit_function_call(&mut self, _node: &CallExpr) -> Self::Output {}
    fn visit_procedure_call(&mut self, _node: &CallExpr) -> Self::Output {}
    fn visit_array_index(&mut self, _node: &IndexExpr) -> Self::Output {}
    fn visit_grouping(&mut self, _node: &GroupingExpr) -> Self::Output {}
}
