use super::nodes::*;

/// One callback per AST node variant. A visitor implementation decides for
/// itself whether and how to recurse — `accept` never descends
/// automatically. A tagged sum with a match over variants at the visitor
/// boundary, in place of virtual-dispatch double dispatch.
pub trait Visitor {
    type Output;

    fn visit_root(&mut self, node: &Root) -> Self::Output;
    fn visit_module(&mut self, node: &Module) -> Self::Output;
    fn visit_main(&mut self, node: &MainBlock) -> Self::Output;
    fn visit_include(&mut self, node: &IncludeStmt) -> Self::Output;
    fn visit_function_decl(&mut self, node: &FunctionDecl) -> Self::Output;
    fn visit_procedure_decl(&mut self, node: &ProcedureDecl) -> Self::Output;
    fn visit_variable_decl(&mut self, node: &VariableDecl) -> Self::Output;
    fn visit_scope(&mut self, node: &Block) -> Self::Output;
    fn visit_if(&mut self, node: &IfStmt) -> Self::Output;
    fn visit_else_if(&mut self, node: &ElseIfStmt) -> Self::Output;
    fn visit_while(&mut self, node: &WhileStmt) -> Self::Output;
    fn visit_loop(&mut self, node: &LoopStmt) -> Self::Output;
    fn visit_read(&mut self, node: &ReadStmt) -> Self::Output;
    fn visit_write(&mut self, node: &WriteStmt) -> Self::Output;
    fn visit_expression_stmt(&mut self, node: &Expr) -> Self::Output;

    fn visit_literal(&mut self, node: &LiteralExpr) -> Self::Output;
    fn visit_identifier(&mut self, node: &IdentifierExpr) -> Self::Output;
    fn visit_unary(&mut self, node: &UnaryExpr) -> Self::Output;
    fn visit_binary(&mut self, node: &BinaryExpr) -> Self::Output;
    fn visit_assign(&mut self, node: &AssignExpr) -> Self::Output;
    fn visit_function_call(&mut self, node: &CallExpr) -> Self::Output;
    fn visit_procedure_call(&mut self, node: &CallExpr) -> Self::Output;
    fn visit_array_index(&mut self, node: &IndexExpr) -> Self::Output;
    fn visit_grouping(&mut self, node: &GroupingExpr) -> Self::Output;
}

impl Root {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_root(self)
    }
}

impl Module {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_module(self)
    }
}

impl MainBlock {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_main(self)
    }
}

impl IncludeStmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_include(self)
    }
}

impl GlobalDecl {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            GlobalDecl::Function(n) => visitor.visit_function_decl(n),
            GlobalDecl::Procedure(n) => visitor.visit_procedure_decl(n),
        }
    }
}

impl Stmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::VariableDecl(n) => visitor.visit_variable_decl(n),
            Stmt::Scope(n) => visitor.visit_scope(n),
            Stmt::If(n) => visitor.visit_if(n),
            Stmt::While(n) => visitor.visit_while(n),
            Stmt::Loop(n) => visitor.visit_loop(n),
            Stmt::Read(n) => visitor.visit_read(n),
            Stmt::Write(n) => visitor.visit_write(n),
            Stmt::FunctionDecl(n) => visitor.visit_function_decl(n),
            Stmt::ProcedureDecl(n) => visitor.visit_procedure_decl(n),
            Stmt::Expression(n) => visitor.visit_expression_stmt(n),
        }
    }
}

impl ElseIfStmt {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_else_if(self)
    }
}

impl Expr {
    pub fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal(n) => visitor.visit_literal(n),
            Expr::Identifier(n) => visitor.visit_identifier(n),
            Expr::Unary(n) => visitor.visit_unary(n),
            Expr::Binary(n) => visitor.visit_binary(n),
            Expr::Assign(n) => visitor.visit_assign(n),
            Expr::FunctionCall(n) => visitor.visit_function_call(n),
            Expr::ProcedureCall(n) => visitor.visit_procedure_call(n),
            Expr::ArrayIndex(n) => visitor.visit_array_index(n),
            Expr::Grouping(n) => visitor.visit_grouping(n),
        }
    }
}
