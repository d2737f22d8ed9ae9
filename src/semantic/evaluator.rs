use crate::ast::{BinaryOp, Expr};
use crate::symbols::SymbolTable;

use super::types::DataType;

/// A bottom-up fold computing an expression's resolved [`DataType`]. Not
/// implemented as a [`crate::ast::Visitor`] impl: the fold
/// needs a single `DataType` return value per node and read access to the
/// symbol table, which a `Visitor::Output` of `DataType` plus a `&self`
/// field for the table would express just as well, but a plain recursive
/// function is the more direct translation of "simple bottom-up fold" and
/// avoids forcing every other consumer of the tree through a type
/// parameterized only for this one pass.
pub fn evaluate_type(expr: &Expr, symbols: &SymbolTable) -> DataType {
    match expr {
        Expr::Literal(lit) => match lit.kind {
            crate::ast::Literal::Integer => DataType::Integer,
            crate::ast::Literal::Real => DataType::Real,
            crate::ast::Literal::Complex => DataType::Complex,
            crate::ast::Literal::Str => DataType::String,
        },
        Expr::Identifier(id) => symbols.get(id.symbol).data_type,
        Expr::Unary(unary) => evaluate_type(&unary.operand, symbols).negate(),
        Expr::Binary(binary) => {
            let left = evaluate_type(&binary.left, symbols);
            let right = evaluate_type(&binary.right, symbols);
            match binary.op {
                BinaryOp::Equal | BinaryOp::NotEqual => DataType::Integer,
                BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                    DataType::Integer
                }
                BinaryOp::Concat => left.concat(right),
                BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::Power
                | BinaryOp::Extraction
                | BinaryOp::Derivation => left.widen(right),
            }
        }
        Expr::Assign(assign) => evaluate_type(&assign.value, symbols),
        Expr::FunctionCall(call) => symbols.get(call.symbol).data_type,
        Expr::ProcedureCall(_) => DataType::Void,
        Expr::ArrayIndex(index) => symbols.get(index.symbol).data_type,
        Expr::Grouping(group) => evaluate_type(&group.inner, symbols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryExpr, Literal, LiteralExpr};
    use crate::base::{FileId, Location};

    fn loc() -> Location {
        Location::new(FileId::new(0), 1, 1)
    }

    fn lit(kind: Literal) -> Expr {
        Expr::Literal(LiteralExpr {
            kind,
            lexeme: "x".into(),
            location: loc(),
        })
    }

    #[test]
    fn term_widens_integer_and_real_to_real() {
        let table = SymbolTable::new();
        let expr = Expr::Binary(BinaryExpr {
            op: BinaryOp::Add,
            left: Box::new(lit(Literal::Integer)),
            right: Box::new(lit(Literal::Real)),
            location: loc(),
        });
        assert_eq!(evaluate_type(&expr, &table), DataType::Real);
    }

    #[test]
    fn adding_integer_and_string_is_error() {
        let table = SymbolTable::new();
        let expr = Expr::Binary(BinaryExpr {
            op: BinaryOp::Add,
            left: Box::new(lit(Literal::Integer)),
            right: Box::new(lit(Literal::Str)),
            location: loc(),
        });
        assert_eq!(evaluate_type(&expr, &table), DataType::Error);
    }

    #[test]
    fn equality_is_always_integer() {
        let table = SymbolTable::new();
        let expr = Expr::Binary(BinaryExpr {
            op: BinaryOp::Equal,
            left: Box::new(lit(Literal::Str)),
            right: Box::new(lit(Literal::Str)),
            location: loc(),
        });
        assert_eq!(evaluate_type(&expr, &table), DataType::Integer);
    }
}
