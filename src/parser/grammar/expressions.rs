use crate::ast::{
    AssignExpr, BinaryExpr, BinaryOp, CallExpr, Expr, GroupingExpr, IdentifierExpr, IndexExpr,
    Literal, LiteralExpr, UnaryExpr, UnaryOp,
};
use crate::diagnostics::ErrorCode;
use crate::parser::parser::Parser;
use crate::parser::token::{Token, TokenKind};
use crate::symbols::SymbolKind;

/// The expression grammar's precedence chain, tightest-binding last:
/// assignment, equality, comparison, concatenation, term, factor,
/// magnitude (power), extraction, derivation, unary, primary.
impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_assignment()
    }

    /// An expression that stops below assignment, for positions where `:=`
    /// is not itself part of the expression but a separate piece of
    /// surrounding grammar (`VARIABLE`'s storage/dimension expressions sit
    /// directly before an optional `:= initializer`, so parsing them with
    /// `parse_expression` would swallow that `:=` as an assignment
    /// operator instead of leaving it for the caller).
    pub(crate) fn parse_non_assign_expression(&mut self) -> Expr {
        self.parse_equality()
    }

    fn parse_assignment(&mut self) -> Expr {
        let left = self.parse_equality();
        if self.at(TokenKind::Assign) {
            let location = self.current().location;
            self.bump();
            let value = self.parse_assignment();
            if !matches!(left, Expr::Identifier(_) | Expr::ArrayIndex(_)) {
                self.error(
                    ErrorCode::UnexpectedToken,
                    "assignment target must be a variable or array element",
                    &Token::new(TokenKind::Assign, ":=", location),
                );
            }
            if let Expr::Identifier(ref id) = left {
                // Assigning through an identifier that is currently the
                // function's `Declared` return slot promotes it to a real
                // variable.
                let symbol = self.symbols.get_mut(id.symbol);
                if symbol.kind == SymbolKind::Declared {
                    symbol.kind = SymbolKind::Variable;
                }
            }
            return Expr::Assign(AssignExpr {
                target: Box::new(left),
                value: Box::new(value),
                location,
            });
        }
        left
    }

    fn parse_equality(&mut self) -> Expr {
        let mut left = self.parse_comparison();
        loop {
            let op = match self.current().kind {
                TokenKind::Equal => BinaryOp::Equal,
                TokenKind::Hash => BinaryOp::NotEqual,
                _ => break,
            };
            let location = self.current().location;
            self.bump();
            let right = self.parse_comparison();
            left = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_comparison(&mut self) -> Expr {
        let mut left = self.parse_concatenation();
        loop {
            let op = match self.current().kind {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                _ => break,
            };
            let location = self.current().location;
            self.bump();
            let right = self.parse_concatenation();
            left = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_concatenation(&mut self) -> Expr {
        let mut left = self.parse_term();
        while self.at(TokenKind::Amp) {
            let location = self.current().location;
            self.bump();
            let right = self.parse_term();
            left = Expr::Binary(BinaryExpr {
                op: BinaryOp::Concat,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_term(&mut self) -> Expr {
        let mut left = self.parse_factor();
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let location = self.current().location;
            self.bump();
            let right = self.parse_factor();
            left = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_factor(&mut self) -> Expr {
        let mut left = self.parse_magnitude();
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            let location = self.current().location;
            self.bump();
            let right = self.parse_magnitude();
            left = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    /// `^` (power). Left-associative: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
    fn parse_magnitude(&mut self) -> Expr {
        let mut left = self.parse_extraction();
        while self.at(TokenKind::Caret) {
            let location = self.current().location;
            self.bump();
            let right = self.parse_extraction();
            left = Expr::Binary(BinaryExpr {
                op: BinaryOp::Power,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_extraction(&mut self) -> Expr {
        let mut left = self.parse_derivation();
        while self.at(TokenKind::Pipe) {
            let location = self.current().location;
            self.bump();
            let right = self.parse_derivation();
            left = Expr::Binary(BinaryExpr {
                op: BinaryOp::Extraction,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_derivation(&mut self) -> Expr {
        let mut left = self.parse_unary();
        while self.at(TokenKind::Percent) {
            let location = self.current().location;
            self.bump();
            let right = self.parse_unary();
            left = Expr::Binary(BinaryExpr {
                op: BinaryOp::Derivation,
                left: Box::new(left),
                right: Box::new(right),
                location,
            });
        }
        left
    }

    fn parse_unary(&mut self) -> Expr {
        if self.at(TokenKind::Minus) {
            let location = self.current().location;
            self.bump();
            let operand = self.parse_unary();
            return Expr::Unary(UnaryExpr {
                op: UnaryOp::Negate,
                operand: Box::new(operand),
                location,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Expr {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Integer => {
                self.bump();
                Expr::Literal(LiteralExpr {
                    kind: Literal::Integer,
                    lexeme: tok.lexeme,
                    location: tok.location,
                })
            }
            TokenKind::Real => {
                self.bump();
                Expr::Literal(LiteralExpr {
                    kind: Literal::Real,
                    lexeme: tok.lexeme,
                    location: tok.location,
                })
            }
            TokenKind::Complex => {
                self.bump();
                Expr::Literal(LiteralExpr {
                    kind: Literal::Complex,
                    lexeme: tok.lexeme,
                    location: tok.location,
                })
            }
            TokenKind::String => {
                self.bump();
                Expr::Literal(LiteralExpr {
                    kind: Literal::Str,
                    lexeme: tok.lexeme,
                    location: tok.location,
                })
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression();
                self.expect_kind(TokenKind::RParen, ErrorCode::MissingRParen, "`)`");
                Expr::Grouping(GroupingExpr {
                    inner: Box::new(inner),
                    location: tok.location,
                })
            }
            TokenKind::Identifier => self.parse_identifier_primary(),
            _ => {
                self.error(
                    ErrorCode::UnexpectedToken,
                    format!("expected an expression, found {}", tok.kind),
                    &tok,
                );
                if !self.at(TokenKind::Eof) {
                    self.bump();
                }
                Expr::Literal(LiteralExpr {
                    kind: Literal::Integer,
                    lexeme: String::new(),
                    location: tok.location,
                })
            }
        }
    }

    fn parse_identifier_primary(&mut self) -> Expr {
        let tok = self.bump();
        let name = self.interner.intern(&tok.lexeme);
        let symbol = self.resolve_or_declare(name.clone(), tok.location, &tok.lexeme);
        let kind = self.symbols.get(symbol).kind;

        if self.at(TokenKind::LParen) {
            let args = self.parse_arg_list();
            return match kind {
                SymbolKind::Procedure => {
                    self.check_arity(symbol, args.len(), &name, tok.location, &tok.lexeme);
                    Expr::ProcedureCall(CallExpr {
                        symbol,
                        name,
                        args,
                        location: tok.location,
                    })
                }
                SymbolKind::Function => {
                    self.check_arity(symbol, args.len(), &name, tok.location, &tok.lexeme);
                    Expr::FunctionCall(CallExpr {
                        symbol,
                        name,
                        args,
                        location: tok.location,
                    })
                }
                SymbolKind::Array => Expr::ArrayIndex(IndexExpr {
                    symbol,
                    name,
                    indices: args,
                    location: tok.location,
                }),
                SymbolKind::Variable | SymbolKind::Parameter | SymbolKind::Declared => {
                    self.error(
                        ErrorCode::WrongKind,
                        format!("`{}` is not a procedure, function, or array", tok.lexeme),
                        &tok,
                    );
                    Expr::FunctionCall(CallExpr {
                        symbol,
                        name,
                        args,
                        location: tok.location,
                    })
                }
            };
        }

        Expr::Identifier(IdentifierExpr {
            symbol,
            name,
            location: tok.location,
        })
    }

    fn parse_arg_list(&mut self) -> Vec<Expr> {
        self.bump(); // LParen
        let mut args = Vec::new();
        if !self.at(TokenKind::RParen) {
            args.push(self.parse_expression());
            while self.eat(TokenKind::Comma).is_some() {
                args.push(self.parse_expression());
            }
        }
        self.expect_kind(TokenKind::RParen, ErrorCode::MissingRParen, "`)`");
        args
    }
}
