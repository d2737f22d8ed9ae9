//! Lexing and recursive-descent parsing: turns a [`crate::base::SourceBuffer`]
//! into a typed [`crate::ast::Root`]/[`crate::ast::Module`] tree, resolving
//! `INCLUDE` edges through a [`crate::project::DependencyGraph`] as it goes.

mod grammar;
mod keywords;
mod lexer;
mod parser;
mod stream;
mod token;

pub use parser::FileParser;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
