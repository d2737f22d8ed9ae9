//! The typed abstract syntax tree and its visitor protocol.

mod nodes;
mod visitor;

pub use nodes::*;
pub use visitor::Visitor;
