//! Arithmetic formula lexer, parser, and AST — the formula-parsing
//! collaborator consumed by `sheet-engine`'s `Cell`.
//!
//! Supports infix `+ - * /` with standard precedence and left-associativity,
//! unary `+ -`, parentheses, decimal numeric literals, and A1-style cell
//! references. Nothing else: no functions, ranges, strings or comparison
//! operators — this crate knows nothing about sheets, grids or cells.

mod ast;
mod error;
mod lexer;
mod parser;
mod position;
mod token;

pub use ast::{Ast, BinaryOp, Expr};
pub use error::{FormulaError, ParseError};
pub use parser::parse_formula;
pub use position::{Position, Size, MAX_COLS, MAX_ROWS};
