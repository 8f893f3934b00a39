//! Tokenizer and parser for the expressions accepted by the differentiation engine.
//!
//! The grammar is small: numbers, names, calls to a fixed set of unary functions, the binary
//! operators `+`, `-`, `*`, `/` and `^` (also written `**`), unary negation, and parentheses.
//! Multiplication is always explicit.
//!
//! ```
//! use dx_parser::{parse, parser::ast::Expr};
//!
//! let expr = parse("sin(2*x)^2").unwrap();
//! assert!(matches!(expr, Expr::Binary(_)));
//! assert!(parse("2x").is_err());
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::parse;
