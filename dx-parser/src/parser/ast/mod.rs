//! The abstract syntax tree produced by the parser. Every node records the region of the source
//! it was parsed from, so later stages can point errors back at the input.

pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::{Call, Func};
pub use expr::Expr;
pub use literal::{Literal, LitNum, LitSym};
pub use paren::Paren;
pub use unary::Unary;
