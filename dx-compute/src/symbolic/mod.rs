//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`dx_parser::parser::ast::Expr`] nodes produced by [`dx_parser`], with the main
//! difference being that [`SymExpr`] nodes **flatten** out the tree structure, and have no nodes
//! for subtraction, division or negation.
//!
//! A syntax tree is converted with [`SymExpr::bind`], which also checks that only the allowed
//! symbols appear in it.
//!
//! ```
//! use dx_compute::symbolic::expr::SymExpr;
//! use dx_parser::parse;
//!
//! let ast_expr = parse("x + (x + 1)").unwrap();
//! let expr = SymExpr::bind(&ast_expr, &["x"]).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("x"),
//!     SymExpr::number(1),
//! ]));
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`] computes the derivative of an expression with respect to a symbol, by
//! applying the sum, product, power and chain rules structurally.
//!
//! # Simplification
//!
//! The [`simplify()`] function rewrites an expression into a canonical form, combining like terms
//! and factors and folding numbers. It is deterministic and idempotent.
//!
//! ```
//! use dx_compute::symbolic::{expr::SymExpr, simplify};
//! use dx_parser::parse;
//!
//! let expr = SymExpr::bind(&parse("x + x + x").unwrap(), &["x"]).unwrap();
//! assert_eq!(simplify(&expr).to_string(), "3*x");
//! ```
//!
//! For more information, see the [`mod@simplify`] module.

pub mod derivative;
pub mod expr;
pub mod simplify;
pub mod step_collector;

#[cfg(test)]
pub(crate) mod eval;

pub use derivative::{derivative, SymbolicDerivativeError};
pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
