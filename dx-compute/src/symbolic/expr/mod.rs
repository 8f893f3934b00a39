//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](dx_parser::parser::ast::Expr) type from `dx_parser` mirrors the written form of an
//! expression: it has separate nodes for subtraction, division, negation and parentheses. That is
//! convenient for parsing and for pointing at the source, but not for algebra.
//!
//! [`SymExpr`] flattens the tree into sums of products. `a - b` becomes `a + (-1)*b`, `a / b`
//! becomes `a * b^-1`, `-a` becomes `(-1)*a`, and `x + (y + z)` becomes a single sum of three
//! terms. Numbers are exact [`Rational`]s. Every transformation in this crate (differentiation,
//! substitution, simplification) takes a [`SymExpr`] by reference and builds a new one.
//!
//! # Strict equality
//!
//! Two expressions are **strictly equal** if they have the same shape: the same kind of node, equal
//! values for numbers / symbols / calls, and strictly equal terms or factors **in any order** for
//! sums and products. `x + 1` and `1 + x` are strictly equal, while `2*(x + 1)` and `2*x + 2` are
//! not, even though they are mathematically equal. Strict equality never reports a false positive,
//! which makes it safe for deciding whether two terms can be combined.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement strict equality.

mod bind;
mod fmt;
mod iter;
mod order;

pub use bind::UnknownSymbol;
pub use iter::ExprIter;
pub use order::{canonical_cmp, term_cmp};

use crate::primitive::{as_integer, rational};
use dx_parser::parser::ast::Func;
use rug::{Integer, Rational};
use std::ops::{Add, Mul, Neg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single term or factor that is not itself a sum, product or power.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An exact number.
    Number(Rational),

    /// A named variable.
    Symbol(String),

    /// A call to one of the supported functions.
    Call(Func, Box<SymExpr>),
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a number.
    pub fn number(n: impl Into<Rational>) -> Self {
        Self::Primary(Primary::Number(rational(n)))
    }

    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a call to the given function.
    pub fn call(func: Func, arg: SymExpr) -> Self {
        Self::Primary(Primary::Call(func, Box::new(arg)))
    }

    /// Creates the power `self^exp`.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Creates the reciprocal `self^-1`. No simplification is done.
    pub fn recip(self) -> Self {
        self.pow(Self::number(-1))
    }

    /// Returns the number this expression holds, if it is a number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns the integer this expression holds, if it is an integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number().and_then(as_integer)
    }

    /// Returns the name of the symbol this expression holds, if it is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 0)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|n| *n == 1)
    }

    /// Returns true if the expression is a negative number.
    pub fn is_negative_number(&self) -> bool {
        self.as_number().is_some_and(|n| *n < 0)
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Splits the expression into its numeric coefficient and the remaining factors.
    ///
    /// A number `n` splits into `(n, 1)`, a product splits into the product of its numeric factors
    /// and the product of the others, and anything else splits into `(1, self)`.
    pub fn split_coefficient(&self) -> (Rational, SymExpr) {
        match self {
            Self::Primary(Primary::Number(n)) => (n.clone(), Self::number(1)),
            Self::Mul(factors) => {
                let mut coefficient = rational(1);
                let mut rest = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.as_number() {
                        Some(n) => coefficient *= n,
                        None => rest.push(factor.clone()),
                    }
                }
                (coefficient, Self::Mul(rest).downgrade())
            },
            expr => (rational(1), expr.clone()),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function replaces these with the single
    /// term / factor, or the number `0` / `1`.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::number(0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::number(1),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Replaces every occurrence of the symbol `name` with `replacement`, producing a new
    /// expression. No simplification is done.
    pub fn substitute(&self, name: &str, replacement: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == name => replacement.clone(),
            Self::Primary(Primary::Call(func, arg)) => Self::call(*func, arg.substitute(name, replacement)),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(name, replacement)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(name, replacement)).collect()),
            Self::Exp(base, exp) => base.substitute(name, replacement).pow(exp.substitute(name, replacement)),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Returns true if every element of `lhs` can be paired with a distinct, strictly equal element
/// of `rhs`.
fn same_multiset(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|l| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, r)| !used[i] && l == r);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => same_multiset(lhs, rhs),
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl Eq for SymExpr {}

/// Adds two [`SymExpr`]s together. No simplification is done, except that sums on either side are
/// merged into one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except that products on
/// either side are merged into one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Negates a [`SymExpr`]. Numbers are negated directly; anything else is multiplied by `-1`.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::Primary(Primary::Number(-n)),
            expr => Self::number(-1) * expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn strict_equality_ignores_order() {
        let a = SymExpr::Add(vec![x(), SymExpr::number(1)]);
        let b = SymExpr::Add(vec![SymExpr::number(1), x()]);
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        let a = SymExpr::Mul(vec![x(), x(), SymExpr::number(2)]);
        let b = SymExpr::Mul(vec![x(), SymExpr::number(2), SymExpr::number(2)]);
        assert_ne!(a, b);
    }

    #[test]
    fn operators_flatten() {
        let sum = (x() + SymExpr::number(1)) + (x() + SymExpr::number(2));
        assert!(matches!(&sum, SymExpr::Add(terms) if terms.len() == 4));

        let product = SymExpr::number(2) * (x() * x());
        assert!(matches!(&product, SymExpr::Mul(factors) if factors.len() == 3));
    }

    #[test]
    fn negation() {
        assert_eq!(-SymExpr::number(3), SymExpr::number(-3));
        assert_eq!(-x(), SymExpr::Mul(vec![SymExpr::number(-1), x()]));
    }

    #[test]
    fn split_coefficient() {
        let term = SymExpr::Mul(vec![SymExpr::number(3), x(), SymExpr::number((1, 2))]);
        assert_eq!(term.split_coefficient(), (rational((3, 2)), x()));
        assert_eq!(SymExpr::number(5).split_coefficient(), (rational(5), SymExpr::number(1)));
        assert_eq!(x().split_coefficient(), (rational(1), x()));
    }

    #[test]
    fn substitute_into_calls_and_powers() {
        let expr = SymExpr::call(Func::Cos, SymExpr::symbol("u")).pow(SymExpr::symbol("u"));
        let g = SymExpr::Mul(vec![SymExpr::number(2), x()]);
        assert_eq!(
            expr.substitute("u", &g),
            SymExpr::call(Func::Cos, g.clone()).pow(g),
        );
    }

    #[test]
    fn contains_symbol() {
        let expr = SymExpr::call(Func::Sin, x()) + SymExpr::number(1);
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("u"));
    }
}
