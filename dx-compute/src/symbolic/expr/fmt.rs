//! Canonical rendering of [`SymExpr`]s.
//!
//! Powers are written `a**b` and factors are joined with `*` without spaces. Terms are joined with
//! ` + ` or ` - `, with negative coefficients written as subtraction. Fractional coefficients and
//! negative exponents are collected into a single `numerator/denominator` fraction. Parentheses
//! are added only where precedence requires them.

use crate::primitive::as_integer;
use rug::Rational;
use std::fmt;
use super::{Primary, SymExpr};

/// Renders a number, using a fraction for non-integers.
fn number_to_string(n: &Rational) -> String {
    match as_integer(n) {
        Some(int) => int.to_string(),
        None => format!("{}/{}", n.numer(), n.denom()),
    }
}

/// Returns true if the base of a power must be wrapped in parentheses.
fn base_needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || as_integer(n).is_none(),
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
    }
}

/// Returns true if the exponent of a power must be wrapped in parentheses.
fn exp_needs_parens(exp: &SymExpr) -> bool {
    match exp {
        SymExpr::Primary(Primary::Number(n)) => *n < 0 || as_integer(n).is_none(),
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
    }
}

/// Renders `base**exp`.
fn power_to_string(base: &SymExpr, exp: &SymExpr) -> String {
    let base = if base_needs_parens(base) {
        format!("({})", base)
    } else {
        base.to_string()
    };
    let exp = if exp_needs_parens(exp) {
        format!("({})", exp)
    } else {
        exp.to_string()
    };
    format!("{}**{}", base, exp)
}

/// Renders a factor that is placed in the numerator of a product.
fn factor_to_string(factor: &SymExpr) -> String {
    match factor {
        SymExpr::Add(_) | SymExpr::Mul(_) => format!("({})", factor),
        SymExpr::Exp(base, exp) => power_to_string(base, exp),
        SymExpr::Primary(primary) => primary.to_string(),
    }
}

/// Renders the product of the given factors without its sign.
///
/// Returns `true` alongside the rendering if the product is negative.
fn unsigned_product(factors: &[SymExpr]) -> (bool, String) {
    let mut coefficient = Rational::from(1);
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();

    for factor in factors {
        if let Some(n) = factor.as_number() {
            coefficient *= n;
        }
    }

    let negative = coefficient < 0;
    coefficient.abs_mut();
    if *coefficient.numer() != 1 {
        numerator.push(coefficient.numer().to_string());
    }
    if *coefficient.denom() != 1 {
        denominator.push(coefficient.denom().to_string());
    }

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(_)) => (),
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                let exp = -(**exp).clone();
                if exp.is_one() {
                    denominator.push(factor_to_string(base));
                } else {
                    denominator.push(power_to_string(base, &exp));
                }
            },
            _ => numerator.push(factor_to_string(factor)),
        }
    }

    let numerator = if numerator.is_empty() {
        String::from("1")
    } else {
        numerator.join("*")
    };

    let rendered = match denominator.len() {
        0 => numerator,
        1 => format!("{}/{}", numerator, denominator[0]),
        _ => format!("{}/({})", numerator, denominator.join("*")),
    };
    (negative, rendered)
}

/// Splits a term of a sum into its sign and the rendering of its magnitude.
fn signed_term(term: &SymExpr) -> (bool, String) {
    match term {
        SymExpr::Primary(Primary::Number(n)) if *n < 0 => (true, number_to_string(&-n.clone())),
        SymExpr::Mul(factors) => unsigned_product(factors),
        SymExpr::Exp(_, exp) if exp.is_negative_number() => unsigned_product(std::slice::from_ref(term)),
        SymExpr::Add(_) => (false, format!("({})", term)),
        _ => (false, term.to_string()),
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", number_to_string(n)),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                if terms.is_empty() {
                    return write!(f, "0");
                }

                for (i, term) in terms.iter().enumerate() {
                    let (negative, magnitude) = signed_term(term);
                    match (i, negative) {
                        (0, false) => write!(f, "{}", magnitude)?,
                        (0, true) => write!(f, "-{}", magnitude)?,
                        (_, false) => write!(f, " + {}", magnitude)?,
                        (_, true) => write!(f, " - {}", magnitude)?,
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let (negative, magnitude) = unsigned_product(factors);
                if negative {
                    write!(f, "-")?;
                }
                write!(f, "{}", magnitude)
            },
            Self::Exp(base, exp) => {
                if exp.is_negative_number() {
                    let (_, magnitude) = unsigned_product(std::slice::from_ref(self));
                    write!(f, "{}", magnitude)
                } else {
                    write!(f, "{}", power_to_string(base, exp))
                }
            },
        }
    }
}
