//! The canonical order of terms and factors.
//!
//! Numbers come first in a product, symbolic factors follow, compared by their base and then by
//! their exponent (higher powers first). In a sum, terms are compared by the same order after
//! their numeric coefficient is removed, and constant terms come last.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use super::{Primary, SymExpr};

/// The implicit exponent of a factor that is not a power.
static ONE: Lazy<SymExpr> = Lazy::new(|| SymExpr::number(1));

/// Orders the kinds of expressions.
fn kind_rank(expr: &SymExpr) -> u8 {
    match expr {
        SymExpr::Primary(Primary::Number(_)) => 0,
        SymExpr::Primary(Primary::Symbol(_)) => 1,
        SymExpr::Primary(Primary::Call(..)) => 2,
        SymExpr::Add(_) => 3,
        SymExpr::Mul(_) => 4,
        SymExpr::Exp(..) => 5,
    }
}

/// Splits a factor into its base and exponent.
fn base_and_exp(expr: &SymExpr) -> (&SymExpr, &SymExpr) {
    match expr {
        SymExpr::Exp(base, exp) => (base, exp),
        _ => (expr, &ONE),
    }
}

/// Compares two lists of expressions lexicographically.
fn list_cmp(lhs: &[SymExpr], rhs: &[SymExpr]) -> Ordering {
    lhs.iter()
        .zip(rhs)
        .map(|(l, r)| canonical_cmp(l, r))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
}

/// Compares two bases of powers.
fn base_cmp(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    match (lhs, rhs) {
        (SymExpr::Primary(Primary::Number(l)), SymExpr::Primary(Primary::Number(r))) => l.cmp(r),
        (SymExpr::Primary(Primary::Symbol(l)), SymExpr::Primary(Primary::Symbol(r))) => l.cmp(r),
        (SymExpr::Primary(Primary::Call(l_func, l_arg)), SymExpr::Primary(Primary::Call(r_func, r_arg))) => {
            l_func.name().cmp(r_func.name())
                .then_with(|| canonical_cmp(l_arg, r_arg))
        },
        (SymExpr::Add(l), SymExpr::Add(r)) | (SymExpr::Mul(l), SymExpr::Mul(r)) => list_cmp(l, r),
        (SymExpr::Exp(l_base, l_exp), SymExpr::Exp(r_base, r_exp)) => {
            canonical_cmp(l_base, r_base)
                .then_with(|| canonical_cmp(l_exp, r_exp))
        },
        _ => kind_rank(lhs).cmp(&kind_rank(rhs)),
    }
}

/// Compares two factors of a product in canonical order.
pub fn canonical_cmp(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(l), Some(r)) => return l.cmp(r),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => (),
    }

    let (lhs_base, lhs_exp) = base_and_exp(lhs);
    let (rhs_base, rhs_exp) = base_and_exp(rhs);
    base_cmp(lhs_base, rhs_base)
        .then_with(|| canonical_cmp(rhs_exp, lhs_exp))
}

/// Compares two terms of a sum in canonical order.
pub fn term_cmp(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    let (lhs_coeff, lhs_rest) = lhs.split_coefficient();
    let (rhs_coeff, rhs_rest) = rhs.split_coefficient();
    match (lhs_rest.is_one(), rhs_rest.is_one()) {
        (true, true) => lhs_coeff.cmp(&rhs_coeff),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => canonical_cmp(&lhs_rest, &rhs_rest)
            .then_with(|| lhs_coeff.cmp(&rhs_coeff)),
    }
}

#[cfg(test)]
mod tests {
    use dx_parser::parser::ast::Func;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn numbers_before_symbols() {
        assert_eq!(canonical_cmp(&SymExpr::number(5), &x()), Ordering::Less);
        assert_eq!(canonical_cmp(&SymExpr::call(Func::Sin, x()), &x()), Ordering::Greater);
    }

    #[test]
    fn higher_powers_first() {
        let square = x().pow(SymExpr::number(2));
        assert_eq!(term_cmp(&square, &x()), Ordering::Less);
    }

    #[test]
    fn functions_by_name() {
        let cos = SymExpr::call(Func::Cos, x());
        let sin = -SymExpr::call(Func::Sin, x());
        assert_eq!(term_cmp(&cos, &sin), Ordering::Less);
    }

    #[test]
    fn constants_last() {
        assert_eq!(term_cmp(&SymExpr::number(1), &x()), Ordering::Greater);
    }
}
