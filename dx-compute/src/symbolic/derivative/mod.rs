//! Structural differentiation of [`SymExpr`]s.
//!
//! [`derivative`] applies the constant, sum, product and power rules recursively, and the chain
//! rule for calls to the supported functions. Quotients need no rule of their own, since `a / b`
//! is represented as `a * b^-1`.

mod function;

use crate::primitive::int;
use crate::symbolic::expr::{Primary, SymExpr};
use std::fmt;

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to keep the
/// resulting trees small and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(_) => e.is_zero(),
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exp) => {
            is_trivially_zero(base) && !is_trivially_zero(exp) && !exp.is_negative_number()
        },
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to keep the
/// resulting trees small and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(_) => e.is_one(),
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => is_trivially_zero(exp) || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if self.0.first().is_some_and(is_trivially_zero) {
            return;
        }

        if is_trivially_zero(&e) {
            self.0 = vec![SymExpr::number(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// `(f^n)' = n * f^(n - 1) * f'`, where `n` does not depend on the variable.
fn power_rule(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    if exp.contains_symbol(with) {
        return Err(SymbolicDerivativeError::Unsupported(base.clone().pow(exp.clone())));
    }

    let lowered = match exp.as_number() {
        Some(n) => SymExpr::number(n.clone() - int(1)),
        None => exp.clone() + SymExpr::number(-1),
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(exp.clone());
    mult_group.mult(base.clone().pow(lowered));
    mult_group.mult(derivative(base, with)?);
    Ok(mult_group.into())
}

/// An error that can occur while computing a derivative.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicDerivativeError {
    /// The sub-expression may be differentiable, but computing its derivative symbolically is not
    /// supported. This is the case for powers whose exponent depends on the variable.
    Unsupported(SymExpr),
}

impl fmt::Display for SymbolicDerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(expr) => write!(f, "cannot differentiate `{}`", expr),
        }
    }
}

/// Computes the derivative of the given expression with respect to the symbol `with`. Returns
/// [`Err`] if the derivative could not be symbolically computed.
///
/// The result is not simplified.
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, SymbolicDerivativeError> {
    match f {
        SymExpr::Primary(Primary::Number(_)) => Ok(SymExpr::number(0)),
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                Ok(SymExpr::number(1))
            } else {
                Ok(SymExpr::number(0))
            }
        },
        SymExpr::Primary(Primary::Call(func, arg)) => {
            function::function_derivative(*func, arg, with)
        },
        SymExpr::Add(terms) => sum_rule(terms, with),
        SymExpr::Mul(factors) => product_rule(factors, with),
        SymExpr::Exp(base, exp) => power_rule(base, exp, with),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::symbolic::{eval::{bind_x, eval_x}, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Approximates the derivative of the expression at `x` using a finite difference.
    fn finite_difference(e: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x)) / DX
    }

    /// Compares the symbolic derivative of `function` against a finite difference at every point.
    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let expr = bind_x(function);
        let symbolic = derivative(&expr, "x").unwrap();

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            let tolerance = TOL * numerically_computed.abs().max(1.0);
            assert_float_absolute_eq!(symbolically_computed, numerically_computed, tolerance);
        }
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0., 1., 2., 5., 8.]);
        test_for_function("x^(1/2)", [0.5, 1., 4.]);
        test_for_function("(3*x + 1)^-2", [0., 1., 2.]);
    }

    #[test]
    fn product_and_quotient() {
        test_for_function("x * sin(x)", [0., 1., 2.5]);
        test_for_function("x / (x + 1)", [0., 1., 3.]);
        test_for_function("(x^2 - 1) / (x^2 + 1)", [-1., 0.5, 2.]);
    }

    #[test]
    fn functions() {
        test_for_function("sin(2*x)", [0., 0.3, 1.]);
        test_for_function("cos(x^2)", [0., 0.3, 1.]);
        test_for_function("tan(x)", [0., 0.3, 1.]);
        test_for_function("cot(x)", [0.3, 1., 2.]);
        test_for_function("sec(x)", [0., 0.3, 1.]);
        test_for_function("csc(x)", [0.3, 1., 2.]);
        test_for_function("exp(3*x)", [0., 0.3, 1.]);
        test_for_function("log(x^2 + 1)", [0., 0.3, 1.]);
        test_for_function("sqrt(x + 2)", [0., 0.3, 1.]);
    }

    #[test]
    fn other_symbols_are_constant() {
        let expr = SymExpr::symbol("y") * SymExpr::symbol("x");
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), SymExpr::symbol("y"));
    }

    #[test]
    fn variable_exponent_is_unsupported() {
        let expr = bind_x("2^x");
        assert_eq!(
            derivative(&expr, "x"),
            Err(SymbolicDerivativeError::Unsupported(SymExpr::number(2).pow(SymExpr::symbol("x")))),
        );
    }
}
