//! Step-by-step differentiation with the chain rule and the quotient rule.
//!
//! The two engines, [`compute_chain_rule`] and [`compute_quotient_rule`], accept the raw text of
//! their inputs and the name of the variable of differentiation. A calculation either succeeds
//! with a [`Derivation`], holding the simplified result and the numbered steps that lead to it, or
//! fails with a single [`Error`] naming the offending input.
//!
//! ```
//! use dx_compute::calculus::compute_chain_rule;
//!
//! let derivation = compute_chain_rule("2*x", "sin(u)", "x", None).unwrap();
//! assert_eq!(derivation.result.to_string(), "2*cos(2*x)");
//! assert_eq!(derivation.steps.len(), 7);
//! ```

pub mod accumulate;
pub mod chain;
pub mod error;
pub mod quotient;
pub mod step;
pub mod table;
pub mod variable;

pub use accumulate::{accumulate, RunningTotal};
pub use chain::compute_chain_rule;
pub use error::{Error, Input};
pub use quotient::compute_quotient_rule;
pub use step::Step;
pub use variable::Variable;

use crate::symbolic::{derivative, expr::SymExpr, simplify, SymbolicDerivativeError};
use std::{fmt, ops::Range};

/// The rule used by a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Chain,
    Quotient,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Chain => write!(f, "chain rule"),
            Rule::Quotient => write!(f, "quotient rule"),
        }
    }
}

/// How a derivation changes the client's running total.
#[derive(Debug, Clone, PartialEq)]
pub enum TotalUpdate {
    /// Replace the running total with this expression.
    Set(SymExpr),

    /// Clear the running total.
    Clear,
}

/// The result of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// The rule that was applied.
    pub rule: Rule,

    /// The simplified derivative.
    pub result: SymExpr,

    /// The steps of the derivation, in order.
    pub steps: Vec<Step>,

    /// How the running total changes.
    pub running_total: TotalUpdate,
}

impl Derivation {
    /// Renders the steps as numbered lines, such as `1. Let g(x) = 2*x`.
    pub fn numbered_steps(&self) -> Vec<String> {
        self.steps.iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect()
    }

    /// Returns the new running total, or [`None`] if the running total is cleared.
    pub fn new_running_total(&self) -> Option<&SymExpr> {
        match &self.running_total {
            TotalUpdate::Set(total) => Some(total),
            TotalUpdate::Clear => None,
        }
    }
}

/// The span covering the whole source of an input.
fn whole(source: &str) -> Range<usize> {
    0..source.len()
}

/// Returns true if the expression raises something that simplifies to zero to a negative power.
fn divides_by_zero(expr: &SymExpr) -> bool {
    expr.post_order_iter().any(|expr| match expr {
        SymExpr::Exp(base, exp) => simplify(exp).is_negative_number() && simplify(base).is_zero(),
        _ => false,
    })
}

/// Parses the source of an input and binds it to a [`SymExpr`], allowing only the given symbols.
pub(crate) fn parse_input(source: &str, input: Input, symbols: &[&str]) -> Result<SymExpr, Error> {
    let ast = dx_parser::parse(source)
        .map_err(|error| Error::Parse { input, error })?;
    let expr = SymExpr::bind(&ast, symbols)
        .map_err(|error| Error::Parse { input, error })?;

    if divides_by_zero(&expr) {
        return Err(Error::DivisionByZero {
            input,
            error: dx_error::Error::new(vec![whole(source)], error::DivisionByZero),
        });
    }

    Ok(expr)
}

/// Differentiates an input with respect to `var` and simplifies the derivative.
pub(crate) fn differentiate(expr: &SymExpr, var: &str, input: Input, source: &str) -> Result<SymExpr, Error> {
    match derivative(expr, var) {
        Ok(derivative) => Ok(simplify(&derivative)),
        Err(SymbolicDerivativeError::Unsupported(unsupported)) => Err(Error::UnsupportedDerivative {
            input,
            error: dx_error::Error::new(vec![whole(source)], error::UnsupportedDerivative {
                expr: unsupported.to_string(),
                var: var.to_owned(),
            }),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn chain_then_quotient_then_chain() {
        let mut total = RunningTotal::new();

        let first = compute_chain_rule("x", "sin(u)", "x", total.get()).unwrap();
        total.apply(&first.running_total);
        let second = compute_chain_rule("x", "cos(u)", "x", total.get()).unwrap();
        total.apply(&second.running_total);
        assert_eq!(total.get().map(ToString::to_string).as_deref(), Some("cos(x) - sin(x)"));

        let quotient = compute_quotient_rule("x", "x + 1", "x").unwrap();
        assert_eq!(quotient.running_total, TotalUpdate::Clear);
        total.apply(&quotient.running_total);
        assert_eq!(total.get(), None);

        let fresh = compute_chain_rule("x", "u**2", "x", total.get()).unwrap();
        assert_eq!(fresh.new_running_total().map(ToString::to_string).as_deref(), Some("2*x"));
    }

    #[test]
    fn numbered_steps() {
        let derivation = compute_quotient_rule("x", "x+1", "x").unwrap();
        assert_eq!(derivation.numbered_steps(), vec![
            "1. Let u(x) = x, v(x) = x + 1",
            "2. Compute u'(x) = 1, v'(x) = 1",
            "3. Apply the quotient rule: (u' * v - u * v') / v**2 = (1 * (x + 1) - x * 1) / (x + 1)**2",
            "4. Simplify: 1/(x + 1)**2",
        ]);
    }

    #[test]
    fn literal_division_by_zero() {
        let err = compute_chain_rule("1/(x - x)", "sin(u)", "x", None).unwrap_err();
        assert!(matches!(err, Error::DivisionByZero { input: Input::Inner, .. }));

        let err = compute_quotient_rule("x / 0", "x", "x").unwrap_err();
        assert!(matches!(err, Error::DivisionByZero { input: Input::Numerator, .. }));
    }
}
