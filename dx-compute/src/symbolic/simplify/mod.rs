//! Simplification of algebraic expressions.
//!
//! The simplifier repeatedly applies the rewrite rules in [`rules`] to every node of the
//! expression tree, children before parents, until a full pass leaves the tree unchanged. The
//! result is in a canonical form: sums and products are flattened, numbers are folded, like terms
//! and like factors are combined, and terms and factors are sorted in a fixed order (see
//! [`canonical_cmp`](crate::symbolic::expr::canonical_cmp)). Two expressions that simplify to the
//! same canonical form render to the same text.
//!
//! Simplification never changes the value of an expression, except that `0^0` is defined to be
//! `1`, and factors such as `x * x^-1` cancel to `1` without regard to the points where `x` is
//! zero.

pub mod rules;
pub mod step;

use crate::symbolic::{expr::{Primary, SymExpr}, step_collector::StepCollector};
use step::Step;
use tracing::warn;

/// The maximum number of passes over the expression tree.
const MAX_PASSES: usize = 256;

/// Simplifies the children of the expression, then applies rules to the expression itself until
/// none apply.
fn simplify_pass(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut expr = match expr {
        SymExpr::Primary(Primary::Call(func, arg)) => {
            SymExpr::call(*func, simplify_pass(arg, step_collector))
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => SymExpr::Add(
            terms.iter().map(|term| simplify_pass(term, step_collector)).collect()
        ),
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter().map(|factor| simplify_pass(factor, step_collector)).collect()
        ),
        SymExpr::Exp(base, exp) => {
            simplify_pass(base, step_collector).pow(simplify_pass(exp, step_collector))
        },
    };

    while let Some(next) = rules::all(&expr, step_collector) {
        expr = next;
    }

    expr
}

/// Simplifies the expression, reporting every rule applied to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut current = simplify_pass(expr, step_collector);
    for _ in 1..MAX_PASSES {
        let next = simplify_pass(&current, step_collector);
        if next == current {
            return next;
        }
        current = next;
    }

    warn!(expr = %current, "simplification did not settle within {} passes", MAX_PASSES);
    current
}

/// Simplifies the expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the expression, returning the steps taken in the order they were applied.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = simplify_with(expr, &mut steps);
    (expr, steps)
}
