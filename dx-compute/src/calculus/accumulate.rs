//! The running total of chain rule results.
//!
//! A calculation never stores the running total itself. The chain rule engine receives the
//! previous total and returns the new one in its [`Derivation`](super::Derivation), and the
//! quotient rule engine returns a signal to clear it. The client keeps the value between calls,
//! for example in a [`RunningTotal`].

use crate::symbolic::{expr::SymExpr, simplify};
use super::TotalUpdate;

/// Adds a chain rule result to the previous running total, simplifying the sum.
pub fn accumulate(previous: Option<&SymExpr>, result: &SymExpr) -> SymExpr {
    match previous {
        Some(previous) => simplify(&(previous.clone() + result.clone())),
        None => result.clone(),
    }
}

/// The running total kept by a client between calculations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningTotal(Option<SymExpr>);

impl RunningTotal {
    /// Creates an empty running total.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current total, if any chain rule result has been accumulated.
    pub fn get(&self) -> Option<&SymExpr> {
        self.0.as_ref()
    }

    /// Applies the update returned by a calculation.
    pub fn apply(&mut self, update: &TotalUpdate) {
        match update {
            TotalUpdate::Set(total) => self.0 = Some(total.clone()),
            TotalUpdate::Clear => self.0 = None,
        }
    }

    /// Clears the total.
    pub fn reset(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::eval::bind_x;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn first_result_starts_the_total() {
        let result = bind_x("cos(x)");
        assert_eq!(accumulate(None, &result), result);
    }

    #[test]
    fn sum_is_simplified() {
        let total = accumulate(Some(&bind_x("2*x")), &bind_x("x + 1"));
        assert_eq!(total.to_string(), "3*x + 1");
    }

    #[test]
    fn updates() {
        let mut total = RunningTotal::new();
        total.apply(&TotalUpdate::Set(bind_x("x")));
        assert_eq!(total.get(), Some(&bind_x("x")));

        total.apply(&TotalUpdate::Clear);
        assert_eq!(total.get(), None);

        total.apply(&TotalUpdate::Set(bind_x("x")));
        total.reset();
        assert_eq!(total, RunningTotal::new());
    }
}
