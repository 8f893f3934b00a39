//! Simplification rules for powers.

use crate::{
    primitive::{as_integer, rational_pow, rational_sqrt},
    symbolic::{
        expr::SymExpr,
        simplify::{rules::do_power, step::Step},
        step_collector::StepCollector,
    },
};

/// `a^0 = 1`
///
/// This also defines `0^0 = 1`.
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        rhs.is_zero().then(|| SymExpr::number(1))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`, where `a` is a positive number
pub fn power_zero_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let positive = rhs.as_number().is_some_and(|n| *n > 0);
        (lhs.is_zero() && positive).then(|| SymExpr::number(0))
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        lhs.is_one().then(|| SymExpr::number(1))
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.is_one().then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^n = a^(b*n)`, where `n` is an integer
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        match lhs {
            SymExpr::Exp(base, exp) => {
                Some((**base).clone().pow((**exp).clone() * rhs.clone()))
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Evaluates a number raised to an integer power.
///
/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
///
/// `4^(3/2) = 8`
///
/// Half-integer exponents are evaluated when the base is a perfect square. `0` raised to a
/// negative power is left as is, and so are powers too large to evaluate.
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let (base, exp) = (lhs.as_number()?, rhs.as_number()?);
        let value = match as_integer(exp) {
            Some(n) => rational_pow(base, n)?,
            None if *exp.denom() == 2 => rational_pow(&rational_sqrt(base)?, exp.numer())?,
            None => return None,
        };
        Some(SymExpr::number(value))
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
}
