//! Simplification rules for calls to the supported functions with exact values.

use crate::{
    primitive::rational_sqrt,
    symbolic::{
        expr::SymExpr,
        simplify::{rules::do_call, step::Step},
        step_collector::StepCollector,
    },
};
use dx_parser::parser::ast::Func;

/// `sin(0) = 0`
/// `tan(0) = 0`
pub fn zero_at_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Sin, |arg| arg.is_zero().then(|| SymExpr::number(0)))
        .or_else(|| do_call(expr, Func::Tan, |arg| arg.is_zero().then(|| SymExpr::number(0))))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::EvaluateFunction);
    Some(opt)
}

/// `cos(0) = 1`
/// `exp(0) = 1`
pub fn one_at_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Cos, |arg| arg.is_zero().then(|| SymExpr::number(1)))
        .or_else(|| do_call(expr, Func::Exp, |arg| arg.is_zero().then(|| SymExpr::number(1))))?;

    step_collector.push(Step::EvaluateFunction);
    Some(opt)
}

/// `log(1) = 0`
pub fn log_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Log, |arg| arg.is_one().then(|| SymExpr::number(0)))?;

    step_collector.push(Step::EvaluateFunction);
    Some(opt)
}

/// `sqrt(9/4) = 3/2`, for rational numbers whose numerator and denominator are perfect squares
pub fn sqrt_perfect_square(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Sqrt, |arg| {
        rational_sqrt(arg.as_number()?).map(|root| SymExpr::number(root))
    })?;

    step_collector.push(Step::EvaluateFunction);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    zero_at_zero(expr, step_collector)
        .or_else(|| one_at_zero(expr, step_collector))
        .or_else(|| log_one(expr, step_collector))
        .or_else(|| sqrt_perfect_square(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_values() {
        let zero = SymExpr::number(0);
        assert_eq!(all(&SymExpr::call(Func::Sin, zero.clone()), &mut ()), Some(SymExpr::number(0)));
        assert_eq!(all(&SymExpr::call(Func::Cos, zero.clone()), &mut ()), Some(SymExpr::number(1)));
        assert_eq!(all(&SymExpr::call(Func::Exp, zero), &mut ()), Some(SymExpr::number(1)));
        assert_eq!(all(&SymExpr::call(Func::Log, SymExpr::number(1)), &mut ()), Some(SymExpr::number(0)));
    }

    #[test]
    fn square_roots() {
        let root = SymExpr::call(Func::Sqrt, SymExpr::number((9, 4)));
        assert_eq!(all(&root, &mut ()), Some(SymExpr::number((3, 2))));

        let irrational = SymExpr::call(Func::Sqrt, SymExpr::number(2));
        assert_eq!(all(&irrational, &mut ()), None);
    }
}
