//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::{canonical_cmp, SymExpr},
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;
use std::cmp::Ordering;

/// `a * (b * c) = a * b * c`
///
/// Also reduces products with fewer than two factors to the single factor, or to `1`.
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.len() < 2 {
            return Some(SymExpr::Mul(factors.to_vec()).downgrade());
        }

        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let new_factors = factors.iter()
            .flat_map(|factor| match factor {
                SymExpr::Mul(inner) => inner.clone(),
                factor => vec![factor.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::number(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies all numeric factors together into one coefficient.
///
/// `2*a*3 = 6*a`
pub fn fold_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let numbers = factors.iter().filter_map(SymExpr::as_number).count();
        if numbers < 2 {
            return None;
        }

        let (coefficient, rest) = SymExpr::Mul(factors.to_vec()).split_coefficient();
        if rest.is_one() {
            Some(SymExpr::number(coefficient))
        } else {
            Some(SymExpr::number(coefficient) * rest)
        }
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// Splits a factor into its base and exponent.
fn base_and_exp(factor: &SymExpr) -> (SymExpr, SymExpr) {
    match factor {
        SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        factor => (factor.clone(), SymExpr::number(1)),
    }
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^2*a^-1 = a^(2 + -1)`
/// etc.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut combined: Vec<(SymExpr, Vec<SymExpr>)> = Vec::with_capacity(factors.len());
        let mut coefficient = Rational::from(1);

        for factor in factors {
            if let Some(n) = factor.as_number() {
                coefficient *= n;
                continue;
            }

            let (base, exp) = base_and_exp(factor);
            match combined.iter_mut().find(|(other, _)| *other == base) {
                Some((_, exps)) => exps.push(exp),
                None => combined.push((base, vec![exp])),
            }
        }

        if combined.iter().all(|(_, exps)| exps.len() == 1) {
            return None;
        }

        let new_factors = combined.into_iter()
            .map(|(base, mut exps)| {
                if exps.len() > 1 {
                    return base.pow(SymExpr::Add(exps));
                }

                let exp = exps.remove(0);
                if exp.is_one() {
                    base
                } else {
                    base.pow(exp)
                }
            });

        let mut product = vec![SymExpr::number(coefficient)];
        product.extend(new_factors);
        Some(SymExpr::Mul(product))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Puts the factors in canonical order: the numeric coefficient first, then symbolic factors.
pub fn sort_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let sorted = factors.windows(2)
            .all(|pair| canonical_cmp(&pair[0], &pair[1]) != Ordering::Greater);
        if sorted {
            return None;
        }

        let mut new_factors = factors.to_vec();
        new_factors.sort_by(canonical_cmp);
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::SortFactors);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| sort_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn fold() {
        let expr = SymExpr::Mul(vec![SymExpr::number(2), x(), SymExpr::number(3)]);
        assert_eq!(fold_numbers(&expr, &mut ()), Some(SymExpr::number(6) * x()));
    }

    #[test]
    fn like_factors() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::number(2), x().pow(SymExpr::number(2))]);
        let mut steps = Vec::new();
        let combined = combine_like_factors(&expr, &mut steps).unwrap();

        assert_eq!(combined, SymExpr::Mul(vec![
            SymExpr::number(2),
            x().pow(SymExpr::Add(vec![SymExpr::number(1), SymExpr::number(2)])),
        ]));
        assert_eq!(steps, vec![Step::CombineLikeFactors]);
    }

    #[test]
    fn zero_and_one() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::number(0)]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(SymExpr::number(0)));

        let expr = SymExpr::Mul(vec![SymExpr::number(1), x()]);
        assert_eq!(multiply_one(&expr, &mut ()), Some(x()));
    }

    #[test]
    fn number_first() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::number(2)]);
        assert_eq!(
            sort_factors(&expr, &mut ()).unwrap().to_string(),
            "2*x",
        );
    }
}
