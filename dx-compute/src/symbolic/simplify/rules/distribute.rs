//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};

/// `n*(a + b) = n*a + n*b`, where `n` is a number
///
/// Only a lone numeric coefficient is distributed, so that products such as `(x + 1)*y` keep
/// their factored form.
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (coefficient, terms) = match factors {
            [SymExpr::Primary(_), SymExpr::Add(terms)] | [SymExpr::Add(terms), SymExpr::Primary(_)] => {
                let coefficient = factors.iter().find_map(SymExpr::as_number)?;
                (coefficient, terms)
            },
            _ => return None,
        };

        let new_terms = terms.iter()
            .map(|term| SymExpr::number(coefficient.clone()) * term.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^n = a^n * b^n`, where `n` is an integer
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        if let SymExpr::Mul(factors) = lhs {
            let new_factors = factors.iter()
                .map(|factor| factor.clone().pow(rhs.clone()))
                .collect::<Vec<_>>();

            return Some(SymExpr::Mul(new_factors));
        }

        None
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it lets like terms be combined.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn coefficient_over_sum() {
        let expr = SymExpr::number(-1) * (x() + SymExpr::number(1));
        let distributed = distributive_property(&expr, &mut ()).unwrap();
        assert_eq!(distributed, SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::number(-1), x()]),
            SymExpr::Mul(vec![SymExpr::number(-1), SymExpr::number(1)]),
        ]));
    }

    #[test]
    fn symbolic_factor_is_kept() {
        let expr = SymExpr::symbol("y") * (x() + SymExpr::number(1));
        assert_eq!(distributive_property(&expr, &mut ()), None);
    }

    #[test]
    fn power_of_product() {
        let expr = (SymExpr::number(2) * x()).pow(SymExpr::number(2));
        assert_eq!(distribute_power(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::number(2).pow(SymExpr::number(2)),
            x().pow(SymExpr::number(2)),
        ])));
    }
}
