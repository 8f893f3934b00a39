//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::{term_cmp, SymExpr},
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;
use std::cmp::Ordering;

/// `a + (b + c) = a + b + c`
///
/// Also reduces sums with fewer than two terms to the single term, or to `0`.
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if terms.len() < 2 {
            return Some(SymExpr::Add(terms.to_vec()).downgrade());
        }

        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let new_terms = terms.iter()
            .flat_map(|term| match term {
                SymExpr::Add(inner) => inner.clone(),
                term => vec![term.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Rebuilds a term from its coefficient and remaining factors.
fn rebuild_term(coefficient: Rational, rest: SymExpr) -> SymExpr {
    if coefficient == 0 {
        SymExpr::number(0)
    } else if rest.is_one() {
        SymExpr::number(coefficient)
    } else if coefficient == 1 {
        rest
    } else {
        SymExpr::number(coefficient) * rest
    }
}

/// Combines like terms, including constant terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `2+3 = 5`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut combined: Vec<(Rational, SymExpr)> = Vec::with_capacity(terms.len());

        // this is O(n^2) worst case, since every term is compared against the combined list
        for term in terms {
            let (coefficient, rest) = term.split_coefficient();
            match combined.iter_mut().find(|(_, other)| *other == rest) {
                Some((total, _)) => *total += coefficient,
                None => combined.push((coefficient, rest)),
            }
        }

        if combined.len() == terms.len() {
            return None;
        }

        let new_terms = combined.into_iter()
            .map(|(coefficient, rest)| rebuild_term(coefficient, rest))
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Puts the terms in canonical order: symbolic terms first, ordered by their factors, then the
/// constant term.
pub fn sort_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let sorted = terms.windows(2)
            .all(|pair| term_cmp(&pair[0], &pair[1]) != Ordering::Greater);
        if sorted {
            return None;
        }

        let mut new_terms = terms.to_vec();
        new_terms.sort_by(term_cmp);
        Some(SymExpr::Add(new_terms))
    })?;

    step_collector.push(Step::SortTerms);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
        .or_else(|| sort_terms(expr, step_collector))
}
