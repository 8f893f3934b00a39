use crate::symbolic::{expr::SymExpr, simplify, simplify_with_steps};
use tracing::{debug, trace};
use super::{
    differentiate,
    error::{self, Error, Input},
    parse_input,
    step::Step,
    variable::Variable,
    whole,
    Derivation,
    Rule,
    TotalUpdate,
};

/// Differentiates `u(x) / v(x)` with the quotient rule, `(u'v - uv') / v^2`.
///
/// The derivation has four steps: the definitions of `u` and `v`, their derivatives, the
/// unsimplified combination, and the simplified result. The running total is not involved; the
/// derivation always carries [`TotalUpdate::Clear`].
///
/// A denominator that simplifies to zero fails with [`Error::DivisionByZero`]. A power whose
/// exponent depends on the variable (such as `x^x`) fails with [`Error::UnsupportedDerivative`].
pub fn compute_quotient_rule(numerator: &str, denominator: &str, variable: &str) -> Result<Derivation, Error> {
    debug!(numerator, denominator, variable, "computing derivative with the quotient rule");

    let var = Variable::parse(variable)
        .map_err(|error| Error::InvalidVariable { error })?;
    let u = simplify(&parse_input(numerator, Input::Numerator, &[var.name()])?);
    let v = simplify(&parse_input(denominator, Input::Denominator, &[var.name()])?);

    if v.is_zero() {
        return Err(Error::DivisionByZero {
            input: Input::Denominator,
            error: dx_error::Error::new(vec![whole(denominator)], error::DivisionByZero),
        });
    }

    let du = differentiate(&u, var.name(), Input::Numerator, numerator)?;
    let dv = differentiate(&v, var.name(), Input::Denominator, denominator)?;

    let raw = (du.clone() * v.clone() + -(u.clone() * dv.clone())) * v.clone().pow(SymExpr::number(-2));
    let (result, simplify_steps) = simplify_with_steps(&raw);
    trace!(?simplify_steps, "simplified the quotient rule result");
    debug!(%result, "quotient rule complete");

    let var = var.name().to_owned();
    let steps = vec![
        Step::DefineQuotient { var: var.clone(), numerator: u.clone(), denominator: v.clone() },
        Step::QuotientDerivatives { var, numerator: du.clone(), denominator: dv.clone() },
        Step::ApplyQuotientRule {
            numerator: u,
            denominator: v,
            numerator_derivative: du,
            denominator_derivative: dv,
        },
        Step::Simplify { result: result.clone() },
    ];

    Ok(Derivation {
        rule: Rule::Quotient,
        result,
        steps,
        running_total: TotalUpdate::Clear,
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::{
        calculus::error::{DivisionByZero, InvalidVariable, InvalidVariableReason},
        symbolic::eval::{bind_x, eval_x},
    };
    use dx_parser::parser::error::kind::UnclosedParenthesis;
    use pretty_assertions::assert_eq;
    use super::*;

    fn result(numerator: &str, denominator: &str) -> String {
        compute_quotient_rule(numerator, denominator, "x").unwrap().result.to_string()
    }

    #[test]
    fn linear_over_linear() {
        let derivation = compute_quotient_rule("x", "x+1", "x").unwrap();
        assert_eq!(derivation.rule, Rule::Quotient);
        assert_eq!(derivation.result.to_string(), "1/(x + 1)**2");
        assert_eq!(derivation.steps.len(), 4);
        assert_eq!(derivation.running_total, TotalUpdate::Clear);
        assert_eq!(derivation.new_running_total(), None);
    }

    #[test]
    fn constant_parts() {
        assert_eq!(result("1", "x"), "-1/x**2");
        assert_eq!(result("x", "2"), "1/2");
        assert_eq!(result("5", "3"), "0");
    }

    #[test]
    fn zero_denominator() {
        for denominator in ["0", "x - x", "0 * sin(x)"] {
            let err = compute_quotient_rule("x", denominator, "x").unwrap_err();
            assert!(
                matches!(err, Error::DivisionByZero { input: Input::Denominator, .. }),
                "`{}` gave {:?}",
                denominator,
                err,
            );
            assert!(err.inner().is::<DivisionByZero>());
            assert_eq!(err.spans(), &[0..denominator.len()]);
        }
    }

    #[test]
    fn parse_errors() {
        let err = compute_quotient_rule("(x", "x", "x").unwrap_err();
        assert_eq!(err.input(), Input::Numerator);
        assert!(err.inner().is::<UnclosedParenthesis>());

        let err = compute_quotient_rule("x", "y + 1", "x").unwrap_err();
        assert!(matches!(err, Error::Parse { input: Input::Denominator, .. }));

        let err = compute_quotient_rule("x", "x + 1", "sin").unwrap_err();
        assert_eq!(
            err.inner().downcast_ref::<InvalidVariable>().map(|kind| kind.reason),
            Some(InvalidVariableReason::FunctionName),
        );
    }

    #[test]
    fn variable_exponent() {
        let err = compute_quotient_rule("x^x", "x + 1", "x").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDerivative { input: Input::Numerator, .. }));
    }

    #[test]
    fn numerator_derivative_uses_variable() {
        let derivation = compute_quotient_rule("sin(t)", "t", "t").unwrap();
        assert_eq!(derivation.steps[1].to_string(), "Compute u'(t) = cos(t), v'(t) = 1");
    }

    #[test]
    fn results_match_finite_differences() {
        const TOL: f64 = 0.0001;
        const DX: f64 = 0.00001;

        for (numerator, denominator) in [
            ("x^2 + 1", "x - 3"),
            ("sin(x)", "x"),
            ("exp(x)", "x^2 + 1"),
            ("1", "cos(x)"),
            ("sqrt(x)", "log(x + 2)"),
        ] {
            let quotient = bind_x(&format!("({numerator}) / ({denominator})"));
            let derivation = compute_quotient_rule(numerator, denominator, "x").unwrap();
            for point in [0.2, 0.7, 1.3] {
                let numerical = (eval_x(&quotient, point + DX) - eval_x(&quotient, point - DX)) / (2.0 * DX);
                let symbolic = eval_x(&derivation.result, point);
                assert_float_absolute_eq!(symbolic, numerical, TOL * numerical.abs().max(1.0));
            }
        }
    }
}
