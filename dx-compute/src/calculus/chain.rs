use crate::symbolic::{expr::SymExpr, simplify, simplify_with_steps};
use tracing::{debug, trace};
use super::{
    accumulate,
    differentiate,
    error::{Error, Input},
    parse_input,
    step::Step,
    table::{self, PLACEHOLDER},
    variable::Variable,
    Derivation,
    Rule,
    TotalUpdate,
};

/// Differentiates `f(g(x))` with the chain rule, where `g(x)` is given by `inner` and `f(u)` by
/// `outer`, written in terms of the placeholder `u`.
///
/// The derivative of `f(u)` comes from the [rule table](table) when the outer function has one of
/// the recognized shapes, and is computed structurally otherwise. The result is added to
/// `running_total`, and the new total is returned as [`TotalUpdate::Set`] in the derivation.
///
/// The derivation always has seven steps:
///
/// 1. `Let g(x) = …`
/// 2. `Let f(u) = …`
/// 3. `Compute g'(x) = …`
/// 4. `Compute f'(u) = …`
/// 5. `Substitute u = g(x) into f'(u): f'(g(x)) = …`
/// 6. `Multiply by g'(x): … * …`
/// 7. `Simplify: …`
///
/// Besides parse and variable errors, a power whose exponent depends on the variable (such as
/// `2^u`) fails with [`Error::UnsupportedDerivative`].
pub fn compute_chain_rule(
    inner: &str,
    outer: &str,
    variable: &str,
    running_total: Option<&SymExpr>,
) -> Result<Derivation, Error> {
    debug!(inner, outer, variable, "computing derivative with the chain rule");

    let var = Variable::parse(variable)
        .map_err(|error| Error::InvalidVariable { error })?;
    let g_raw = parse_input(inner, Input::Inner, &[var.name()])?;
    let f_raw = parse_input(outer, Input::Outer, &[PLACEHOLDER])?;

    let g = simplify(&g_raw);
    let f = simplify(&f_raw);
    let dg = differentiate(&g, var.name(), Input::Inner, inner)?;

    let (df, display, manual) = match table::lookup(&f_raw) {
        Some(rule) => {
            debug!(shape = %rule.shape.key(), "outer function found in the rule table");
            (rule.derivative, rule.display, true)
        },
        None => {
            debug!(outer = %f, "outer function not in the rule table, differentiating structurally");
            let df = differentiate(&f, PLACEHOLDER, Input::Outer, outer)?;
            let display = df.to_string();
            (df, display, false)
        },
    };

    let substituted = simplify(&df.substitute(PLACEHOLDER, &g));
    let raw = substituted.clone() * dg.clone();
    let (result, simplify_steps) = simplify_with_steps(&raw);
    trace!(?simplify_steps, "simplified the chain rule result");

    let total = accumulate(running_total, &result);
    debug!(%result, %total, "chain rule complete");

    let var = var.name().to_owned();
    let steps = vec![
        Step::DefineInner { var: var.clone(), inner: g },
        Step::DefineOuter { outer: f },
        Step::InnerDerivative { var: var.clone(), derivative: dg.clone() },
        Step::OuterDerivative { display, manual },
        Step::Substitute { var: var.clone(), substituted: substituted.clone() },
        Step::MultiplyInnerDerivative { var, substituted, inner_derivative: dg },
        Step::Simplify { result: result.clone() },
    ];

    Ok(Derivation {
        rule: Rule::Chain,
        result,
        steps,
        running_total: TotalUpdate::Set(total),
    })
}
