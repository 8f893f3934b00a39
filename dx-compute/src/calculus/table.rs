//! The table of textbook derivatives for common outer functions.
//!
//! The chain rule engine first looks up the outer function `f(u)` here. When it has one of the
//! recognized shapes, the derivative and the way it is written in the steps come from the table.
//! Otherwise, the engine falls back to differentiating `f(u)` structurally.

use crate::symbolic::expr::{Primary, SymExpr};
use dx_parser::parser::ast::Func;
use once_cell::sync::Lazy;
use rug::Integer;

/// The placeholder symbol that the outer function is written in.
pub const PLACEHOLDER: &str = "u";

/// The symbol standing for the exponent in the template of the power rule.
const EXPONENT: &str = "n";

/// The shape of an outer function with a textbook derivative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A call such as `sin(u)`.
    Call(Func),

    /// `u^n`, where `n` is a non-negative integer.
    Power(Integer),
}

/// The kind of a [`Shape`], without the exponent of a power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Call(Func),
    Power,
}

impl Shape {
    /// Recognizes the shape of the given outer function, if it has one.
    pub fn of(outer: &SymExpr) -> Option<Self> {
        match outer {
            SymExpr::Primary(Primary::Call(func, arg)) if arg.as_symbol() == Some(PLACEHOLDER) => {
                Some(Shape::Call(*func))
            },
            SymExpr::Exp(base, exp) if base.as_symbol() == Some(PLACEHOLDER) => {
                let n = exp.as_integer()?;
                (*n >= 0).then(|| Shape::Power(n.clone()))
            },
            _ => None,
        }
    }

    /// Returns the kind of the shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Call(func) => ShapeKind::Call(*func),
            Shape::Power(_) => ShapeKind::Power,
        }
    }

    /// Returns the normalized key of the shape, such as `sin(u)` or `u^2`.
    pub fn key(&self) -> String {
        match self {
            Shape::Call(func) => format!("{}({})", func, PLACEHOLDER),
            Shape::Power(n) => format!("{}^{}", PLACEHOLDER, n),
        }
    }
}

/// An entry of the rule table.
#[derive(Debug)]
pub struct RuleEntry {
    /// The shape this entry applies to.
    pub kind: ShapeKind,

    /// The derivative in terms of the placeholder `u` (and the exponent `n` for powers).
    pub template: SymExpr,

    /// How the derivative is written in the steps. `{n}` and `{n-1}` are replaced for powers.
    pub display: &'static str,
}

fn u() -> SymExpr {
    SymExpr::symbol(PLACEHOLDER)
}

fn call(func: Func) -> SymExpr {
    SymExpr::call(func, u())
}

/// The rule table, built once on first use and never modified.
static RULES: Lazy<Vec<RuleEntry>> = Lazy::new(|| {
    let n = || SymExpr::symbol(EXPONENT);
    vec![
        RuleEntry {
            kind: ShapeKind::Call(Func::Sin),
            template: call(Func::Cos),
            display: "cos(u)",
        },
        RuleEntry {
            kind: ShapeKind::Call(Func::Cos),
            template: -call(Func::Sin),
            display: "-sin(u)",
        },
        RuleEntry {
            kind: ShapeKind::Call(Func::Tan),
            template: call(Func::Sec).pow(SymExpr::number(2)),
            display: "sec(u)**2",
        },
        RuleEntry {
            kind: ShapeKind::Call(Func::Cot),
            template: -call(Func::Csc).pow(SymExpr::number(2)),
            display: "-csc(u)**2",
        },
        RuleEntry {
            kind: ShapeKind::Call(Func::Csc),
            template: -(call(Func::Csc) * call(Func::Cot)),
            display: "-csc(u)*cot(u)",
        },
        RuleEntry {
            kind: ShapeKind::Call(Func::Sec),
            template: call(Func::Sec) * call(Func::Tan),
            display: "sec(u)*tan(u)",
        },
        RuleEntry {
            kind: ShapeKind::Power,
            template: n() * u().pow(n() + SymExpr::number(-1)),
            display: "{n}*u**{n-1}",
        },
    ]
});

/// A textbook derivative of an outer function, found in the rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualRule {
    /// The recognized shape of the outer function.
    pub shape: Shape,

    /// The derivative in terms of the placeholder `u`. It is not simplified.
    pub derivative: SymExpr,

    /// How the derivative is written in the steps.
    pub display: String,
}

/// Looks up the textbook derivative of the given outer function.
///
/// Returns [`None`] if the outer function does not have one of the recognized shapes, in which
/// case it must be differentiated structurally.
pub fn lookup(outer: &SymExpr) -> Option<ManualRule> {
    let shape = Shape::of(outer)?;
    let entry = RULES.iter().find(|entry| entry.kind == shape.kind())?;

    let (derivative, display) = match &shape {
        Shape::Power(n) => {
            let derivative = entry.template.substitute(EXPONENT, &SymExpr::number(n.clone()));
            let display = if *n == 0 {
                String::from("0")
            } else {
                entry.display
                    .replace("{n-1}", &(n.clone() - 1i32).to_string())
                    .replace("{n}", &n.to_string())
            };
            (derivative, display)
        },
        Shape::Call(_) => (entry.template.clone(), entry.display.to_string()),
    };

    Some(ManualRule { shape, derivative, display })
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{eval::eval, simplify};
    use dx_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn outer(source: &str) -> SymExpr {
        SymExpr::bind(&parse(source).unwrap(), &[PLACEHOLDER]).unwrap()
    }

    #[test]
    fn trigonometric_shapes() {
        let rule = lookup(&outer("sin(u)")).unwrap();
        assert_eq!(rule.shape, Shape::Call(Func::Sin));
        assert_eq!(rule.display, "cos(u)");
        assert_eq!(rule.derivative, call(Func::Cos));

        assert_eq!(lookup(&outer("csc( u )")).unwrap().display, "-csc(u)*cot(u)");
        assert_eq!(lookup(&outer("sec(u)")).unwrap().shape.key(), "sec(u)");
    }

    #[test]
    fn power_shape() {
        let rule = lookup(&outer("u**3")).unwrap();
        assert_eq!(rule.shape, Shape::Power(Integer::from(3)));
        assert_eq!(rule.shape.key(), "u^3");
        assert_eq!(rule.display, "3*u**2");
        assert_eq!(simplify(&rule.derivative).to_string(), "3*u**2");

        assert_eq!(lookup(&outer("u^0")).unwrap().display, "0");
        assert_eq!(simplify(&lookup(&outer("u^0")).unwrap().derivative), SymExpr::number(0));
    }

    #[test]
    fn unrecognized_shapes_fall_through() {
        assert_eq!(lookup(&outer("u^-2")), None);
        assert_eq!(lookup(&outer("u^(1/2)")), None);
        assert_eq!(lookup(&outer("(2*u)^2")), None);
        assert_eq!(lookup(&outer("sin(2*u)")), None);
        assert_eq!(lookup(&outer("exp(u)")), None);
        assert_eq!(lookup(&outer("u^2 + 1")), None);
    }

    #[test]
    fn templates_are_derivatives() {
        const TOL: f64 = 0.0001;
        const DU: f64 = 0.00001;

        for source in ["sin(u)", "cos(u)", "tan(u)", "cot(u)", "csc(u)", "sec(u)", "u^4"] {
            let f = outer(source);
            let rule = lookup(&f).unwrap();
            for point in [0.4, 1.1] {
                let numerical = (eval(&f, PLACEHOLDER, point + DU) - eval(&f, PLACEHOLDER, point)) / DU;
                let symbolic = eval(&rule.derivative, PLACEHOLDER, point);
                assert!(
                    (numerical - symbolic).abs() < TOL * numerical.abs().max(1.0),
                    "for `{}` at u={}, the table gives {} but the finite difference gives {}",
                    source, point, symbolic, numerical,
                );
            }
        }
    }
}
