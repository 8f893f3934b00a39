use crate::symbolic::expr::SymExpr;
use std::fmt;

/// Renders an expression that is the first operand of a product, wrapping sums in parentheses.
struct Leading<'a>(&'a SymExpr);

impl fmt::Display for Leading<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SymExpr::Add(_) => write!(f, "({})", self.0),
            expr => write!(f, "{}", expr),
        }
    }
}

/// Renders an expression that follows an operator, wrapping sums and negative expressions in
/// parentheses.
struct Operand<'a>(&'a SymExpr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.to_string();
        if matches!(self.0, SymExpr::Add(_)) || rendered.starts_with('-') {
            write!(f, "({})", rendered)
        } else {
            write!(f, "{}", rendered)
        }
    }
}

/// One step of a derivation. Each step renders as a full sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `Let g(x) = …`
    DefineInner {
        var: String,
        inner: SymExpr,
    },

    /// `Let f(u) = …`
    DefineOuter {
        outer: SymExpr,
    },

    /// `Compute g'(x) = …`
    InnerDerivative {
        var: String,
        derivative: SymExpr,
    },

    /// `Compute f'(u) = …`
    ///
    /// `manual` is true if the derivative came from the rule table, in which case `display` is the
    /// textbook form of the derivative.
    OuterDerivative {
        display: String,
        manual: bool,
    },

    /// `Substitute u = g(x) into f'(u): f'(g(x)) = …`
    Substitute {
        var: String,
        substituted: SymExpr,
    },

    /// `Multiply by g'(x): … * …`
    MultiplyInnerDerivative {
        var: String,
        substituted: SymExpr,
        inner_derivative: SymExpr,
    },

    /// `Let u(x) = …, v(x) = …`
    DefineQuotient {
        var: String,
        numerator: SymExpr,
        denominator: SymExpr,
    },

    /// `Compute u'(x) = …, v'(x) = …`
    QuotientDerivatives {
        var: String,
        numerator: SymExpr,
        denominator: SymExpr,
    },

    /// `Apply the quotient rule: (u' * v - u * v') / v**2 = …`
    ApplyQuotientRule {
        numerator: SymExpr,
        denominator: SymExpr,
        numerator_derivative: SymExpr,
        denominator_derivative: SymExpr,
    },

    /// `Simplify: …`
    Simplify {
        result: SymExpr,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::DefineInner { var, inner } => write!(f, "Let g({}) = {}", var, inner),
            Step::DefineOuter { outer } => write!(f, "Let f(u) = {}", outer),
            Step::InnerDerivative { var, derivative } => write!(f, "Compute g'({}) = {}", var, derivative),
            Step::OuterDerivative { display, .. } => write!(f, "Compute f'(u) = {}", display),
            Step::Substitute { var, substituted } => {
                write!(f, "Substitute u = g({0}) into f'(u): f'(g({0})) = {1}", var, substituted)
            },
            Step::MultiplyInnerDerivative { var, substituted, inner_derivative } => write!(
                f,
                "Multiply by g'({}): {} * {}",
                var,
                Leading(substituted),
                Operand(inner_derivative),
            ),
            Step::DefineQuotient { var, numerator, denominator } => {
                write!(f, "Let u({0}) = {1}, v({0}) = {2}", var, numerator, denominator)
            },
            Step::QuotientDerivatives { var, numerator, denominator } => {
                write!(f, "Compute u'({0}) = {1}, v'({0}) = {2}", var, numerator, denominator)
            },
            Step::ApplyQuotientRule { numerator, denominator, numerator_derivative, denominator_derivative } => write!(
                f,
                "Apply the quotient rule: (u' * v - u * v') / v**2 = ({} * {} - {} * {}) / ({})**2",
                Leading(numerator_derivative),
                Operand(denominator),
                Operand(numerator),
                Operand(denominator_derivative),
                denominator,
            ),
            Step::Simplify { result } => write!(f, "Simplify: {}", result),
        }
    }
}

#[cfg(test)]
mod tests {
    use dx_parser::parser::ast::Func;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn multiply_groups_sums() {
        let x = SymExpr::symbol("x");
        let step = Step::MultiplyInnerDerivative {
            var: "x".to_string(),
            substituted: SymExpr::call(Func::Cos, x.clone().pow(SymExpr::number(2))),
            inner_derivative: SymExpr::number(2) * x.clone() + SymExpr::number(1),
        };
        assert_eq!(step.to_string(), "Multiply by g'(x): cos(x**2) * (2*x + 1)");
    }

    #[test]
    fn multiply_groups_negative_operand() {
        let step = Step::MultiplyInnerDerivative {
            var: "t".to_string(),
            substituted: -SymExpr::call(Func::Sin, SymExpr::symbol("t")),
            inner_derivative: SymExpr::number(-3),
        };
        assert_eq!(step.to_string(), "Multiply by g'(t): -sin(t) * (-3)");
    }

    #[test]
    fn quotient_groups_negative_numerator() {
        let x = SymExpr::symbol("x");
        let step = Step::ApplyQuotientRule {
            numerator: -x.clone(),
            denominator: x.clone() + SymExpr::number(1),
            numerator_derivative: SymExpr::number(-1),
            denominator_derivative: SymExpr::number(1),
        };
        assert_eq!(
            step.to_string(),
            "Apply the quotient rule: (u' * v - u * v') / v**2 = (-1 * (x + 1) - (-x) * 1) / (x + 1)**2",
        );
    }
}
