//! Conversion of a syntax tree into a [`SymExpr`].

use ariadne::Fmt;
use crate::primitive::rational_from_str;
use dx_attrs::ErrorKind;
use dx_error::{Error, EXPR};
use dx_parser::parser::{
    ast::{Expr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use super::SymExpr;

/// A name was used that is not one of the symbols allowed in the expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown variable `{}`", name),
    labels = ["this variable"],
    help = format!(
        "only {} can be used here",
        allowed.iter().map(|sym| format!("`{}`", sym.fg(EXPR))).collect::<Vec<_>>().join(", "),
    ),
)]
pub struct UnknownSymbol {
    /// The name that was used.
    pub name: String,

    /// The names that are allowed.
    pub allowed: Vec<String>,
}

/// A number literal could not be converted into an exact value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", value),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal as written.
    pub value: String,
}

impl SymExpr {
    /// Converts the given syntax tree into a [`SymExpr`].
    ///
    /// Only the names in `symbols` may appear in the expression; any other name is reported as an
    /// [`UnknownSymbol`] error pointing at the name.
    pub fn bind(expr: &Expr, symbols: &[&str]) -> Result<Self, Error> {
        Ok(match expr {
            Expr::Literal(Literal::Number(num)) => {
                let value = rational_from_str(&num.value)
                    .ok_or_else(|| Error::new(vec![num.span.clone()], InvalidNumber {
                        value: num.value.clone(),
                    }))?;
                Self::number(value)
            },
            Expr::Literal(Literal::Symbol(sym)) => {
                if !symbols.contains(&sym.name.as_str()) {
                    return Err(Error::new(vec![sym.span.clone()], UnknownSymbol {
                        name: sym.name.clone(),
                        allowed: symbols.iter().map(|s| s.to_string()).collect(),
                    }));
                }
                Self::symbol(sym.name.as_str())
            },
            Expr::Paren(paren) => Self::bind(&paren.expr, symbols)?,
            Expr::Call(call) => Self::call(call.func, Self::bind(&call.arg, symbols)?),
            Expr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::bind(&unary.operand, symbols)?,
            },
            Expr::Binary(binary) => {
                let lhs = Self::bind(&binary.lhs, symbols)?;
                let rhs = Self::bind(&binary.rhs, symbols)?;
                match binary.op.kind {
                    BinOpKind::Exp => lhs.pow(rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs * rhs.recip(),
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs + -rhs,
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use dx_parser::{parse, parser::ast::Func};
    use pretty_assertions::assert_eq;
    use super::*;

    fn bind(source: &str) -> Result<SymExpr, Error> {
        SymExpr::bind(&parse(source).unwrap(), &["x"])
    }

    #[test]
    fn subtraction_and_division() {
        let x = SymExpr::symbol("x");
        assert_eq!(
            bind("x - 1").unwrap(),
            SymExpr::Add(vec![x.clone(), SymExpr::number(-1)]),
        );
        assert_eq!(
            bind("2 / x").unwrap(),
            SymExpr::Mul(vec![SymExpr::number(2), x.recip()]),
        );
    }

    #[test]
    fn decimals_are_exact() {
        assert_eq!(bind("0.25").unwrap(), SymExpr::number((1, 4)));
    }

    #[test]
    fn calls_and_parens() {
        assert_eq!(
            bind("sin((x))").unwrap(),
            SymExpr::call(Func::Sin, SymExpr::symbol("x")),
        );
    }

    #[test]
    fn unknown_symbol() {
        let err = bind("x + y").unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
        assert_eq!(err.downcast_ref::<UnknownSymbol>(), Some(&UnknownSymbol {
            name: "y".to_string(),
            allowed: vec!["x".to_string()],
        }));
    }
}
