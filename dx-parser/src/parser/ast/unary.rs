use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::op::UnaryOp,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary operation, such as `-x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary operation.
    pub operand: Box<Expr>,

    /// The unary operator.
    pub op: UnaryOp,

    /// The region of the source code that this unary operation was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Parses a unary operation, or a primary expression if there is no unary operator.
    ///
    /// The operand absorbs every following operator that binds tighter than the unary operator,
    /// so `-x^2` is parsed as `-(x^2)`.
    pub(crate) fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Ok(op) = input.try_parse::<UnaryOp>() else {
            return Expr::parse_primary(input);
        };

        let operand = Self::parse_or_lower(input)?;
        let operand = Binary::parse_expr(input, operand, op.precedence())?;
        let span = op.span.start..operand.span().end;

        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.kind, self.operand)
    }
}
