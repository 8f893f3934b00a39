use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::Error,
    token::op::BinOp,
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary operation, such as `x + 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary operation.
    pub lhs: Box<Expr>,

    /// The binary operator.
    pub op: BinOp,

    /// The right-hand side of the binary operation.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary operation was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Extends `lhs` with every following binary operator whose precedence is at least
    /// `precedence`, using precedence climbing.
    pub(crate) fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = input.lookahead::<BinOp>().filter(|op| op.precedence() >= precedence) {
            input.try_parse::<BinOp>()?;
            let mut rhs = Unary::parse_or_lower(input)?;

            // an operator that binds tighter, or a right-associative one at the same level, takes
            // the right-hand side as its own left operand
            while let Some(next) = input.lookahead::<BinOp>().filter(|next| {
                next.precedence() > op.precedence()
                    || (next.precedence() == op.precedence() && next.associativity() == Associativity::Right)
            }) {
                rhs = Self::parse_expr(input, rhs, next.precedence())?;
            }

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Self {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.kind, self.rhs)
    }
}
