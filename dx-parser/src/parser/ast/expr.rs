use crate::{
    parser::{
        ast::{binary::Binary, call::{Call, Func}, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number or a name.
    Literal(Literal),

    /// A parenthesized expression, such as `(x + 1)`.
    Paren(Paren),

    /// A call to one of the supported functions, such as `sin(x)`.
    Call(Call),

    /// Unary negation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `x * 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span.clone(),
            Expr::Call(call) => call.span.clone(),
            Expr::Unary(unary) => unary.span.clone(),
            Expr::Binary(binary) => binary.span.clone(),
        }
    }

    /// If this expression is a [`Paren`], returns the innermost expression inside the
    /// parentheses. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Parses a primary expression: a literal, a call, or a parenthesized expression.
    ///
    /// The next two tokens decide which one is parsed, so no backtracking is needed.
    pub(crate) fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        let (first, second) = {
            let mut upcoming = input.upcoming();
            let first = upcoming.next().cloned();
            (first, upcoming.next().map(|token| token.kind))
        };

        let Some(token) = first else {
            return Err(input.error(kind::UnexpectedEof));
        };

        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Expr::Literal(input.try_parse()?)),
            TokenKind::Name if second == Some(TokenKind::OpenParen) => Ok(Expr::Call(input.try_parse()?)),
            TokenKind::Name => match Func::from_name(token.lexeme) {
                Some(func) => Err(Error::new(vec![token.span], kind::UncalledFunction { func })),
                None => Ok(Expr::Literal(input.try_parse()?)),
            },
            TokenKind::OpenParen => Ok(Expr::Paren(input.try_parse()?)),
            TokenKind::Symbol => Err(Error::new(vec![token.span], kind::UnknownToken {
                lexeme: token.lexeme.to_owned(),
            })),
            _ => Err(Error::new(vec![token.span], kind::ExpectedExpr {
                found: token.lexeme.to_owned(),
            })),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
