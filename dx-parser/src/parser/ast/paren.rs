use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the innermost expression inside the parentheses.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }
}

/// Fails with [`kind::EmptyParenthesis`] if the next token closes the parenthesis opened at
/// `open`.
pub(crate) fn reject_empty(input: &mut Parser, open: &Range<usize>) -> Result<(), Error> {
    match input.peek_token() {
        Some(token) if token.kind == TokenKind::CloseParen => {
            Err(Error::new(vec![open.start..token.span.end], kind::EmptyParenthesis))
        },
        _ => Ok(()),
    }
}

/// Parses the `)` matching the parenthesis opened at `open`, returning its span.
pub(crate) fn close_paren(input: &mut Parser, open: &Range<usize>) -> Result<Range<usize>, Error> {
    let unclosed = || Error::new(vec![open.clone()], kind::UnclosedParenthesis { opening: true });
    let Some(token) = input.peek_token() else {
        return Err(unclosed());
    };

    match token.kind {
        TokenKind::CloseParen => (),
        next if next.starts_operand() || next == TokenKind::Symbol => return Err(input.leftover_error(token)),
        _ => return Err(unclosed()),
    }

    Ok(input.try_parse::<CloseParen>()?.span)
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?.span;
        reject_empty(input, &open)?;
        let expr = input.try_parse::<Expr>()?;
        let close = close_paren(input, &open)?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.start..close.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
