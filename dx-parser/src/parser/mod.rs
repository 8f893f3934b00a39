pub mod ast;
pub mod error;
pub mod token;

use ast::expr::Expr;
use error::{kind, Error};
use dx_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Parses the given source into an expression. All of the source must be consumed.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).try_parse_full::<Expr>()
}

/// A high-level parser for the expression grammar. This is the type to use to parse a piece of
/// text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// is none.
    pub fn span(&self) -> Range<usize> {
        self.peek_token().map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns an iterator over the remaining non-whitespace tokens. The cursor is not moved.
    pub fn upcoming(&self) -> impl Iterator<Item = &Token<'source>> {
        self.tokens[self.cursor..].iter().filter(|token| !token.is_whitespace())
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.upcoming().next()
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. If parsing fails, the cursor
    /// is restored to where it was before the call.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value using a custom parsing function. If parsing fails, the cursor
    /// is restored to where it was before the call.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a value and returns it, but leaves the cursor where it was. Returns [`None`] if the
    /// value could not be parsed.
    pub fn lookahead<T: Parse>(&mut self) -> Option<T> {
        let start = self.cursor;
        let value = T::parse(self).ok();
        self.cursor = start;
        value
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens, except for
    /// trailing whitespace, must be consumed by the parser; if not, an error describing the
    /// leftover input is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.peek_token() {
            None => Ok(value),
            Some(token) => Err(self.leftover_error(token)),
        }
    }

    /// Builds the error reported when a complete expression is followed by more input.
    pub(crate) fn leftover_error(&self, token: &Token) -> Error {
        let span = vec![token.span.clone()];
        match token.kind {
            next if next.starts_operand() => Error::new(span, kind::MissingOperator),
            TokenKind::CloseParen => Error::new(span, kind::UnclosedParenthesis { opening: false }),
            TokenKind::Symbol => Error::new(span, kind::UnknownToken { lexeme: token.lexeme.to_owned() }),
            _ => Error::new(span, kind::ExpectedEof),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`. For unary operations, the operator appears
    /// to the left of the operand.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        (*self as u8).partial_cmp(&(*other as u8))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::{Call, Func},
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    /// Asserts that parsing the source fails with the error kind `K`.
    fn assert_fails_with<K: ErrorKind + 'static>(source: &str) {
        match parse(source) {
            Ok(expr) => panic!("`{}` parsed as {:?}", source, expr),
            Err(err) => assert!(err.is::<K>(), "`{}` failed with {:?}", source, err.kind),
        }
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("  0.25 ").unwrap(), num("0.25", 2..6));
    }

    #[test]
    fn binary_left_associative() {
        let expr = parse("x - 1 - 2").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 0..1)),
                op: BinOp { kind: BinOpKind::Sub, span: 2..3 },
                rhs: Box::new(num("1", 4..5)),
                span: 0..5,
            })),
            op: BinOp { kind: BinOpKind::Sub, span: 6..7 },
            rhs: Box::new(num("2", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn exponent_right_associative() {
        let expr = parse("x**2^3").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(sym("x", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, span: 1..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("2", 3..4)),
                op: BinOp { kind: BinOpKind::Exp, span: 4..5 },
                rhs: Box::new(num("3", 5..6)),
                span: 3..6,
            })),
            span: 0..6,
        }));
    }

    #[test]
    fn precedence_climbing() {
        assert_eq!(parse("1 + 2*x^2 - x/3").unwrap().to_string(), "1 + 2 * x ^ 2 - x / 3");
        let expr = parse("1 + 2*x^2").unwrap();
        let Expr::Binary(Binary { op, rhs, .. }) = expr else {
            panic!("expected a binary expression");
        };
        assert_eq!(op.kind, BinOpKind::Add);
        assert!(matches!(*rhs, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Mul, .. }, .. })));
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, span: 2..3 },
                rhs: Box::new(num("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negation_binds_tighter_than_product() {
        let expr = parse("-x*2").unwrap();
        assert!(matches!(expr, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Mul, .. }, .. })));
    }

    #[test]
    fn call_and_paren() {
        let expr = parse("sin((u))").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            func: Func::Sin,
            name_span: 0..3,
            arg: Box::new(Expr::Paren(Paren {
                expr: Box::new(sym("u", 5..6)),
                span: 4..7,
            })),
            span: 0..8,
            paren_span: 3..8,
        }));
    }

    #[test]
    fn nested_calls() {
        assert_eq!(parse("exp(log(sqrt(x)))").unwrap().to_string(), "exp(log(sqrt(x)))");
        assert_eq!(parse("csc( u ) * cot(u)").unwrap().to_string(), "csc(u) * cot(u)");
    }

    #[test]
    fn empty_input() {
        assert_fails_with::<kind::UnexpectedEof>("");
        assert_fails_with::<kind::UnexpectedEof>("   ");
    }

    #[test]
    fn implicit_multiplication() {
        assert_fails_with::<kind::MissingOperator>("2x");
        assert_fails_with::<kind::MissingOperator>("(x)(x)");
        assert_fails_with::<kind::MissingOperator>("x y");
        assert_fails_with::<kind::MissingOperator>("sin(x y)");
    }

    #[test]
    fn unknown_function() {
        assert_fails_with::<kind::UnknownFunction>("foo(x)");
        let err = parse("coss(x)").unwrap_err();
        let kind = err.downcast_ref::<kind::UnknownFunction>().unwrap();
        assert_eq!(kind.suggestion, Some(Func::Cos));
        assert_eq!(err.spans, vec![0..4]);

        // `csc` is one edit away, `cos` two
        let err = parse("cso(x)").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::UnknownFunction>().unwrap().suggestion, Some(Func::Csc));
    }

    #[test]
    fn function_names_are_case_sensitive() {
        assert_fails_with::<kind::UnknownFunction>("SIN(x)");
    }

    #[test]
    fn uncalled_function() {
        assert_fails_with::<kind::UncalledFunction>("sin + 1");
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_fails_with::<kind::UnclosedParenthesis>("(x+1");
        assert_fails_with::<kind::UnclosedParenthesis>("x+1)");
        assert_fails_with::<kind::UnclosedParenthesis>("sin(x");
        assert_fails_with::<kind::EmptyParenthesis>("()");
        assert_fails_with::<kind::EmptyParenthesis>("cos()");
    }

    #[test]
    fn operator_placement() {
        assert_fails_with::<kind::ExpectedExpr>("x + * 2");
        assert_fails_with::<kind::ExpectedExpr>("*x");
        assert_fails_with::<kind::UnexpectedEof>("x +");
        assert_fails_with::<kind::UnexpectedEof>("x^");
    }

    #[test]
    fn unknown_tokens() {
        assert_fails_with::<kind::UnknownToken>("x $ 2");
        assert_fails_with::<kind::UnknownToken>("#");
        assert_fails_with::<kind::UnknownToken>("3.");
    }

    #[test]
    fn too_many_arguments() {
        assert_fails_with::<kind::TooManyArguments>("sin(x, 2)");
    }

    #[test]
    fn double_negation_is_allowed() {
        assert_eq!(parse("x - -2").unwrap().to_string(), "x - -2");
    }
}
