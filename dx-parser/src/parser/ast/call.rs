use crate::{
    parser::{
        ast::{expr::Expr, paren::{close_paren, reject_empty}},
        error::{kind, Error},
        token::{Name, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use levenshtein::levenshtein;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The functions that can be called. Each takes exactly one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Exp,
    Log,
    Sqrt,
}

impl Func {
    /// Every supported function.
    pub const ALL: [Func; 9] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Cot,
        Func::Sec,
        Func::Csc,
        Func::Exp,
        Func::Log,
        Func::Sqrt,
    ];

    /// Returns the name used to call the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Cot => "cot",
            Func::Sec => "sec",
            Func::Csc => "csc",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
        }
    }

    /// Returns the function with exactly the given name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Func> {
        Func::ALL.into_iter().find(|func| func.name() == name)
    }

    /// Returns the function whose name is closest to the given name, if one is within two edits.
    pub fn closest(name: &str) -> Option<Func> {
        Func::ALL.into_iter()
            .map(|func| (levenshtein(name, func.name()), func))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, func)| func)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A function call, such as `sin(2*x)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function being called.
    pub func: Func,

    /// The region of the source code that the function name was parsed from.
    pub name_span: Range<usize>,

    /// The argument of the call.
    pub arg: Box<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,

    /// The region of the source code containing the parentheses and the argument.
    pub paren_span: Range<usize>,
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        let func = Func::from_name(&name.lexeme).ok_or_else(|| {
            Error::new(vec![name.span.clone()], kind::UnknownFunction {
                suggestion: Func::closest(&name.lexeme),
                name: name.lexeme.clone(),
            })
        })?;

        let open = input.try_parse::<OpenParen>()?.span;
        reject_empty(input, &open)?;
        let arg = input.try_parse::<Expr>()?;

        if let Some(comma) = input.peek_token().filter(|token| token.kind == TokenKind::Comma) {
            return Err(Error::new(vec![comma.span.clone()], kind::TooManyArguments { func }));
        }

        let close = close_paren(input, &open)?;

        Ok(Self {
            func,
            name_span: name.span.clone(),
            arg: Box::new(arg),
            span: name.span.start..close.end,
            paren_span: open.start..close.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.func, self.arg)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn names_round_trip() {
        for func in Func::ALL {
            assert_eq!(Func::from_name(func.name()), Some(func));
        }
        assert_eq!(Func::from_name("Sin"), None);
    }

    #[test]
    fn closest_name() {
        assert_eq!(Func::closest("sinn"), Some(Func::Sin));
        assert_eq!(Func::closest("sqr"), Some(Func::Sqrt));
        assert_eq!(Func::closest("arctangent"), None);
    }
}
