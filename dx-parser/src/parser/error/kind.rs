use ariadne::Fmt;
use dx_attrs::ErrorKind;
use dx_error::EXPR;
use crate::{parser::ast::call::Func, tokenizer::TokenKind};

/// Lists the names of all supported functions, for help messages.
fn supported_functions() -> String {
    Func::ALL.iter()
        .map(|func| format!("`{}`", func.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// An operator was found where an operand should be, such as in `x + * 2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an expression, found `{}`", found),
    labels = [format!("add an {} before this", "expression".fg(EXPR))],
)]
pub struct ExpectedExpr {
    /// The lexeme of the token that was found.
    pub found: String,
}

/// A character that is not part of the grammar was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown token `{}`", lexeme),
    labels = ["this is not a number, name, operator or parenthesis"],
)]
pub struct UnknownToken {
    /// The unrecognized text.
    pub lexeme: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A name was used as a call target, but it is not a supported function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = ["this function is not supported"],
    help = match suggestion {
        Some(func) => format!("did you mean `{}`?", func.name().fg(EXPR)),
        None => format!("the supported functions are {}", supported_functions()),
    },
)]
pub struct UnknownFunction {
    /// The name that was called.
    pub name: String,

    /// The supported function with the closest name, if any is close enough.
    pub suggestion: Option<Func>,
}

/// A function name was used without an argument list.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument for `{}`", func.name()),
    labels = ["this function is not called"],
    help = format!("write the argument in parentheses, e.g. `{}`", format!("{}(x)", func.name()).fg(EXPR)),
)]
pub struct UncalledFunction {
    /// The function that was named.
    pub func: Func,
}

/// A function was called with more than one argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("too many arguments for `{}`", func.name()),
    labels = ["extra arguments start here"],
    help = format!("`{}` takes exactly one argument", func.name()),
)]
pub struct TooManyArguments {
    /// The function that was called.
    pub func: Func,
}

/// Two operands appeared next to each other without an operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator",
    labels = [format!("add an operator such as {} before this", "*".fg(EXPR))],
    help = format!("multiplication must be written explicitly: {} instead of {}", "2*x".fg(EXPR), "2x".fg(EXPR)),
)]
pub struct MissingOperator;
