//! Errors produced by a calculation.

use ariadne::{Fmt, Source};
use dx_attrs::ErrorKind;
use dx_error::EXPR;
use std::{fmt, io, ops::Range};

/// Names one of the inputs of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The inner function `g(x)` of the chain rule.
    Inner,

    /// The outer function `f(u)` of the chain rule.
    Outer,

    /// The numerator `u(x)` of the quotient rule.
    Numerator,

    /// The denominator `v(x)` of the quotient rule.
    Denominator,

    /// The variable of differentiation.
    Variable,
}

impl Input {
    /// Returns a short name for the input, used as the source name in reports.
    pub fn name(self) -> &'static str {
        match self {
            Input::Inner => "inner",
            Input::Outer => "outer",
            Input::Numerator => "numerator",
            Input::Denominator => "denominator",
            Input::Variable => "variable",
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Why a variable name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidVariableReason {
    /// The name is empty.
    Empty,

    /// The name is not a single identifier.
    NotIdentifier,

    /// The name is one of the supported functions.
    FunctionName,
}

impl fmt::Display for InvalidVariableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "the variable name is empty"),
            Self::NotIdentifier => write!(f, "the variable name must be a single identifier"),
            Self::FunctionName => write!(f, "the variable name is already the name of a function"),
        }
    }
}

/// The variable of differentiation is not a valid name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid variable",
    labels = [reason.to_string()],
    help = format!("use a name such as `{}` or `{}`", "x".fg(EXPR), "t".fg(EXPR)),
)]
pub struct InvalidVariable {
    /// Why the name was rejected.
    pub reason: InvalidVariableReason,
}

/// An expression divides by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this simplifies to zero"],
)]
pub struct DivisionByZero;

/// The derivative of an expression cannot be computed symbolically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}`", expr),
    labels = ["in this expression"],
    help = format!("exponents may not depend on `{}`", var.fg(EXPR)),
)]
pub struct UnsupportedDerivative {
    /// The sub-expression whose derivative could not be computed.
    pub expr: String,

    /// The variable of differentiation.
    pub var: String,
}

/// The error of a failed calculation. No partial result accompanies it.
#[derive(Debug)]
pub enum Error {
    /// An input could not be parsed.
    Parse {
        input: Input,
        error: dx_error::Error,
    },

    /// The variable name is not valid.
    InvalidVariable {
        error: dx_error::Error,
    },

    /// An input, or the denominator of the quotient rule, divides by zero.
    DivisionByZero {
        input: Input,
        error: dx_error::Error,
    },

    /// A derivative could not be computed symbolically.
    UnsupportedDerivative {
        input: Input,
        error: dx_error::Error,
    },
}

impl Error {
    /// Returns the input that caused the error.
    pub fn input(&self) -> Input {
        match self {
            Error::Parse { input, .. }
            | Error::DivisionByZero { input, .. }
            | Error::UnsupportedDerivative { input, .. } => *input,
            Error::InvalidVariable { .. } => Input::Variable,
        }
    }

    /// Returns the underlying error, which carries the spans into the input's source.
    pub fn inner(&self) -> &dx_error::Error {
        match self {
            Error::Parse { error, .. }
            | Error::InvalidVariable { error }
            | Error::DivisionByZero { error, .. }
            | Error::UnsupportedDerivative { error, .. } => error,
        }
    }

    /// Returns the spans of the input that the error points at.
    pub fn spans(&self) -> &[Range<usize>] {
        &self.inner().spans
    }

    /// Builds the report for this error. The report refers to the source by the name of the
    /// input.
    pub fn build_report(&self) -> ariadne::Report<(&'static str, Range<usize>)> {
        self.inner().build_report(self.input().name())
    }

    /// Reports the error to stderr, highlighting the given source text of the offending input.
    pub fn report_to_stderr(&self, source: &str) -> io::Result<()> {
        self.build_report()
            .eprint((self.input().name(), Source::from(source)))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { input, .. } => write!(f, "could not parse the {} input", input),
            Error::InvalidVariable { error } => match error.downcast_ref::<InvalidVariable>() {
                Some(kind) => write!(f, "invalid variable: {}", kind.reason),
                None => write!(f, "invalid variable"),
            },
            Error::DivisionByZero { input, .. } => write!(f, "the {} input divides by zero", input),
            Error::UnsupportedDerivative { input, error } => match error.downcast_ref::<UnsupportedDerivative>() {
                Some(kind) => write!(f, "cannot differentiate `{}` in the {} input", kind.expr, input),
                None => write!(f, "cannot differentiate the {} input", input),
            },
        }
    }
}

impl std::error::Error for Error {}
