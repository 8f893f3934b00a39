use ariadne::Fmt;
use dx_attrs::ErrorKind;
use dx_compute::calculus::Input;
use dx_error::{Error, EXPR};
use levenshtein::levenshtein;
use std::{ops::Range, str::FromStr};

/// The names of all commands.
const COMMANDS: [&str; 5] = ["chain", "quotient", "total", "reset", "help"];

const CHAIN_USAGE: &str = "chain <inner> ; <outer> ; <variable>";
const QUOTIENT_USAGE: &str = "quotient <numerator> ; <denominator> ; <variable>";

/// The text printed by the `help` command.
pub const HELP: &str = "\
commands:
  chain <inner> ; <outer> ; <variable>
      differentiate f(g(x)), where g is <inner> and f is <outer> written in terms of `u`,
      and add the result to the running total
  quotient <numerator> ; <denominator> ; <variable>
      differentiate <numerator> / <denominator>, clearing the running total
  total
      print the running total
  reset
      clear the running total
  help
      print this message

functions: sin cos tan cot sec csc exp log sqrt
example: chain 2*x ; sin(u) ; x";

/// The command name is not one of the known commands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this command"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => format!("the commands are {}", COMMANDS.join(", ")),
    },
)]
pub struct UnknownCommand {
    /// The name that was given.
    pub name: String,

    /// The closest known command, if any is close enough.
    pub suggestion: Option<&'static str>,
}

/// A command was given the wrong number of `;`-separated fields.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes 3 fields separated by `;`, found {}", command, found),
    labels = ["these fields"],
    help = format!("usage: {}", usage),
)]
pub struct WrongFieldCount {
    pub command: &'static str,
    pub usage: &'static str,
    pub found: usize,
}

/// A field of a command is blank.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the {} is missing", field),
    labels = [format!("add an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyField {
    pub field: &'static str,
}

/// A command that takes no arguments was given some.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes no arguments", command),
    labels = ["remove this"],
)]
pub struct UnexpectedArguments {
    pub command: &'static str,
}

/// A command entered in the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `chain <inner> ; <outer> ; <variable>`
    Chain {
        inner: String,
        outer: String,
        variable: String,
    },

    /// `quotient <numerator> ; <denominator> ; <variable>`
    Quotient {
        numerator: String,
        denominator: String,
        variable: String,
    },

    /// `total`
    Total,

    /// `reset`
    Reset,

    /// `help`
    Help,
}

impl Command {
    /// Returns the text of the field that the given calculation input was read from.
    pub fn source_of(&self, input: Input) -> &str {
        match (self, input) {
            (Command::Chain { inner, .. }, Input::Inner) => inner,
            (Command::Chain { outer, .. }, Input::Outer) => outer,
            (Command::Quotient { numerator, .. }, Input::Numerator) => numerator,
            (Command::Quotient { denominator, .. }, Input::Denominator) => denominator,
            (Command::Chain { variable, .. } | Command::Quotient { variable, .. }, Input::Variable) => variable,
            _ => "",
        }
    }
}

/// Returns the known command closest to the given name, if one is within two edits.
fn closest(name: &str) -> Option<&'static str> {
    COMMANDS.into_iter()
        .map(|command| (levenshtein(name, command), command))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, command)| command)
}

/// Splits the arguments of a command into three trimmed `;`-separated fields. `offset` is the
/// position of `args` in the line, so that the spans of errors point into the whole line.
fn fields(
    args: &str,
    offset: usize,
    command: &'static str,
    usage: &'static str,
    names: [&'static str; 3],
) -> Result<[String; 3], Error> {
    let mut spans: Vec<Range<usize>> = Vec::new();
    let mut start = 0;
    for part in args.split(';') {
        spans.push(start..start + part.len());
        start += part.len() + 1;
    }

    if spans.len() != 3 {
        let found = if args.trim().is_empty() { 0 } else { spans.len() };
        let span = offset..offset + args.len();
        return Err(Error::new(vec![span], WrongFieldCount { command, usage, found }));
    }

    let field = |i: usize| {
        let span = spans[i].clone();
        let text = args[span.clone()].trim();
        if text.is_empty() {
            let span = offset + span.start..offset + span.end;
            Err(Error::new(vec![span], EmptyField { field: names[i] }))
        } else {
            Ok(text.to_owned())
        }
    };

    Ok([field(0)?, field(1)?, field(2)?])
}

/// Fails if a command that takes no arguments was given some.
fn no_arguments(args: &str, offset: usize, command: &'static str) -> Result<(), Error> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        let span = offset..offset + args.len();
        Err(Error::new(vec![span], UnexpectedArguments { command }))
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let start = line.len() - line.trim_start().len();
        let rest = &line[start..];
        let name_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let name = &rest[..name_len];

        let offset = start + name_len;
        let args = &line[offset..];

        match name {
            "chain" => {
                let [inner, outer, variable] = fields(
                    args,
                    offset,
                    "chain",
                    CHAIN_USAGE,
                    ["inner function", "outer function", "variable"],
                )?;
                Ok(Command::Chain { inner, outer, variable })
            },
            "quotient" => {
                let [numerator, denominator, variable] = fields(
                    args,
                    offset,
                    "quotient",
                    QUOTIENT_USAGE,
                    ["numerator", "denominator", "variable"],
                )?;
                Ok(Command::Quotient { numerator, denominator, variable })
            },
            "total" => no_arguments(args, offset, "total").map(|()| Command::Total),
            "reset" => no_arguments(args, offset, "reset").map(|()| Command::Reset),
            "help" => Ok(Command::Help),
            _ => Err(Error::new(vec![start..offset], UnknownCommand {
                name: name.to_owned(),
                suggestion: closest(name),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn chain() {
        let command = "chain 2*x ; sin(u) ; x".parse::<Command>().unwrap();
        assert_eq!(command, Command::Chain {
            inner: "2*x".to_string(),
            outer: "sin(u)".to_string(),
            variable: "x".to_string(),
        });
        assert_eq!(command.source_of(Input::Outer), "sin(u)");
    }

    #[test]
    fn quotient() {
        let command = "  quotient x;x + 1;t ".parse::<Command>().unwrap();
        assert_eq!(command, Command::Quotient {
            numerator: "x".to_string(),
            denominator: "x + 1".to_string(),
            variable: "t".to_string(),
        });
        assert_eq!(command.source_of(Input::Variable), "t");
        assert_eq!(command.source_of(Input::Inner), "");
    }

    #[test]
    fn simple_commands() {
        assert_eq!("total".parse::<Command>().unwrap(), Command::Total);
        assert_eq!(" reset  ".parse::<Command>().unwrap(), Command::Reset);
        assert_eq!("help me".parse::<Command>().unwrap(), Command::Help);
    }

    #[test]
    fn unknown_command() {
        let err = "chian x ; sin(u) ; x".parse::<Command>().unwrap_err();
        assert_eq!(err.spans, vec![0..5]);
        assert_eq!(err.downcast_ref::<UnknownCommand>(), Some(&UnknownCommand {
            name: "chian".to_string(),
            suggestion: Some("chain"),
        }));

        let err = "differentiate x".parse::<Command>().unwrap_err();
        assert_eq!(err.downcast_ref::<UnknownCommand>().and_then(|kind| kind.suggestion), None);
    }

    #[test]
    fn wrong_field_count() {
        let err = "chain x ; sin(u)".parse::<Command>().unwrap_err();
        assert_eq!(err.spans, vec![5..16]);
        assert_eq!(err.downcast_ref::<WrongFieldCount>().map(|kind| kind.found), Some(2));

        let err = "quotient".parse::<Command>().unwrap_err();
        assert_eq!(err.downcast_ref::<WrongFieldCount>().map(|kind| kind.found), Some(0));
    }

    #[test]
    fn empty_field() {
        let err = "chain x ;  ; x".parse::<Command>().unwrap_err();
        assert_eq!(err.spans, vec![9..11]);
        assert_eq!(err.downcast_ref::<EmptyField>(), Some(&EmptyField { field: "outer function" }));
    }

    #[test]
    fn unexpected_arguments() {
        let err = "reset now".parse::<Command>().unwrap_err();
        assert_eq!(err.spans, vec![5..9]);
        assert!(err.is::<UnexpectedArguments>());
    }
}
