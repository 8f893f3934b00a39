use ariadne::Source;
use dx_compute::calculus;

/// Utility enum to package errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// The command itself could not be understood.
    Command(dx_error::Error),

    /// The calculation failed. `source` is the text of the field that the error points into.
    Calculation {
        error: calculus::Error,
        source: String,
    },
}

impl Error {
    /// Report the error to stderr, highlighting the offending part of the given line or field.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, line: &str) {
        let result = match self {
            Self::Command(err) => err.build_report("input").eprint(("input", Source::from(line))),
            Self::Calculation { error, source } => error.report_to_stderr(source),
        };

        if let Err(err) = result {
            eprintln!("could not write the error report: {}", err);
        }
    }
}

impl From<dx_error::Error> for Error {
    fn from(err: dx_error::Error) -> Self {
        Self::Command(err)
    }
}
