use crate::{command::{Command, HELP}, error::Error};
use dx_compute::calculus::{compute_chain_rule, compute_quotient_rule, Derivation, RunningTotal};
use tracing::debug;

/// A REPL session, which owns the running total of chain rule results.
#[derive(Debug, Default)]
pub struct Session {
    total: RunningTotal,
}

impl Session {
    /// Creates a session with no running total.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and runs one command, returning the lines to print.
    pub fn execute(&mut self, line: &str) -> Result<Vec<String>, Error> {
        let command = line.parse::<Command>()?;
        debug!(?command, "executing command");

        let derivation = match &command {
            Command::Chain { inner, outer, variable } => {
                compute_chain_rule(inner, outer, variable, self.total.get())
            },
            Command::Quotient { numerator, denominator, variable } => {
                compute_quotient_rule(numerator, denominator, variable)
            },
            Command::Total => return Ok(vec![self.total_line()]),
            Command::Reset => {
                self.total.reset();
                return Ok(vec![self.total_line()]);
            },
            Command::Help => return Ok(HELP.lines().map(str::to_owned).collect()),
        };

        let derivation = derivation.map_err(|error| Error::Calculation {
            source: command.source_of(error.input()).to_owned(),
            error,
        })?;
        self.total.apply(&derivation.running_total);
        Ok(self.render(&derivation))
    }

    /// Describes the running total.
    fn total_line(&self) -> String {
        match self.total.get() {
            Some(total) => format!("running total: {}", total),
            None => "running total: (none)".to_string(),
        }
    }

    /// Renders a derivation as its numbered steps, the result and the new running total.
    fn render(&self, derivation: &Derivation) -> Vec<String> {
        let mut lines = vec![format!("using the {}:", derivation.rule)];
        lines.extend(derivation.numbered_steps().into_iter().map(|step| format!("  {}", step)));
        lines.push(format!("result: {}", derivation.result));
        lines.push(self.total_line());
        lines
    }
}
