mod command;
mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};
use tracing_subscriber::EnvFilter;

/// Runs one command, printing its output or reporting its error.
fn run_line(line: &str, session: &mut Session) {
    match session.execute(line) {
        Ok(output) => output.iter().for_each(|line| println!("{}", line)),
        Err(err) => err.report_to_stderr(line),
    }
}

/// Runs every command in a script, one per line. Blank lines and lines starting with `#` are
/// skipped.
fn run_script(script: &str, session: &mut Session) {
    script.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .for_each(|line| run_line(line, session));
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut session = Session::new();
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run script file
        match fs::read_to_string(&filename) {
            Ok(script) => run_script(&script, &mut session),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read script from stdin
        let mut script = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut script) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }

        run_script(&script, &mut session);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(&input, session);
            Ok(())
        }

        println!("type `help` for a list of commands");
        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    ExitCode::SUCCESS
}
