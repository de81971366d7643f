mod command;
mod error;
mod session;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, LevelFilter};
use rustyline::{error::ReadlineError, DefaultEditor};
use session::{Outcome, Session};
use std::{fs::File, io::{self, BufRead, BufReader, IsTerminal}, path::PathBuf, process::ExitCode};

/// Explore binomial expansions and practice expanding, identifying and reading coefficients.
#[derive(Parser, Debug)]
#[command(name = "binom", version, about)]
struct Args {
    /// Seed for the exercise generator. A random seed is used if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Log level, used unless `RUST_LOG` is set.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// File of commands to run, one per line, instead of reading from the terminal.
    script: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Runs one line, printing its output or error. Returns false if the session should end.
fn run_line(session: &mut Session, line: &str) -> bool {
    match session.execute(line) {
        Ok(Outcome::Print(out)) => println!("{}", out),
        Ok(Outcome::Nothing) => (),
        Ok(Outcome::Quit) => return false,
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr(line) {
                eprintln!("{}", io_err);
            }
        },
    }
    true
}

/// Runs every line of `reader` until it ends or a line quits.
fn run_lines(session: &mut Session, reader: impl BufRead) -> io::Result<()> {
    for line in reader.lines() {
        if !run_line(session, &line?) {
            break;
        }
    }
    Ok(())
}

/// Runs the interactive prompt.
fn run_interactive(session: &mut Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&input)?;
        if !run_line(session, &input) {
            return Ok(());
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = LevelFilter::from(args.log_level);
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str())).init();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("exercise seed is {}", seed);
    let mut session = Session::new(seed);

    let result = if let Some(path) = args.script {
        File::open(&path)
            .and_then(|file| run_lines(&mut session, BufReader::new(file)))
            .map_err(|err| format!("{}: {}", path.display(), err))
    } else if !io::stdin().is_terminal() {
        run_lines(&mut session, io::stdin().lock()).map_err(|err| err.to_string())
    } else {
        run_interactive(&mut session).map_err(|err| err.to_string())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}
