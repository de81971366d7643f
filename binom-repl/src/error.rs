use ariadne::Fmt;
use binom_attrs::ErrorKind;
use binom_error::{ErrorKind, EXPR};
use std::io;

/// The command name is not one the REPL knows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this command"],
    help = if suggestions.is_empty() {
        format!("type {} to list the commands", "help".fg(EXPR))
    } else {
        format!(
            "did you mean {}?",
            suggestions
                .iter()
                .map(|s| format!("{}", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(" or "),
        )
    },
)]
pub struct UnknownCommand {
    /// The name that was typed.
    pub name: String,

    /// Known commands with a similar name.
    pub suggestions: Vec<&'static str>,
}

/// A command was given the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {} argument(s), but {} were given", command, expected, found),
    labels = ["these arguments"],
    help = format!("usage: {}", usage.fg(EXPR)),
)]
pub struct ArgumentCount {
    pub command: &'static str,
    pub usage: &'static str,
    pub expected: usize,
    pub found: usize,
}

/// An argument that should be an integer is not one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an integer, found `{}`", text),
    labels = ["this argument"],
)]
pub struct InvalidInteger {
    pub text: String,
}

/// An argument that should be a finite number is not one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected a number, found `{}`", text),
    labels = ["this argument"],
    help = "write numbers like `1.5` or `-2`",
)]
pub struct InvalidNumber {
    pub text: String,
}

/// An argument that should name a variable does not.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a variable name", text),
    labels = ["this argument"],
    help = "variable names start with a letter, like `x` or `t1`",
)]
pub struct InvalidVariable {
    pub text: String,
}

/// `exercise` was asked for a kind of exercise that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown exercise `{}`", kind),
    labels = ["this exercise"],
    help = format!(
        "the exercises are {}, {}, {} and {}",
        "expand".fg(EXPR),
        "coefficient".fg(EXPR),
        "identify [1-3]".fg(EXPR),
        "preset".fg(EXPR),
    ),
)]
pub struct UnknownExercise {
    pub kind: String,
}

/// `answer` or `solution` was used with no exercise in progress.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is no exercise in progress",
    help = format!("start one with {}", "exercise expand".fg(EXPR)),
)]
pub struct NoExercise;

/// A value was outside the range the REPL is willing to compute.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` must be at most {} here, but it is {}", argument, limit, value),
    labels = ["this argument"],
)]
pub struct TooLarge {
    pub argument: &'static str,
    pub value: i64,
    pub limit: i64,
}

/// Errors that can occur while running a line of input.
#[derive(Debug)]
pub enum Error {
    /// The line could not be understood as a command. The spans point into the line.
    Command(binom_error::Error),

    /// The engine rejected an argument. The spans point into `argument`.
    Engine {
        argument: String,
        error: binom_compute::Error,
    },
}

impl Error {
    /// Renders the report for this error, with ANSI color codes.
    pub fn render(&self, line: &str) -> io::Result<String> {
        match self {
            Self::Command(err) => err.render("input", line),
            Self::Engine { argument, error } => error.render("input", argument),
        }
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, line: &str) -> io::Result<()> {
        match self {
            Self::Command(err) => err.report_to_stderr("input", line),
            Self::Engine { argument, error } => error.report_to_stderr("input", argument),
        }
    }
}

impl From<binom_error::Error> for Error {
    fn from(err: binom_error::Error) -> Self {
        Self::Command(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(rendered: String) -> String {
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    #[test]
    fn suggestions_in_help() {
        let kind = UnknownCommand {
            name: "expnd".to_string(),
            suggestions: vec!["expand"],
        };
        let err = Error::from(binom_error::Error::new(vec![0..5], kind));
        let rendered = plain(err.render("expnd x ; 1 ; 2").unwrap());
        assert!(rendered.contains("unknown command `expnd`"));
        assert!(rendered.contains("did you mean expand?"));
    }

    #[test]
    fn engine_error_renders_against_argument() {
        let error = binom_compute::parse_polynomial("x + )").unwrap_err();
        let err = Error::Engine {
            argument: "x + )".to_string(),
            error,
        };
        assert!(err.render("identify x + )").is_ok());
    }
}
