//! Splitting a line of input into a [`Command`] and its arguments.
//!
//! A line is a command name followed by its arguments. Commands that take expressions separate
//! their arguments with `;`, since expressions contain spaces; `choose`, `triangle` and `exercise`
//! take plain words separated by whitespace.

use crate::error::{ArgumentCount, Error, InvalidInteger, InvalidNumber, InvalidVariable, UnknownCommand, UnknownExercise};
use binom_compute::exercise::Difficulty;
use levenshtein::levenshtein;
use std::ops::Range;

/// An argument, along with where it is in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg<'a> {
    /// The text of the argument, without surrounding whitespace.
    pub text: &'a str,

    /// The region of the line the argument was found in.
    pub span: Range<usize>,
}

impl<'a> Arg<'a> {
    /// Creates an argument from a part of `line`, trimming whitespace.
    fn new(line: &'a str, part: &'a str) -> Self {
        let text = part.trim();
        let start = text.as_ptr() as usize - line.as_ptr() as usize;
        Self { text, span: start..start + text.len() }
    }

    /// Parses the argument as an integer.
    pub fn integer(&self) -> Result<i64, Error> {
        self.text.parse().map_err(|_| {
            binom_error::Error::new(vec![self.span.clone()], InvalidInteger {
                text: self.text.to_owned(),
            }).into()
        })
    }

    /// Parses the argument as a finite number.
    pub fn number(&self) -> Result<f64, Error> {
        match self.text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(binom_error::Error::new(vec![self.span.clone()], InvalidNumber {
                text: self.text.to_owned(),
            }).into()),
        }
    }

    /// Checks that the argument is a variable name.
    pub fn variable(&self) -> Result<&'a str, Error> {
        let mut chars = self.text.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(self.text)
        } else {
            Err(binom_error::Error::new(vec![self.span.clone()], InvalidVariable {
                text: self.text.to_owned(),
            }).into())
        }
    }
}

/// Which exercise to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    Expand,
    Coefficient,
    Identify(Difficulty),
    Preset,
}

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    Expand { a: Arg<'a>, b: Arg<'a>, n: Arg<'a> },
    Steps { a: Arg<'a>, b: Arg<'a>, n: Arg<'a> },
    Choose { n: Arg<'a>, k: Arg<'a> },
    Triangle { rows: Arg<'a> },
    Check { a: Arg<'a>, b: Arg<'a>, n: Arg<'a>, answer: Arg<'a> },
    Eval { poly: Arg<'a>, variable: Arg<'a>, x: Arg<'a> },
    Plot { a: Arg<'a>, b: Arg<'a>, n: Arg<'a> },
    Identify { poly: Arg<'a> },
    Exercise(ExerciseKind),
    Answer(Vec<Arg<'a>>),
    Solution,
    Help,
    Quit,
}

/// Every command, with its usage.
pub const COMMANDS: [(&str, &str); 14] = [
    ("expand", "expand <a> ; <b> ; <n>"),
    ("steps", "steps <a> ; <b> ; <n>"),
    ("choose", "choose <n> <k>"),
    ("triangle", "triangle <rows>"),
    ("check", "check <a> ; <b> ; <n> ; <answer>"),
    ("eval", "eval <polynomial> ; <variable> ; <x>"),
    ("plot", "plot <a> ; <b> ; <n>"),
    ("identify", "identify <polynomial>"),
    ("exercise", "exercise <expand | coefficient | identify [1-3] | preset>"),
    ("answer", "answer <answer> [; <answer> ...]"),
    ("solution", "solution"),
    ("help", "help"),
    ("quit", "quit"),
    ("exit", "exit"),
];

/// The usage of the given command.
fn usage(command: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map_or("", |(_, usage)| usage)
}

/// Returns the known commands whose names are close to `name`.
fn suggestions(name: &str) -> Vec<&'static str> {
    COMMANDS
        .iter()
        .map(|(command, _)| *command)
        .filter(|command| levenshtein(command, name) < 2)
        .collect()
}

/// Splits the arguments on `;`.
fn split_expressions<'a>(line: &'a str, rest: &'a str) -> Vec<Arg<'a>> {
    if rest.trim().is_empty() {
        return Vec::new();
    }
    rest.split(';').map(|part| Arg::new(line, part)).collect()
}

/// Splits the arguments on whitespace.
fn split_words<'a>(line: &'a str, rest: &'a str) -> Vec<Arg<'a>> {
    rest.split_whitespace().map(|part| Arg::new(line, part)).collect()
}

/// Checks that exactly `N` arguments were given.
fn exactly<'a, const N: usize>(
    command: &'static str,
    rest: Arg<'a>,
    args: Vec<Arg<'a>>,
) -> Result<[Arg<'a>; N], Error> {
    let found = args.len();
    args.try_into().map_err(|_| {
        binom_error::Error::new(vec![rest.span], ArgumentCount {
            command,
            usage: usage(command),
            expected: N,
            found,
        }).into()
    })
}

impl<'a> Command<'a> {
    /// Parses a line of input. Returns [`None`] for a blank line.
    pub fn parse(line: &'a str) -> Result<Option<Self>, Error> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let name_len = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let name = Arg::new(line, &trimmed[..name_len]);
        let rest_text = &trimmed[name_len..];
        let rest = Arg::new(line, rest_text);

        let command = match name.text {
            "expand" => {
                let [a, b, n] = exactly("expand", rest, split_expressions(line, rest_text))?;
                Command::Expand { a, b, n }
            },
            "steps" => {
                let [a, b, n] = exactly("steps", rest, split_expressions(line, rest_text))?;
                Command::Steps { a, b, n }
            },
            "choose" => {
                let [n, k] = exactly("choose", rest, split_words(line, rest_text))?;
                Command::Choose { n, k }
            },
            "triangle" => {
                let [rows] = exactly("triangle", rest, split_words(line, rest_text))?;
                Command::Triangle { rows }
            },
            "check" => {
                let [a, b, n, answer] = exactly("check", rest, split_expressions(line, rest_text))?;
                Command::Check { a, b, n, answer }
            },
            "eval" => {
                let [poly, variable, x] = exactly("eval", rest, split_expressions(line, rest_text))?;
                Command::Eval { poly, variable, x }
            },
            "plot" => {
                let [a, b, n] = exactly("plot", rest, split_expressions(line, rest_text))?;
                Command::Plot { a, b, n }
            },
            "identify" => {
                let [poly] = exactly("identify", rest, split_expressions(line, rest_text))?;
                Command::Identify { poly }
            },
            "exercise" => Command::Exercise(parse_exercise(rest, split_words(line, rest_text))?),
            "answer" => {
                let args = split_expressions(line, rest_text);
                if args.is_empty() {
                    return Err(binom_error::Error::new(vec![rest.span], ArgumentCount {
                        command: "answer",
                        usage: usage("answer"),
                        expected: 1,
                        found: 0,
                    }).into());
                }
                Command::Answer(args)
            },
            "solution" => {
                exactly::<0>("solution", rest, split_words(line, rest_text))?;
                Command::Solution
            },
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => {
                return Err(binom_error::Error::new(vec![name.span], UnknownCommand {
                    name: name.text.to_owned(),
                    suggestions: suggestions(name.text),
                }).into());
            },
        };

        Ok(Some(command))
    }
}

/// Parses the arguments of `exercise`.
fn parse_exercise(rest: Arg, args: Vec<Arg>) -> Result<ExerciseKind, Error> {
    let unknown = |arg: &Arg| -> Error {
        binom_error::Error::new(vec![arg.span.clone()], UnknownExercise {
            kind: arg.text.to_owned(),
        }).into()
    };

    match args.as_slice() {
        [kind] if kind.text == "expand" => Ok(ExerciseKind::Expand),
        [kind] if kind.text == "coefficient" => Ok(ExerciseKind::Coefficient),
        [kind] if kind.text == "preset" => Ok(ExerciseKind::Preset),
        [kind] if kind.text == "identify" => Ok(ExerciseKind::Identify(Difficulty::Level1)),
        [kind, level] if kind.text == "identify" => level
            .text
            .parse()
            .ok()
            .and_then(Difficulty::from_level)
            .map(ExerciseKind::Identify)
            .ok_or_else(|| unknown(level)),
        [kind, ..] => Err(unknown(kind)),
        [] => Err(binom_error::Error::new(vec![rest.span], ArgumentCount {
            command: "exercise",
            usage: usage("exercise"),
            expected: 1,
            found: 0,
        }).into()),
    }
}
