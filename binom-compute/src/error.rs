//! Errors produced by the engine.
//!
//! Every failure falls into one of the classes of [`Error`]. Each class wraps a plain struct that
//! implements [`ErrorKind`], so a caller can `match` on the class and still render a report
//! pointing into the user's input.

use ariadne::{Fmt, Report, Source};
use binom_attrs::ErrorKind;
use binom_error::{ErrorKind, EXPR};
use std::{fmt, io, ops::Range};

/// An argument was outside the range an operation accepts, such as a negative exponent or
/// `k > n` in `C(n, k)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid value for `{}`: {}", argument, value),
    help = format!("`{}` {}", argument, constraint),
)]
pub struct DomainError {
    /// The name of the argument.
    pub argument: &'static str,

    /// The value that was given.
    pub value: String,

    /// The condition the value failed, phrased to follow the argument name.
    pub constraint: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(argument: &'static str, value: impl ToString, constraint: impl Into<String>) -> Self {
        Self {
            argument,
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }
}

/// A division by zero, which can only come from a fraction literal with a zero denominator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot divide `{}` by zero", dividend),
    labels = ["this fraction has a zero denominator"],
)]
pub struct DivisionByZero {
    /// The value that was being divided.
    pub dividend: String,

    /// The region of the input containing the fraction, if it came from user input.
    pub span: Option<Range<usize>>,
}

/// A submitted answer could not be interpreted, so it could not be graded.
///
/// This is different from an answer that was understood and is wrong.
#[derive(Debug, ErrorKind)]
#[error(
    message = "could not interpret the answer",
    labels = [source.reason()],
    help = format!("answers are written like {}", "x^2 + 2*x + 1".fg(EXPR)),
)]
pub struct GradingError {
    /// The answer as it was submitted.
    pub answer: String,

    /// Why the answer could not be interpreted.
    pub source: binom_error::Error,
}

/// A polynomial was evaluated with symbols other than the variable being substituted.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "cannot evaluate: the expression contains {}, but only `{}` has a value",
        unbound.iter().map(|name| format!("`{}`", name)).collect::<Vec<_>>().join(", "),
        variable,
    ),
)]
pub struct UnboundSymbol {
    /// The variable a value was provided for.
    pub variable: String,

    /// The other symbols found in the polynomial, in alphabetical order.
    pub unbound: Vec<String>,
}

/// Any error the engine can produce.
#[derive(Debug)]
pub enum Error {
    /// The input text could not be parsed.
    Parse(binom_error::Error),

    /// An argument was out of range.
    Domain(DomainError),

    /// A fraction had a zero denominator.
    DivisionByZero(DivisionByZero),

    /// A submitted answer could not be interpreted.
    Grading(GradingError),

    /// A polynomial contained symbols without values.
    UnboundSymbol(UnboundSymbol),
}

impl Error {
    /// The regions of the input this error refers to. May be empty.
    pub fn spans(&self) -> Vec<Range<usize>> {
        match self {
            Self::Parse(err) => err.spans.clone(),
            Self::DivisionByZero(err) => err.span.iter().cloned().collect(),
            Self::Grading(err) => err.source.spans.clone(),
            Self::Domain(_) | Self::UnboundSymbol(_) => Vec::new(),
        }
    }

    /// The kind of error that occurred.
    pub fn kind(&self) -> &dyn ErrorKind {
        match self {
            Self::Parse(err) => &*err.kind,
            Self::Domain(err) => err,
            Self::DivisionByZero(err) => err,
            Self::Grading(err) => err,
            Self::UnboundSymbol(err) => err,
        }
    }

    /// The byte offset into the input where the error starts.
    pub fn position(&self) -> usize {
        self.spans().first().map_or(0, |span| span.start)
    }

    /// Build a report from this error.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind().build_report(src_id, &self.spans())
    }

    /// Renders the report for this error against the given input. The output contains ANSI
    /// color codes.
    pub fn render(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Converts this error into a span-carrying [`binom_error::Error`], losing the class.
    pub fn into_spanned(self) -> binom_error::Error {
        let spans = self.spans();
        match self {
            Self::Parse(err) => err,
            Self::Domain(err) => binom_error::Error::new(spans, err),
            Self::DivisionByZero(err) => binom_error::Error::new(spans, err),
            Self::Grading(err) => binom_error::Error::new(spans, err),
            Self::UnboundSymbol(err) => binom_error::Error::new(spans, err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spans().first() {
            Some(span) => write!(f, "{} (at position {})", self.kind().message(), span.start),
            None => write!(f, "{}", self.kind().message()),
        }
    }
}

impl std::error::Error for Error {}

impl From<binom_error::Error> for Error {
    fn from(err: binom_error::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<DivisionByZero> for Error {
    fn from(err: DivisionByZero) -> Self {
        Self::DivisionByZero(err)
    }
}

impl From<GradingError> for Error {
    fn from(err: GradingError) -> Self {
        Self::Grading(err)
    }
}

impl From<UnboundSymbol> for Error {
    fn from(err: UnboundSymbol) -> Self {
        Self::UnboundSymbol(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(rendered: String) -> String {
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    #[test]
    fn domain_error_message() {
        let err = Error::from(DomainError::new("k", -1, "must be between 0 and n = 5"));
        assert_eq!(err.to_string(), "invalid value for `k`: -1");
        assert!(err.spans().is_empty());

        let rendered = plain(err.render("input", "choose 5 -1").unwrap());
        assert!(rendered.contains("`k` must be between 0 and n = 5"));
    }

    #[test]
    fn division_by_zero_points_at_fraction() {
        let err = Error::from(DivisionByZero {
            dividend: "3".to_string(),
            span: Some(4..7),
        });
        assert_eq!(err.position(), 4);
        assert_eq!(err.to_string(), "cannot divide `3` by zero (at position 4)");

        let rendered = plain(err.render("input", "x + 3/0").unwrap());
        assert!(rendered.contains("zero denominator"));
    }

    #[test]
    fn unbound_symbol_lists_names() {
        let err = UnboundSymbol {
            variable: "x".to_string(),
            unbound: vec!["y".to_string(), "z".to_string()],
        };
        assert_eq!(
            err.message(),
            "cannot evaluate: the expression contains `y`, `z`, but only `x` has a value",
        );
    }

    #[test]
    fn class_survives_into_spanned() {
        let err = Error::from(DomainError::new("n", -2, "must not be negative"));
        let spanned = err.into_spanned();
        assert!(spanned.is::<DomainError>());
    }
}
