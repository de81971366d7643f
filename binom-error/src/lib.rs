//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, along with the span-carrying [`Error`] type that pairs an [`ErrorKind`] with the
//! regions of input text it refers to.
//!
//! Every failure the engine can report is a plain struct implementing [`ErrorKind`] (usually
//! through `#[derive(ErrorKind)]` from `binom-attrs`). The struct describes *what* went wrong;
//! [`Error`] adds *where* it went wrong, so the front end can highlight the offending part of the
//! user's input with [`ariadne`].

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug}, io, ops::Range};

// lets `#[derive(ErrorKind)]` output, which names `binom_error::EXPR`, work in this crate's tests
extern crate self as binom_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns `self` as [`Any`], so that callers holding a `dyn ErrorKind` can recover the
    /// concrete error type.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing this error, without any source highlighting.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// The byte offset into the source where the error starts. Errors without any span point at
    /// the start of the source.
    pub fn position(&self) -> usize {
        self.spans.first().map_or(0, |span| span.start)
    }

    /// A human-readable description of what went wrong.
    pub fn reason(&self) -> String {
        self.kind.message()
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as a `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source text.
    ///
    /// The output contains ANSI color codes.
    pub fn render(&self, src_id: &str, input: &str) -> io::Result<String> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at position {})", self.reason(), self.position())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use binom_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` is not allowed here", self.found),
        labels = ["this character"],
        help = "remove it",
    )]
    struct Forbidden {
        found: char,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "something else went wrong")]
    struct Other;

    #[test]
    fn position_and_reason() {
        let err = Error::new(vec![4..5], Forbidden { found: '$' });
        assert_eq!(err.position(), 4);
        assert_eq!(err.reason(), "`$` is not allowed here");
        assert_eq!(err.to_string(), "`$` is not allowed here (at position 4)");
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], Forbidden { found: '#' });
        assert!(err.is::<Forbidden>());
        assert!(!err.is::<Other>());
        assert_eq!(err.downcast_ref::<Forbidden>(), Some(&Forbidden { found: '#' }));
    }

    #[test]
    fn spanless_error_points_at_start() {
        let err = Error::new(Vec::new(), Other);
        assert_eq!(err.position(), 0);
        assert!(err.render("input", "x + y").is_ok());
    }

    #[test]
    fn rendered_report() {
        let err = Error::new(vec![4..5], Forbidden { found: '$' });
        let rendered = err.render("input", "x + $").unwrap();
        let plain = String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap();
        assert!(plain.contains("`$` is not allowed here"));
        assert!(plain.contains("this character"));
        assert!(plain.contains("remove it"));
    }
}
