//! Every way that parsing user input can fail.
//!
//! Each kind is attached to one or more spans of the input by [`binom_error::Error`]; the labels
//! below are listed in the same order as those spans.

use ariadne::Fmt;
use binom_attrs::ErrorKind;
use binom_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the input was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "term".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the input was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "input".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed, or a closing parenthesis has no matching opening one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the unmatched parenthesis was the opening one.
    pub opening: bool,
}

/// A pair of parentheses with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A character that is not part of the input grammar.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown character `{}`", character),
    labels = ["this character"],
    help = "terms may only use names, numbers, `+`, `-`, `*`, `/`, `^` and parentheses",
)]
pub struct UnknownCharacter {
    /// The character that was found.
    pub character: String,
}

/// Two operands were written next to each other without an operator between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing multiplication operator",
    labels = ["between these two operands"],
    help = format!("multiplication must be written explicitly, for example: {}", "2*x".fg(EXPR)),
)]
pub struct ImplicitMultiplication;

/// A division whose operands are not both integer literals.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unsupported division",
    labels = ["this division"],
    help = format!(
        "only fractions of two integers, such as {}, are supported",
        "3/4".fg(EXPR),
    ),
)]
pub struct UnsupportedDivision;

/// An exponent that is not an integer literal, such as `x^y`, `x^(2)` or `x^1.5`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponent must be an integer",
    labels = ["this exponent"],
    help = format!("write the exponent as a plain whole number, for example: {}", "x^3".fg(EXPR)),
)]
pub struct NonIntegerExponent;

/// A negative exponent, such as `x^-1`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponent must not be negative",
    labels = ["this exponent"],
)]
pub struct NegativeExponent;

/// A power of a power written without parentheses, such as `x^2^3`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "chained exponents are not supported",
    labels = ["this second exponent"],
    help = format!("add parentheses to say what is meant, for example: {}", "(x^2)^3".fg(EXPR)),
)]
pub struct ChainedExponent;

/// An exponent that does not fit in 32 bits.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponent is too large",
    labels = ["this exponent"],
    help = format!("exponents must be at most {}", u32::MAX),
)]
pub struct ExponentTooLarge;

/// A fraction literal raised to a power, such as `2/3^2`, which reads two different ways.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "ambiguous power of a fraction",
    labels = ["this fraction", "is raised to this power"],
    help = format!(
        "add parentheses, as in {}, or write the result as a single fraction, as in {}",
        "(2/3)^2".fg(EXPR),
        "2/9".fg(EXPR),
    ),
)]
pub struct AmbiguousFractionPower;

/// A numeric literal that could not be converted to an exact number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", lexeme),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The text of the literal.
    pub lexeme: String,
}
