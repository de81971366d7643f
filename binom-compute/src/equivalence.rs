//! Grading of user answers.
//!
//! An answer is correct when it normalizes to exactly the same polynomial as the reference. The
//! comparison is exact: no floating point is involved, and answers that merely agree at a few
//! sample points are not accepted.

use crate::{
    error::{DomainError, GradingError},
    symbolic::{Expression, Polynomial},
};
use log::debug;

/// Returns true if `candidate` denotes the same polynomial as `reference`.
pub fn equivalent_expr(reference: &Polynomial, candidate: &Expression) -> Result<bool, DomainError> {
    Ok(candidate.normalize()? == *reference)
}

/// Parses `candidate` and returns true if it denotes the same polynomial as `reference`.
///
/// An answer that cannot be parsed is a [`GradingError`], which is distinct from a wrong answer.
///
/// ```
/// use binom_compute::{equivalence::equivalent, expand::expand_text};
///
/// let reference = expand_text("x", "1", 3).unwrap();
/// assert!(equivalent(&reference, "x**3+3*x**2+3*x+1").unwrap());
/// assert!(!equivalent(&reference, "x**3+3*x**2+3*x+2").unwrap());
/// assert!(equivalent(&reference, "x^3 + ").is_err());
/// ```
pub fn equivalent(reference: &Polynomial, candidate: &str) -> Result<bool, GradingError> {
    let grading_error = |source: binom_error::Error| GradingError {
        answer: candidate.to_owned(),
        source,
    };

    let expr = Expression::parse(candidate).map_err(|err| grading_error(err.into_spanned()))?;
    let verdict = equivalent_expr(reference, &expr)
        .map_err(|err| grading_error(binom_error::Error::new(Vec::new(), err)))?;

    debug!("graded `{}` as {}", candidate, if verdict { "correct" } else { "incorrect" });
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use crate::{expand::expand_text, parse_polynomial};
    use super::*;

    #[test]
    fn expanded_answer_is_accepted() {
        let reference = expand_text("x", "1", 3).unwrap();
        assert!(equivalent(&reference, "x**3+3*x**2+3*x+1").unwrap());
        assert!(!equivalent(&reference, "x**3+3*x**2+3*x+2").unwrap());
    }

    #[test]
    fn any_equivalent_form_is_accepted() {
        let reference = expand_text("2*x", "3", 2).unwrap();
        assert!(equivalent(&reference, "9 + 12*x + 4*x^2").unwrap());
        assert!(equivalent(&reference, "(2*x + 3)^2").unwrap());
        assert!(equivalent(&reference, "(2*x + 3)*(3 + 2*x)").unwrap());
        assert!(!equivalent(&reference, "(2*x - 3)^2").unwrap());
    }

    #[test]
    fn unparseable_answer_is_a_grading_error() {
        let reference = expand_text("x", "1", 2).unwrap();
        let err = equivalent(&reference, "x^2 + 2x + 1").unwrap_err();
        assert_eq!(err.answer, "x^2 + 2x + 1");
        assert_eq!(err.source.spans, vec![6..8]);
    }

    #[test]
    fn zero_denominator_is_a_grading_error() {
        let reference = expand_text("x", "1", 2).unwrap();
        assert!(equivalent(&reference, "x/0").is_err());
        assert!(equivalent(&reference, "1/0").is_err());
    }

    #[test]
    fn oversized_answer_is_a_grading_error() {
        let reference = expand_text("x", "1", 3).unwrap();
        let err = equivalent(&reference, "(x+1)^100000000").unwrap_err();
        assert_eq!(err.answer, "(x+1)^100000000");
    }

    #[test]
    fn zero_reference() {
        let reference = parse_polynomial("x - x").unwrap();
        assert!(equivalent(&reference, "0").unwrap());
        assert!(equivalent(&reference, "y - y").unwrap());
        assert!(!equivalent(&reference, "y").unwrap());
    }
}
