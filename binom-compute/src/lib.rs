//! Exact symbolic algebra for the binomial theorem.
//!
//! This crate expands binomials `(A + B)^n` into canonical polynomials, computes binomial
//! coefficients and rows of Pascal's triangle, grades typed answers by exact polynomial
//! comparison, and evaluates polynomials numerically for plotting. All symbolic work uses exact
//! [`rug`] integers and rationals.
//!
//! ```
//! use binom_compute::{equivalence::equivalent, expand::expand_text};
//!
//! let poly = expand_text("2*x", "3", 2).unwrap();
//! assert_eq!(poly.to_string(), "4*x^2 + 12*x + 9");
//! assert!(equivalent(&poly, "(2*x + 3)*(2*x + 3)").unwrap());
//! ```
//!
//! The modules, from the bottom up:
//!
//! - [`primitive`]: exact integer and rational helpers.
//! - [`symbolic`]: symbols, monomials, polynomials, and the expression tree parsed from text.
//! - [`pascal`]: `C(n, k)` and Pascal's triangle.
//! - [`expand`]: the binomial theorem, optionally step by step.
//! - [`equivalence`]: answer grading.
//! - [`evaluate`]: numeric evaluation and sampling.
//! - [`identify`]: recovering `(a*x + b)^n` from its expansion.
//! - [`exercise`]: seeded practice exercises.
//! - [`error`]: the error classes all of the above return.

pub mod equivalence;
pub mod error;
pub mod evaluate;
pub mod exercise;
pub mod expand;
pub mod identify;
pub mod pascal;
pub mod primitive;
mod proptests;
pub mod symbolic;

pub use error::Error;
use symbolic::{Expression, Polynomial};

/// Parses the given text and normalizes it into a polynomial.
///
/// ```
/// use binom_compute::parse_polynomial;
///
/// let poly = parse_polynomial("(x - 1)*(x + 1)").unwrap();
/// assert_eq!(poly.to_string(), "x^2 - 1");
/// ```
pub fn parse_polynomial(text: &str) -> Result<Polynomial, Error> {
    Ok(Expression::parse(text)?.normalize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn values_cross_threads() {
        assert_send_sync::<Polynomial>();
        assert_send_sync::<Expression>();
        assert_send_sync::<pascal::PascalTriangle>();
        assert_send_sync::<pascal::TriangleCache>();
        assert_send_sync::<expand::ExpansionStep>();
        assert_send_sync::<Error>();
    }
}
