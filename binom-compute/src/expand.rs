//! Binomial expansion.
//!
//! `(A + B)^n` is expanded by the binomial theorem, `sum over k of C(n, k) * A^(n-k) * B^k`, where
//! `A` and `B` are arbitrary expressions. Both terms are normalized first, so they may themselves
//! be sums or products: `expand(2*x, -y^2, 3)` and `expand(x + 1, x - 1, 2)` are both fine.

use crate::{
    error::{DomainError, Error},
    pascal::binomial_coefficients,
    primitive::rat,
    symbolic::{
        add_polynomials,
        multiply_polynomials,
        polynomial::MAX_DEGREE,
        Expression,
        Polynomial,
        StepCollector,
    },
};
use log::{debug, trace};
use rug::Integer;

/// One term of a binomial expansion, `C(n, k) * A^(n-k) * B^k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionStep {
    /// The index of the term, from `0` to `n`.
    pub k: u32,

    /// The binomial coefficient `C(n, k)`.
    pub coefficient: Integer,

    /// The power of the first term, `n - k`.
    pub a_exponent: u32,

    /// The power of the second term, `k`.
    pub b_exponent: u32,

    /// The normalized value of this term.
    pub term: Polynomial,
}

/// Converts a caller-supplied exponent, rejecting negative values and values above
/// [`MAX_DEGREE`].
fn exponent(n: i64) -> Result<u32, DomainError> {
    if n < 0 {
        return Err(DomainError::new("n", n, "must not be negative"));
    }
    u32::try_from(n)
        .ok()
        .filter(|&n| u64::from(n) <= MAX_DEGREE)
        .ok_or_else(|| DomainError::new("n", n, format!("must be at most {}", MAX_DEGREE)))
}

/// Returns `[base^0, base^1, ..., base^n]`, each computed from the previous one.
fn successive_powers(base: &Polynomial, n: u32) -> Result<Vec<Polynomial>, DomainError> {
    let mut powers = Vec::new();
    let mut current = Polynomial::one();
    for _ in 0..n {
        let next = multiply_polynomials(&current, base)?;
        powers.push(current);
        current = next;
    }
    powers.push(current);
    Ok(powers)
}

/// Expands `(a + b)^n` for two normalized polynomials, reporting each term to `steps`.
pub fn expand_polynomials(
    a: &Polynomial,
    b: &Polynomial,
    n: u32,
    steps: &mut dyn StepCollector<ExpansionStep>,
) -> Result<Polynomial, DomainError> {
    debug!("expanding ({}) + ({}) to the power {}", a, b, n);
    let n = exponent(i64::from(n))?;

    let a_powers = successive_powers(a, n)?;
    let b_powers = successive_powers(b, n)?;

    let mut sum = Polynomial::zero();
    for (k, coefficient) in (0..=n).zip(binomial_coefficients(n)) {
        let a_exponent = n - k;
        let product = multiply_polynomials(&a_powers[a_exponent as usize], &b_powers[k as usize])?;
        let term = product.scale(&rat(&coefficient));
        trace!("term k = {}: {}", k, term);

        sum = add_polynomials(&sum, &term);
        steps.push(ExpansionStep {
            k,
            coefficient,
            a_exponent,
            b_exponent: k,
            term,
        });
    }

    debug!("expansion has {} terms", sum.len());
    Ok(sum)
}

/// Expands `(a + b)^n` into a normalized polynomial.
///
/// Fails if `n` is negative.
///
/// ```
/// use binom_compute::{expand::expand, symbolic::Expression};
///
/// let poly = expand(&Expression::symbol("x"), &Expression::symbol("y"), 4).unwrap();
/// assert_eq!(poly.to_string(), "x^4 + 4*x^3*y + 6*x^2*y^2 + 4*x*y^3 + y^4");
/// ```
pub fn expand(a: &Expression, b: &Expression, n: i64) -> Result<Polynomial, Error> {
    expand_with_steps(a, b, n, &mut ())
}

/// Expands `(a + b)^n`, reporting the terms `C(n, k) * a^(n-k) * b^k` to `steps` in order of
/// increasing `k`.
pub fn expand_with_steps(
    a: &Expression,
    b: &Expression,
    n: i64,
    steps: &mut dyn StepCollector<ExpansionStep>,
) -> Result<Polynomial, Error> {
    let n = exponent(n)?;
    let a = a.normalize()?;
    let b = b.normalize()?;
    Ok(expand_polynomials(&a, &b, n, steps)?)
}

/// Parses both terms, then expands `(a + b)^n`.
pub fn expand_text(a: &str, b: &str, n: i64) -> Result<Polynomial, Error> {
    expand(&Expression::parse(a)?, &Expression::parse(b)?, n)
}
