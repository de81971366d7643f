//! Recovering `(a*x + b)^n` from its expansion.
//!
//! For a univariate polynomial of degree `n`, the leading coefficient is `a^n` and the next one is
//! `n * a^(n-1) * b`. Taking the exact `n`-th root of the first gives a candidate `a`, the second
//! then gives `b`, and the candidate is accepted only if expanding it reproduces the polynomial.

use crate::{
    expand::expand_polynomials,
    primitive::{checked_div, exact_rational_root, pow, rat},
    symbolic::{Expression, Monomial, Polynomial, Symbol},
};
use log::debug;
use rug::Rational;
use std::{cmp::Ordering, fmt};

/// A binomial `(a*x + b)^n` that expands to a given polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedBinomial {
    /// The coefficient of the variable.
    pub a: Rational,

    /// The constant term.
    pub b: Rational,

    /// The exponent.
    pub n: u32,

    /// The variable.
    pub variable: Symbol,
}

impl IdentifiedBinomial {
    /// The binomial as an expression, `(a*x + b)^n`.
    pub fn to_expression(&self) -> Expression {
        Expression::constant(self.a.clone())
            .mul(Expression::from(self.variable.clone()))
            .add(Expression::constant(self.b.clone()))
            .pow(self.n)
    }
}

/// Writes the binomial the way a student would: `(2*x + 3)^2`, `(x - 1/2)^3`.
impl fmt::Display for IdentifiedBinomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let linear = Polynomial::from_terms([
            (Monomial::symbol(self.variable.clone()), self.a.clone()),
            (Monomial::one(), self.b.clone()),
        ]);
        write!(f, "({})^{}", linear, self.n)
    }
}

/// Finds `a`, `b` and `n` such that `(a*variable + b)^n` expands to `poly`.
///
/// Returns [`None`] if there is no such binomial, including when `poly` contains other symbols or
/// is constant. When `n` is even, `a` is chosen positive.
pub fn identify_binomial(poly: &Polynomial, variable: &Symbol) -> Option<IdentifiedBinomial> {
    if poly.symbols().into_iter().any(|symbol| symbol != *variable) {
        return None;
    }

    let n = poly.degree_in(variable);
    if n == 0 {
        return None;
    }

    let power = |exp: u32| Monomial::from_powers([(variable.clone(), exp)]);
    let leading = poly.coefficient(&power(n));
    let next = poly.coefficient(&power(n - 1));

    let a = exact_rational_root(&leading, n)?;
    if a.cmp0() == Ordering::Equal {
        return None;
    }

    // next = n * a^(n-1) * b
    let b = checked_div(&next, &(pow(&a, n - 1) * rat(n))).ok()?;

    let linear = Polynomial::from_terms([(power(1), a.clone())]);
    let constant = Polynomial::constant(b.clone());
    let expanded = expand_polynomials(&linear, &constant, n, &mut ()).ok()?;
    if expanded != *poly {
        debug!("candidate ({}*{} + {})^{} does not reproduce {}", a, variable, b, n, poly);
        return None;
    }

    Some(IdentifiedBinomial {
        a,
        b,
        n,
        variable: variable.clone(),
    })
}

#[cfg(test)]
mod tests {
    use crate::{expand::expand_text, parse_polynomial};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    #[test]
    fn worked_example() {
        let poly = parse_polynomial("x^3 + 6*x^2 + 12*x + 8").unwrap();
        let found = identify_binomial(&poly, &x()).unwrap();
        assert_eq!((found.a, found.b, found.n), (rat(1), rat(2), 3));
    }

    #[test]
    fn non_unit_leading_coefficient() {
        let poly = expand_text("3*x", "-1", 3).unwrap();
        let found = identify_binomial(&poly, &x()).unwrap();
        assert_eq!(found.to_string(), "(3*x - 1)^3");
    }

    #[test]
    fn even_power_picks_positive_a() {
        let poly = expand_text("-2*x", "3", 2).unwrap();
        let found = identify_binomial(&poly, &x()).unwrap();
        assert_eq!((found.a, found.b), (rat(2), rat(-3)));
    }

    #[test]
    fn rational_terms() {
        let poly = expand_text("1/2*x", "1/3", 4).unwrap();
        let found = identify_binomial(&poly, &x()).unwrap();
        assert_eq!((found.a, found.b, found.n), (rat((1, 2)), rat((1, 3)), 4));
    }

    #[test]
    fn round_trip_through_expression() {
        let poly = expand_text("5*x", "7", 4).unwrap();
        let found = identify_binomial(&poly, &x()).unwrap();
        assert_eq!(found.to_expression().normalize().unwrap(), poly);
    }

    #[test]
    fn not_a_binomial_power() {
        for text in ["x^2 + 1", "x^2 + 2*x + 2", "2*x^2 + 4*x + 2", "5", "x^2 + y"] {
            let poly = parse_polynomial(text).unwrap();
            assert_eq!(identify_binomial(&poly, &x()), None, "{} should not be identified", text);
        }
    }

    #[test]
    fn linear_polynomial_is_its_own_binomial() {
        let poly = parse_polynomial("4*x - 3").unwrap();
        let found = identify_binomial(&poly, &x()).unwrap();
        assert_eq!(found.to_string(), "(4*x - 3)^1");
    }
}
