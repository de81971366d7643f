//! Numeric evaluation of polynomials, for plotting.
//!
//! This is the only part of the engine that uses floating point. Coefficients are converted to
//! the nearest [`f64`] at evaluation time.

use crate::{
    error::UnboundSymbol,
    symbolic::{Polynomial, Symbol},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Evaluates `poly` with `variable` replaced by `x`.
///
/// Fails if the polynomial contains any symbol other than `variable`.
pub fn evaluate(poly: &Polynomial, variable: &Symbol, x: f64) -> Result<f64, UnboundSymbol> {
    check_bound(poly, variable)?;
    Ok(evaluate_unchecked(poly, variable, x))
}

/// Fails if `poly` contains a symbol other than `variable`.
fn check_bound(poly: &Polynomial, variable: &Symbol) -> Result<(), UnboundSymbol> {
    let unbound = poly.symbols()
        .into_iter()
        .filter(|symbol| symbol != variable)
        .map(|symbol| symbol.to_string())
        .collect::<Vec<_>>();

    if unbound.is_empty() {
        Ok(())
    } else {
        Err(UnboundSymbol {
            variable: variable.to_string(),
            unbound,
        })
    }
}

fn evaluate_unchecked(poly: &Polynomial, variable: &Symbol, x: f64) -> f64 {
    poly.terms()
        .iter()
        .map(|term| {
            let exp = term.monomial.exponent(variable);
            let power = match i32::try_from(exp) {
                Ok(exp) => x.powi(exp),
                Err(_) => x.powf(f64::from(exp)),
            };
            term.coefficient.to_f64() * power
        })
        .sum()
}

/// A point on a plotted curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// Evenly spaced sample positions from `start` to `end`, both included.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SampleRange {
    /// The first position.
    pub start: f64,

    /// The last position.
    pub end: f64,

    /// The number of positions.
    pub count: usize,
}

impl Default for SampleRange {
    /// 100 positions from `-2` to `2`.
    fn default() -> Self {
        Self {
            start: -2.0,
            end: 2.0,
            count: 100,
        }
    }
}

impl SampleRange {
    /// The sample positions. With a `count` of zero there are none; with a `count` of one there
    /// is only `start`.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        let step = if self.count > 1 {
            (self.end - self.start) / (self.count - 1) as f64
        } else {
            0.0
        };

        (0..self.count).map(move |i| {
            if i + 1 == self.count && self.count > 1 {
                self.end
            } else {
                self.start + step * i as f64
            }
        })
    }
}

/// Evaluates `poly` at every position of `range`.
pub fn sample(poly: &Polynomial, variable: &Symbol, range: &SampleRange) -> Result<Vec<Sample>, UnboundSymbol> {
    check_bound(poly, variable)?;
    Ok(range
        .positions()
        .map(|x| Sample { x, y: evaluate_unchecked(poly, variable, x) })
        .collect())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use crate::{expand::expand_text, parse_polynomial};
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    #[test]
    fn evaluate_expansion() {
        let poly = expand_text("2*x", "3", 2).unwrap();
        assert_float_absolute_eq!(evaluate(&poly, &x(), 1.0).unwrap(), 25.0);
        assert_float_absolute_eq!(evaluate(&poly, &x(), -1.5).unwrap(), 0.0);
        assert_float_absolute_eq!(evaluate(&poly, &x(), 0.5).unwrap(), 16.0);
    }

    #[test]
    fn fractional_coefficients() {
        let poly = parse_polynomial("1/3*x^2 - 0.5").unwrap();
        assert_float_relative_eq!(evaluate(&poly, &x(), 3.0).unwrap(), 2.5);
    }

    #[test]
    fn constant_polynomial_ignores_variable() {
        let poly = parse_polynomial("7").unwrap();
        assert_float_absolute_eq!(evaluate(&poly, &x(), 123.0).unwrap(), 7.0);
        assert_float_absolute_eq!(evaluate(&Polynomial::zero(), &x(), 5.0).unwrap(), 0.0);
    }

    #[test]
    fn other_symbols_are_unbound() {
        let poly = expand_text("x", "y", 2).unwrap();
        let err = evaluate(&poly, &x(), 1.0).unwrap_err();
        assert_eq!(err.variable, "x");
        assert_eq!(err.unbound, vec!["y".to_string()]);
        assert!(sample(&poly, &x(), &SampleRange::default()).is_err());
    }

    #[test]
    fn default_range_is_linspace() {
        let positions = SampleRange::default().positions().collect::<Vec<_>>();
        assert_eq!(positions.len(), 100);
        assert_eq!(positions[0], -2.0);
        assert_eq!(positions[99], 2.0);
        assert_float_absolute_eq!(positions[1] - positions[0], 4.0 / 99.0, 1e-12);
    }

    #[test]
    fn degenerate_ranges() {
        let empty = SampleRange { start: 0.0, end: 1.0, count: 0 };
        assert_eq!(empty.positions().count(), 0);

        let single = SampleRange { start: 0.5, end: 1.0, count: 1 };
        assert_eq!(single.positions().collect::<Vec<_>>(), vec![0.5]);
    }

    #[test]
    fn sample_curve() {
        let poly = expand_text("x", "-1", 2).unwrap();
        let range = SampleRange { start: -1.0, end: 1.0, count: 3 };
        let samples = sample(&poly, &x(), &range).unwrap();
        assert_eq!(samples, vec![
            Sample { x: -1.0, y: 4.0 },
            Sample { x: 0.0, y: 1.0 },
            Sample { x: 1.0, y: 0.0 },
        ]);
    }
}
