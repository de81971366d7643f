//! Functions to construct [`Integer`]s and [`Rational`]s from various types, along with the exact
//! arithmetic the symbolic modules build on.
//!
//! Every value produced here is exact. [`Rational`] keeps itself in lowest terms with a positive
//! denominator, so no separate reduction step is ever needed.

use crate::error::DivisionByZero;
use rug::{ops::Pow, Integer, Rational};
use std::cmp::Ordering;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates an exact [`Rational`] from a decimal literal such as `0.25` or `3.`.
///
/// ```
/// use binom_compute::primitive::{rat, rat_from_decimal_str};
///
/// assert_eq!(rat_from_decimal_str("0.25"), Some(rat((1, 4))));
/// assert_eq!(rat_from_decimal_str("3."), Some(rat(3)));
/// ```
pub fn rat_from_decimal_str(s: &str) -> Option<Rational> {
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
    let numerator = int_from_str(&format!("{}{}", whole, fraction))?;
    let places = u32::try_from(fraction.len()).ok()?;
    let denominator = int(int(10).pow(places));
    Some(rat((numerator, denominator)))
}

/// Divides `lhs` by `rhs`, failing if `rhs` is zero.
pub fn checked_div(lhs: &Rational, rhs: &Rational) -> Result<Rational, DivisionByZero> {
    if rhs.cmp0() == Ordering::Equal {
        return Err(DivisionByZero {
            dividend: lhs.to_string(),
            span: None,
        });
    }

    Ok(rat(lhs / rhs))
}

/// Raises `base` to a non-negative integer power.
pub fn pow(base: &Rational, exp: u32) -> Rational {
    let numer = int(base.numer().pow(exp));
    let denom = int(base.denom().pow(exp));
    rat((numer, denom))
}

/// Returns the exact `n`-th root of `value`, if there is one.
///
/// Negative values only have a root when `n` is odd.
pub fn exact_root(value: &Integer, n: u32) -> Option<Integer> {
    if n == 0 {
        return None;
    }

    let negative = value.cmp0() == Ordering::Less;
    if negative && n % 2 == 0 {
        return None;
    }

    let magnitude = int(value.abs_ref());
    let root = magnitude.clone().root(n);
    if int((&root).pow(n)) != magnitude {
        return None;
    }

    Some(if negative { -root } else { root })
}

/// Returns the exact `n`-th root of `value`, if there is one. For even `n`, the positive root is
/// returned.
pub fn exact_rational_root(value: &Rational, n: u32) -> Option<Rational> {
    let numer = exact_root(value.numer(), n)?;
    let denom = exact_root(value.denom(), n)?;
    Some(rat((numer, denom)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_literals_are_exact() {
        assert_eq!(rat_from_decimal_str("0.1"), Some(rat((1, 10))));
        assert_eq!(rat_from_decimal_str("2.50"), Some(rat((5, 2))));
        assert_eq!(rat_from_decimal_str("7"), Some(rat(7)));
        assert_eq!(rat_from_decimal_str("x.5"), None);
    }

    #[test]
    fn division() {
        assert_eq!(checked_div(&rat(3), &rat((3, 4))).unwrap(), rat(4));
        let err = checked_div(&rat(3), &rat(0)).unwrap_err();
        assert_eq!(err.dividend, "3");
    }

    #[test]
    fn rational_power() {
        assert_eq!(pow(&rat((-2, 3)), 3), rat((-8, 27)));
        assert_eq!(pow(&rat((5, 7)), 0), rat(1));
    }

    #[test]
    fn roots() {
        assert_eq!(exact_root(&int(81), 4), Some(int(3)));
        assert_eq!(exact_root(&int(-27), 3), Some(int(-3)));
        assert_eq!(exact_root(&int(-16), 2), None);
        assert_eq!(exact_root(&int(10), 2), None);
        assert_eq!(exact_root(&int(0), 5), Some(int(0)));
        assert_eq!(exact_rational_root(&rat((8, 27)), 3), Some(rat((2, 3))));
        assert_eq!(exact_rational_root(&rat((2, 9)), 2), None);
    }
}
