//! Polynomials with exact rational coefficients, and the ring operations on them.
//!
//! Polynomials are immutable values; every operation returns a new one. The operations are named
//! functions rather than operator overloads, so that the fallible ones (anything that can grow an
//! exponent) return a [`Result`] like everything else.

use crate::{error::DomainError, primitive::rat};
use log::trace;
use rug::Rational;
use std::{cmp::Ordering, collections::{BTreeMap, BTreeSet}, fmt};
use super::{monomial::Monomial, symbol::Symbol};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single term of a polynomial: a non-zero rational coefficient times a monomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    /// The coefficient of the term.
    pub coefficient: Rational,

    /// The product of symbols the coefficient multiplies.
    pub monomial: Monomial,
}

impl Term {
    /// Writes the term without its sign, in the form used by [`Polynomial`]'s `Display`
    /// implementation.
    fn fmt_unsigned(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = rat(self.coefficient.abs_ref());
        if self.monomial.is_one() {
            write!(f, "{}", magnitude)
        } else if magnitude == 1 {
            write!(f, "{}", self.monomial)
        } else {
            write!(f, "{}*{}", magnitude, self.monomial)
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient.cmp0() == Ordering::Less {
            write!(f, "-")?;
        }
        self.fmt_unsigned(f)
    }
}

/// A polynomial: a sum of terms with pairwise-distinct monomials and non-zero coefficients.
///
/// Equality is equality of the term sets. The order the terms are listed in by
/// [`Polynomial::terms`] and `Display` is [`Monomial::display_order`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, Rational>,
}

impl Polynomial {
    /// The zero polynomial, which has no terms.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::constant(rat(1))
    }

    /// A constant polynomial.
    pub fn constant(value: Rational) -> Self {
        Self::from_terms([(Monomial::one(), value)])
    }

    /// The polynomial consisting of a single symbol.
    pub fn symbol(symbol: Symbol) -> Self {
        Self::from_terms([(Monomial::symbol(symbol), rat(1))])
    }

    /// Builds a polynomial from `(monomial, coefficient)` pairs, combining like monomials and
    /// dropping zero coefficients.
    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, Rational)>) -> Self {
        let mut poly = Self::zero();
        for (monomial, coefficient) in terms {
            poly.add_term(monomial, coefficient);
        }
        poly
    }

    /// Adds a term to this polynomial in place, combining it with a like term if there is one.
    fn add_term(&mut self, monomial: Monomial, coefficient: Rational) {
        if coefficient.cmp0() == Ordering::Equal {
            return;
        }

        match self.terms.get_mut(&monomial) {
            Some(existing) => {
                *existing += coefficient;
                if existing.cmp0() == Ordering::Equal {
                    self.terms.remove(&monomial);
                }
            },
            None => {
                self.terms.insert(monomial, coefficient);
            },
        }
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if this polynomial has no terms. Same as [`Polynomial::is_zero`].
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The terms of this polynomial in display order.
    pub fn terms(&self) -> Vec<Term> {
        let mut terms = self.terms
            .iter()
            .map(|(monomial, coefficient)| Term {
                coefficient: coefficient.clone(),
                monomial: monomial.clone(),
            })
            .collect::<Vec<_>>();
        terms.sort_by(|a, b| a.monomial.display_order(&b.monomial));
        terms
    }

    /// The coefficient of the given monomial, which is zero if the monomial does not appear.
    pub fn coefficient(&self, monomial: &Monomial) -> Rational {
        self.terms.get(monomial).cloned().unwrap_or_default()
    }

    /// If this polynomial is a constant (including zero), returns its value.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(rat(0)),
            1 => self.terms.get(&Monomial::one()).cloned(),
            _ => None,
        }
    }

    /// The total degree: the highest total degree of any term. The zero polynomial has degree
    /// zero.
    pub fn degree(&self) -> u64 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    /// The highest exponent of the given symbol in any term.
    pub fn degree_in(&self, symbol: &Symbol) -> u32 {
        self.terms.keys().map(|monomial| monomial.exponent(symbol)).max().unwrap_or(0)
    }

    /// The symbols appearing in this polynomial, in alphabetical order.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.terms.keys().flat_map(Monomial::symbols).cloned().collect()
    }

    /// Returns the polynomial with every coefficient negated.
    pub fn negate(&self) -> Polynomial {
        Self {
            terms: self.terms
                .iter()
                .map(|(monomial, coefficient)| (monomial.clone(), rat(-coefficient)))
                .collect(),
        }
    }

    /// Returns the polynomial with every coefficient multiplied by `factor`.
    pub fn scale(&self, factor: &Rational) -> Polynomial {
        Self::from_terms(
            self.terms
                .iter()
                .map(|(monomial, coefficient)| (monomial.clone(), rat(coefficient * factor))),
        )
    }
}

/// Adds two polynomials.
pub fn add_polynomials(lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
    let mut sum = lhs.clone();
    for (monomial, coefficient) in &rhs.terms {
        sum.add_term(monomial.clone(), coefficient.clone());
    }
    sum
}

/// Subtracts `rhs` from `lhs`.
pub fn subtract_polynomials(lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
    add_polynomials(lhs, &rhs.negate())
}

/// The highest total degree a computed polynomial may have.
pub const MAX_DEGREE: u64 = 10_000;

/// The most term-by-term products a single multiplication may form.
pub const MAX_TERM_PRODUCTS: usize = 1_000_000;

/// Fails if a result of the given degree would be too large to compute.
fn check_degree(degree: u64) -> Result<(), DomainError> {
    if degree > MAX_DEGREE {
        return Err(DomainError::new("degree", degree, format!("must be at most {}", MAX_DEGREE)));
    }
    Ok(())
}

/// Multiplies two polynomials by distributing every term of `lhs` over every term of `rhs`.
///
/// Fails if the product would have a degree above [`MAX_DEGREE`], or would need more than
/// [`MAX_TERM_PRODUCTS`] term products.
pub fn multiply_polynomials(lhs: &Polynomial, rhs: &Polynomial) -> Result<Polynomial, DomainError> {
    if lhs.is_zero() || rhs.is_zero() {
        return Ok(Polynomial::zero());
    }
    check_degree(lhs.degree() + rhs.degree())?;
    let products = lhs.terms.len().saturating_mul(rhs.terms.len());
    if products > MAX_TERM_PRODUCTS {
        return Err(DomainError::new(
            "term products",
            products,
            format!("must be at most {} in one multiplication", MAX_TERM_PRODUCTS),
        ));
    }

    let mut product = Polynomial::zero();
    for (lhs_monomial, lhs_coefficient) in &lhs.terms {
        for (rhs_monomial, rhs_coefficient) in &rhs.terms {
            product.add_term(
                lhs_monomial.multiply(rhs_monomial)?,
                rat(lhs_coefficient * rhs_coefficient),
            );
        }
    }
    Ok(product)
}

/// Raises a polynomial to a non-negative integer power by repeated squaring.
///
/// Any polynomial to the power of zero is `1`, including the zero polynomial. Fails if `n` or the
/// degree of the result is above [`MAX_DEGREE`].
pub fn power_polynomial(base: &Polynomial, n: u32) -> Result<Polynomial, DomainError> {
    trace!("raising {} terms to the power {}", base.len(), n);
    if u64::from(n) > MAX_DEGREE {
        return Err(DomainError::new("exponent", n, format!("must be at most {}", MAX_DEGREE)));
    }
    check_degree(base.degree().saturating_mul(u64::from(n)))?;

    // a single term only needs its coefficient and monomial raised
    if base.len() == 1 {
        if let Some((monomial, coefficient)) = base.terms.iter().next() {
            return Ok(Polynomial::from_terms([(
                monomial.pow(n)?,
                crate::primitive::pow(coefficient, n),
            )]));
        }
    }

    let mut result = Polynomial::one();
    let mut square = base.clone();
    let mut remaining = n;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = multiply_polynomials(&result, &square)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = multiply_polynomials(&square, &square)?;
        }
    }
    Ok(result)
}

/// Writes the polynomial with explicit `*` between factors, in a form the parser accepts:
/// `4*x^2 + 12*x + 9`. The zero polynomial is written `0`.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.terms();
        let mut iter = terms.iter();
        let Some(first) = iter.next() else {
            return write!(f, "0");
        };

        write!(f, "{}", first)?;
        for term in iter {
            if term.coefficient.cmp0() == Ordering::Less {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            term.fmt_unsigned(f)?;
        }
        Ok(())
    }
}

/// Serialized as the list of terms in display order.
#[cfg(feature = "serde")]
impl Serialize for Polynomial {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.terms())
    }
}
