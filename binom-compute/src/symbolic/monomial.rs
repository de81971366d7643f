use crate::error::DomainError;
use std::{cmp::Ordering, collections::{BTreeMap, BTreeSet}, fmt};
use super::symbol::Symbol;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A product of symbols raised to positive integer powers, such as `x^2*y`. The empty product is
/// the monomial `1`.
///
/// Zero exponents are never stored, so two monomials are equal exactly when they have the same
/// symbols with the same exponents.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Monomial {
    powers: BTreeMap<Symbol, u32>,
}

impl Monomial {
    /// The monomial `1`.
    pub fn one() -> Self {
        Self::default()
    }

    /// The monomial consisting of a single symbol.
    pub fn symbol(symbol: Symbol) -> Self {
        Self::from_powers([(symbol, 1)])
    }

    /// Builds a monomial from `(symbol, exponent)` pairs. Repeated symbols have their exponents
    /// added together, saturating at [`u32::MAX`]; zero exponents are dropped.
    pub fn from_powers(powers: impl IntoIterator<Item = (Symbol, u32)>) -> Self {
        let mut map = BTreeMap::new();
        for (symbol, exp) in powers {
            if exp == 0 {
                continue;
            }
            let entry = map.entry(symbol).or_insert(0u32);
            *entry = entry.saturating_add(exp);
        }
        Self { powers: map }
    }

    /// Returns true if this is the monomial `1`.
    pub fn is_one(&self) -> bool {
        self.powers.is_empty()
    }

    /// The exponent of the given symbol, which is zero if the symbol does not appear.
    pub fn exponent(&self, symbol: &Symbol) -> u32 {
        self.powers.get(symbol).copied().unwrap_or(0)
    }

    /// The total degree: the sum of all exponents.
    pub fn degree(&self) -> u64 {
        self.powers.values().map(|&exp| u64::from(exp)).sum()
    }

    /// The symbols in this monomial, in alphabetical order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.powers.keys()
    }

    /// The `(symbol, exponent)` pairs of this monomial, in alphabetical order.
    pub fn powers(&self) -> impl Iterator<Item = (&Symbol, u32)> {
        self.powers.iter().map(|(symbol, &exp)| (symbol, exp))
    }

    /// Multiplies two monomials by adding the exponents of matching symbols.
    pub fn multiply(&self, other: &Monomial) -> Result<Monomial, DomainError> {
        let mut powers = self.powers.clone();
        for (symbol, &exp) in &other.powers {
            let entry = powers.entry(symbol.clone()).or_insert(0);
            *entry = entry.checked_add(exp).ok_or_else(|| exponent_overflow(symbol))?;
        }
        Ok(Self { powers })
    }

    /// Raises this monomial to the given power by multiplying every exponent.
    pub fn pow(&self, n: u32) -> Result<Monomial, DomainError> {
        if n == 0 {
            return Ok(Self::one());
        }

        let powers = self.powers
            .iter()
            .map(|(symbol, &exp)| {
                exp.checked_mul(n)
                    .map(|exp| (symbol.clone(), exp))
                    .ok_or_else(|| exponent_overflow(symbol))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { powers })
    }

    /// Compares two monomials in display order: higher total degree first, then, scanning the
    /// symbols in alphabetical order, a higher exponent first.
    ///
    /// `x^3`, `x^2*y`, `x*y^2`, `y^3`, `x^2`, `x*y`, `x`, `y`, `1` is in display order.
    pub fn display_order(&self, other: &Monomial) -> Ordering {
        other.degree().cmp(&self.degree()).then_with(|| {
            let symbols = self.symbols().chain(other.symbols()).collect::<BTreeSet<_>>();
            symbols
                .into_iter()
                .map(|symbol| other.exponent(symbol).cmp(&self.exponent(symbol)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// The error for an exponent that does not fit in a [`u32`].
fn exponent_overflow(symbol: &Symbol) -> DomainError {
    DomainError::new(
        "exponent",
        format!("of `{}`", symbol),
        format!("must be at most {}", u32::MAX),
    )
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }

        let mut first = true;
        for (symbol, exp) in self.powers() {
            if !first {
                write!(f, "*")?;
            }
            first = false;

            if exp == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}^{}", symbol, exp)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn mono(powers: &[(&str, u32)]) -> Monomial {
        Monomial::from_powers(powers.iter().map(|&(name, exp)| (Symbol::new(name), exp)))
    }

    #[test]
    fn zero_exponents_are_dropped() {
        assert_eq!(mono(&[("x", 0), ("y", 2)]), mono(&[("y", 2)]));
        assert!(mono(&[("x", 0)]).is_one());
    }

    #[test]
    fn multiply_adds_exponents() {
        let product = mono(&[("x", 2)]).multiply(&mono(&[("x", 1), ("y", 3)])).unwrap();
        assert_eq!(product, mono(&[("x", 3), ("y", 3)]));
        assert_eq!(product.degree(), 6);
        assert_eq!(product.to_string(), "x^3*y^3");
    }

    #[test]
    fn exponent_overflow_is_an_error() {
        let big = mono(&[("x", u32::MAX)]);
        assert!(big.multiply(&mono(&[("x", 1)])).is_err());
        assert!(big.pow(2).is_err());
        assert_eq!(big.pow(1).unwrap(), big);
    }

    #[test]
    fn display_order_sorts_by_degree_then_symbols() {
        let mut monomials = vec![
            mono(&[]),
            mono(&[("y", 1)]),
            mono(&[("x", 1), ("y", 1)]),
            mono(&[("y", 3)]),
            mono(&[("x", 1)]),
            mono(&[("x", 2), ("y", 1)]),
            mono(&[("x", 2)]),
            mono(&[("x", 1), ("y", 2)]),
            mono(&[("x", 3)]),
        ];
        monomials.sort_by(Monomial::display_order);

        let rendered = monomials.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["x^3", "x^2*y", "x*y^2", "y^3", "x^2", "x*y", "x", "y", "1"]);
    }
}
