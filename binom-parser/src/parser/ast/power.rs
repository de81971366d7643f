use crate::parser::ast::expr::Expr;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression raised to a non-negative integer power, such as `(x + 1)^3`.
///
/// The exponent is always an integer literal; `x^y`, `x^(2)` and `x^-1` are rejected while
/// parsing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Power {
    /// The base of the power.
    pub base: Box<Expr>,

    /// The exponent.
    pub exponent: u32,

    /// The region of the source code containing the exponent literal.
    pub exponent_span: Range<usize>,

    /// The region of the source code that this power was parsed from.
    pub span: Range<usize>,
}

impl Power {
    /// Returns the span of the power expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl std::fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}^{}", self.base, self.exponent)
    }
}
