use crate::parser::ast::expr::Expr;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A negated expression, such as `-x` or `-(x + 1)^2`.
///
/// Negation is the only unary operator. It binds looser than `^`, so `-x^2` negates `x^2`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The negated operand.
    pub operand: Box<Expr>,

    /// The region of the source code that this unary expression was parsed from, including the
    /// minus sign.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl std::fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-{}", self.operand)
    }
}
