use crate::{
    parser::{
        error::{UnexpectedToken, UnsupportedDivision},
        Error,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer literal, represented as a [`String`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitInt {
    /// The value of the integer literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl std::fmt::Display for LitInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A decimal literal, such as `0.25`, represented as a [`String`]. It denotes an exact value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitDecimal {
    /// The value of the decimal literal as a string.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl std::fmt::Display for LitDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A fraction of two integer literals, such as `3/4`.
///
/// This is the only form of division the grammar accepts. The denominator is not checked for zero
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitFraction {
    /// The numerator of the fraction.
    pub numerator: LitInt,

    /// The denominator of the fraction.
    pub denominator: LitInt,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl std::fmt::Display for LitFraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl std::fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Represents a literal value.
///
/// A literal is any value that is written directly into the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// An integer literal.
    Integer(LitInt),

    /// A decimal literal.
    Decimal(LitDecimal),

    /// A fraction of two integer literals.
    Fraction(LitFraction),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Decimal(decimal) => decimal.span.clone(),
            Literal::Fraction(fraction) => fraction.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;

        match token.kind {
            TokenKind::Int => {
                let numerator = LitInt {
                    value: token.lexeme.to_owned(),
                    span: token.span,
                };
                if !input.peek_is(TokenKind::Div) {
                    return Ok(Literal::Integer(numerator));
                }

                let div = input.next_token()?;
                match input.next_token() {
                    Ok(denominator) if denominator.kind == TokenKind::Int => {
                        let span = numerator.span.start..denominator.span.end;
                        Ok(Literal::Fraction(LitFraction {
                            numerator,
                            denominator: LitInt {
                                value: denominator.lexeme.to_owned(),
                                span: denominator.span,
                            },
                            span,
                        }))
                    },
                    Ok(other) => Err(Error::new(
                        vec![numerator.span.start..other.span.end],
                        UnsupportedDivision,
                    )),
                    Err(_) => Err(Error::new(
                        vec![numerator.span.start..div.span.end],
                        UnsupportedDivision,
                    )),
                }
            },
            TokenKind::Decimal => Ok(Literal::Decimal(LitDecimal {
                value: token.lexeme.to_owned(),
                span: token.span,
            })),
            TokenKind::Name => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            })),
            found => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Decimal, TokenKind::Name],
                found,
            })),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => int.fmt(f),
            Literal::Decimal(decimal) => decimal.fmt(f),
            Literal::Fraction(fraction) => fraction.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
        }
    }
}
