//! A representation of algebraic expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](binom_parser::parser::ast::expr::Expr) type from `binom_parser` keeps every
//! detail of the input, including parentheses and source spans. [`Expression`] drops those and
//! flattens the tree: `x + (y + z)` becomes a single [`Expression::Add`] with three terms, and
//! subtraction becomes addition of a negated term.
//!
//! An [`Expression`] is short-lived. It is [normalized](Expression::normalize) into a
//! [`Polynomial`] before anything is stored or compared.
//!
//! ```
//! use binom_compute::symbolic::Expression;
//!
//! let expr = Expression::parse("(2*x + 3)^2").unwrap();
//! assert_eq!(expr.normalize().unwrap().to_string(), "4*x^2 + 12*x + 9");
//! ```

use crate::{
    error::{DivisionByZero, DomainError, Error},
    primitive::{checked_div, int_from_str, rat, rat_from_decimal_str},
};
use binom_parser::parser::{
    ast::{binary::BinOpKind, expr::Expr as AstExpr, literal::Literal},
    error::InvalidNumber,
    Parser,
};
use log::trace;
use rug::Rational;
use std::{cmp::Ordering, fmt, ops::Range};
use super::{
    polynomial::{add_polynomials, multiply_polynomials, power_polynomial, Polynomial},
    symbol::Symbol,
};

/// A single constant or variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    /// An exact rational constant, such as `3` or `1/2`.
    Constant(Rational),

    /// A variable, such as `x`.
    Symbol(Symbol),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::Symbol(symbol) => write!(f, "{}", symbol),
        }
    }
}

/// A flattened algebraic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A constant or variable.
    Primary(Primary),

    /// A sum of terms.
    Add(Vec<Expression>),

    /// A product of factors.
    Mul(Vec<Expression>),

    /// A base raised to a non-negative integer power.
    Exp(Box<Expression>, u32),
}

impl Expression {
    /// Parses and flattens the given text.
    ///
    /// Fails with [`Error::Parse`] if the text does not follow the grammar, or with
    /// [`Error::DivisionByZero`] if it contains a fraction with a zero denominator.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let ast = Parser::new(text).try_parse_full::<AstExpr>()?;
        Self::try_from(ast)
    }

    /// A constant.
    pub fn constant(value: impl Into<Rational>) -> Self {
        Self::Primary(Primary::Constant(value.into()))
    }

    /// A variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(Symbol::new(name)))
    }

    /// The sum of `self` and `other`, flattening nested sums.
    pub fn add(self, other: Expression) -> Self {
        let mut terms = match self {
            Self::Add(terms) => terms,
            expr => vec![expr],
        };
        match other {
            Self::Add(more) => terms.extend(more),
            expr => terms.push(expr),
        }
        Self::Add(terms)
    }

    /// The product of `self` and `other`, flattening nested products.
    pub fn mul(self, other: Expression) -> Self {
        let mut factors = match self {
            Self::Mul(factors) => factors,
            expr => vec![expr],
        };
        match other {
            Self::Mul(more) => factors.extend(more),
            expr => factors.push(expr),
        }
        Self::Mul(factors)
    }

    /// `self` raised to the power `n`.
    pub fn pow(self, n: u32) -> Self {
        Self::Exp(Box::new(self), n)
    }

    /// The negation of `self`. Constants are negated directly; anything else is multiplied by
    /// `-1`.
    pub fn neg(self) -> Self {
        match self {
            Self::Primary(Primary::Constant(value)) => Self::constant(-value),
            expr => Self::constant(-1).mul(expr),
        }
    }

    /// Reduces this expression to a polynomial by distributing products over sums and combining
    /// like terms.
    pub fn normalize(&self) -> Result<Polynomial, DomainError> {
        let poly = match self {
            Self::Primary(Primary::Constant(value)) => Polynomial::constant(value.clone()),
            Self::Primary(Primary::Symbol(symbol)) => Polynomial::symbol(symbol.clone()),
            Self::Add(terms) => terms
                .iter()
                .try_fold(Polynomial::zero(), |sum, term| {
                    Ok::<_, DomainError>(add_polynomials(&sum, &term.normalize()?))
                })?,
            Self::Mul(factors) => factors
                .iter()
                .try_fold(Polynomial::one(), |product, factor| {
                    multiply_polynomials(&product, &factor.normalize()?)
                })?,
            Self::Exp(base, n) => power_polynomial(&base.normalize()?, *n)?,
        };
        trace!("normalized `{}` into {} terms", self, poly.len());
        Ok(poly)
    }

    /// Returns true if this expression must be parenthesized when it appears as a factor.
    fn needs_parens_as_factor(&self) -> bool {
        matches!(self, Self::Add(_))
    }

    /// Returns true if this expression must be parenthesized when it is the base of a power.
    fn needs_parens_as_base(&self) -> bool {
        match self {
            Self::Primary(Primary::Constant(value)) => {
                value.cmp0() == Ordering::Less || *value.denom() != 1
            },
            Self::Primary(Primary::Symbol(_)) => false,
            _ => true,
        }
    }
}

impl From<Symbol> for Expression {
    fn from(symbol: Symbol) -> Self {
        Self::Primary(Primary::Symbol(symbol))
    }
}

/// Converts an integer literal, attaching the literal's span on failure.
fn int_literal(value: &str, span: &Range<usize>) -> Result<rug::Integer, Error> {
    int_from_str(value).ok_or_else(|| {
        binom_error::Error::new(vec![span.clone()], InvalidNumber { lexeme: value.to_owned() })
            .into()
    })
}

impl TryFrom<AstExpr> for Expression {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        Ok(match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::constant(int_literal(&int.value, &int.span)?),
                Literal::Decimal(decimal) => {
                    let value = rat_from_decimal_str(&decimal.value).ok_or_else(|| {
                        Error::from(binom_error::Error::new(
                            vec![decimal.span.clone()],
                            InvalidNumber { lexeme: decimal.value.clone() },
                        ))
                    })?;
                    Self::constant(value)
                },
                Literal::Fraction(fraction) => {
                    let numerator = rat(int_literal(&fraction.numerator.value, &fraction.numerator.span)?);
                    let denominator = rat(int_literal(&fraction.denominator.value, &fraction.denominator.span)?);
                    let value = checked_div(&numerator, &denominator)
                        .map_err(|err| DivisionByZero {
                            span: Some(fraction.span.clone()),
                            ..err
                        })?;
                    Self::constant(value)
                },
                Literal::Symbol(sym) => Self::symbol(sym.name),
            },
            AstExpr::Paren(paren) => Self::try_from(paren.innermost().clone())?,
            AstExpr::Unary(unary) => Self::try_from(*unary.operand)?.neg(),
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                match bin.op {
                    BinOpKind::Add => lhs.add(rhs),
                    BinOpKind::Sub => lhs.add(rhs.neg()),
                    BinOpKind::Mul => lhs.mul(rhs),
                }
            },
            AstExpr::Power(power) => Self::try_from(*power.base)?.pow(power.exponent),
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    if factor.needs_parens_as_factor() {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                    for factor in iter {
                        if factor.needs_parens_as_factor() {
                            write!(f, "*({})", factor)?;
                        } else {
                            write!(f, "*{}", factor)?;
                        }
                    }
                }
                Ok(())
            },
            Self::Exp(base, n) => {
                if base.needs_parens_as_base() {
                    write!(f, "({})^{}", base, n)
                } else {
                    write!(f, "{}^{}", base, n)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn flattens_nested_sums() {
        let expr = Expression::parse("x + (y + z)").unwrap();
        assert_eq!(expr, Expression::Add(vec![
            Expression::symbol("x"),
            Expression::symbol("y"),
            Expression::symbol("z"),
        ]));
    }

    #[test]
    fn subtraction_is_addition_of_negation() {
        let expr = Expression::parse("x - 2").unwrap();
        assert_eq!(expr, Expression::Add(vec![
            Expression::symbol("x"),
            Expression::constant(-2),
        ]));
    }

    #[test]
    fn literals_are_exact() {
        assert_eq!(Expression::parse("0.25").unwrap(), Expression::constant(rat((1, 4))));
        assert_eq!(Expression::parse("6/4").unwrap(), Expression::constant(rat((3, 2))));
    }

    #[test]
    fn zero_denominator() {
        let err = Expression::parse("x + 3/0").unwrap_err();
        let Error::DivisionByZero(err) = err else { panic!("expected division by zero, got {:?}", err) };
        assert_eq!(err.span, Some(4..7));
        assert_eq!(err.dividend, "3");
    }

    #[test]
    fn parse_errors_keep_their_position() {
        let err = Expression::parse("x + )").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn normalize_expands_products() {
        let poly = Expression::parse("(x + 1)*(x - 1) - x^2").unwrap().normalize().unwrap();
        assert_eq!(poly.to_string(), "-1");
    }

    #[test]
    fn unary_minus_applies_after_power() {
        let poly = Expression::parse("-x^2").unwrap().normalize().unwrap();
        assert_eq!(poly.to_string(), "-x^2");
        let poly = Expression::parse("(-x)^2").unwrap().normalize().unwrap();
        assert_eq!(poly.to_string(), "x^2");
    }

    #[test]
    fn display_is_reparseable() {
        let expr = Expression::constant(rat((-1, 2)))
            .pow(2)
            .mul(Expression::symbol("x").add(Expression::constant(1)));
        assert_eq!(expr.to_string(), "(-1/2)^2*(x + 1)");

        let reparsed = Expression::parse(&expr.to_string()).unwrap();
        assert_eq!(reparsed.normalize().unwrap(), expr.normalize().unwrap());
    }
}
