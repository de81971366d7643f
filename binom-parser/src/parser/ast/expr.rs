use crate::{
    parser::{
        ast::{
            binary::{BinOpKind, Binary},
            literal::Literal,
            paren::Paren,
            power::Power,
            unary::Unary,
        },
        error::{
            AmbiguousFractionPower,
            ChainedExponent,
            ExponentTooLarge,
            NegativeExponent,
            NonIntegerExponent,
            UnexpectedEof,
            UnexpectedToken,
            UnknownCharacter,
            UnsupportedDivision,
        },
        Error,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The tokens that can begin an operand.
const OPERAND_START: &[TokenKind] = &[
    TokenKind::Name,
    TokenKind::Int,
    TokenKind::Decimal,
    TokenKind::OpenParen,
    TokenKind::Sub,
];

/// Represents any kind of expression the grammar accepts.
///
/// ```text
/// sum     := product (('+' | '-') product)*
/// product := signed ('*' signed)*
/// signed  := '-' signed | power
/// power   := atom ('^' integer)?
/// atom    := literal | '(' sum ')'
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(x + 1)`.
    Paren(Paren),

    /// A negated expression, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `x + 1`.
    Binary(Binary),

    /// An expression raised to an integer power, such as `x^2`.
    Power(Power),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
            Expr::Power(power) => power.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            _ => self,
        }
    }
}

/// Parses a sum or difference of products.
fn parse_sum(input: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_product(input)?;

    loop {
        let op = match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::Add) => BinOpKind::Add,
            Some(TokenKind::Sub) => BinOpKind::Sub,
            _ => return Ok(lhs),
        };
        input.next_token()?;

        let rhs = parse_product(input)?;
        lhs = Expr::Binary(Binary::new(lhs, op, rhs));
    }
}

/// Parses a product of signed factors.
fn parse_product(input: &mut Parser) -> Result<Expr, Error> {
    let mut lhs = parse_signed(input)?;

    loop {
        match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::Mul) => {
                input.next_token()?;
                let rhs = parse_signed(input)?;
                lhs = Expr::Binary(Binary::new(lhs, BinOpKind::Mul, rhs));
            },
            Some(TokenKind::Div) => {
                // fraction literals are consumed by `Literal`, so any division seen here has a
                // non-literal operand
                let div = input.next_token()?;
                let end = input.peek_token().map_or(div.span.end, |token| token.span.end);
                return Err(Error::new(vec![lhs.span().start..end], UnsupportedDivision));
            },
            _ => return Ok(lhs),
        }
    }
}

/// Parses an optionally negated power.
fn parse_signed(input: &mut Parser) -> Result<Expr, Error> {
    if input.peek_is(TokenKind::Sub) {
        let minus = input.next_token()?;
        let operand = parse_signed(input)?;
        let span = minus.span.start..operand.span().end;
        return Ok(Expr::Unary(Unary {
            operand: Box::new(operand),
            span,
        }));
    }

    parse_power(input)
}

/// Parses an atom, optionally raised to an integer literal power.
fn parse_power(input: &mut Parser) -> Result<Expr, Error> {
    let base = parse_atom(input)?;
    if !input.peek_is(TokenKind::Exp) {
        return Ok(base);
    }
    input.next_token()?;

    let token = input.next_token()?;
    let exponent = match token.kind {
        TokenKind::Int => token.lexeme
            .parse::<u32>()
            .map_err(|_| Error::new(vec![token.span.clone()], ExponentTooLarge))?,
        TokenKind::Sub => {
            let end = input.peek_token().map_or(token.span.end, |next| next.span.end);
            return Err(Error::new(vec![token.span.start..end], NegativeExponent));
        },
        TokenKind::Decimal | TokenKind::Name | TokenKind::OpenParen => {
            return Err(Error::new(vec![token.span], NonIntegerExponent));
        },
        TokenKind::Symbol => {
            return Err(Error::new(vec![token.span], UnknownCharacter {
                character: token.lexeme.to_owned(),
            }));
        },
        found => {
            return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Int],
                found,
            }));
        },
    };

    if let Expr::Literal(Literal::Fraction(fraction)) = &base {
        return Err(Error::new(
            vec![fraction.span.clone(), token.span],
            AmbiguousFractionPower,
        ));
    }

    if input.peek_is(TokenKind::Exp) {
        let second = input.next_token()?;
        let end = input.peek_token().map_or(second.span.end, |next| next.span.end);
        return Err(Error::new(vec![second.span.start..end], ChainedExponent));
    }

    let span = base.span().start..token.span.end;
    Ok(Expr::Power(Power {
        base: Box::new(base),
        exponent,
        exponent_span: token.span,
        span,
    }))
}

/// Parses a literal or a parenthesized expression.
fn parse_atom(input: &mut Parser) -> Result<Expr, Error> {
    let Some((kind, lexeme)) = input.peek_token().map(|token| (token.kind, token.lexeme)) else {
        return Err(input.error(UnexpectedEof));
    };

    match kind {
        TokenKind::Int | TokenKind::Decimal | TokenKind::Name => input.try_parse().map(Expr::Literal),
        TokenKind::OpenParen => input.try_parse().map(Expr::Paren),
        TokenKind::Symbol => Err(input.error(UnknownCharacter {
            character: lexeme.to_owned(),
        })),
        found => Err(input.error(UnexpectedToken {
            expected: OPERAND_START,
            found,
        })),
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        parse_sum(input)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
            Expr::Power(power) => power.fmt(f),
        }
    }
}
