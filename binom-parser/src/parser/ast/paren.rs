use crate::{
    parser::{
        ast::expr::Expr,
        error::{EmptyParenthesis, UnclosedParenthesis, UnexpectedToken},
        Error,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.next_token()?;
        if open_paren.kind != TokenKind::OpenParen {
            return Err(Error::new(vec![open_paren.span], UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: open_paren.kind,
            }));
        }

        if input.peek_is(TokenKind::CloseParen) {
            let close_paren = input.next_token()?;
            return Err(Error::new(
                vec![open_paren.span.start..close_paren.span.end],
                EmptyParenthesis,
            ));
        }

        let expr = Expr::parse(input)?;
        match input.peek_token().map(|token| token.kind) {
            None => Err(Error::new(vec![open_paren.span], UnclosedParenthesis { opening: true })),
            Some(TokenKind::CloseParen) => {
                let close_paren = input.next_token()?;
                Ok(Self {
                    expr: Box::new(expr),
                    span: open_paren.span.start..close_paren.span.end,
                })
            },
            Some(_) => Err(input.unexpected_continuation()),
        }
    }
}

impl std::fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
