pub mod ast;
pub mod error;

pub use binom_error::Error;
use error::{ExpectedEof, ImplicitMultiplication, UnclosedParenthesis, UnexpectedEof, UnknownCharacter};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for algebraic input. This is the type to use to parse an arbitrary piece of
/// text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl binom_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current non-whitespace token, or the end of the source code if
    /// there are no more tokens.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the most recently consumed non-whitespace token, or [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens[..self.cursor]
            .iter()
            .rev()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next non-whitespace token without moving the cursor. Returns [`None`] if there
    /// are no more tokens.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns true if the next non-whitespace token is of the given kind.
    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token().map_or(false, |token| token.kind == kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error describing the leftover input is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = self.try_parse::<T>()?;

        match self.peek_token() {
            None => Ok(value),
            Some(_) => Err(self.unexpected_continuation()),
        }
    }

    /// Builds the error for a token that follows a complete operand but cannot continue it.
    ///
    /// This is where implicit multiplication (`2x`, `(x)(y)`) is caught: an operand directly
    /// followed by the start of another operand.
    pub fn unexpected_continuation(&self) -> Error {
        let Some(token) = self.peek_token() else {
            return self.error(UnexpectedEof);
        };

        match token.kind {
            kind if kind.begins_operand() => {
                let start = self.prev_token().map_or(token.span.start, |prev| prev.span.start);
                Error::new(vec![start..token.span.end], ImplicitMultiplication)
            },
            TokenKind::CloseParen => self.error(UnclosedParenthesis { opening: false }),
            TokenKind::Symbol => self.error(UnknownCharacter { character: token.lexeme.to_owned() }),
            _ => Error::new(vec![token.span.start..self.eof_span().end], ExpectedEof),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::{BinOpKind, Binary},
        expr::Expr,
        literal::{LitFraction, LitInt, LitSym, Literal},
        power::Power,
        unary::Unary,
    };
    use error::*;

    fn parse(source: &str) -> Result<Expr, Error> {
        Parser::new(source).try_parse_full::<Expr>()
    }

    fn parse_err(source: &str) -> Error {
        match parse(source) {
            Ok(expr) => panic!("expected `{}` to fail, got `{}`", source, expr),
            Err(err) => err,
        }
    }

    #[test]
    fn literal_int() {
        let expr = parse("16").unwrap();
        assert_eq!(expr, Expr::Literal(Literal::Integer(LitInt {
            value: "16".to_string(),
            span: 0..2,
        })));
    }

    #[test]
    fn fraction_literal() {
        let expr = parse("3 / 4").unwrap();
        assert_eq!(expr, Expr::Literal(Literal::Fraction(LitFraction {
            numerator: LitInt { value: "3".to_string(), span: 0..1 },
            denominator: LitInt { value: "4".to_string(), span: 4..5 },
            span: 0..5,
        })));
    }

    #[test]
    fn product_of_coefficient_and_symbol() {
        let expr = parse("2*x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Integer(LitInt {
                value: "2".to_string(),
                span: 0..1,
            }))),
            op: BinOpKind::Mul,
            rhs: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                name: "x".to_string(),
                span: 2..3,
            }))),
            span: 0..3,
        }));
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Power(Power {
                base: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                    name: "x".to_string(),
                    span: 1..2,
                }))),
                exponent: 2,
                exponent_span: 3..4,
                span: 1..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn sum_is_left_associative() {
        let expr = parse("a - b + c").unwrap();
        let Expr::Binary(outer) = expr else { panic!("expected a binary expression") };
        assert_eq!(outer.op, BinOpKind::Add);
        let Expr::Binary(inner) = *outer.lhs else { panic!("expected a binary expression") };
        assert_eq!(inner.op, BinOpKind::Sub);
        assert_eq!(inner.span, 0..5);
    }

    #[test]
    fn product_binds_tighter_than_sum() {
        let expr = parse("x + 2*y").unwrap();
        let Expr::Binary(sum) = expr else { panic!("expected a binary expression") };
        assert_eq!(sum.op, BinOpKind::Add);
        assert!(matches!(*sum.rhs, Expr::Binary(Binary { op: BinOpKind::Mul, .. })));
    }

    #[test]
    fn display_round_trips_source() {
        for source in ["(2*x + 3)^2", "x**3 + 3*x**2 + 3*x + 1", "-(a - 1/2)^4", "0.5*y"] {
            let expr = parse(source).unwrap();
            let reparsed = parse(&expr.to_string()).unwrap();
            assert_eq!(expr.to_string(), reparsed.to_string());
        }
        assert_eq!(parse("x**3").unwrap().to_string(), "x^3");
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(
            parse("( 2 * x+3 ) ^ 2").unwrap().to_string(),
            parse("(2*x + 3)^2").unwrap().to_string(),
        );
    }

    #[test]
    fn dangling_close_paren() {
        let err = parse_err("x + )");
        assert!(err.is::<UnexpectedToken>());
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn unclosed_paren() {
        let err = parse_err("(x + 1");
        assert_eq!(err.downcast_ref(), Some(&UnclosedParenthesis { opening: true }));
        assert_eq!(err.position(), 0);

        let err = parse_err("x + 1)");
        assert_eq!(err.downcast_ref(), Some(&UnclosedParenthesis { opening: false }));
        assert_eq!(err.position(), 5);
    }

    #[test]
    fn empty_paren() {
        assert!(parse_err("()^2").is::<EmptyParenthesis>());
    }

    #[test]
    fn symbolic_division() {
        let err = parse_err("2/x");
        assert!(err.is::<UnsupportedDivision>());
        assert_eq!(err.spans, vec![0..3]);

        assert!(parse_err("x/2").is::<UnsupportedDivision>());
        assert!(parse_err("1/2/3").is::<UnsupportedDivision>());
    }

    #[test]
    fn implicit_multiplication() {
        for source in ["2x", "2 x", "x y", "2(x + 1)", "(x)(y)", "x^2 y"] {
            let err = parse_err(source);
            assert!(err.is::<ImplicitMultiplication>(), "`{}` gave {:?}", source, err);
        }

        let err = parse_err("3 + 2x");
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn exponents() {
        assert!(parse_err("x^y").is::<NonIntegerExponent>());
        assert!(parse_err("x^1.5").is::<NonIntegerExponent>());
        assert!(parse_err("x^(2)").is::<NonIntegerExponent>());
        assert!(parse_err("x^-1").is::<NegativeExponent>());
        assert!(parse_err("x^2^3").is::<ChainedExponent>());
        assert!(parse_err("x^99999999999").is::<ExponentTooLarge>());
        assert!(parse_err("x^").is::<UnexpectedEof>());
    }

    #[test]
    fn fraction_raised_to_power() {
        let err = parse_err("2/3^2");
        assert!(err.is::<AmbiguousFractionPower>());
        assert_eq!(err.spans, vec![0..3, 4..5]);

        assert!(parse("(2/3)^2").is_ok());
    }

    #[test]
    fn unknown_character() {
        let err = parse_err("x + $");
        assert_eq!(err.downcast_ref(), Some(&UnknownCharacter { character: "$".to_string() }));
        assert_eq!(err.position(), 4);

        assert!(parse_err("x $").is::<UnknownCharacter>());
    }

    #[test]
    fn empty_input() {
        assert!(parse_err("").is::<UnexpectedEof>());
        assert!(parse_err("   ").is::<UnexpectedEof>());
        assert!(parse_err("x +").is::<UnexpectedEof>());
    }
}
