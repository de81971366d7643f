//! Tokenizer and parser for the algebraic input accepted by the binomial algebra engine.
//!
//! The grammar is deliberately small: names, integer / decimal / fraction literals, `+`, `-`,
//! `*`, and powers with a non-negative integer literal exponent (written `^` or `**`).
//! Multiplication must always be written explicitly, and `/` may only join two integer literals.
//!
//! ```
//! use binom_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("(2*x + 3)^2").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "(2*x + 3)^2");
//!
//! let err = Parser::new("2x + 1").try_parse_full::<Expr>().unwrap_err();
//! assert_eq!(err.position(), 0);
//! ```

pub mod parser;
pub mod tokenizer;
