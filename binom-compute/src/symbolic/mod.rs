//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Text is parsed by [`binom_parser`] into an AST, which is converted into a flattened
//! [`Expression`] tree and then normalized into a [`Polynomial`]: a set of [`Term`]s, each a
//! rational coefficient times a [`Monomial`]. All comparison and grading happens on
//! [`Polynomial`]s, whose equality is exact term-set equality.
//!
//! ```
//! use binom_compute::symbolic::Expression;
//!
//! let lhs = Expression::parse("(x + 1)^2").unwrap().normalize().unwrap();
//! let rhs = Expression::parse("x*x + 2*x + 1").unwrap().normalize().unwrap();
//! assert_eq!(lhs, rhs);
//! ```

pub mod expr;
pub mod monomial;
pub mod polynomial;
pub mod step_collector;
pub mod symbol;

pub use expr::{Expression, Primary};
pub use monomial::Monomial;
pub use polynomial::{
    add_polynomials,
    multiply_polynomials,
    power_polynomial,
    subtract_polynomials,
    Polynomial,
    Term,
};
pub use step_collector::StepCollector;
pub use symbol::Symbol;
