//! Property-based tests for binomial coefficients and polynomial arithmetic.
