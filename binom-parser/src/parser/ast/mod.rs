pub mod binary;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod power;
pub mod unary;

pub use binary::{BinOpKind, Binary};
pub use expr::Expr;
pub use literal::{LitDecimal, LitFraction, LitInt, LitSym, Literal};
pub use paren::Paren;
pub use power::Power;
pub use unary::Unary;
