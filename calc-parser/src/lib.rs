//! Tokenizer and infix-to-postfix converter for calculator expressions.
//!
//! An expression goes through two stages in this crate:
//!
//! 1. [`tokenize`] scans the raw text into [`Token`]s: numeric literals (with any unary sign
//!    folded in), operator symbols, function names, parentheses, and commas.
//! 2. [`to_postfix`] reorders those tokens into reverse Polish notation with the shunting-yard
//!    algorithm, using the precedence and associativity found in the [`registry`].
//!
//! Evaluation of the resulting postfix sequence lives in `calc-compute`.

pub mod error;
pub mod postfix;
pub mod registry;
pub mod tokenizer;

pub use error::Error;
pub use postfix::to_postfix;
pub use tokenizer::{tokenize, Token};
