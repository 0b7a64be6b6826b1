//! Evaluation of calculator expressions.
//!
//! [`calculate`] runs the whole pipeline: the expression is tokenized and reordered into reverse
//! Polish notation by `calc-parser`, then evaluated by [`eval_rpn`]. Each stage can also be run
//! on its own, which is useful for showing intermediate results.
//!
//! ```
//! use calc_compute::{calculate, format_number};
//!
//! assert_eq!(calculate("2 ^ 3 ^ 2").unwrap(), 512.0);
//! assert_eq!(format_number(calculate("-0 * 1").unwrap()), "-0");
//! ```

pub mod error;
pub mod eval;
pub mod fmt;
pub mod infix;

pub use calc_parser::{to_postfix, tokenize};
pub use error::CalcError;
pub use eval::eval_rpn;
pub use fmt::format_number;
pub use infix::to_infix;

use tracing::debug;

/// Tokenizes, converts, and evaluates the given expression.
pub fn calculate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression).map_err(CalcError::Lex)?;
    let rpn = to_postfix(&tokens).map_err(CalcError::Syntax)?;
    let result = eval_rpn(&rpn).map_err(CalcError::Eval)?;
    debug!(expression, result, "calculated");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_is_relative_eq, afe_relative_error_msg, assert_float_relative_eq};
    use calc_parser::error::kind::{DoubleDecimalPoint, ParenthesisMismatch};
    use crate::error::kind::{EmptyExpression, MissingOperands};
    use super::*;

    #[test]
    fn basic_arithmetic() {
        assert_eq!(calculate("1 + 2").unwrap(), 3.0);
        assert_eq!(calculate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(calculate("-5").unwrap(), -5.0);
        assert_eq!(calculate("10 % 4").unwrap(), 2.0);
        assert_float_relative_eq!(calculate("2 * (3.5 - 1) / 4").unwrap(), 1.25);
    }

    #[test]
    fn whitespace_inside_literal() {
        assert_eq!(calculate("12 .5").unwrap(), 12.5);
        assert_float_relative_eq!(calculate("1. 2 + 1").unwrap(), 2.2);
    }

    #[test]
    fn functions() {
        assert_eq!(calculate("sin(0)").unwrap(), 0.0);
        assert_eq!(calculate("min(3, 5)").unwrap(), 3.0);
        assert_eq!(calculate("max(-1, -2) * 4").unwrap(), -4.0);
        assert_float_relative_eq!(calculate("sqrt(2) ^ 2").unwrap(), 2.0);
    }

    #[test]
    fn indeterminate_power() {
        assert_eq!(format_number(calculate("1 ^ (0 / 0)").unwrap()), "NaN");
        assert_eq!(format_number(calculate("-1 ^ (1 / 0)").unwrap()), "NaN");
    }

    #[test]
    fn signed_zero() {
        assert_eq!(format_number(calculate("-0 + 0").unwrap()), "0");
        assert_eq!(format_number(calculate("0 - 0").unwrap()), "0");
        assert_eq!(format_number(calculate("-0 * 1").unwrap()), "-0");
        assert_eq!(format_number(calculate("-0").unwrap()), "-0");
    }

    #[test]
    fn errors_by_stage() {
        let err = calculate("1 +").unwrap_err();
        assert!(matches!(err, CalcError::Eval(_)));
        assert!(err.is::<MissingOperands>());

        let err = calculate("1..2").unwrap_err();
        assert!(matches!(err, CalcError::Lex(_)));
        assert!(err.is::<DoubleDecimalPoint>());

        let err = calculate("(1 + 2").unwrap_err();
        assert!(matches!(err, CalcError::Syntax(_)));
        assert!(err.is::<ParenthesisMismatch>());

        let err = calculate("   ").unwrap_err();
        assert!(err.is::<EmptyExpression>());
    }

    /// A small deterministic generator, so that the same expressions are tested on every run.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }

        fn below(&mut self, n: u64) -> u64 {
            self.next() % n
        }
    }

    /// Generates a random well-formed expression using integers and the four basic operators.
    fn gen_expr(rng: &mut Lcg, depth: u32) -> String {
        if depth == 0 || rng.below(4) == 0 {
            return rng.below(20).to_string();
        }

        let op = ["+", "-", "*", "/"][rng.below(4) as usize];
        let expr = format!("{} {} {}", gen_expr(rng, depth - 1), op, gen_expr(rng, depth - 1));
        if rng.below(2) == 0 {
            format!("({})", expr)
        } else {
            expr
        }
    }

    #[test]
    fn infix_round_trip() {
        let mut rng = Lcg(0x5eed);

        for _ in 0..500 {
            let expr = gen_expr(&mut rng, 4);
            let rpn = to_postfix(&tokenize(&expr).unwrap()).unwrap();
            let rebuilt = to_infix(&rpn).unwrap();

            let expected = format_number(calculate(&expr).unwrap());
            let actual = format_number(calculate(&rebuilt).unwrap());
            assert_eq!(actual, expected, "{expr} was rebuilt as {rebuilt}");
        }
    }
}
