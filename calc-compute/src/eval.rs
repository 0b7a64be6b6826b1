//! Evaluation of expressions in reverse Polish notation.

use calc_parser::Token;
use crate::error::{kind, Error};
use std::ops::Range;
use tracing::{debug, trace};

/// A value on the evaluation stack, along with the region of the source that produced it.
#[derive(Debug, Clone, PartialEq)]
struct Operand {
    value: f64,
    span: Range<usize>,
}

/// Returns the smallest span covering all of the given spans.
fn cover<'a>(spans: impl IntoIterator<Item = &'a Range<usize>>, init: Range<usize>) -> Range<usize> {
    spans.into_iter().fold(init, |acc, span| acc.start.min(span.start)..acc.end.max(span.end))
}

/// Evaluates a sequence of tokens in reverse Polish notation.
///
/// Each operator or function pops exactly as many operands as its arity, in source order, and
/// pushes its result. Any other token must be a numeric literal.
///
/// ```
/// use calc_compute::eval_rpn;
/// use calc_parser::{to_postfix, tokenize};
///
/// let tokens = tokenize("min(3, 5) * 2").unwrap();
/// let rpn = to_postfix(&tokens).unwrap();
/// assert_eq!(eval_rpn(&rpn).unwrap(), 6.0);
/// ```
pub fn eval_rpn(tokens: &[Token]) -> Result<f64, Error> {
    let mut stack: Vec<Operand> = Vec::new();

    for token in tokens {
        match token.symbol() {
            Some(symbol) => {
                if stack.len() < symbol.arity {
                    return Err(Error::new(vec![token.span.clone()], kind::MissingOperands {
                        symbol: symbol.name.to_string(),
                        arity: symbol.arity,
                        found: stack.len(),
                    }));
                }

                let args = stack.split_off(stack.len() - symbol.arity);
                let values = args.iter().map(|operand| operand.value).collect::<Vec<_>>();
                let value = symbol.apply(&values);
                trace!(symbol = symbol.name, ?values, value, "apply");

                stack.push(Operand {
                    value,
                    span: cover(args.iter().map(|operand| &operand.span), token.span.clone()),
                });
            },
            None => {
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    Error::new(vec![token.span.clone()], kind::InvalidOperand {
                        lexeme: token.lexeme.to_string(),
                    })
                })?;
                stack.push(Operand { value, span: token.span.clone() });
            },
        }
    }

    match stack.len() {
        0 => Err(Error::new(Vec::new(), kind::EmptyExpression)),
        1 => {
            let value = stack[0].value;
            debug!(value, "evaluated expression");
            Ok(value)
        },
        count => Err(Error::new(
            stack.into_iter().map(|operand| operand.span).collect(),
            kind::InsufficientOperators { count },
        )),
    }
}
