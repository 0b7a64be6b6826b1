//! Conversion of infix token sequences to reverse Polish notation, using the shunting-yard
//! algorithm.

use crate::{
    error::{kind, Error},
    registry::Associativity,
    tokenizer::Token,
};
use tracing::{debug, trace};

/// The state of an in-progress conversion.
#[derive(Debug, Default)]
struct Converter<'source> {
    /// The tokens in postfix order, so far.
    output: Vec<Token<'source>>,

    /// Operators, functions, and opening parentheses waiting to be moved to the output.
    stack: Vec<Token<'source>>,
}

impl<'source> Converter<'source> {
    /// Moves the top of the stack to the output.
    fn pop_to_output(&mut self) {
        if let Some(token) = self.stack.pop() {
            self.output.push(token);
        }
    }

    /// Moves operators to the output until an opening parenthesis is on top of the stack. Returns
    /// false if the stack ran out first.
    fn pop_until_open_paren(&mut self) -> bool {
        while let Some(top) = self.stack.last() {
            if top.is_open_paren() {
                return true;
            }
            self.pop_to_output();
        }
        false
    }

    /// Returns true if the operator on top of the stack must be output before `op` is pushed.
    fn should_pop_for(&self, op: &Token) -> bool {
        let Some(top) = self.stack.last().and_then(Token::symbol) else {
            return false;
        };
        let Some(incoming) = op.symbol() else {
            return false;
        };

        // a function or parenthesis on top always stops the loop
        match (top.precedence(), incoming.precedence()) {
            (Some(top_prec), Some(op_prec)) => {
                top_prec > op_prec
                    || (top_prec == op_prec && incoming.associativity() == Some(Associativity::Left))
            },
            _ => false,
        }
    }

    fn push_operator(&mut self, op: Token<'source>) {
        while self.should_pop_for(&op) {
            self.pop_to_output();
        }
        self.stack.push(op);
    }

    fn comma(&mut self, comma: &Token) -> Result<(), Error> {
        if self.pop_until_open_paren() {
            Ok(())
        } else {
            Err(Error::new(vec![comma.span.clone()], kind::MisplacedComma))
        }
    }

    fn close_paren(&mut self, paren: &Token) -> Result<(), Error> {
        if !self.pop_until_open_paren() {
            return Err(Error::new(vec![paren.span.clone()], kind::ParenthesisMismatch {
                opening: false,
            }));
        }

        // discard the `(`
        self.stack.pop();

        if self.stack.last().map_or(false, Token::is_function) {
            self.pop_to_output();
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Token<'source>>, Error> {
        while let Some(token) = self.stack.pop() {
            if token.is_open_paren() {
                return Err(Error::new(vec![token.span], kind::ParenthesisMismatch {
                    opening: true,
                }));
            }
            self.output.push(token);
        }
        Ok(self.output)
    }
}

/// Reorders infix tokens into reverse Polish notation.
///
/// Operators are ordered by the precedence and associativity recorded in the
/// [`registry`](crate::registry). A function is output after the arguments in its parentheses.
///
/// ```
/// use calc_parser::{to_postfix, tokenize};
///
/// let tokens = tokenize("2 ^ 3 ^ 2").unwrap();
/// let rpn = to_postfix(&tokens).unwrap();
/// let lexemes = rpn.iter().map(|t| t.lexeme.as_ref()).collect::<Vec<_>>();
/// assert_eq!(lexemes, ["2", "3", "2", "^", "^"]);
/// ```
pub fn to_postfix<'source>(tokens: &[Token<'source>]) -> Result<Vec<Token<'source>>, Error> {
    let mut converter = Converter::default();

    for token in tokens {
        trace!(lexeme = %token.lexeme, stack = converter.stack.len(), "convert token");
        if token.is_function() || token.is_open_paren() {
            converter.stack.push(token.clone());
        } else if token.is_comma() {
            converter.comma(token)?;
        } else if token.is_operator() {
            converter.push_operator(token.clone());
        } else if token.is_close_paren() {
            converter.close_paren(token)?;
        } else {
            converter.output.push(token.clone());
        }
    }

    let output = converter.finish()?;
    debug!(
        rpn = %output.iter().map(|t| t.lexeme.as_ref()).collect::<Vec<_>>().join(" "),
        "converted to postfix",
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::tokenize;
    use super::*;

    /// Tokenizes and converts the input, then returns the lexemes of the result.
    fn rpn(input: &str) -> Result<Vec<String>, Error> {
        let tokens = tokenize(input)?;
        Ok(to_postfix(&tokens)?.into_iter().map(|token| token.lexeme.into_owned()).collect())
    }

    #[test]
    fn single_number() {
        assert_eq!(rpn("42").unwrap(), ["42"]);
    }

    #[test]
    fn precedence() {
        assert_eq!(rpn("1 + 2 * 3").unwrap(), ["1", "2", "3", "*", "+"]);
        assert_eq!(rpn("1 * 2 + 3").unwrap(), ["1", "2", "*", "3", "+"]);
        assert_eq!(rpn("2 * 3 ^ 2").unwrap(), ["2", "3", "2", "^", "*"]);
    }

    #[test]
    fn left_associative() {
        assert_eq!(rpn("1 - 2 - 3").unwrap(), ["1", "2", "-", "3", "-"]);
        assert_eq!(rpn("8 / 4 % 3 * 2").unwrap(), ["8", "4", "/", "3", "%", "2", "*"]);
    }

    #[test]
    fn right_associative() {
        assert_eq!(rpn("2 ^ 3 ^ 2").unwrap(), ["2", "3", "2", "^", "^"]);
    }

    #[test]
    fn parentheses() {
        assert_eq!(rpn("(1 + 2) * 3").unwrap(), ["1", "2", "+", "3", "*"]);
        assert_eq!(rpn("((4))").unwrap(), ["4"]);
    }

    #[test]
    fn functions() {
        assert_eq!(rpn("sin(0)").unwrap(), ["0", "sin"]);
        assert_eq!(rpn("max(1 + 2, 3 * 4)").unwrap(), ["1", "2", "+", "3", "4", "*", "max"]);
        assert_eq!(rpn("2 * sqrt(4) ^ 2").unwrap(), ["2", "4", "sqrt", "2", "^", "*"]);
    }

    #[test]
    fn nested_functions() {
        assert_eq!(
            rpn("min(sin(1), cos(2)) - 1").unwrap(),
            ["1", "sin", "2", "cos", "min", "1", "-"],
        );
    }

    #[test]
    fn leading_sign() {
        assert_eq!(rpn("-(2 + 3)").unwrap(), ["0", "2", "3", "+", "-"]);
    }

    #[test]
    fn spans_survive() {
        let tokens = tokenize("1 + 2").unwrap();
        let rpn = to_postfix(&tokens).unwrap();
        assert_eq!(rpn.iter().map(|t| t.span.clone()).collect::<Vec<_>>(), vec![0..1, 4..5, 2..3]);
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = rpn("(1 + 2").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::ParenthesisMismatch>(), Some(&kind::ParenthesisMismatch {
            opening: true,
        }));
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unopened_parenthesis() {
        let err = rpn("1 + 2)").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::ParenthesisMismatch>(), Some(&kind::ParenthesisMismatch {
            opening: false,
        }));
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn misplaced_comma() {
        let err = rpn("1, 2").unwrap_err();
        assert!(err.is::<kind::MisplacedComma>());
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn empty() {
        assert!(rpn("").unwrap().is_empty());
    }
}
