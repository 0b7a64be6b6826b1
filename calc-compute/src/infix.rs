//! Reconstruction of infix expressions from reverse Polish notation.

use calc_parser::{registry::{Associativity, Precedence}, Token};
use crate::error::{kind, Error};
use std::ops::Range;

/// A reconstructed subexpression.
#[derive(Debug)]
struct Node {
    /// The infix text of the subexpression.
    text: String,

    /// The precedence of the outermost operator, or [`None`] for literals and function calls,
    /// which never need parentheses.
    precedence: Option<Precedence>,

    span: Range<usize>,
}

impl Node {
    /// Returns the text of the node, wrapped in parentheses if it binds more loosely than an
    /// operand of an operator with the given precedence and associativity must.
    ///
    /// `tie` is the associativity under which an operand of equal precedence needs parentheses:
    /// [`Associativity::Right`] for a left operand, [`Associativity::Left`] for a right operand.
    fn operand_text(&self, parent: Precedence, associativity: Associativity, tie: Associativity) -> String {
        match self.precedence {
            Some(prec) if prec < parent || (prec == parent && associativity == tie) => {
                format!("({})", self.text)
            },
            _ => self.text.clone(),
        }
    }
}

/// Rebuilds an infix expression from a sequence of tokens in reverse Polish notation, using as
/// few parentheses as the precedence and associativity of each operator allow.
///
/// ```
/// use calc_compute::to_infix;
/// use calc_parser::{to_postfix, tokenize};
///
/// let tokens = tokenize("((1 + 2)) * max(3, (4))").unwrap();
/// let rpn = to_postfix(&tokens).unwrap();
/// assert_eq!(to_infix(&rpn).unwrap(), "(1 + 2) * max(3, 4)");
/// ```
pub fn to_infix(tokens: &[Token]) -> Result<String, Error> {
    let mut stack: Vec<Node> = Vec::new();

    for token in tokens {
        let Some(symbol) = token.symbol() else {
            stack.push(Node {
                text: token.lexeme.to_string(),
                precedence: None,
                span: token.span.clone(),
            });
            continue;
        };

        if stack.len() < symbol.arity {
            return Err(Error::new(vec![token.span.clone()], kind::MissingOperands {
                symbol: symbol.name.to_string(),
                arity: symbol.arity,
                found: stack.len(),
            }));
        }

        let args = stack.split_off(stack.len() - symbol.arity);
        let span = args
            .iter()
            .fold(token.span.clone(), |acc, arg| acc.start.min(arg.span.start)..acc.end.max(arg.span.end));

        let node = match (symbol.precedence(), symbol.associativity(), &args[..]) {
            (Some(prec), Some(assoc), [left, right]) => Node {
                text: format!(
                    "{} {} {}",
                    left.operand_text(prec, assoc, Associativity::Right),
                    symbol.name,
                    right.operand_text(prec, assoc, Associativity::Left),
                ),
                precedence: Some(prec),
                span,
            },
            _ => Node {
                text: format!(
                    "{}({})",
                    symbol.name,
                    args.iter().map(|arg| arg.text.as_str()).collect::<Vec<_>>().join(", "),
                ),
                precedence: None,
                span,
            },
        };
        stack.push(node);
    }

    match stack.len() {
        0 => Err(Error::new(Vec::new(), kind::EmptyExpression)),
        1 => Ok(stack.remove(0).text),
        count => Err(Error::new(
            stack.into_iter().map(|node| node.span).collect(),
            kind::InsufficientOperators { count },
        )),
    }
}
