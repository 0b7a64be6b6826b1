use ariadne::Fmt;
use calc_attrs::ErrorKind;
use calc_error::{ErrorKind, EXPR};

/// An operator or function was applied without enough operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "missing operands for `{}`: expected {}, found {}",
        symbol,
        arity,
        found,
    ),
    labels = [format!("this needs {} operand{}", arity, if *arity == 1 { "" } else { "s" })],
    help = format!("check that every operator has an {} on both sides", "expression".fg(EXPR)),
)]
pub struct MissingOperands {
    /// The operator or function symbol.
    pub symbol: String,

    /// The number of operands the symbol consumes.
    pub arity: usize,

    /// The number of operands that were available.
    pub found: usize,
}

/// More than one value was left over after evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("insufficient operators: {} values are not combined into one result", count),
    labels = (0..*count).map(|_| "this value is left over"),
    help = "add an operator between each pair of values",
)]
pub struct InsufficientOperators {
    /// The number of values left over.
    pub count: usize,
}

/// There was nothing to evaluate.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    help = format!("type an expression, such as {}", "1 + 2".fg(EXPR)),
)]
pub struct EmptyExpression;

/// A token that is neither a symbol nor a number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a number", lexeme),
    labels = ["this operand"],
)]
pub struct InvalidOperand {
    /// The text of the token.
    pub lexeme: String,
}
