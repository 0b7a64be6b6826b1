use ariadne::Fmt;
use calc_attrs::ErrorKind;
use calc_error::{ErrorKind, EXPR};
use crate::registry;

/// A numeric literal contains more than one decimal point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("double decimal point in number: `{}`", literal),
    labels = ["this number has more than one decimal point"],
    help = format!("a number can contain at most one {}", ".".fg(EXPR)),
)]
pub struct DoubleDecimalPoint {
    /// The literal, up to and including the second decimal point.
    pub literal: String,
}

/// Whitespace was found between two runs of digits.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("space inside a number: `{}`", text),
    labels = ["this looks like a single number split in two"],
    help = "remove the space, or add an operator between the two numbers",
)]
pub struct SpaceInNumber {
    /// The source text from the start of the first number to the end of the second.
    pub text: String,
}

/// Two binary operators appear one after another.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("consecutive operators: `{}{}`", first, second),
    labels = ["this operator", "is directly followed by this operator"],
    help = format!("add an {} between the two operators", "expression".fg(EXPR)),
)]
pub struct ConsecutiveOperators {
    /// The first operator.
    pub first: String,

    /// The operator directly after it.
    pub second: String,
}

/// The expression contains characters that are not part of any number, operator, or function
/// name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "invalid characters: {}",
        runs.iter().map(|run| format!("`{}`", run)).collect::<Vec<_>>().join(", ")
    ),
    labels = runs.iter().map(|_| "unrecognized"),
    help = if suggestions.is_empty() {
        format!(
            "the available functions are: {}",
            registry::function_names().collect::<Vec<_>>().join(", ")
        )
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", suggestions[0].fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct InvalidCharacters {
    /// Each contiguous run of unrecognized characters, in source order.
    pub runs: Vec<String>,

    /// Function names that are similar to one of the runs.
    pub suggestions: Vec<&'static str>,
}

/// A comma appeared outside of any parenthesis.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "misplaced `,`",
    labels = ["this comma is not inside a function call"],
    help = format!("commas separate the arguments of a function, as in {}", "min(1, 2)".fg(EXPR)),
)]
pub struct MisplacedComma;

/// A parenthesis has no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "parenthesis mismatch",
    labels = [if *opening {
        "this parenthesis is not closed"
    } else {
        "this parenthesis was never opened"
    }],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct ParenthesisMismatch {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}
