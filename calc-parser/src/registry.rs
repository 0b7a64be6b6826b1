//! The table of operators and functions understood by the calculator.
//!
//! Every symbol lives in a single table keyed by its textual form. Each entry is tagged as either
//! an [`Operator`](SymbolKind::Operator), which carries a precedence and associativity used by the
//! shunting-yard conversion, or a [`Function`](SymbolKind::Function), which is called with its
//! arguments in parentheses. Both kinds carry their arity and numeric implementation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary operation is left-associative.
    ///
    /// This means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary operation is right-associative.
    ///
    /// This means `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and modulo (`%`), which separate
    /// factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// Whether a symbol is written between its operands, or called like a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// An infix operator, such as `+`.
    Operator {
        precedence: Precedence,
        associativity: Associativity,
    },

    /// A function, such as `sin`, whose arguments are given in parentheses.
    Function,
}

/// An entry in the registry.
#[derive(Clone, Copy)]
pub struct Symbol {
    /// The textual form of the symbol.
    pub name: &'static str,

    /// The number of operands the symbol consumes.
    pub arity: usize,

    /// Whether the symbol is an operator or a function.
    pub kind: SymbolKind,

    /// The numeric implementation. It receives exactly `arity` arguments, in source order.
    eval: fn(&[f64]) -> f64,
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbol")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Symbol {
    const fn operator(
        name: &'static str,
        precedence: Precedence,
        associativity: Associativity,
        eval: fn(&[f64]) -> f64,
    ) -> Self {
        Self {
            name,
            arity: 2,
            kind: SymbolKind::Operator { precedence, associativity },
            eval,
        }
    }

    const fn function(name: &'static str, arity: usize, eval: fn(&[f64]) -> f64) -> Self {
        Self {
            name,
            arity,
            kind: SymbolKind::Function,
            eval,
        }
    }

    /// Returns true if the symbol is an infix operator.
    pub fn is_operator(&self) -> bool {
        matches!(self.kind, SymbolKind::Operator { .. })
    }

    /// Returns true if the symbol is a function.
    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function)
    }

    /// Returns the precedence of the symbol, if it is an operator.
    pub fn precedence(&self) -> Option<Precedence> {
        match self.kind {
            SymbolKind::Operator { precedence, .. } => Some(precedence),
            SymbolKind::Function => None,
        }
    }

    /// Returns the associativity of the symbol, if it is an operator.
    pub fn associativity(&self) -> Option<Associativity> {
        match self.kind {
            SymbolKind::Operator { associativity, .. } => Some(associativity),
            SymbolKind::Function => None,
        }
    }

    /// Applies the symbol to the given arguments.
    ///
    /// The caller is responsible for passing exactly [`Symbol::arity`] arguments; any other
    /// number of arguments produces `NaN`.
    pub fn apply(&self, args: &[f64]) -> f64 {
        (self.eval)(args)
    }
}

/// Build numeric implementations that take a fixed number of `f64` arguments.
macro_rules! build_impls {
    ($($name:ident($($arg:ident),+) => $body:expr;)*) => {
        $(
            fn $name(args: &[f64]) -> f64 {
                match *args {
                    [$($arg),+] => $body,
                    _ => f64::NAN,
                }
            }
        )*
    };
}

build_impls! {
    add(a, b) => a + b;
    sub(a, b) => a - b;
    mul(a, b) => a * b;
    div(a, b) => a / b;
    rem(a, b) => a % b;
    pow(a, b) => {
        // `f64::powf` gives 1 for `1 ^ NaN` and `(-1) ^ inf`; those are indeterminate
        if b.is_nan() || (a.abs() == 1.0 && b.is_infinite()) {
            f64::NAN
        } else {
            a.powf(b)
        }
    };
    sin(x) => x.sin();
    cos(x) => x.cos();
    tan(x) => x.tan();
    log(x) => x.ln();
    exp(x) => x.exp();
    sqrt(x) => x.sqrt();
    min(a, b) => {
        // `f64::min` ignores NaN and does not order the two zeros
        if a.is_nan() || b.is_nan() {
            f64::NAN
        } else if a == b {
            if a.is_sign_negative() { a } else { b }
        } else {
            a.min(b)
        }
    };
    max(a, b) => {
        if a.is_nan() || b.is_nan() {
            f64::NAN
        } else if a == b {
            if a.is_sign_positive() { a } else { b }
        } else {
            a.max(b)
        }
    };
}

/// Every symbol known to the calculator.
static SYMBOLS: &[Symbol] = &[
    Symbol::operator("+", Precedence::Term, Associativity::Left, add),
    Symbol::operator("-", Precedence::Term, Associativity::Left, sub),
    Symbol::operator("*", Precedence::Factor, Associativity::Left, mul),
    Symbol::operator("/", Precedence::Factor, Associativity::Left, div),
    Symbol::operator("%", Precedence::Factor, Associativity::Left, rem),
    Symbol::operator("^", Precedence::Exp, Associativity::Right, pow),
    Symbol::function("sin", 1, sin),
    Symbol::function("cos", 1, cos),
    Symbol::function("tan", 1, tan),
    Symbol::function("log", 1, log),
    Symbol::function("exp", 1, exp),
    Symbol::function("sqrt", 1, sqrt),
    Symbol::function("min", 2, min),
    Symbol::function("max", 2, max),
];

static REGISTRY: Lazy<HashMap<&'static str, &'static Symbol>> = Lazy::new(|| {
    SYMBOLS.iter().map(|symbol| (symbol.name, symbol)).collect()
});

/// Looks up the symbol with the given textual form.
pub fn lookup(name: &str) -> Option<&'static Symbol> {
    REGISTRY.get(name).copied()
}

/// Returns the names of all functions, in declaration order.
pub fn function_names() -> impl Iterator<Item = &'static str> {
    SYMBOLS.iter().filter(|symbol| symbol.is_function()).map(|symbol| symbol.name)
}

/// Returns true if `text` is the start of (or the whole of) some function name.
pub fn is_function_prefix(text: &str) -> bool {
    function_names().any(|name| name.starts_with(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_and_functions_are_tagged() {
        for op in ["+", "-", "*", "/", "%", "^"] {
            let symbol = lookup(op).unwrap();
            assert!(symbol.is_operator(), "{op}");
            assert_eq!(symbol.arity, 2);
        }

        for func in ["sin", "cos", "tan", "log", "exp", "sqrt"] {
            let symbol = lookup(func).unwrap();
            assert!(symbol.is_function(), "{func}");
            assert_eq!(symbol.arity, 1);
        }

        assert_eq!(lookup("min").unwrap().arity, 2);
        assert_eq!(lookup("max").unwrap().arity, 2);
        assert!(lookup("(").is_none());
        assert!(lookup("1").is_none());
    }

    #[test]
    fn precedence_order() {
        let prec = |name| lookup(name).and_then(Symbol::precedence).unwrap();
        assert!(prec("+") == prec("-"));
        assert!(prec("*") > prec("+"));
        assert!(prec("%") == prec("/"));
        assert!(prec("^") > prec("*"));
        assert!(lookup("sin").unwrap().precedence().is_none());
    }

    #[test]
    fn only_exponentiation_is_right_associative() {
        for symbol in SYMBOLS.iter().filter(|s| s.is_operator()) {
            let expected = if symbol.name == "^" {
                Associativity::Right
            } else {
                Associativity::Left
            };
            assert_eq!(symbol.associativity(), Some(expected), "{}", symbol.name);
        }
    }

    #[test]
    fn apply_arithmetic() {
        assert_eq!(lookup("-").unwrap().apply(&[1.0, 3.0]), -2.0);
        assert_eq!(lookup("%").unwrap().apply(&[-7.0, 3.0]), -1.0);
        assert_eq!(lookup("^").unwrap().apply(&[2.0, 10.0]), 1024.0);
        assert_eq!(lookup("/").unwrap().apply(&[1.0, -0.0]), f64::NEG_INFINITY);
        assert!(lookup("/").unwrap().apply(&[0.0, 0.0]).is_nan());
    }

    #[test]
    fn indeterminate_powers() {
        let pow = lookup("^").unwrap();
        assert!(pow.apply(&[1.0, f64::NAN]).is_nan());
        assert!(pow.apply(&[-1.0, f64::INFINITY]).is_nan());
        assert!(pow.apply(&[1.0, f64::NEG_INFINITY]).is_nan());
        assert_eq!(pow.apply(&[f64::NAN, 0.0]), 1.0);
        assert_eq!(pow.apply(&[2.0, f64::INFINITY]), f64::INFINITY);
        assert_eq!(pow.apply(&[0.5, f64::INFINITY]), 0.0);
    }

    #[test]
    fn min_max_order_signed_zeros() {
        let min = lookup("min").unwrap();
        let max = lookup("max").unwrap();
        assert!(min.apply(&[0.0, -0.0]).is_sign_negative());
        assert!(min.apply(&[-0.0, 0.0]).is_sign_negative());
        assert!(max.apply(&[-0.0, 0.0]).is_sign_positive());
        assert!(min.apply(&[f64::NAN, 1.0]).is_nan());
        assert_eq!(max.apply(&[3.0, 5.0]), 5.0);
    }

    #[test]
    fn wrong_argument_count_is_nan() {
        assert!(lookup("+").unwrap().apply(&[1.0]).is_nan());
        assert!(lookup("sin").unwrap().apply(&[]).is_nan());
    }

    #[test]
    fn function_prefixes() {
        assert!(is_function_prefix("s"));
        assert!(is_function_prefix("sq"));
        assert!(is_function_prefix("max"));
        assert!(!is_function_prefix("sx"));
        assert!(!is_function_prefix("sine"));
    }
}
