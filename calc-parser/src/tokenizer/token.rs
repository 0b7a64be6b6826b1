use crate::registry::{self, Symbol};
use logos::Logos;
use std::{borrow::Cow, fmt, ops::Range};

/// The raw lexemes produced by the lexer, before numbers and function names are assembled.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"\s+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("%")]
    Mod,

    #[token("^")]
    Exp,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[token(".")]
    Dot,

    #[regex(r"[a-zA-Z]+")]
    Name,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the raw lexeme is one of the binary operator symbols.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Exp)
    }
}

/// A raw lexeme, along with its location in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken<'source> {
    /// The region of the source code that this lexeme originated from.
    pub span: Range<usize>,

    /// The kind of lexeme.
    pub kind: TokenKind,

    /// The raw text of the lexeme.
    pub lexeme: &'source str,
}

/// A token produced by the tokenizer.
///
/// A token is just a piece of text: a numeric literal (possibly signed), an operator symbol, a
/// function name, `(`, `)`, or `,`. Later stages classify it by looking it up in the
/// [`registry`].
///
/// The text usually borrows from the source. A numeric literal written with whitespace inside it,
/// such as `1 .5`, owns its text with the whitespace removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from. Tokens that do not appear
    /// in the source have an empty span.
    pub span: Range<usize>,

    /// The text of the token.
    pub lexeme: Cow<'source, str>,
}

impl<'source> Token<'source> {
    /// Creates a new token.
    pub fn new(span: Range<usize>, lexeme: impl Into<Cow<'source, str>>) -> Self {
        Self { span, lexeme: lexeme.into() }
    }

    /// Returns the registry entry for this token, if it is an operator or function.
    pub fn symbol(&self) -> Option<&'static Symbol> {
        registry::lookup(&self.lexeme)
    }

    /// Returns true if the token is an infix operator.
    pub fn is_operator(&self) -> bool {
        self.symbol().map_or(false, Symbol::is_operator)
    }

    /// Returns true if the token is a function name.
    pub fn is_function(&self) -> bool {
        self.symbol().map_or(false, Symbol::is_function)
    }

    pub fn is_open_paren(&self) -> bool {
        self.lexeme == "("
    }

    pub fn is_close_paren(&self) -> bool {
        self.lexeme == ")"
    }

    pub fn is_comma(&self) -> bool {
        self.lexeme == ","
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
