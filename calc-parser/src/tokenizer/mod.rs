pub mod token;

use crate::{
    error::{kind, Error},
    registry,
};
use levenshtein::levenshtein;
use logos::{Lexer, Logos};
use std::{borrow::Cow, ops::Range};
use tracing::{debug, trace};
pub use token::{RawToken, Token, TokenKind};

/// Returns an iterator over the raw lexeme kinds produced by the lexer.
pub fn lex(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the raw lexemes produced by the lexer. This allows
/// the scanner to look one lexeme behind and ahead.
pub fn lex_complete(input: &str) -> Box<[RawToken]> {
    let mut lexer = lex(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // the catch-all `Symbol` pattern makes lexing infallible, but an error is still reported
        // as an unrecognized symbol rather than dropped
        tokens.push(RawToken {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

/// What the scanner is in the middle of assembling.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Nothing is in progress.
    Idle,

    /// A numeric literal spanning `start..end` is being accumulated.
    InNumber { start: usize, end: usize, has_dot: bool },

    /// The start of a function name spanning `start..end` has been seen.
    InName { start: usize, end: usize },
}

/// Assembles raw lexemes into [`Token`]s.
struct Scanner<'source> {
    /// The source being scanned.
    source: &'source str,

    /// The raw lexemes of the source.
    raw: Box<[RawToken<'source>]>,

    /// The tokens emitted so far.
    tokens: Vec<Token<'source>>,

    state: State,

    /// Runs of characters that could not be recognized. Adjacent characters are merged into one
    /// run.
    unknown: Vec<Range<usize>>,
}

impl<'source> Scanner<'source> {
    fn new(source: &'source str) -> Self {
        Self {
            source,
            raw: lex_complete(source),
            tokens: Vec::new(),
            state: State::Idle,
            unknown: Vec::new(),
        }
    }

    /// Returns the kind of the raw lexeme at the given index, if there is one.
    fn raw_kind(&self, index: Option<usize>) -> Option<TokenKind> {
        index.and_then(|i| self.raw.get(i)).map(|token| token.kind)
    }

    /// Pushes a token that appears in the source.
    fn emit(&mut self, span: Range<usize>) {
        let lexeme = &self.source[span.clone()];
        trace!(lexeme, ?span, "emit token");
        self.tokens.push(Token::new(span, lexeme));
    }

    /// Marks the given span as unrecognized.
    fn push_unknown(&mut self, span: Range<usize>) {
        match self.unknown.last_mut() {
            Some(last) if last.end == span.start => last.end = span.end,
            _ => self.unknown.push(span),
        }
    }

    /// Emits the numeric literal in progress, if any. Whitespace inside the literal is dropped.
    fn flush_number(&mut self) {
        if let State::InNumber { start, end, .. } = self.state {
            self.state = State::Idle;
            let text = &self.source[start..end];
            let lexeme = if text.contains(char::is_whitespace) {
                Cow::Owned(text.split_whitespace().collect::<String>())
            } else {
                Cow::Borrowed(text)
            };
            trace!(%lexeme, span = ?(start..end), "emit literal");
            self.tokens.push(Token::new(start..end, lexeme));
        }
    }

    /// Gives up on the function name in progress, if any, marking its characters as unrecognized.
    fn abandon_name(&mut self) {
        if let State::InName { start, end } = self.state {
            self.state = State::Idle;
            self.push_unknown(start..end);
        }
    }

    /// Finishes whatever is in progress.
    fn settle(&mut self) {
        self.flush_number();
        self.abandon_name();
    }

    /// Returns true if a `+` or `-` at this point can be the sign of a number, judging by the
    /// previously emitted token.
    fn sign_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => token.is_comma() || token.is_open_paren() || token.is_operator(),
        }
    }

    /// Scans the whole source.
    fn scan(mut self) -> Result<Vec<Token<'source>>, Error> {
        for i in 0..self.raw.len() {
            let token = self.raw[i].clone();
            let prev = self.raw_kind(i.checked_sub(1));
            let next = self.raw_kind(Some(i + 1));

            match token.kind {
                TokenKind::Whitespace => {
                    if prev == Some(TokenKind::Int) && next == Some(TokenKind::Int) {
                        let start = match self.state {
                            State::InNumber { start, .. } => start,
                            _ => self.raw[i - 1].span.start,
                        };
                        let end = self.raw[i + 1].span.end;
                        return Err(Error::new(vec![start..end], kind::SpaceInNumber {
                            text: self.source[start..end].to_string(),
                        }));
                    }

                    // whitespace does not end a literal: `1 .5` is `1.5`
                    self.abandon_name();
                },
                TokenKind::Int => {
                    self.abandon_name();
                    self.state = match self.state {
                        State::InNumber { start, has_dot, .. } => State::InNumber {
                            start,
                            end: token.span.end,
                            has_dot,
                        },
                        _ => State::InNumber {
                            start: token.span.start,
                            end: token.span.end,
                            has_dot: false,
                        },
                    };
                },
                TokenKind::Dot => {
                    self.abandon_name();
                    self.state = match self.state {
                        State::InNumber { start, has_dot: true, .. } => {
                            return Err(Error::new(vec![start..token.span.end], kind::DoubleDecimalPoint {
                                literal: self.source[start..token.span.end].to_string(),
                            }));
                        },
                        State::InNumber { start, .. } => State::InNumber {
                            start,
                            end: token.span.end,
                            has_dot: true,
                        },
                        _ => State::InNumber {
                            start: token.span.start,
                            end: token.span.end,
                            has_dot: true,
                        },
                    };
                },
                TokenKind::Add | TokenKind::Sub
                    if !matches!(self.state, State::InNumber { .. })
                        && self.sign_allowed()
                        && next == Some(TokenKind::Int) =>
                {
                    // unary sign, folded into the number that follows
                    self.abandon_name();
                    self.state = State::InNumber {
                        start: token.span.start,
                        end: token.span.end,
                        has_dot: false,
                    };
                },
                op if op.is_operator() => {
                    if !matches!(self.state, State::InNumber { .. }) {
                        if let Some(last) = self.tokens.last().filter(|last| last.is_operator()) {
                            return Err(Error::new(vec![last.span.clone(), token.span.clone()], kind::ConsecutiveOperators {
                                first: last.lexeme.to_string(),
                                second: token.lexeme.to_string(),
                            }));
                        }
                    }
                    self.settle();
                    self.emit(token.span);
                },
                TokenKind::Comma | TokenKind::OpenParen | TokenKind::CloseParen => {
                    self.settle();
                    self.emit(token.span);
                },
                TokenKind::Name => {
                    for (offset, c) in token.lexeme.char_indices() {
                        self.scan_name_char(token.span.start + offset, c);
                    }
                },
                _ => {
                    self.settle();
                    self.push_unknown(token.span);
                },
            }
        }

        self.abandon_name();
        if !self.unknown.is_empty() {
            let runs = self.unknown
                .iter()
                .map(|span| self.source[span.clone()].to_string())
                .collect::<Vec<_>>();
            let suggestions = registry::function_names()
                .filter(|name| runs.iter().any(|run| levenshtein(name, run) < 2))
                .collect();
            return Err(Error::new(self.unknown, kind::InvalidCharacters { runs, suggestions }));
        }
        self.flush_number();

        // a leading sign becomes a subtraction from (or addition to) zero
        if self.tokens.first().map_or(false, |token| matches!(token.lexeme.as_ref(), "+" | "-")) {
            self.tokens.insert(0, Token::new(0..0, "0"));
        }

        Ok(self.tokens)
    }

    /// Feeds one letter of a name into the scanner. A function name is emitted as soon as the
    /// letters spell it out; letters that cannot be part of any function name are unrecognized.
    fn scan_name_char(&mut self, pos: usize, c: char) {
        let end = pos + c.len_utf8();
        let start = match self.state {
            State::InName { start, .. } => start,
            _ => {
                self.flush_number();
                pos
            },
        };

        let candidate = &self.source[start..end];
        if registry::is_function_prefix(candidate) {
            if registry::lookup(candidate).is_some() {
                self.state = State::Idle;
                self.emit(start..end);
            } else {
                self.state = State::InName { start, end };
            }
        } else if start < pos {
            // the name so far is a dead end; `c` may still begin a new one
            self.abandon_name();
            self.scan_name_char(pos, c);
        } else {
            self.push_unknown(pos..end);
        }
    }
}

/// Breaks a mathematical expression into tokens.
///
/// ```
/// use calc_parser::tokenize;
///
/// let tokens = tokenize("-1 + max(2, 3)").unwrap();
/// let lexemes = tokens.iter().map(|t| t.lexeme.as_ref()).collect::<Vec<_>>();
/// assert_eq!(lexemes, ["-1", "+", "max", "(", "2", ",", "3", ")"]);
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, Error> {
    let tokens = Scanner::new(expression).scan()?;
    debug!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}
