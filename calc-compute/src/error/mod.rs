pub mod kind;

pub use calc_error::{Error, ErrorKind};
use std::{fmt, io};

/// Utility enum to package errors that can occur in each stage of a calculation.
#[derive(Debug)]
pub enum CalcError {
    /// The expression could not be broken into tokens.
    Lex(Error),

    /// The tokens could not be arranged into postfix order.
    Syntax(Error),

    /// The postfix sequence could not be evaluated.
    Eval(Error),
}

impl CalcError {
    /// Returns the underlying error, regardless of the stage it came from.
    pub fn error(&self) -> &Error {
        match self {
            Self::Lex(err) | Self::Syntax(err) | Self::Eval(err) => err,
        }
    }

    /// Returns the name of the stage the error came from.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lex",
            Self::Syntax(_) => "syntax",
            Self::Eval(_) => "eval",
        }
    }

    /// Returns true if the kind of the underlying error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.error().is::<K>()
    }

    /// Report this error to stderr, highlighting the regions of `input` it refers to.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.error().report_to_stderr(src_id, input)
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.stage(), self.error())
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error())
    }
}
