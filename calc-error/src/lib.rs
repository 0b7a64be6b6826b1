//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that ties an error kind to regions of the source expression.

#[cfg(test)]
extern crate self as calc_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `calc_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error as [`Any`], so that the concrete kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// The human-readable message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns the kind of this error as `K`, if it is one.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the regions of `input` it refers to.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Renders the report for this error into a byte buffer, including any color codes.
    pub fn render_report(&self, src_id: &str, input: &str) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.build_report(src_id).write((src_id, Source::from(input)), &mut buf)?;
        Ok(buf)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use calc_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` is not a number", lexeme),
        labels = ["this token", ""],
        help = "numbers look like `12` or `3.5`",
    )]
    struct NotANumber {
        lexeme: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see here")]
    struct Unlabelled;

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![0..3], NotANumber { lexeme: "abc".to_string() });
        assert_eq!(err.to_string(), "`abc` is not a number");
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..3], NotANumber { lexeme: "abc".to_string() });
        assert!(err.is::<NotANumber>());
        assert!(!err.is::<Unlabelled>());
        assert_eq!(err.downcast_ref::<NotANumber>().map(|k| k.lexeme.as_str()), Some("abc"));
    }

    #[test]
    fn rendered_report() {
        let input = "abc + 1";
        let err = Error::new(vec![0..3, 4..5], NotANumber { lexeme: "abc".to_string() });
        let rendered = err.render_report("input", input).unwrap();
        let text = strip_ansi_escapes::strip_str(String::from_utf8_lossy(&rendered));

        assert!(text.contains("`abc` is not a number"));
        assert!(text.contains("this token"));
        assert!(text.contains("numbers look like `12` or `3.5`"));
    }

    #[test]
    fn report_without_labels() {
        let err = Error::new(vec![0..0], Unlabelled);
        let rendered = err.render_report("input", "1 +").unwrap();
        let text = strip_ansi_escapes::strip_str(String::from_utf8_lossy(&rendered));
        assert!(text.contains("nothing to see here"));
    }
}
