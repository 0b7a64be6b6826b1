use calc_compute::CalcError;
use std::io;

/// Utility enum to package errors that can occur while reading / evaluating.
#[derive(Debug)]
pub enum Error {
    /// The expression could not be calculated.
    Calc(CalcError),

    /// The input could not be read.
    Io(io::Error),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// Calculation errors are rendered as a report highlighting the offending parts of `input`.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Calc(err) => {
                if let Err(io_err) = err.report_to_stderr("input", input) {
                    eprintln!("{}", err);
                    eprintln!("(failed to render report: {})", io_err);
                }
            },
            Self::Io(err) => eprintln!("error: {}", err),
        }
    }
}

impl From<CalcError> for Error {
    fn from(err: CalcError) -> Self {
        Self::Calc(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
