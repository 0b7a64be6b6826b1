pub mod kind;

pub use calc_error::{Error, ErrorKind};
