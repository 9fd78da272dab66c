use std::fmt;

/// Errors raised while decoding wire input or querying decoded units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A declared length in the input is inconsistent with the buffer
    /// bounds. Never recovered internally; the input is rejected outright.
    Malformed,

    /// The queried option is not present in the option list.
    OptionNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Malformed => write!(f, "malformed packet"),
            Error::OptionNotFound => write!(f, "option not found"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias for wire decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
