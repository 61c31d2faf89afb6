//! Error types for coordinate and location handling.

use std::error::Error;
use std::fmt;

/// Errors from parsing user-supplied location text.
///
/// Lookups that merely find nothing return `None`; this error is reserved
/// for text that matches no recognised location grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationError {
    /// The text is not a sector-hex, absolute pair, or relative quad.
    InvalidLocationString {
        /// The offending input, after whitespace trimming.
        input: String,
    },
}

impl LocationError {
    /// Build an [`InvalidLocationString`](Self::InvalidLocationString) for `input`.
    pub fn invalid(input: &str) -> Self {
        Self::InvalidLocationString {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocationString { input } => {
                write!(f, "invalid location string: {input:?}")
            }
        }
    }
}

impl Error for LocationError {}
