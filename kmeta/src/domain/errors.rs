//! Structured error types for kmeta
//!
//! Using thiserror for automatic Display implementation and error chaining.

use kmeta_common::SupportedArch;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SigInfoError {
    /// The caller picked the wrong architecture or handed over a truncated
    /// capture. Nothing was interpreted.
    #[error("siginfo for {arch} must be {expected} bytes, got {actual}")]
    SizeMismatch { arch: SupportedArch, expected: usize, actual: usize },

    #[error("unknown architecture tag {0}")]
    UnknownArch(i32),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("no siginfo bytes supplied")]
    Empty,

    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidHex { digit: char, position: usize },

    #[error("hex input has an odd number of digits ({0})")]
    OddLength(usize),

    #[error("cannot parse {0:?} as an integer")]
    InvalidNumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_display() {
        let err = SigInfoError::SizeMismatch { arch: SupportedArch::X86, expected: 128, actual: 64 };
        assert_eq!(err.to_string(), "siginfo for x86 must be 128 bytes, got 64");
    }

    #[test]
    fn test_input_error_display() {
        let err = InputError::InvalidHex { digit: 'z', position: 3 };
        assert!(err.to_string().contains("'z'"));
        assert!(err.to_string().contains('3'));
    }
}
