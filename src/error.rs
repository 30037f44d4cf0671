//! Library error types.
//!
use std::fmt;

use crate::value::FieldType;

/// A cerial Result, normally returning a cerial [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A cerial error. Encompasses every way a frame can fail to parse and every
/// way a message can fail to serialize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The first four bytes of a frame were not the magic constant.
    BadMagic {
        /// The expected magic value.
        expected: i32,
        /// The value actually found.
        actual: i32,
    },
    /// A frame (or a sub-frame within it) ended before its own declared
    /// length said it should.
    Truncated {
        /// What step of decoding was in progress.
        step: &'static str,
        /// How many bytes were actually available.
        actual: usize,
        /// How many bytes were required.
        expected: usize,
    },
    /// A name field's declared bytes were not valid UTF-8.
    InvalidUtf8 {
        /// What step of decoding was in progress.
        step: &'static str,
    },
    /// A field whose type has no wire representation was encountered while
    /// computing a frame's length or serializing it.
    NonSerializableType {
        /// The offending field's name.
        field: String,
        /// The offending field's type.
        ty: FieldType,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BadMagic { expected, actual } => write!(
                f,
                "bad magic: expected {:#010x}, found {:#010x}",
                expected, actual
            ),
            Error::Truncated {
                step,
                actual,
                expected,
            } => write!(
                f,
                "truncated frame while reading [{}]: expected at least {} bytes, had {}",
                step, expected, actual
            ),
            Error::InvalidUtf8 { step } => write!(f, "invalid UTF-8 while reading [{}]", step),
            Error::NonSerializableType { field, ty } => write!(
                f,
                "field \"{}\" has type {:?}, which has no wire representation",
                field, ty
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_non_empty() {
        let errs = [
            Error::BadMagic {
                expected: 0x3E3E3E3D,
                actual: 0,
            },
            Error::Truncated {
                step: "total length",
                actual: 3,
                expected: 8,
            },
            Error::InvalidUtf8 {
                step: "message name",
            },
            Error::NonSerializableType {
                field: "f".to_string(),
                ty: FieldType::I8,
            },
        ];
        for e in errs {
            assert!(!e.to_string().is_empty());
        }
    }
}
