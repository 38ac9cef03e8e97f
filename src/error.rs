use thiserror::Error;

/// An error produced while parsing a JSON text.
///
/// Parsing itself never returns this type directly (a failed [`crate::parse`]
/// call yields a [`crate::Value::Error`] carrying its `Display` string, so
/// that round-tripping an error through the emitter preserves the report).
/// It is public so callers who drive the parser at a lower level can match on
/// it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contained a byte the grammar does not allow at the current
    /// position.
    #[error("unexpected byte {byte:#04x} at offset {offset}: expected {expected}")]
    UnexpectedByte {
        byte: u8,
        offset: usize,
        expected: &'static str,
    },

    /// The input ended before a value (or the container stack) was complete.
    #[error("unexpected end of input at offset {offset}: expected {expected}")]
    UnexpectedEof { offset: usize, expected: &'static str },

    /// A string literal contained a byte sequence that is not well-formed
    /// UTF-8.
    #[error("invalid UTF-8 in string literal at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A `\uXXXX` escape decoded to a lone or paired UTF-16 surrogate.
    #[error("lone or paired surrogate in \\u escape at offset {offset}")]
    SurrogateEscape { offset: usize },

    /// The nesting depth of arrays/objects exceeded the configured maximum.
    #[error("maximum nesting depth exceeded at offset {offset}")]
    DepthExceeded { offset: usize },

    /// Trailing non-whitespace bytes followed a complete value.
    #[error("trailing data after JSON value at offset {offset}")]
    TrailingData { offset: usize },
}

/// An error produced by the Base64 codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Error {
    /// A byte outside the Base64 alphabet (and not `=` in a permitted
    /// position) was encountered.
    #[error("invalid Base64 character {0:#04x}")]
    InvalidCharacter(u8),

    /// The input length is not a valid Base64 quantum (not a multiple of 4
    /// when padded, or an otherwise impossible remainder when unpadded).
    #[error("invalid Base64 input length")]
    InvalidLength,

    /// The final, partial sextet carried non-zero bits beyond what the
    /// decoded byte count uses.
    #[error("non-zero padding bits in final Base64 quantum")]
    NonZeroPadding,
}

/// An error produced by a typed [`crate::Value`] accessor when the value's
/// current tag does not match the accessor's expected tag.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("wrong type: expected {expected}, found {found}")]
pub struct WrongTypeError {
    pub expected: &'static str,
    pub found: &'static str,
}

/// The full error taxonomy, kept for documentation purposes even though not
/// every variant has a reachable constructor under safe Rust (see
/// `Internal` below).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Base64(#[from] Base64Error),

    #[error(transparent)]
    WrongType(#[from] WrongTypeError),

    /// Table misuse or allocation failure. Unreachable under safe Rust: the
    /// tables are built once by [`crate::tables`] and never touched again,
    /// and this crate does not catch allocation failure (the allocator aborts
    /// the process instead, matching the source's treatment of `Internal` as
    /// fatal).
    #[error("internal error: {0}")]
    Internal(&'static str),
}
