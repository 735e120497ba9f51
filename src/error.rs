use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    // Packing.
    #[error("segment length too long")]
    ErrSegTooLong,
    #[error("zero length segment")]
    ErrZeroSegLen,
    #[error("name exceeds maximum length (255)")]
    ErrNameTooLong,
    #[error("character string exceeds maximum length (255)")]
    ErrStringTooLong,
    #[error("resource length too long")]
    ErrResTooLong,
    #[error("too many Questions to pack (>65535)")]
    ErrTooManyQuestions,
    #[error("too many Answers to pack (>65535)")]
    ErrTooManyAnswers,
    #[error("too many Authorities to pack (>65535)")]
    ErrTooManyAuthorities,
    #[error("too many Additionals to pack (>65535)")]
    ErrTooManyAdditionals,

    // Unpacking.
    #[error("insufficient data, message truncated")]
    ErrTruncated,
    #[error("segment prefix is reserved")]
    ErrInvalidLabelLength,
    #[error("invalid pointer")]
    ErrInvalidPtr,
    #[error("resource data length mismatch: declared {declared}, consumed {consumed}")]
    ErrRdataLengthMismatch { declared: usize, consumed: usize },
    #[error("unknown resource type: {0}")]
    ErrUnknownType(u16),
    #[error("invalid operation code: {0}")]
    ErrInvalidOpCode(u8),
    #[error("invalid return code: {0}")]
    ErrInvalidRCode(u8),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
}
