/*!
error module defines the error types used in bgpgill.
*/
use std::fmt::{Display, Formatter};
use std::io;
use std::io::ErrorKind;

/// Every way a record decode can fail.
///
/// A decoder error is always terminal for the *current* record: callers
/// should treat it as "drop this record, and if this came from a
/// [`crate::stream::RecordStream`], the stream is now at end-of-stream."
#[derive(Debug)]
pub enum ParserError {
    /// A read would have gone past the residual length budget.
    Truncated(&'static str),
    /// A prefix mask length was invalid, or out of range for its AFI.
    BadPrefix(String),
    /// The 16-byte BGP marker was not all `0xFF`.
    BadMarker,
    /// The declared BGP message length didn't match the MRT body length.
    LenMismatch { declared: usize, actual: usize },
    /// A malformed attribute: bad length, wrong next-hop size, malformed NLRI.
    BadAttr(String),
    /// A rendered AS-path or communities string would exceed the 4096-byte cap.
    AttrTooLarge,
    /// An MRT type/subtype this parser doesn't implement.
    UnknownSubtype { entry_type: u16, entry_subtype: u16 },
    /// Underlying byte-source failure that isn't a clean EOF.
    Io(io::Error),
    /// Underlying byte-source hit EOF where more data was expected.
    Eof(io::Error),
}

impl std::error::Error for ParserError {}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserError::Truncated(ctx) => write!(f, "truncated record: {ctx}"),
            ParserError::BadPrefix(s) => write!(f, "bad prefix: {s}"),
            ParserError::BadMarker => write!(f, "BGP marker is not all 0xFF"),
            ParserError::LenMismatch { declared, actual } => write!(
                f,
                "BGP length mismatch: declared {declared}, actual {actual}"
            ),
            ParserError::BadAttr(s) => write!(f, "bad attribute: {s}"),
            ParserError::AttrTooLarge => write!(f, "rendered attribute exceeds 4096 bytes"),
            ParserError::UnknownSubtype {
                entry_type,
                entry_subtype,
            } => write!(
                f,
                "unsupported MRT type/subtype: {entry_type}/{entry_subtype}"
            ),
            ParserError::Io(e) => write!(f, "I/O error: {e}"),
            ParserError::Eof(e) => write!(f, "unexpected end of stream: {e}"),
        }
    }
}

impl From<io::Error> for ParserError {
    fn from(io_error: io::Error) -> Self {
        match io_error.kind() {
            ErrorKind::UnexpectedEof => ParserError::Eof(io_error),
            _ => ParserError::Io(io_error),
        }
    }
}
