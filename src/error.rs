use std::fmt;

/// Outcome of a [`crate::RequestParser::parse`] /
/// [`crate::ResponseParser::parse`] call.
///
/// `Incomplete` is not an error — it is the happy path during partial
/// reads. A caller receiving `Incomplete` should append more bytes
/// after the buffer it just supplied and call `parse` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The message has been fully parsed (headers, and body if framed).
    Complete,
    /// More bytes are needed; the parser's cursor is frozen at the
    /// restart point and the caller may append and re-enter.
    Incomplete,
}

/// The closed set of ways a parse can fail.
///
/// Every variant is terminal: a caller receiving any `ParseError`
/// should stop parsing this message. Nothing here is fatal to the
/// process — the parser can simply be [reset](crate::RequestParser::reset)
/// and reused for the next message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The request method's first byte didn't match any known verb, or
    /// a later byte diverged from the only candidate it could be.
    MethodUnknown,
    /// The version bytes don't match the `HTTP/1.` prefix, or the
    /// line-terminating punctuation (CRLF for requests, SP for
    /// responses) was wrong.
    HttpVersionMalformed,
    /// The version's major byte wasn't `1`, or the minor digit wasn't
    /// `0` or `1`.
    HttpVersionUnknown,
    /// The status line's three digits weren't all ASCII digits, the
    /// value was zero, or the terminating byte wasn't SP.
    HttpStatusCodeMalformed,
    /// The header block's fixed capacity was exhausted.
    TooManyHeaders,
    /// A chunk's size line or trailing CRLF violated the chunked
    /// transfer-coding grammar.
    ChunkMalformed,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodUnknown => write!(f, "unrecognized HTTP method"),
            Self::HttpVersionMalformed => write!(f, "malformed HTTP version"),
            Self::HttpVersionUnknown => write!(f, "unknown HTTP version"),
            Self::HttpStatusCodeMalformed => write!(f, "malformed HTTP status code"),
            Self::TooManyHeaders => write!(f, "header count exceeds parser capacity"),
            Self::ChunkMalformed => write!(f, "malformed chunked transfer-coding"),
        }
    }
}

impl std::error::Error for ParseError {}
