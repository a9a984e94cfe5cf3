//! # WireFrame
//!
//! A **zero-copy, incremental HTTP/1.x parser** for requests and
//! responses, implemented as a pair of sibling state machines.
//!
//! WireFrame never allocates and never copies message data (outside
//! of chunked transfer-coding, which is decoded in place into the
//! caller's own buffer). Every parsed field — method, URI, version,
//! status, reason phrase, header names and values, body — is exposed
//! as a [`View`]: an `(offset, len)` pair resolved against whatever
//! buffer the caller hands to an accessor. This makes the parser
//! suitable for servers, clients, and proxies that read from a socket
//! in arbitrarily-sized chunks and must tolerate partial arrivals:
//! feed it bytes as they arrive, and it resumes exactly where it left
//! off.
//!
//! ## Quick start — incremental request parsing
//!
//! ```rust
//! use wireframe::{ParseOutcome, Request16};
//!
//! let mut parser = Request16::new();
//!
//! let outcome = parser.parse(b"GET / HTTP/1.1\r\n").unwrap();
//! assert_eq!(outcome, ParseOutcome::Incomplete);
//!
//! let buf = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
//! let outcome = parser.parse(buf).unwrap();
//! assert_eq!(outcome, ParseOutcome::Complete);
//! assert_eq!(parser.uri().unwrap().resolve(buf), b"/");
//! ```
//!
//! ## Quick start — response parsing
//!
//! ```rust
//! use wireframe::{ParseOutcome, Response16};
//!
//! let buf = b"HTTP/1.1 404 Not Found\r\nContent-Length: 5\r\n\r\n12345";
//! let mut parser = Response16::new();
//! assert_eq!(parser.parse(buf).unwrap(), ParseOutcome::Complete);
//! assert_eq!(parser.status_code(), Some(404));
//! assert_eq!(parser.reason().unwrap().resolve(buf), b"Not Found");
//! assert_eq!(parser.body().unwrap().resolve(buf), b"12345");
//! ```
//!
//! Each call to `parse` must pass a buffer that is a growing prefix of
//! the connection's byte stream: bytes already consumed keep their
//! offsets, callers only append.

mod ascii;
mod body;
mod error;
mod header;
mod method;
mod request;
mod response;
mod scan;
mod version;

pub use body::BodyKind;
pub use error::{ParseError, ParseOutcome};
pub use header::HeaderView;
pub use method::Method;
pub use request::{RequestParser, RequestStage};
pub use response::{ResponseParser, ResponseStage};
pub use version::Version;

/// Header capacity used by the `*16` type aliases, the default for
/// ordinary messages.
pub const DEFAULT_HEADER_CAPACITY: usize = 16;
/// Header capacity used by the `*64` type aliases, for header-heavy
/// messages.
pub const LARGE_HEADER_CAPACITY: usize = 64;

/// A request parser with the default 16-header capacity.
pub type Request16 = RequestParser<DEFAULT_HEADER_CAPACITY>;
/// A request parser with a 64-header capacity, for clients that send
/// unusually header-heavy requests.
pub type Request64 = RequestParser<LARGE_HEADER_CAPACITY>;
/// A response parser with the default 16-header capacity.
pub type Response16 = ResponseParser<DEFAULT_HEADER_CAPACITY>;
/// A response parser with a 64-header capacity.
pub type Response64 = ResponseParser<LARGE_HEADER_CAPACITY>;

/// A weak reference into a caller-owned buffer: an `(offset, len)`
/// pair, not a borrow. Resolve it against a buffer with
/// [`View::resolve`] to get the actual bytes.
///
/// Views are indices, not pointers, so they stay valid across the
/// `&mut [u8]` reborrows a `parse` loop requires; they only become
/// meaningless if resolved against a buffer whose bytes, up to the
/// parser's current cursor, differ from what was already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    offset: usize,
    len: usize,
}

impl View {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Resolve this view against `buf`, returning the byte slice it
    /// names.
    pub fn resolve<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        &buf[self.offset..self.offset + self.len]
    }

    /// Resolve this view as a UTF-8 `&str`, if valid.
    pub fn as_str<'b>(&self, buf: &'b [u8]) -> Option<&'b str> {
        std::str::from_utf8(self.resolve(buf)).ok()
    }

    /// The byte offset of this view into the buffer it was produced
    /// from.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The length in bytes of this view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this view spans zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
