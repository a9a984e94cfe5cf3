//! The response façade: sequences version → status code → reason
//! phrase → headers → body sub-stages behind a single `parse` call.

use crate::body::{chunked_step, content_length_body, BodyKind, BodyScan};
use crate::error::{ParseError, ParseOutcome};
use crate::header::{parse_header_block, HeaderBlock, HeaderScan};
use crate::scan::find_crlf;
use crate::version::{self, Version, VersionScan};
use crate::View;

/// How far a [`ResponseParser`] has progressed through a single
/// message. Strictly non-decreasing within one message;
/// [`reset`](ResponseParser::reset) returns it to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResponseStage {
    Start,
    VersionParsed,
    StatusParsed,
    ReasonParsed,
    HeadersParsed,
    Complete,
}

/// An incremental, zero-copy HTTP/1.x response parser.
///
/// `N` is the compile-time header capacity; see [`crate::Response16`] /
/// [`crate::Response64`] for ready-made aliases.
#[derive(Debug, Clone)]
pub struct ResponseParser<const N: usize> {
    stage: ResponseStage,
    pos: usize,
    version: Option<Version>,
    status_code: u16,
    reason_start: usize,
    reason_end: usize,
    headers: HeaderBlock<N>,
    body_type: BodyKind,
    content_length: usize,
    body_start: usize,
    body: Option<View>,
}

impl<const N: usize> Default for ResponseParser<N> {
    fn default() -> Self {
        Self {
            stage: ResponseStage::Start,
            pos: 0,
            version: None,
            status_code: 0,
            reason_start: 0,
            reason_end: 0,
            headers: HeaderBlock::default(),
            body_type: BodyKind::None,
            content_length: 0,
            body_start: 0,
            body: None,
        }
    }
}

impl<const N: usize> ResponseParser<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the initial state so this parser can be reused for a
    /// fresh message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the latest view of the input buffer and advance as far as
    /// possible. See [`crate::RequestParser::parse`] for the buffer
    /// contract.
    pub fn parse(&mut self, buf: &mut [u8]) -> Result<ParseOutcome, ParseError> {
        if self.stage == ResponseStage::Start {
            match version::scan(buf, self.pos)? {
                VersionScan::Advance { version, new_pos } => {
                    // Responses separate version and status with SP,
                    // not CRLF.
                    if new_pos >= buf.len() {
                        return Ok(ParseOutcome::Incomplete);
                    }
                    if buf[new_pos] != b' ' {
                        return Err(ParseError::HttpVersionMalformed);
                    }
                    self.version = Some(version);
                    self.pos = new_pos + 1;
                    self.stage = ResponseStage::VersionParsed;
                }
                VersionScan::Incomplete => return Ok(ParseOutcome::Incomplete),
                VersionScan::Malformed => return Err(ParseError::HttpVersionMalformed),
                VersionScan::Unknown => return Err(ParseError::HttpVersionUnknown),
            }
        }

        if self.stage == ResponseStage::VersionParsed {
            match self.scan_status(buf)? {
                Some(new_pos) => {
                    self.pos = new_pos;
                    self.stage = ResponseStage::StatusParsed;
                }
                None => return Ok(ParseOutcome::Incomplete),
            }
        }

        if self.stage == ResponseStage::StatusParsed {
            let Some(cr) = find_crlf(buf, self.pos) else {
                return Ok(ParseOutcome::Incomplete);
            };
            self.reason_start = self.pos;
            self.reason_end = cr;
            self.pos = cr + 2;
            self.stage = ResponseStage::ReasonParsed;
        }

        if self.stage == ResponseStage::ReasonParsed {
            match parse_header_block(
                buf,
                &mut self.pos,
                &mut self.headers,
                &mut self.body_type,
                &mut self.content_length,
            )? {
                HeaderScan::Advance { new_pos } => {
                    self.pos = new_pos;
                    self.body_start = new_pos;
                    self.stage = ResponseStage::HeadersParsed;
                }
                HeaderScan::Incomplete => return Ok(ParseOutcome::Incomplete),
            }
        }

        if self.stage == ResponseStage::HeadersParsed {
            match self.body_type {
                BodyKind::None => {
                    self.stage = ResponseStage::Complete;
                }
                BodyKind::ContentLength => {
                    match content_length_body(buf, self.pos, self.content_length) {
                        BodyScan::Advance { body, new_pos } => {
                            self.body = body;
                            self.pos = new_pos;
                            self.stage = ResponseStage::Complete;
                        }
                        BodyScan::Incomplete => return Ok(ParseOutcome::Incomplete),
                    }
                }
                BodyKind::Chunked => {
                    match chunked_step(
                        buf,
                        &mut self.pos,
                        self.body_start,
                        &mut self.content_length,
                    )? {
                        Some(body) => {
                            self.body = Some(body);
                            self.stage = ResponseStage::Complete;
                        }
                        None => return Ok(ParseOutcome::Incomplete),
                    }
                }
            }
        }

        Ok(ParseOutcome::Complete)
    }

    /// Status-code sub-stage: three ASCII digits followed by SP.
    /// Zero (`000`) is rejected; any other value in the three-digit
    /// range is accepted without IANA registry validation.
    fn scan_status(&mut self, buf: &[u8]) -> Result<Option<usize>, ParseError> {
        if buf.len() - self.pos < 4 {
            return Ok(None);
        }
        let digits = &buf[self.pos..self.pos + 3];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(ParseError::HttpStatusCodeMalformed);
        }
        if buf[self.pos + 3] != b' ' {
            return Err(ParseError::HttpStatusCodeMalformed);
        }
        let value = (digits[0] - b'0') as u16 * 100
            + (digits[1] - b'0') as u16 * 10
            + (digits[2] - b'0') as u16;
        if value == 0 {
            return Err(ParseError::HttpStatusCodeMalformed);
        }
        self.status_code = value;
        Ok(Some(self.pos + 4))
    }

    pub fn stage(&self) -> ResponseStage {
        self.stage
    }

    pub fn version(&self) -> Option<Version> {
        if self.stage >= ResponseStage::VersionParsed {
            self.version
        } else {
            None
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        if self.stage >= ResponseStage::StatusParsed {
            Some(self.status_code)
        } else {
            None
        }
    }

    pub fn reason(&self) -> Option<View> {
        if self.stage >= ResponseStage::ReasonParsed {
            Some(View::new(
                self.reason_start,
                self.reason_end - self.reason_start,
            ))
        } else {
            None
        }
    }

    pub fn header_count(&self) -> usize {
        self.headers.count()
    }

    pub fn header<'b>(&self, buf: &'b [u8], name: &str) -> Option<&'b [u8]> {
        self.headers.get(buf, name)
    }

    pub fn for_each_header<'b>(&self, buf: &'b [u8], f: impl FnMut(&'b [u8], &'b [u8])) {
        self.headers.for_each(buf, f);
    }

    pub fn body(&self) -> Option<View> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_response_with_content_length() {
        let mut buf =
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 5\r\n\r\n12345".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert_eq!(p.parse(&mut buf).unwrap(), ParseOutcome::Complete);
        assert_eq!(p.version(), Some(Version::Http11));
        assert_eq!(p.status_code(), Some(404));
        assert_eq!(p.reason().unwrap().resolve(&buf), b"Not Found");
        assert_eq!(p.body().unwrap().resolve(&buf), b"12345");
    }

    #[test]
    fn empty_reason_phrase() {
        let mut buf = b"HTTP/1.1 204 \r\n\r\n".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert_eq!(p.parse(&mut buf).unwrap(), ParseOutcome::Complete);
        assert_eq!(p.status_code(), Some(204));
        assert_eq!(p.reason().unwrap().resolve(&buf), b"");
    }

    #[test]
    fn status_code_zero_is_malformed() {
        let mut buf = b"HTTP/1.1 000 Nope\r\n\r\n".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert!(matches!(
            p.parse(&mut buf),
            Err(ParseError::HttpStatusCodeMalformed)
        ));
    }

    #[test]
    fn status_code_non_digit_is_malformed() {
        let mut buf = b"HTTP/1.1 4a4 Oops\r\n\r\n".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert!(matches!(
            p.parse(&mut buf),
            Err(ParseError::HttpStatusCodeMalformed)
        ));
    }

    #[test]
    fn status_code_missing_trailing_sp_is_malformed() {
        let mut buf = b"HTTP/1.1 200XNot Found\r\n\r\n".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert!(matches!(
            p.parse(&mut buf),
            Err(ParseError::HttpStatusCodeMalformed)
        ));
    }

    #[test]
    fn version_status_separator_must_be_sp() {
        let mut buf = b"HTTP/1.1\r200 OK\r\n\r\n".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert!(matches!(
            p.parse(&mut buf),
            Err(ParseError::HttpVersionMalformed)
        ));
    }

    #[test]
    fn chunked_response_body() {
        let mut buf =
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nHello\r\n0\r\n\r\n".to_vec();
        let mut p = ResponseParser::<16>::new();
        assert_eq!(p.parse(&mut buf).unwrap(), ParseOutcome::Complete);
        assert_eq!(p.body().unwrap().resolve(&buf), b"Hello");
    }

    #[test]
    fn split_feed_across_calls() {
        let mut p = ResponseParser::<16>::new();
        assert_eq!(
            p.parse(&mut b"HTTP/1.".to_vec()).unwrap(),
            ParseOutcome::Incomplete
        );
        assert_eq!(
            p.parse(&mut b"HTTP/1.1 200 ".to_vec()).unwrap(),
            ParseOutcome::Incomplete
        );
        let mut buf = b"HTTP/1.1 200 OK\r\n\r\n".to_vec();
        assert_eq!(p.parse(&mut buf).unwrap(), ParseOutcome::Complete);
        assert_eq!(p.status_code(), Some(200));
        assert_eq!(p.reason().unwrap().resolve(&buf), b"OK");
    }

    #[test]
    fn reset_allows_reuse() {
        let mut p = ResponseParser::<16>::new();
        let mut buf = b"HTTP/1.1 200 OK\r\n\r\n".to_vec();
        assert_eq!(p.parse(&mut buf).unwrap(), ParseOutcome::Complete);
        p.reset();
        assert_eq!(p.stage(), ResponseStage::Start);
        let mut buf2 = b"HTTP/1.0 500 Internal Server Error\r\n\r\n".to_vec();
        assert_eq!(p.parse(&mut buf2).unwrap(), ParseOutcome::Complete);
        assert_eq!(p.status_code(), Some(500));
        assert_eq!(p.reason().unwrap().resolve(&buf2), b"Internal Server Error");
    }
}
