//! The request façade: sequences method → URI → version → headers →
//! body sub-stages behind a single `parse` call.

use crate::body::{chunked_step, content_length_body, BodyKind, BodyScan};
use crate::error::{ParseError, ParseOutcome};
use crate::header::{parse_header_block, HeaderBlock, HeaderScan};
use crate::method::{self, Method, MethodScan};
use crate::scan::{find_crlf, find_sp};
use crate::version::{self, Version, VersionScan};
use crate::View;

/// How far a [`RequestParser`] has progressed through a single
/// message. Strictly non-decreasing within one message;
/// [`reset`](RequestParser::reset) returns it to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RequestStage {
    Start,
    MethodParsed,
    UriParsed,
    VersionParsed,
    HeadersParsed,
    Complete,
}

/// An incremental, zero-copy HTTP/1.x request parser.
///
/// `N` is the compile-time header capacity; see [`crate::Request16`] /
/// [`crate::Request64`] for ready-made aliases.
#[derive(Debug, Clone)]
pub struct RequestParser<const N: usize> {
    stage: RequestStage,
    pos: usize,
    method: Option<Method>,
    uri_started: bool,
    uri_start: usize,
    uri_end: usize,
    version: Option<Version>,
    headers: HeaderBlock<N>,
    body_type: BodyKind,
    content_length: usize,
    body_start: usize,
    body: Option<View>,
}

impl<const N: usize> Default for RequestParser<N> {
    fn default() -> Self {
        Self {
            stage: RequestStage::Start,
            pos: 0,
            method: None,
            uri_started: false,
            uri_start: 0,
            uri_end: 0,
            version: None,
            headers: HeaderBlock::default(),
            body_type: BodyKind::None,
            content_length: 0,
            body_start: 0,
            body: None,
        }
    }
}

impl<const N: usize> RequestParser<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the initial state so this parser can be reused for a
    /// fresh message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the latest view of the input buffer and advance as far as
    /// possible.
    ///
    /// `buf` must be a growing prefix of the same byte stream across
    /// calls: bytes at indices already consumed may not change. On
    /// `Ok(Incomplete)`, call again after appending more bytes.
    pub fn parse(&mut self, buf: &mut [u8]) -> Result<ParseOutcome, ParseError> {
        if self.stage == RequestStage::Start {
            match method::scan(buf, self.pos)? {
                MethodScan::Advance { method, new_pos } => {
                    self.method = Some(method);
                    self.pos = new_pos;
                    self.stage = RequestStage::MethodParsed;
                }
                MethodScan::Incomplete => return Ok(ParseOutcome::Incomplete),
                MethodScan::Unknown => return Err(ParseError::MethodUnknown),
            }
        }

        if self.stage == RequestStage::MethodParsed {
            match self.scan_uri(buf) {
                Some(sp) => {
                    self.pos = sp;
                    self.stage = RequestStage::UriParsed;
                }
                None => return Ok(ParseOutcome::Incomplete),
            }
        }

        if self.stage == RequestStage::UriParsed {
            if self.pos >= buf.len() {
                return Ok(ParseOutcome::Incomplete);
            }
            let version_pos = self.pos + 1;
            match version::scan(buf, version_pos)? {
                VersionScan::Advance {
                    version,
                    new_pos: after_version,
                } => {
                    let Some(cr) = find_crlf(buf, after_version) else {
                        return Ok(ParseOutcome::Incomplete);
                    };
                    if cr != after_version {
                        return Err(ParseError::HttpVersionMalformed);
                    }
                    self.version = Some(version);
                    self.pos = cr + 2;
                    self.stage = RequestStage::VersionParsed;
                }
                VersionScan::Incomplete => return Ok(ParseOutcome::Incomplete),
                VersionScan::Malformed => return Err(ParseError::HttpVersionMalformed),
                VersionScan::Unknown => return Err(ParseError::HttpVersionUnknown),
            }
        }

        if self.stage == RequestStage::VersionParsed {
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
                    self.stage = RequestStage::HeadersParsed;
                }
                HeaderScan::Incomplete => return Ok(ParseOutcome::Incomplete),
            }
        }

        if self.stage == RequestStage::HeadersParsed {
            match self.body_type {
                BodyKind::None => {
                    self.stage = RequestStage::Complete;
                }
                BodyKind::ContentLength => {
                    match content_length_body(buf, self.pos, self.content_length) {
                        BodyScan::Advance { body, new_pos } => {
                            self.body = body;
                            self.pos = new_pos;
                            self.stage = RequestStage::Complete;
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
                            self.stage = RequestStage::Complete;
                        }
                        None => return Ok(ParseOutcome::Incomplete),
                    }
                }
            }
        }

        Ok(ParseOutcome::Complete)
    }

    /// URI scan sub-stage. Consumes the SP after the method on first
    /// entry (remembering `uri_start` once), then scans for the next
    /// SP. Returns the index of the terminating SP.
    fn scan_uri(&mut self, buf: &[u8]) -> Option<usize> {
        if !self.uri_started {
            self.uri_start = self.pos + 1;
            self.uri_started = true;
        }
        let sp = find_sp(buf, self.uri_start)?;
        self.uri_end = sp;
        Some(sp)
    }

    pub fn stage(&self) -> RequestStage {
        self.stage
    }

    pub fn method(&self) -> Option<Method> {
        if self.stage >= RequestStage::MethodParsed {
            self.method
        } else {
            None
        }
    }

    pub fn uri(&self) -> Option<View> {
        if self.stage >= RequestStage::UriParsed {
            Some(View::new(self.uri_start, self.uri_end - self.uri_start))
        } else {
            None
        }
    }

    pub fn version(&self) -> Option<Version> {
        if self.stage >= RequestStage::VersionParsed {
            self.version
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
