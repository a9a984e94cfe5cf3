//! HTTP request method recognition.
//!
//! A switch on the first byte selects a candidate verb; remaining
//! bytes are compared one at a time against the literal, ending on the
//! trailing SP. Recognition never buffers partial input: a caller that
//! re-enters with more bytes simply resumes the same byte-for-byte
//! comparison from the start of the method token.

use crate::error::ParseError;

/// Standard HTTP request methods (RFC 9110 §9.3, plus `PATCH` from
/// RFC 5789).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// Return the method as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single method-recognition attempt.
pub enum MethodScan {
    /// Recognized; `new_pos` rests on the trailing SP.
    Advance { method: Method, new_pos: usize },
    Incomplete,
    Unknown,
}

/// Try to recognize the method at `buf[pos..]`.
///
/// `pos` must point at the first byte of the method token. Requires
/// the verb's literal bytes plus a trailing SP to be fully present;
/// anything shorter reports `Incomplete` with the cursor conceptually
/// unchanged (the caller retains `pos`).
pub fn scan(buf: &[u8], pos: usize) -> Result<MethodScan, ParseError> {
    let remaining = buf.len() - pos;
    if remaining == 0 {
        return Ok(MethodScan::Incomplete);
    }

    // (literal bytes after the first, method, total token length incl. SP)
    let candidates: &[(&[u8], Method)] = match buf[pos] {
        b'G' => &[(b"GET ", Method::Get)],
        b'H' => &[(b"HEAD ", Method::Head)],
        b'P' => &[
            (b"POST ", Method::Post),
            (b"PUT ", Method::Put),
            (b"PATCH ", Method::Patch),
        ],
        b'D' => &[(b"DELETE ", Method::Delete)],
        b'C' => &[(b"CONNECT ", Method::Connect)],
        b'O' => &[(b"OPTIONS ", Method::Options)],
        b'T' => &[(b"TRACE ", Method::Trace)],
        _ => return Ok(MethodScan::Unknown),
    };

    // For 'P' there's a shared disambiguating byte at index 1 (O/U/A);
    // until that byte is present we cannot tell which literal applies.
    if buf[pos] == b'P' && remaining < 2 {
        return Ok(MethodScan::Incomplete);
    }

    let literal = if buf[pos] == b'P' {
        let disambiguator = buf[pos + 1];
        candidates
            .iter()
            .find(|(lit, _)| lit[1] == disambiguator)
            .map(|(lit, m)| (*lit, *m))
    } else {
        Some((candidates[0].0, candidates[0].1))
    };

    let Some((literal, method)) = literal else {
        return Ok(MethodScan::Unknown);
    };

    if remaining < literal.len() {
        return Ok(MethodScan::Incomplete);
    }

    if &buf[pos..pos + literal.len()] != literal {
        return Ok(MethodScan::Unknown);
    }

    Ok(MethodScan::Advance {
        method,
        new_pos: pos + literal.len() - 1,
    })
}
