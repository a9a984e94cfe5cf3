//! Body framing and decoding: Content-Length spans and in-place
//! chunked dechunking.

use crate::error::ParseError;
use crate::scan::find_crlf;
use crate::View;

/// How the body's length is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Headers ended without a framing indication; no body is exposed.
    None,
    /// `Transfer-Encoding: chunked`.
    Chunked,
    /// `Content-Length: N`.
    ContentLength,
}

/// Outcome of attempting to complete the body stage.
pub enum BodyScan {
    Advance { body: Option<View>, new_pos: usize },
    Incomplete,
}

/// The body spans exactly `content_length` bytes from `pos`.
///
/// Accepts once `available >= content_length` (spec's own resolution
/// of the "exactly at buffer end" ambiguity in the original source):
/// "enough" is `>=`, and exactly `content_length` of the available
/// bytes are recorded — trailing bytes beyond that belong to the next
/// pipelined message and are left untouched. A `content_length` of 0
/// still yields `Some`, an empty view positioned at end-of-headers —
/// framing was explicitly declared, unlike the no-framing-header case
/// where `body` is `None`.
pub fn content_length_body(buf: &[u8], pos: usize, content_length: usize) -> BodyScan {
    if buf.len() - pos >= content_length {
        BodyScan::Advance {
            body: Some(View::new(pos, content_length)),
            new_pos: pos + content_length,
        }
    } else {
        BodyScan::Incomplete
    }
}

/// Decode as many complete chunks as are available, dechunking them
/// in place into `buf[body_start..]`.
///
/// `decoded_len` is the running total of decoded bytes so far (the
/// caller initializes it to 0 on first entry into the chunked body
/// stage and preserves it across calls). Returns `Ok(Some(view))` once
/// the terminating zero-size chunk (and its trailing CRLF — trailers
/// are not supported, see spec Non-goals) has been consumed;
/// `Ok(None)` if more data is needed; `Err` if the chunk grammar was
/// violated.
pub fn chunked_step(
    buf: &mut [u8],
    pos: &mut usize,
    body_start: usize,
    decoded_len: &mut usize,
) -> Result<Option<View>, ParseError> {
    loop {
        let Some(size_cr) = find_crlf(buf, *pos) else {
            return Ok(None);
        };

        let mut chunk_len: usize = 0;
        for &b in &buf[*pos..size_cr] {
            match (b as char).to_digit(16) {
                Some(d) => chunk_len = chunk_len * 16 + d as usize,
                None => break, // chunk extension (';...') or garbage: stop parsing digits
            }
        }

        if chunk_len == 0 {
            // "0\r\n\r\n": the size line's own CRLF plus the trailer
            // section's (empty, since trailers are unsupported) CRLF.
            if size_cr + 4 > buf.len() {
                return Ok(None);
            }
            if buf[size_cr + 2] != b'\r' || buf[size_cr + 3] != b'\n' {
                return Err(ParseError::ChunkMalformed);
            }
            *pos = size_cr + 4;
            return Ok(Some(View::new(body_start, *decoded_len)));
        }

        let data_start = size_cr + 2;
        if data_start + chunk_len + 2 > buf.len() {
            return Ok(None);
        }

        buf.copy_within(data_start..data_start + chunk_len, body_start + *decoded_len);
        *decoded_len += chunk_len;

        let after = data_start + chunk_len;
        if buf[after] != b'\r' || buf[after + 1] != b'\n' {
            return Err(ParseError::ChunkMalformed);
        }
        *pos = after + 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_exact_fit() {
        let buf = b"hello";
        match content_length_body(buf, 0, 5) {
            BodyScan::Advance { body, new_pos } => {
                assert_eq!(body.unwrap().resolve(buf), b"hello");
                assert_eq!(new_pos, 5);
            }
            BodyScan::Incomplete => panic!(),
        }
    }

    #[test]
    fn content_length_zero_yields_empty_view() {
        let buf = b"";
        match content_length_body(buf, 0, 0) {
            BodyScan::Advance { body, new_pos } => {
                assert_eq!(body.unwrap().resolve(buf), b"");
                assert_eq!(new_pos, 0);
            }
            BodyScan::Incomplete => panic!(),
        }
    }

    #[test]
    fn content_length_short_is_incomplete() {
        let buf = b"hel";
        assert!(matches!(
            content_length_body(buf, 0, 5),
            BodyScan::Incomplete
        ));
    }

    #[test]
    fn content_length_extra_trailing_bytes_ignored() {
        let buf = b"helloNEXT";
        match content_length_body(buf, 0, 5) {
            BodyScan::Advance { body, new_pos } => {
                assert_eq!(body.unwrap().resolve(buf), b"hello");
                assert_eq!(new_pos, 5);
            }
            BodyScan::Incomplete => panic!(),
        }
    }

    #[test]
    fn chunked_two_chunks() {
        let mut data = b"5\r\nHello\r\n6\r\n World\r\n0\r\n\r\n".to_vec();
        let mut pos = 0usize;
        let mut decoded = 0usize;
        let body_start = 0usize;
        let view = chunked_step(&mut data, &mut pos, body_start, &mut decoded)
            .unwrap()
            .unwrap();
        assert_eq!(view.resolve(&data), b"Hello World");
    }

    #[test]
    fn chunked_incomplete_mid_chunk() {
        let mut data = b"5\r\nHel".to_vec();
        let mut pos = 0usize;
        let mut decoded = 0usize;
        let result = chunked_step(&mut data, &mut pos, 0, &mut decoded).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn chunked_bad_trailing_bytes_is_malformed() {
        let mut data = b"3\r\nabcXX".to_vec();
        let mut pos = 0usize;
        let mut decoded = 0usize;
        let result = chunked_step(&mut data, &mut pos, 0, &mut decoded);
        assert!(matches!(result, Err(ParseError::ChunkMalformed)));
    }

    #[test]
    fn chunked_zero_only_yields_empty_body() {
        let mut data = b"0\r\n\r\n".to_vec();
        let mut pos = 0usize;
        let mut decoded = 0usize;
        let view = chunked_step(&mut data, &mut pos, 0, &mut decoded)
            .unwrap()
            .unwrap();
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn chunked_resumes_across_calls() {
        let mut data = b"5\r\nHello\r\n0\r\n\r\n".to_vec();
        let mut pos = 0usize;
        let mut decoded = 0usize;

        // First call only sees the size line, not the full chunk.
        let mut partial = data[..3].to_vec();
        assert!(chunked_step(&mut partial, &mut pos, 0, &mut decoded)
            .unwrap()
            .is_none());
        assert_eq!(pos, 0);

        // Now the whole buffer is available.
        let view = chunked_step(&mut data, &mut pos, 0, &mut decoded)
            .unwrap()
            .unwrap();
        assert_eq!(view.resolve(&data), b"Hello");
    }
}
