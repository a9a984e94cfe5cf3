//! Delimiter scanners for the header block.
//!
//! The original C++ parser hand-rolls a 16-byte SSE4.2 `_mm_cmpestri`
//! fast path with a portable 8-at-a-time unrolled fallback, explicitly
//! re-checking a partial tail rather than relying on the instruction's
//! own end-of-data handling. `memchr` gives the same contract — a
//! vectorized implementation where the target supports it, a portable
//! scalar scan otherwise, both returning identical `(found, index)'
//! results — behind a single call, which is the idiomatic-Rust way to
//! get this: every hand-scanning HTTP parser in the reference corpus
//! reaches for `memchr`/`memchr2` rather than vendoring intrinsics.

use memchr::{memchr, memchr2};

/// Find the first `:` at or after `from`. Returns its absolute index.
#[inline]
pub fn find_colon(buf: &[u8], from: usize) -> Option<usize> {
    memchr(b':', &buf[from..]).map(|i| from + i)
}

/// Find the first SP at or after `from`. Returns its absolute index.
#[inline]
pub fn find_sp(buf: &[u8], from: usize) -> Option<usize> {
    memchr(b' ', &buf[from..]).map(|i| from + i)
}

/// Find the first CR that begins a CRLF pair at or after `from`.
/// Returns the absolute index of the CR (not the LF).
///
/// A lone CR or LF not part of a CRLF pair is skipped over; scanning
/// resumes just past it. Returns `None` if no CRLF pair is found in
/// `buf[from..]`, in which case the caller should treat this as
/// incomplete rather than malformed — a CRLF could still be split
/// across this call and the next.
#[inline]
pub fn find_crlf(buf: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let rel = memchr2(b'\r', b'\n', &buf[pos..])?;
        let idx = pos + rel;
        if buf[idx] == b'\r' {
            if idx + 1 < buf.len() {
                if buf[idx + 1] == b'\n' {
                    return Some(idx);
                }
                pos = idx + 1;
                continue;
            }
            // Trailing CR with no byte after it yet — might become a
            // CRLF once more data arrives. Not found yet.
            return None;
        }
        // Lone LF — not a delimiter on its own, keep scanning.
        pos = idx + 1;
    }
}
