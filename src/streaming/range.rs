//! `Range` header interpretation.
//!
//! Parsing is deliberately lenient: a bound that is missing or does not parse
//! falls back to the start or end of the file instead of rejecting the
//! request. Only after defaulting is the window checked against the file
//! length, which is where `end` gets clamped and unsatisfiable windows are
//! detected.

/// An inclusive `[start, end]` span of byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteWindow {
    pub start: u64,
    pub end: u64,
}

impl ByteWindow {
    /// Number of bytes covered by the window. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Bounds as read from the header, with fallbacks applied but not yet
/// checked against the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedRange {
    pub start: u64,
    pub end: u64,
}

/// What a request asked for, once resolved against the file length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    /// No `Range` header; send the whole file.
    Whole,
    /// A satisfiable window.
    Window(ByteWindow),
    /// The header named bytes the file does not have.
    Unsatisfiable,
}

/// Parse a raw `Range` header value.
///
/// Returns `None` when the header is absent or empty. Otherwise the text after
/// the first `=` is split on `-`, and only the first two fields are looked at.
/// An unparsable or missing start becomes `0`; an unparsable or missing end
/// becomes `file_len - 1`.
///
/// The unit before `=` is not checked, and `bytes=-N` is read as `[0, N]`
/// rather than as a suffix length. A second `=` is not treated as a
/// separator; it stays part of the bounds text, so a field it lands in
/// fails to parse and falls back like any other malformed bound.
pub fn parse_range_header(value: Option<&str>, file_len: u64) -> Option<RequestedRange> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    let bounds = value.split_once('=').map(|(_, rest)| rest).unwrap_or("");
    let mut fields = bounds.split('-');

    let start = fields
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let end = fields
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(|| file_len.saturating_sub(1));

    Some(RequestedRange { start, end })
}

impl RequestedRange {
    /// Check the requested bounds against the file.
    ///
    /// `end` is clamped to the last byte. A start past the end of the file, or
    /// after the (clamped) end, cannot be served.
    pub fn resolve(self, file_len: u64) -> RangeRequest {
        if file_len == 0 || self.start >= file_len {
            return RangeRequest::Unsatisfiable;
        }
        let end = self.end.min(file_len - 1);
        if self.start > end {
            return RangeRequest::Unsatisfiable;
        }
        RangeRequest::Window(ByteWindow {
            start: self.start,
            end,
        })
    }
}

/// Parse and resolve a `Range` header in one step.
pub fn resolve_range(value: Option<&str>, file_len: u64) -> RangeRequest {
    match parse_range_header(value, file_len) {
        None => RangeRequest::Whole,
        Some(requested) => requested.resolve(file_len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: u64, end: u64) -> RangeRequest {
        RangeRequest::Window(ByteWindow { start, end })
    }

    #[test]
    fn absent_or_empty_means_whole_file() {
        assert_eq!(parse_range_header(None, 1000), None);
        assert_eq!(parse_range_header(Some(""), 1000), None);
        assert_eq!(parse_range_header(Some("   "), 1000), None);
        assert_eq!(resolve_range(None, 1000), RangeRequest::Whole);
    }

    #[test]
    fn explicit_bounds() {
        assert_eq!(
            parse_range_header(Some("bytes=0-99"), 1000),
            Some(RequestedRange { start: 0, end: 99 })
        );
        assert_eq!(resolve_range(Some("bytes=0-99"), 1000), window(0, 99));
    }

    #[test]
    fn open_end_defaults_to_last_byte() {
        assert_eq!(resolve_range(Some("bytes=100-"), 1000), window(100, 999));
    }

    #[test]
    fn unparsable_bounds_default_to_whole_span() {
        assert_eq!(
            parse_range_header(Some("bytes=abc-def"), 1000),
            Some(RequestedRange { start: 0, end: 999 })
        );
        assert_eq!(resolve_range(Some("bytes=abc-def"), 1000), window(0, 999));
    }

    #[test]
    fn missing_start_is_zero_not_suffix() {
        assert_eq!(resolve_range(Some("bytes=-500"), 1000), window(0, 500));
    }

    #[test]
    fn missing_equals_sign_defaults_both_bounds() {
        assert_eq!(resolve_range(Some("bytes"), 1000), window(0, 999));
    }

    #[test]
    fn unit_is_not_checked() {
        assert_eq!(resolve_range(Some("items=5-9"), 1000), window(5, 9));
    }

    #[test]
    fn whitespace_around_bounds_is_tolerated() {
        assert_eq!(resolve_range(Some("bytes= 10 - 20 "), 1000), window(10, 20));
    }

    #[test]
    fn multi_range_uses_first_dash_pair() {
        // "0-99,200-299" splits into "0", "99,200", "299"; the end field fails
        // to parse and falls back to the last byte.
        assert_eq!(
            resolve_range(Some("bytes=0-99,200-299"), 1000),
            window(0, 999)
        );
    }

    #[test]
    fn second_equals_sign_stays_in_bounds_text() {
        // "0-99=x" splits into "0" and "99=x"; the end falls back.
        assert_eq!(resolve_range(Some("bytes=0-99=x"), 1000), window(0, 999));
        assert_eq!(resolve_range(Some("bytes=5=7-9"), 1000), window(0, 9));
    }

    #[test]
    fn end_is_clamped_to_file() {
        assert_eq!(resolve_range(Some("bytes=0-99999"), 1000), window(0, 999));
    }

    #[test]
    fn start_at_or_past_length_is_unsatisfiable() {
        assert_eq!(
            resolve_range(Some("bytes=1000-"), 1000),
            RangeRequest::Unsatisfiable
        );
        assert_eq!(
            resolve_range(Some("bytes=5000-6000"), 1000),
            RangeRequest::Unsatisfiable
        );
    }

    #[test]
    fn inverted_window_is_unsatisfiable() {
        assert_eq!(
            resolve_range(Some("bytes=50-10"), 1000),
            RangeRequest::Unsatisfiable
        );
    }

    #[test]
    fn any_range_on_empty_file_is_unsatisfiable() {
        assert_eq!(resolve_range(Some("bytes=0-"), 0), RangeRequest::Unsatisfiable);
        assert_eq!(resolve_range(Some("bytes=x-y"), 0), RangeRequest::Unsatisfiable);
        assert_eq!(resolve_range(None, 0), RangeRequest::Whole);
    }

    #[test]
    fn single_byte_window() {
        let req = resolve_range(Some("bytes=999-999"), 1000);
        assert_eq!(req, window(999, 999));
        if let RangeRequest::Window(w) = req {
            assert_eq!(w.len(), 1);
        }
    }

    #[test]
    fn window_len_is_inclusive() {
        assert_eq!(ByteWindow { start: 0, end: 99 }.len(), 100);
        assert_eq!(ByteWindow { start: 100, end: 999 }.len(), 900);
    }
}
