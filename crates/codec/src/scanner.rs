//! Integer token scanner for a single point segment.
//!
//! A segment is the text between two commas of a trace packet. Tokens are
//! runs of decimal digits with an optional leading `-`. The separator rule
//! is unusual: *any* non-digit character ends the current token, and when
//! that character is itself a `-` it becomes the sign of the next token.
//! This is how `"5-3"` scans as `[5, -3]` while `"5 3"` scans as `[5, 3]`;
//! adjacent negative values need no whitespace at all.

use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No token in progress.
    Idle,
    /// Accumulating digit characters.
    Digits,
    /// A `-` has been consumed and waits for digits.
    Signed,
}

/// Splits one point segment into raw tokens.
///
/// Tokens are returned as text, not parsed: a lone `-` (sign with no
/// digits) is emitted as-is so the caller can report it and substitute a
/// default, which keeps the scanner a pure function of its input.
pub fn tokenize_segment(segment: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut state = ScanState::Idle;
    let mut acc = String::new();

    for ch in segment.chars() {
        match (state, ch) {
            (_, d) if d.is_ascii_digit() => {
                acc.push(d);
                state = ScanState::Digits;
            }
            (ScanState::Idle, '-') => {
                acc.push('-');
                state = ScanState::Signed;
            }
            (ScanState::Idle, _) => {}
            // Sign carried across the separator position.
            (_, '-') => {
                tokens.push(mem::take(&mut acc));
                acc.push('-');
                state = ScanState::Signed;
            }
            (_, _) => {
                tokens.push(mem::take(&mut acc));
                state = ScanState::Idle;
            }
        }
    }
    if !acc.is_empty() {
        tokens.push(acc);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(segment: &str) -> Vec<String> {
        tokenize_segment(segment)
    }

    #[test]
    fn test_whitespace_separated() {
        assert_eq!(toks("10 20 30"), ["10", "20", "30"]);
    }

    #[test]
    fn test_negative_after_space() {
        assert_eq!(toks("5 -3"), ["5", "-3"]);
    }

    #[test]
    fn test_sign_carries_without_space() {
        assert_eq!(toks("5-3"), ["5", "-3"]);
        assert_eq!(toks("-5-3-1"), ["-5", "-3", "-1"]);
    }

    #[test]
    fn test_leading_sign() {
        assert_eq!(toks("-7 2"), ["-7", "2"]);
    }

    #[test]
    fn test_arbitrary_separators_ignored() {
        assert_eq!(toks("  10\t20\n30 "), ["10", "20", "30"]);
        assert_eq!(toks("'10 \"20"), ["10", "20"]);
    }

    #[test]
    fn test_trailing_token_flushed() {
        assert_eq!(toks("10 20"), ["10", "20"]);
        assert_eq!(toks("42"), ["42"]);
    }

    // A dangling sign is still a token; the decoder turns it into a
    // warning plus a default value.
    #[test]
    fn test_dangling_sign() {
        assert_eq!(toks("5 -"), ["5", "-"]);
        assert_eq!(toks("- 5"), ["-", "5"]);
    }

    #[test]
    fn test_empty_segment() {
        assert!(toks("").is_empty());
        assert!(toks("   ").is_empty());
    }
}
