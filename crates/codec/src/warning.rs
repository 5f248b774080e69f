use thiserror::Error;

/// A recoverable problem found while decoding packet text.
///
/// Warnings never abort a decode; the offending value is substituted with
/// a default and decoding continues, so a partially corrupt capture stream
/// still yields a usable trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    #[error("point {point}: token '{token}' is not a valid integer, substituting 0")]
    BadToken { point: usize, token: String },

    #[error("point {point}: expected {expected} channel values, found {found}")]
    ChannelCountMismatch {
        point: usize,
        expected: usize,
        found: usize,
    },
}
