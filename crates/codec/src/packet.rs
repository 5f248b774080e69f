//! Derivative decoding and encoding of trace packet text.

use crate::aggregate::ChannelAggregates;
use crate::scanner::tokenize_segment;
use crate::warning::DecodeWarning;

/// The result of decoding one trace packet.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTrace {
    /// Absolute per-channel values, one row per point.
    pub table: Vec<Vec<i64>>,
    /// Statistics over every decoded value, ready to be merged into the
    /// owning document's aggregates.
    pub aggregates: ChannelAggregates,
    /// Recoverable problems encountered along the way.
    pub warnings: Vec<DecodeWarning>,
}

/// Decodes raw packet text into absolute per-channel values.
///
/// Points are comma-separated. Within a point, the first row holds
/// absolute values, the second row first derivatives, and every later row
/// second-derivative increments, uniformly for every channel column.
///
/// `channel_count` is the column count declared by the owning trace
/// format; it is used only to flag points whose token count disagrees
/// (pass 0 to skip the check). Tokenization itself does not depend on it.
///
/// Malformed tokens are substituted with 0 and reported as warnings;
/// decoding never fails.
pub fn decode(text: &str, channel_count: usize) -> DecodedTrace {
    let mut table: Vec<Vec<i64>> = Vec::new();
    let mut warnings = Vec::new();

    for (point, segment) in text.split(',').enumerate() {
        let mut row = Vec::new();
        for token in tokenize_segment(segment) {
            match token.parse::<i64>() {
                Ok(value) => row.push(value),
                Err(_) => {
                    log::warn!("trace packet point {point}: bad token '{token}', substituting 0");
                    warnings.push(DecodeWarning::BadToken { point, token });
                    row.push(0);
                }
            }
        }
        if channel_count != 0 && row.len() != channel_count {
            log::warn!(
                "trace packet point {point}: expected {channel_count} channel values, found {}",
                row.len()
            );
            warnings.push(DecodeWarning::ChannelCountMismatch {
                point,
                expected: channel_count,
                found: row.len(),
            });
        }
        table.push(row);
    }

    let mut aggregates = ChannelAggregates::new();
    let mut deltas: Vec<i64> = Vec::new();
    for point in 0..table.len() {
        for column in 0..table[point].len() {
            if point > 0 {
                if deltas.len() <= column {
                    deltas.resize(column + 1, 0);
                }
                // A ragged previous row contributes 0, keeping decode total
                // even when the packet is truncated mid-point.
                let previous = table[point - 1].get(column).copied().unwrap_or(0);
                if point == 1 {
                    deltas[column] = table[point][column];
                } else {
                    deltas[column] += table[point][column];
                }
                table[point][column] = previous + deltas[column];
            }
            aggregates.observe(column, table[point][column]);
        }
    }

    DecodedTrace { table, aggregates, warnings }
}

/// Encodes a table of absolute values back into packet text.
///
/// Columns are space-separated and points comma-separated. Derivative
/// compression is not reapplied: every point is written with its absolute
/// values, so `decode(encode(table))` equals `table` only when the table
/// has at most one point. Callers re-serializing a loaded document get a
/// valid but uncompressed (and differently-decoding) packet.
pub fn encode(table: &[Vec<i64>]) -> String {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivative_decode_example() {
        // Absolute point, first-derivative point, then second-derivative
        // increments: the per-column delta grows by 1 each step.
        let decoded = decode("10 20,5 5,1 1,1 1", 2);
        assert_eq!(
            decoded.table,
            vec![vec![10, 20], vec![15, 25], vec![21, 31], vec![28, 38]]
        );
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn test_single_point_is_absolute() {
        let decoded = decode("100 -200 55", 3);
        assert_eq!(decoded.table, vec![vec![100, -200, 55]]);
    }

    #[test]
    fn test_negative_deltas() {
        // Derivatives may be negative: the stroke doubles back.
        let decoded = decode("10 10,-2 3,-1-1", 2);
        // point1 = (8, 13); deltas become (-3, 2); point2 = (5, 15)
        assert_eq!(decoded.table, vec![vec![10, 10], vec![8, 13], vec![5, 15]]);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let text = "1 2 3,4 5 6,7 8 9,1 1 1";
        let a = decode(text, 3);
        let b = decode(text, 3);
        assert_eq!(a.table, b.table);
        assert_eq!(a.aggregates, b.aggregates);
        assert_eq!(a.warnings, b.warnings);
    }

    #[test]
    fn test_aggregates_cover_every_decoded_value() {
        let decoded = decode("10 20,5 5,1 1", 2);
        // decoded values: (10,20) (15,25) (21,31)
        assert_eq!(decoded.aggregates.min(0), Some(10));
        assert_eq!(decoded.aggregates.max(0), Some(21));
        assert_eq!(decoded.aggregates.min(1), Some(20));
        assert_eq!(decoded.aggregates.max(1), Some(31));
        assert_eq!(decoded.aggregates.sum(0), Some(46));
        assert_eq!(decoded.aggregates.count(0), 3);
        assert_eq!(decoded.aggregates.count(1), 3);
    }

    #[test]
    fn test_bad_token_substitutes_zero() {
        let decoded = decode("10 -,5 5", 2);
        assert_eq!(decoded.table, vec![vec![10, 0], vec![15, 5]]);
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::BadToken { point: 0, token: "-".into() }]
        );
    }

    #[test]
    fn test_overflowing_token_substitutes_zero() {
        let decoded = decode("99999999999999999999999", 1);
        assert_eq!(decoded.table, vec![vec![0]]);
        assert_eq!(decoded.warnings.len(), 1);
    }

    #[test]
    fn test_channel_count_mismatch_is_flagged() {
        let decoded = decode("10 20 30,1 1 1", 2);
        assert!(decoded
            .warnings
            .iter()
            .any(|w| matches!(w, DecodeWarning::ChannelCountMismatch { point: 0, expected: 2, found: 3 })));
    }

    #[test]
    fn test_ragged_rows_do_not_panic() {
        let decoded = decode("10,5 7,1 1", 0);
        // Column 1 first appears in point 1; its missing predecessors count
        // as 0, so it decodes as a plain derivative run from zero.
        assert_eq!(decoded.table, vec![vec![10], vec![15, 7], vec![21, 15]]);
    }

    #[test]
    fn test_encode_is_absolute() {
        let table = vec![vec![10, 20], vec![15, 25], vec![16, 26]];
        assert_eq!(encode(&table), "10 20,15 25,16 26");
    }

    // Known limitation, pinned: encode never reapplies derivative
    // compression, so a decode of its output only matches for tables of
    // at most one point.
    #[test]
    fn test_round_trip_asymmetry() {
        let single = vec![vec![10, 20]];
        assert_eq!(decode(&encode(&single), 2).table, single);

        let multi = vec![vec![10, 20], vec![15, 25], vec![16, 26]];
        assert_ne!(decode(&encode(&multi), 2).table, multi);
    }

    #[test]
    fn test_empty_text_yields_single_empty_point() {
        let decoded = decode("", 0);
        assert_eq!(decoded.table, vec![Vec::<i64>::new()]);
        assert!(decoded.aggregates.is_empty());
    }
}
