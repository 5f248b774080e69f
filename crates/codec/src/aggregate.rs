//! Per-channel running statistics over decoded sample values.
//!
//! Every decode produces its own [`ChannelAggregates`]; the owning
//! document merges them, so the union statistics across all traces are an
//! explicit fold rather than hidden shared state. The min/max columns feed
//! coordinate normalization (translating the union bounding box of all ink
//! to the surface origin); sum and count are kept for pressure
//! normalization work and so the aggregation itself stays testable.

use serde::Serialize;

/// Statistics for one channel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    pub min: i64,
    pub max: i64,
    pub sum: i64,
    pub count: u64,
}

impl ChannelStats {
    fn observe(value: i64) -> Self {
        Self { min: value, max: value, sum: value, count: 1 }
    }

    fn fold(&mut self, other: &ChannelStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }
}

/// Ordered per-column statistics; column `j` of every point feeds entry `j`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelAggregates {
    columns: Vec<ChannelStats>,
}

impl ChannelAggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes aggregates for a fully decoded table of absolute values.
    pub fn from_table(table: &[Vec<i64>]) -> Self {
        let mut aggregates = Self::new();
        for row in table {
            for (column, &value) in row.iter().enumerate() {
                aggregates.observe(column, value);
            }
        }
        aggregates
    }

    /// Records one decoded value for `column`.
    pub fn observe(&mut self, column: usize, value: i64) {
        if let Some(stats) = self.columns.get_mut(column) {
            stats.fold(&ChannelStats::observe(value));
        } else {
            // Columns are observed left to right within a row, so this
            // normally appends exactly one entry; a gap can only come from
            // a ragged row and is seeded with the first value seen.
            self.columns.resize(column + 1, ChannelStats::observe(value));
        }
    }

    /// Folds another aggregate set into this one, column by column.
    pub fn merge(&mut self, other: &ChannelAggregates) {
        for (column, stats) in other.columns.iter().enumerate() {
            if let Some(mine) = self.columns.get_mut(column) {
                mine.fold(stats);
            } else {
                self.columns.push(*stats);
            }
        }
    }

    pub fn column(&self, column: usize) -> Option<&ChannelStats> {
        self.columns.get(column)
    }

    pub fn columns(&self) -> &[ChannelStats] {
        &self.columns
    }

    pub fn min(&self, column: usize) -> Option<i64> {
        self.column(column).map(|s| s.min)
    }

    pub fn max(&self, column: usize) -> Option<i64> {
        self.column(column).map(|s| s.max)
    }

    pub fn sum(&self, column: usize) -> Option<i64> {
        self.column(column).map(|s| s.sum)
    }

    pub fn count(&self, column: usize) -> u64 {
        self.column(column).map(|s| s.count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_tracks_min_max_sum_count() {
        let mut agg = ChannelAggregates::new();
        for v in [5, -2, 9, 0] {
            agg.observe(0, v);
        }
        assert_eq!(agg.min(0), Some(-2));
        assert_eq!(agg.max(0), Some(9));
        assert_eq!(agg.sum(0), Some(12));
        assert_eq!(agg.count(0), 4);
    }

    #[test]
    fn test_merge_is_columnwise() {
        let a = ChannelAggregates::from_table(&[vec![1, 10], vec![3, -4]]);
        let b = ChannelAggregates::from_table(&[vec![-7, 2]]);
        let mut merged = a.clone();
        merged.merge(&b);

        assert_eq!(merged.min(0), Some(-7));
        assert_eq!(merged.max(0), Some(3));
        assert_eq!(merged.min(1), Some(-4));
        assert_eq!(merged.max(1), Some(10));
        assert_eq!(merged.count(0), 3);
        assert_eq!(merged.count(1), 3);
        assert_eq!(merged.sum(0), Some(-3));
    }

    #[test]
    fn test_merge_extends_columns() {
        let mut a = ChannelAggregates::from_table(&[vec![1]]);
        let b = ChannelAggregates::from_table(&[vec![2, 3]]);
        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.count(0), 2);
        assert_eq!(a.count(1), 1);
        assert_eq!(a.min(1), Some(3));
    }

    #[test]
    fn test_empty_column_queries() {
        let agg = ChannelAggregates::new();
        assert!(agg.is_empty());
        assert_eq!(agg.min(0), None);
        assert_eq!(agg.count(0), 0);
    }
}
