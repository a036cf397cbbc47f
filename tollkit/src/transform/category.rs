//! Bucket a numeric column into `low` / `medium` / `high` and count.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TransformResult;
use crate::models::Bucket;
use crate::parser::Table;

/// Left-closed bucket boundaries: `low < medium_from <= medium < high_from <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketBounds {
    pub medium_from: f64,
    pub high_from: f64,
}

impl Default for BucketBounds {
    fn default() -> Self {
        Self {
            medium_from: 15.0,
            high_from: 25.0,
        }
    }
}

impl BucketBounds {
    pub fn bucket(&self, value: f64) -> Bucket {
        if value < self.medium_from {
            Bucket::Low
        } else if value < self.high_from {
            Bucket::Medium
        } else {
            Bucket::High
        }
    }
}

/// Count the values of `column` per bucket.
///
/// Every bucket is present in the result, with 0 when empty.
/// Keys iterate in label order.
pub fn count_by_bucket(
    table: &Table,
    column: &str,
    bounds: &BucketBounds,
) -> TransformResult<BTreeMap<Bucket, usize>> {
    let mut counts: BTreeMap<Bucket, usize> = Bucket::ALL.iter().map(|&b| (b, 0)).collect();

    for value in table.numeric_column(column)? {
        *counts.entry(bounds.bucket(value)).or_insert(0) += 1;
    }

    Ok(counts)
}

/// Bucket counts of the `car` column with the default bounds.
pub fn get_type_count(table: &Table) -> TransformResult<BTreeMap<Bucket, usize>> {
    count_by_bucket(table, "car", &BucketBounds::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cars(values: &[&str]) -> Table {
        Table::from_rows(["car"], values.iter().map(|v| vec![*v]))
    }

    #[test]
    fn test_boundaries_are_left_closed() {
        let bounds = BucketBounds::default();
        assert_eq!(bounds.bucket(14.99), Bucket::Low);
        assert_eq!(bounds.bucket(15.0), Bucket::Medium);
        assert_eq!(bounds.bucket(24.99), Bucket::Medium);
        assert_eq!(bounds.bucket(25.0), Bucket::High);
        assert_eq!(bounds.bucket(-3.0), Bucket::Low);
    }

    #[test]
    fn test_counts() {
        let counts = get_type_count(&cars(&["1", "15", "16", "25", "40", "8"])).unwrap();

        let labels: Vec<&str> = counts.keys().map(Bucket::label).collect();
        assert_eq!(labels, ["high", "low", "medium"]);
        assert_eq!(counts[&Bucket::Low], 2);
        assert_eq!(counts[&Bucket::Medium], 2);
        assert_eq!(counts[&Bucket::High], 2);
    }

    #[test]
    fn test_counts_sum_to_row_count() {
        let table = cars(&["0", "14", "15", "30", "30", "22.5", "100"]);
        let counts = get_type_count(&table).unwrap();
        assert_eq!(counts.values().sum::<usize>(), table.len());
    }

    #[test]
    fn test_empty_buckets_reported() {
        let counts = get_type_count(&cars(&["3"])).unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&Bucket::High], 0);
    }
}
