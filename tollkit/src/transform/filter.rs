//! Filters over column aggregates.

use std::collections::BTreeMap;

use crate::error::TransformResult;
use crate::parser::Table;

/// Row indices (0-based, ascending) whose value exceeds `factor` times the column mean.
pub fn indexes_above_mean(table: &Table, column: &str, factor: f64) -> TransformResult<Vec<usize>> {
    let values = table.numeric_column(column)?;
    let Some(mean) = mean(&values) else {
        return Ok(Vec::new());
    };

    let limit = factor * mean;
    Ok(values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > limit)
        .map(|(i, _)| i)
        .collect())
}

/// Indices where `bus` exceeds twice its mean.
pub fn get_bus_indexes(table: &Table) -> TransformResult<Vec<usize>> {
    indexes_above_mean(table, "bus", 2.0)
}

/// Group keys (ascending) whose mean of `column` exceeds `threshold`.
pub fn groups_with_mean_above(
    table: &Table,
    key_column: &str,
    column: &str,
    threshold: f64,
) -> TransformResult<Vec<String>> {
    let keys = table.text_column(key_column)?;
    let values = table.numeric_column(column)?;

    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, value) in keys.into_iter().zip(values) {
        let (sum, count) = groups.entry(key).or_insert((0.0, 0));
        *sum += value;
        *count += 1;
    }

    Ok(groups
        .into_iter()
        .filter(|(_, (sum, count))| sum / *count as f64 > threshold)
        .map(|(key, _)| key.to_string())
        .collect())
}

/// Routes whose average `truck` value exceeds 7.
pub fn filter_routes(table: &Table) -> TransformResult<Vec<String>> {
    groups_with_mean_above(table, "route", "truck", 7.0)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
