//! Ids whose distances sit within a percentage band of a reference id's mean.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{TransformError, TransformResult};
use crate::models::{DistanceRow, Id};

/// What is compared against the reference band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBasis {
    /// Each id's mean distance must fall inside the band.
    #[default]
    GroupMean,
    /// An id qualifies when any one of its row distances falls inside the band.
    RowDistance,
}

/// Band `[mean - p*mean, mean + p*mean]` around the reference id's mean distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceBand {
    pub reference_id: Id,
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ReferenceBand {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Mean distance of the rows starting at `reference_id`, widened by `percentage`.
pub fn reference_band(rows: &[DistanceRow], reference_id: Id, percentage: f64) -> TransformResult<ReferenceBand> {
    let mut found = false;
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in rows.iter().filter(|r| r.id_start == reference_id) {
        found = true;
        if let Some(d) = row.distance {
            sum += d;
            count += 1;
        }
    }

    if !found {
        return Err(TransformError::UnknownReference(reference_id));
    }
    if count == 0 {
        return Err(TransformError::NoDistances(reference_id));
    }

    let mean = sum / count as f64;
    let spread = (percentage * mean).abs();
    Ok(ReferenceBand {
        reference_id,
        mean,
        lower: mean - spread,
        upper: mean + spread,
    })
}

/// Sorted, unique start ids within the band around `reference_id`.
///
/// Missing distances are ignored. With [`ThresholdBasis::GroupMean`] the
/// reference id itself is always part of the result.
pub fn find_ids_within_percentage(
    rows: &[DistanceRow],
    reference_id: Id,
    percentage: f64,
    basis: ThresholdBasis,
) -> TransformResult<Vec<Id>> {
    let band = reference_band(rows, reference_id, percentage)?;

    let ids = match basis {
        ThresholdBasis::GroupMean => {
            let mut groups: BTreeMap<Id, (f64, usize)> = BTreeMap::new();
            for row in rows {
                if let Some(d) = row.distance {
                    let (sum, count) = groups.entry(row.id_start).or_insert((0.0, 0));
                    *sum += d;
                    *count += 1;
                }
            }
            groups
                .into_iter()
                .filter(|&(id, (sum, count))| id == reference_id || band.contains(sum / count as f64))
                .map(|(id, _)| id)
                .collect()
        }
        ThresholdBasis::RowDistance => rows
            .iter()
            .filter(|r| r.distance.is_some_and(|d| band.contains(d)))
            .map(|r| r.id_start)
            .collect::<BTreeSet<Id>>()
            .into_iter()
            .collect(),
    };

    Ok(ids)
}

/// Ids within ±10% of the reference id's mean distance.
pub fn find_ids_within_ten_percentage_threshold(rows: &[DistanceRow], reference_id: Id) -> TransformResult<Vec<Id>> {
    find_ids_within_percentage(rows, reference_id, 0.10, ThresholdBasis::GroupMean)
}
