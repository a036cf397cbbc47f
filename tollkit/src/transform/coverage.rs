//! Weekly time-coverage check per `(id, id_2)` pair.
//!
//! Intervals are placed on a Monday-based weekly timeline measured in
//! seconds. A record covers from its start second through its end second
//! inclusive; an end earlier than the start wraps past Sunday 23:59:59.
//! A pair is complete when the union of its intervals leaves no second
//! of the week uncovered.

use chrono::{NaiveTime, Timelike, Weekday};
use std::collections::BTreeMap;

use crate::error::TransformResult;
use crate::models::{IntervalRecord, PairKey};
use crate::parser::Table;

const SECONDS_PER_DAY: u32 = 86_400;
const SECONDS_PER_WEEK: u32 = 7 * SECONDS_PER_DAY;

/// Second of the week for a weekday and time.
fn week_second(day: Weekday, time: NaiveTime) -> u32 {
    day.num_days_from_monday() * SECONDS_PER_DAY + time.num_seconds_from_midnight()
}

/// Half-open spans `[from, to)` covered by one record.
fn spans(record: &IntervalRecord) -> Vec<(u32, u32)> {
    let start = week_second(record.start_day, record.start_time);
    let end = week_second(record.end_day, record.end_time) + 1;

    if end > start {
        vec![(start, end)]
    } else {
        vec![(start, SECONDS_PER_WEEK), (0, end)]
    }
}

/// Whether the union of `spans` covers `[0, SECONDS_PER_WEEK)`.
fn covers_week(mut spans: Vec<(u32, u32)>) -> bool {
    spans.sort_unstable();

    let mut reached = 0;
    for (from, to) in spans {
        if from > reached {
            return false;
        }
        reached = reached.max(to);
    }
    reached >= SECONDS_PER_WEEK
}

/// Completeness of each pair over already-parsed intervals.
pub fn check_coverage(records: &[IntervalRecord]) -> BTreeMap<PairKey, bool> {
    let mut by_key: BTreeMap<PairKey, Vec<(u32, u32)>> = BTreeMap::new();
    for record in records {
        by_key.entry(record.key).or_default().extend(spans(record));
    }

    by_key
        .into_iter()
        .map(|(key, spans)| (key, covers_week(spans)))
        .collect()
}

/// Read interval records from `table` and check each `(id, id_2)` pair.
pub fn time_check(table: &Table) -> TransformResult<BTreeMap<PairKey, bool>> {
    let records = IntervalRecord::from_table(table)?;
    Ok(check_coverage(&records))
}
