//! Domain models for the toll network datasets.
//!
//! - [`Bucket`] - `low` / `medium` / `high` category of a value
//! - [`VehicleType`] - vehicle classes that carry a toll rate
//! - [`DistanceEdge`] - one `(id_start, id_end, distance)` input edge
//! - [`DistanceRow`] - one long-form row, distance possibly missing
//! - [`TollRow`] - per-vehicle toll rates for a long-form row
//! - [`IntervalRecord`] - one weekly availability interval for an id pair

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TransformError;
use crate::parser::{CsvError, Table};

/// Integer id used for toll booths and record pairs.
pub type Id = i64;

// =============================================================================
// Category Bucket
// =============================================================================

/// Category of a numeric value.
///
/// Variants are declared in label order so `Ord` sorts them
/// lexicographically (`high` < `low` < `medium`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    High,
    Low,
    Medium,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::High, Bucket::Low, Bucket::Medium];

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Vehicle Type
// =============================================================================

/// Vehicle class with its own toll rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Moto,
    Car,
    Rv,
    Bus,
    Truck,
}

impl VehicleType {
    /// Column order of the toll table.
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Moto,
        VehicleType::Car,
        VehicleType::Rv,
        VehicleType::Bus,
        VehicleType::Truck,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Self::Moto => "moto",
            Self::Car => "car",
            Self::Rv => "rv",
            Self::Bus => "bus",
            Self::Truck => "truck",
        }
    }
}

// =============================================================================
// Distance records
// =============================================================================

/// A directed, weighted input edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceEdge {
    pub id_start: Id,
    pub id_end: Id,
    pub distance: f64,
}

impl DistanceEdge {
    pub fn new(id_start: Id, id_end: Id, distance: f64) -> Self {
        Self {
            id_start,
            id_end,
            distance,
        }
    }

    /// Read edges from the `id_start`, `id_end`, `distance` columns.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, CsvError> {
        let starts = table.id_column("id_start")?;
        let ends = table.id_column("id_end")?;
        let distances = table.numeric_column("distance")?;

        Ok(starts
            .into_iter()
            .zip(ends)
            .zip(distances)
            .map(|((id_start, id_end), distance)| Self::new(id_start, id_end, distance))
            .collect())
    }
}

/// One long-form row of a distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRow {
    pub id_start: Id,
    pub id_end: Id,
    pub distance: Option<f64>,
}

impl DistanceRow {
    pub fn new(id_start: Id, id_end: Id, distance: Option<f64>) -> Self {
        Self {
            id_start,
            id_end,
            distance,
        }
    }

    /// Read long-form rows; empty or `NaN` distances become `None`.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, CsvError> {
        let starts = table.id_column("id_start")?;
        let ends = table.id_column("id_end")?;
        let distances = table.optional_numeric_column("distance")?;

        Ok(starts
            .into_iter()
            .zip(ends)
            .zip(distances)
            .map(|((id_start, id_end), distance)| Self::new(id_start, id_end, distance))
            .collect())
    }
}

/// Toll rates of one long-form row, one column per [`VehicleType`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TollRow {
    pub id_start: Id,
    pub id_end: Id,
    pub moto: Option<f64>,
    pub car: Option<f64>,
    pub rv: Option<f64>,
    pub bus: Option<f64>,
    pub truck: Option<f64>,
}

impl TollRow {
    pub fn rate(&self, vehicle: VehicleType) -> Option<f64> {
        match vehicle {
            VehicleType::Moto => self.moto,
            VehicleType::Car => self.car,
            VehicleType::Rv => self.rv,
            VehicleType::Bus => self.bus,
            VehicleType::Truck => self.truck,
        }
    }
}

// =============================================================================
// Weekly intervals
// =============================================================================

/// Key of an interval record: the `(id, id_2)` pair.
pub type PairKey = (Id, Id);

/// One availability interval on the weekly timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    pub key: PairKey,
    pub start_day: Weekday,
    pub start_time: NaiveTime,
    pub end_day: Weekday,
    pub end_time: NaiveTime,
}

impl IntervalRecord {
    /// Read intervals from `id`, `id_2`, `startDay`, `startTime`, `endDay`, `endTime`.
    pub fn from_table(table: &Table) -> Result<Vec<Self>, TransformError> {
        let ids = table.id_column("id")?;
        let ids_2 = table.id_column("id_2")?;
        let start_days = table.text_column("startDay")?;
        let start_times = table.text_column("startTime")?;
        let end_days = table.text_column("endDay")?;
        let end_times = table.text_column("endTime")?;

        (0..table.len())
            .map(|i| {
                let line = table.line(i);
                Ok(Self {
                    key: (ids[i], ids_2[i]),
                    start_day: parse_weekday(start_days[i], line)?,
                    start_time: parse_time(start_times[i], line)?,
                    end_day: parse_weekday(end_days[i], line)?,
                    end_time: parse_time(end_times[i], line)?,
                })
            })
            .collect()
    }
}

fn parse_weekday(raw: &str, line: usize) -> Result<Weekday, TransformError> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| TransformError::invalid_interval(line, format!("unknown weekday '{}'", raw)))
}

fn parse_time(raw: &str, line: usize) -> Result<NaiveTime, TransformError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S")
        .map_err(|e| TransformError::invalid_interval(line, format!("bad time '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_order_is_lexicographic() {
        let mut labels: Vec<&str> = Bucket::ALL.iter().map(Bucket::label).collect();
        let expected = labels.clone();
        labels.sort();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_distance_rows_from_table() {
        let table = Table::from_rows(
            ["id_start", "id_end", "distance"],
            [vec!["1", "2", "9.7"], vec!["2", "1", ""]],
        );
        let rows = DistanceRow::from_table(&table).unwrap();
        assert_eq!(rows[0], DistanceRow::new(1, 2, Some(9.7)));
        assert_eq!(rows[1], DistanceRow::new(2, 1, None));

        // Edges need every distance
        assert!(DistanceEdge::from_table(&table).is_err());
    }

    #[test]
    fn test_interval_records_parse() {
        let table = Table::from_rows(
            ["id", "id_2", "startDay", "startTime", "endDay", "endTime"],
            [vec!["1014000", "-1", "Monday", "05:00:00", "Wednesday", "10:00:00"]],
        );
        let records = IntervalRecord::from_table(&table).unwrap();

        assert_eq!(records[0].key, (1014000, -1));
        assert_eq!(records[0].start_day, Weekday::Mon);
        assert_eq!(records[0].end_day, Weekday::Wed);
        assert_eq!(records[0].end_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_interval_bad_weekday() {
        let table = Table::from_rows(
            ["id", "id_2", "startDay", "startTime", "endDay", "endTime"],
            [vec!["1", "2", "Funday", "05:00:00", "Monday", "10:00:00"]],
        );
        let err = IntervalRecord::from_table(&table).unwrap_err();
        assert!(err.to_string().contains("Funday"));
        assert!(err.to_string().contains("line 2"));
    }
}
