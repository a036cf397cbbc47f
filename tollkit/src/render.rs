//! Output rendering: terminal tables, JSON or CSV.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table as TextTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Bucket, DistanceRow, PairKey, TollRow, VehicleType};
use crate::transform::matrix::Matrix;

/// Output format of every subcommand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

/// Text of a possibly missing number; missing renders as `NaN` in tables.
fn number(value: Option<f64>, missing: &str) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| missing.to_string())
}

fn text_table(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut table = TextTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    for row in rows {
        table.add_row(row.into_iter().map(|c| Cell::new(c).set_alignment(CellAlignment::Right)));
    }
    table.to_string()
}

fn csv_text(header: Vec<String>, rows: Vec<Vec<String>>) -> PipelineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_grid<T: Serialize + ?Sized>(
    value: &T,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    format: OutputFormat,
) -> PipelineResult<String> {
    match format {
        OutputFormat::Table => Ok(text_table(header, rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Csv => csv_text(header, rows),
    }
}

/// Matrix with ids on both axes.
pub fn render_matrix(matrix: &Matrix, format: OutputFormat) -> PipelineResult<String> {
    let missing = if format == OutputFormat::Csv { "" } else { "NaN" };

    let mut header = vec![String::new()];
    header.extend(matrix.ids().iter().map(|id| id.to_string()));

    let rows = matrix
        .rows()
        .map(|(id, cells)| {
            let mut row = vec![id.to_string()];
            row.extend(cells.iter().map(|&c| number(c, missing)));
            row
        })
        .collect();

    render_grid(matrix, header, rows, format)
}

/// Bucket label → count, in label order.
pub fn render_counts(counts: &BTreeMap<Bucket, usize>, format: OutputFormat) -> PipelineResult<String> {
    let rows = counts
        .iter()
        .map(|(bucket, count)| vec![bucket.to_string(), count.to_string()])
        .collect();
    render_grid(counts, vec!["category".into(), "count".into()], rows, format)
}

/// A single-column list (indexes, route names, ids).
pub fn render_list<T: Display + Serialize>(items: &[T], column: &str, format: OutputFormat) -> PipelineResult<String> {
    let rows = items.iter().map(|item| vec![item.to_string()]).collect();
    render_grid(items, vec![column.to_string()], rows, format)
}

/// Completeness flag per `(id, id_2)` pair.
pub fn render_coverage(coverage: &BTreeMap<PairKey, bool>, format: OutputFormat) -> PipelineResult<String> {
    #[derive(Serialize)]
    struct Entry {
        id: i64,
        id_2: i64,
        is_complete: bool,
    }

    let entries: Vec<Entry> = coverage
        .iter()
        .map(|(&(id, id_2), &is_complete)| Entry { id, id_2, is_complete })
        .collect();
    let rows = entries
        .iter()
        .map(|e| vec![e.id.to_string(), e.id_2.to_string(), e.is_complete.to_string()])
        .collect();

    render_grid(&entries, vec!["id".into(), "id_2".into(), "is_complete".into()], rows, format)
}

/// Long-form `(id_start, id_end, distance)` rows.
pub fn render_distance_rows(rows: &[DistanceRow], format: OutputFormat) -> PipelineResult<String> {
    let missing = if format == OutputFormat::Csv { "" } else { "NaN" };
    let cells = rows
        .iter()
        .map(|r| vec![r.id_start.to_string(), r.id_end.to_string(), number(r.distance, missing)])
        .collect();
    render_grid(rows, vec!["id_start".into(), "id_end".into(), "distance".into()], cells, format)
}

/// Toll rows, one column per vehicle type.
pub fn render_toll_rows(rows: &[TollRow], format: OutputFormat) -> PipelineResult<String> {
    let missing = if format == OutputFormat::Csv { "" } else { "NaN" };

    let mut header = vec!["id_start".to_string(), "id_end".to_string()];
    header.extend(VehicleType::ALL.iter().map(|v| v.column().to_string()));

    let cells = rows
        .iter()
        .map(|r| {
            let mut row = vec![r.id_start.to_string(), r.id_end.to_string()];
            row.extend(VehicleType::ALL.iter().map(|&v| number(r.rate(v), missing)));
            row
        })
        .collect();

    render_grid(rows, header, cells, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Matrix {
        let mut m = Matrix::with_zero_diagonal(vec![1, 2]);
        m.set(1, 2, Some(9.7));
        m
    }

    #[test]
    fn test_matrix_csv() {
        let out = render_matrix(&matrix(), OutputFormat::Csv).unwrap();
        assert_eq!(out, ",1,2\n1,0,9.7\n2,,0\n");
    }

    #[test]
    fn test_matrix_table_marks_missing() {
        let out = render_matrix(&matrix(), OutputFormat::Table).unwrap();
        assert!(out.contains("9.7"));
        assert!(out.contains("NaN"));
    }

    #[test]
    fn test_counts_json() {
        let counts: BTreeMap<Bucket, usize> = [(Bucket::High, 1), (Bucket::Low, 2), (Bucket::Medium, 0)].into();
        let out = render_counts(&counts, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!({"high": 1, "low": 2, "medium": 0}));
    }

    #[test]
    fn test_coverage_csv() {
        let coverage: BTreeMap<PairKey, bool> = [((1, 2), true), ((3, 4), false)].into();
        let out = render_coverage(&coverage, OutputFormat::Csv).unwrap();
        assert_eq!(out, "id,id_2,is_complete\n1,2,true\n3,4,false\n");
    }

    #[test]
    fn test_distance_rows_csv_round_trips() {
        let rows = vec![DistanceRow::new(1, 2, Some(9.7)), DistanceRow::new(2, 1, None)];
        let out = render_distance_rows(&rows, OutputFormat::Csv).unwrap();
        assert_eq!(out, "id_start,id_end,distance\n1,2,9.7\n2,1,\n");

        let table = crate::parser::parse_str(&out, ',').unwrap();
        assert_eq!(DistanceRow::from_table(&table).unwrap(), rows);
    }

    #[test]
    fn test_toll_header_order() {
        let rows = vec![TollRow {
            id_start: 1,
            id_end: 2,
            moto: Some(0.8),
            car: Some(1.2),
            rv: Some(1.5),
            bus: Some(2.2),
            truck: Some(3.6),
        }];
        let out = render_toll_rows(&rows, OutputFormat::Csv).unwrap();
        assert!(out.starts_with("id_start,id_end,moto,car,rv,bus,truck\n1,2,0.8,1.2,1.5,2.2,3.6"));
    }
}
