//! File-level entry points: load a CSV, run one transformation, return the result.
//!
//! Each function mirrors one CLI subcommand. The distance dataset feeds a
//! short chain: edges → distance matrix → long-form rows → threshold / toll.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tollkit::config::Settings;
//! use tollkit::transform::pipeline::{toll_rates, LongFormSource};
//!
//! let settings = Settings::default();
//! let tolls = toll_rates(Path::new("dataset-3.csv"), LongFormSource::Edges, &settings)?;
//! println!("{} toll rows", tolls.len());
//! # Ok::<(), tollkit::error::PipelineError>(())
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use super::category::count_by_bucket;
use super::coverage::time_check as check_time_coverage;
use super::distance::{calculate_distance_matrix, unroll_distance_matrix};
use super::filter::{groups_with_mean_above, indexes_above_mean};
use super::matrix::Matrix;
use super::pivot::build_matrix;
use super::scale::scale_matrix;
use super::threshold::{find_ids_within_percentage, ThresholdBasis};
use super::toll::calculate_toll_rate;
use crate::config::Settings;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::{Bucket, DistanceEdge, DistanceRow, Id, PairKey, TollRow};
use crate::parser::{parse_csv_file_auto, Table};

/// How a distance file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongFormSource {
    /// Raw edges: build the distance matrix, then unroll it
    Edges,
    /// Already unrolled long-form rows (e.g. output of `unroll --format csv`)
    Unrolled,
}

/// Load a CSV with encoding and delimiter auto-detection.
pub fn load_table(path: &Path) -> PipelineResult<Table> {
    log_info(format!("Loading {}", path.display()));
    let result = parse_csv_file_auto(path)?;

    log_info_indent(format!("Encoding: {}", result.encoding), 1);
    log_info_indent(format!("Delimiter: '{}'", format_delimiter(result.delimiter)), 1);
    log_info_indent(format!("Columns: {}", result.table.headers().join(", ")), 1);
    log_info_indent(format!("Rows: {}", result.table.len()), 1);

    Ok(result.table)
}

/// Matrix of `value_column` indexed by `row_column` × `col_column`.
pub fn pivot_matrix(path: &Path, row_column: &str, col_column: &str, value_column: &str) -> PipelineResult<Matrix> {
    let table = load_table(path)?;
    let matrix = build_matrix(&table, row_column, col_column, value_column)?;
    log_success(format!("Built {0}x{0} matrix", matrix.size()));
    Ok(matrix)
}

/// `car` matrix over `id_1` × `id_2`.
pub fn car_matrix(path: &Path) -> PipelineResult<Matrix> {
    pivot_matrix(path, "id_1", "id_2", "car")
}

/// Bucket counts of `column`.
pub fn type_count(path: &Path, column: &str, settings: &Settings) -> PipelineResult<BTreeMap<Bucket, usize>> {
    let table = load_table(path)?;
    Ok(count_by_bucket(&table, column, &settings.buckets)?)
}

/// Row indices where `column` exceeds `index_factor` times its mean.
pub fn bus_indexes(path: &Path, column: &str, settings: &Settings) -> PipelineResult<Vec<usize>> {
    let table = load_table(path)?;
    let indexes = indexes_above_mean(&table, column, settings.index_factor)?;
    log_success(format!("{} rows above {}x mean of '{}'", indexes.len(), settings.index_factor, column));
    Ok(indexes)
}

/// Groups of `key_column` whose mean `column` exceeds `route_threshold`.
pub fn filter_routes(path: &Path, key_column: &str, column: &str, settings: &Settings) -> PipelineResult<Vec<String>> {
    let table = load_table(path)?;
    let groups = groups_with_mean_above(&table, key_column, column, settings.route_threshold)?;
    log_success(format!("{} groups above mean {}", groups.len(), settings.route_threshold));
    Ok(groups)
}

/// `car` matrix with conditional scaling applied.
pub fn multiply_matrix(path: &Path, settings: &Settings) -> PipelineResult<Matrix> {
    let matrix = car_matrix(path)?;
    Ok(scale_matrix(&matrix, &settings.scaling))
}

/// Weekly coverage per `(id, id_2)` pair.
pub fn time_check(path: &Path) -> PipelineResult<BTreeMap<PairKey, bool>> {
    let table = load_table(path)?;
    let coverage = check_time_coverage(&table)?;

    let complete = coverage.values().filter(|&&c| c).count();
    log_success(format!("{} of {} pairs cover the full week", complete, coverage.len()));
    Ok(coverage)
}

/// Symmetrized shortest-distance matrix of the edges in `path`.
pub fn distance_matrix(path: &Path) -> PipelineResult<Matrix> {
    let table = load_table(path)?;
    let edges = DistanceEdge::from_table(&table)?;
    let matrix = calculate_distance_matrix(&edges)?;
    log_success(format!("Distance matrix over {} ids from {} edges", matrix.size(), edges.len()));
    Ok(matrix)
}

/// Long-form rows, either unrolled from edges or read as-is.
pub fn long_form_rows(path: &Path, source: LongFormSource) -> PipelineResult<Vec<DistanceRow>> {
    match source {
        LongFormSource::Edges => {
            let rows = unroll_distance_matrix(&distance_matrix(path)?);
            log_info_indent(format!("Unrolled into {} rows", rows.len()), 1);
            Ok(rows)
        }
        LongFormSource::Unrolled => {
            let table = load_table(path)?;
            Ok(DistanceRow::from_table(&table)?)
        }
    }
}

/// Ids within `settings.percentage` of the reference id's mean distance.
pub fn threshold_ids(
    path: &Path,
    source: LongFormSource,
    reference_id: Id,
    basis: ThresholdBasis,
    settings: &Settings,
) -> PipelineResult<Vec<Id>> {
    let rows = long_form_rows(path, source)?;
    let ids = find_ids_within_percentage(&rows, reference_id, settings.percentage, basis)?;
    log_success(format!(
        "{} ids within {}% of id {}",
        ids.len(),
        settings.percentage * 100.0,
        reference_id
    ));
    Ok(ids)
}

/// Toll rates for every long-form row.
pub fn toll_rates(path: &Path, source: LongFormSource, settings: &Settings) -> PipelineResult<Vec<TollRow>> {
    let rows = long_form_rows(path, source)?;
    Ok(calculate_toll_rate(&rows, &settings.toll_rates))
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_car_matrix_from_file() {
        let file = csv_file("id_1,id_2,route,moto,car,rv,bus,truck\n801,802,A,1,12,3,4,5\n802,801,B,1,30,3,4,5\n");
        let matrix = car_matrix(file.path()).unwrap();
        assert_eq!(matrix.get(801, 802), Some(12.0));
        assert_eq!(matrix.get(802, 802), Some(0.0));
    }

    #[test]
    fn test_multiply_matrix_from_file() {
        let file = csv_file("id_1;id_2;car\n1;2;40\n2;1;8\n");
        let matrix = multiply_matrix(file.path(), &Settings::default()).unwrap();
        assert_eq!(matrix.get(1, 2), Some(30.0));
        assert_eq!(matrix.get(2, 1), Some(10.0));
    }

    #[test]
    fn test_time_check_from_file() {
        let file = csv_file(
            "id,id_2,startDay,startTime,endDay,endTime\n\
             5,6,Monday,00:00:00,Sunday,23:59:59\n\
             7,8,Tuesday,00:00:00,Monday,23:59:58\n",
        );
        let coverage = time_check(file.path()).unwrap();

        assert_eq!(coverage.len(), 2);
        assert!(coverage[&(5, 6)]);
        assert!(!coverage[&(7, 8)]);
    }

    #[test]
    fn test_time_check_error_points_at_source_line() {
        let file = csv_file("id,id_2,startDay,startTime,endDay,endTime\n\n5,6,Funday,00:00:00,Sunday,23:59:59\n");
        let err = time_check(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_long_form_sources_agree() {
        let edges = csv_file("id_start,id_end,distance\n1,2,10\n2,3,10\n");
        let from_edges = long_form_rows(edges.path(), LongFormSource::Edges).unwrap();

        let unrolled = csv_file("id_start,id_end,distance\n1,2,10\n1,3,20\n2,1,10\n2,3,10\n3,1,20\n3,2,10\n");
        let read_back = long_form_rows(unrolled.path(), LongFormSource::Unrolled).unwrap();

        assert_eq!(from_edges, read_back);
    }

    #[test]
    fn test_threshold_and_tolls() {
        let edges = csv_file("id_start,id_end,distance\n1,2,10\n2,3,10\n");
        let settings = Settings::default();

        // means: 1 -> 15, 2 -> 10, 3 -> 15
        let ids = threshold_ids(edges.path(), LongFormSource::Edges, 1, ThresholdBasis::GroupMean, &settings).unwrap();
        assert_eq!(ids, vec![1, 3]);

        let tolls = toll_rates(edges.path(), LongFormSource::Edges, &settings).unwrap();
        assert_eq!(tolls.len(), 6);
        assert_eq!(tolls[0].rv, Some(15.0));
    }

    #[test]
    fn test_missing_column_surfaces() {
        let file = csv_file("a,b\n1,2\n");
        let err = distance_matrix(file.path()).unwrap_err();
        assert!(err.to_string().contains("id_start"));
    }
}
