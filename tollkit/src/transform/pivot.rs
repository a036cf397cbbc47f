//! Pivot `(row-id, col-id, value)` triples into a square [`Matrix`].

use std::collections::HashMap;

use super::matrix::Matrix;
use crate::error::{TransformError, TransformResult};
use crate::parser::Table;

/// Build a square matrix over the union of row and column ids.
///
/// Cells without a triple stay `None`; the diagonal is forced to 0.
/// A repeated `(row-id, col-id)` pair is rejected.
pub fn build_matrix(
    table: &Table,
    row_column: &str,
    col_column: &str,
    value_column: &str,
) -> TransformResult<Matrix> {
    let rows = table.id_column(row_column)?;
    let cols = table.id_column(col_column)?;
    let values = table.numeric_column(value_column)?;

    let mut matrix = Matrix::new(rows.iter().chain(cols.iter()).copied().collect());
    let mut seen: HashMap<(i64, i64), usize> = HashMap::with_capacity(rows.len());

    for (i, ((&row, &col), &value)) in rows.iter().zip(&cols).zip(&values).enumerate() {
        if seen.insert((row, col), table.line(i)).is_some() {
            return Err(TransformError::DuplicatePair {
                row,
                col,
                line: table.line(i),
            });
        }
        matrix.set(row, col, Some(value));
    }

    for i in 0..matrix.size() {
        matrix.set_at(i, i, Some(0.0));
    }

    Ok(matrix)
}

/// `car` values indexed by `id_1` (rows) and `id_2` (columns).
pub fn generate_car_matrix(table: &Table) -> TransformResult<Matrix> {
    build_matrix(table, "id_1", "id_2", "car")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Table {
        Table::from_rows(
            ["id_1", "id_2", "route", "car"],
            [
                vec!["801", "802", "A", "12"],
                vec!["802", "801", "A", "30"],
                vec!["801", "803", "B", "7.5"],
                vec!["803", "803", "B", "99"],
            ],
        )
    }

    #[test]
    fn test_car_matrix_values() {
        let matrix = generate_car_matrix(&dataset()).unwrap();

        assert_eq!(matrix.ids(), [801, 802, 803]);
        assert_eq!(matrix.get(801, 802), Some(12.0));
        assert_eq!(matrix.get(802, 801), Some(30.0));
        assert_eq!(matrix.get(801, 803), Some(7.5));
        assert_eq!(matrix.get(803, 801), None);
    }

    #[test]
    fn test_diagonal_is_zero_for_every_id() {
        let matrix = generate_car_matrix(&dataset()).unwrap();
        for &id in matrix.ids() {
            assert_eq!(matrix.get(id, id), Some(0.0));
        }
    }

    #[test]
    fn test_square_over_union_of_ids() {
        // 900 only ever appears as a column id
        let table = Table::from_rows(["id_1", "id_2", "car"], [vec!["1", "900", "3"]]);
        let matrix = generate_car_matrix(&table).unwrap();

        assert_eq!(matrix.ids(), [1, 900]);
        assert_eq!(matrix.get(900, 900), Some(0.0));
        assert_eq!(matrix.get(900, 1), None);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let table = Table::from_rows(
            ["id_1", "id_2", "car"],
            [vec!["1", "2", "3"], vec!["1", "2", "4"]],
        );
        let err = generate_car_matrix(&table).unwrap_err();
        assert!(matches!(err, TransformError::DuplicatePair { row: 1, col: 2, line: 3 }));
    }

    #[test]
    fn test_duplicate_pair_reports_source_line() {
        let table = crate::parser::parse_str("id_1,id_2,car\n1,2,3\n\n1,2,4\n", ',').unwrap();
        let err = generate_car_matrix(&table).unwrap_err();

        assert!(matches!(err, TransformError::DuplicatePair { line: 4, .. }));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_custom_value_column() {
        let table = Table::from_rows(["a", "b", "bus"], [vec!["1", "2", "5"]]);
        let matrix = build_matrix(&table, "a", "b", "bus").unwrap();
        assert_eq!(matrix.get(1, 2), Some(5.0));
    }
}
