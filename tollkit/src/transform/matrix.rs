//! Square id-by-id matrix with explicit missing cells.

use serde::{Serialize, Serializer};

use crate::models::Id;

/// Square matrix over a sorted id set; `None` marks a cell with no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    ids: Vec<Id>,
    cells: Vec<Option<f64>>,
}

impl Matrix {
    /// Empty matrix over `ids` (sorted and deduplicated), every cell `None`.
    pub fn new(mut ids: Vec<Id>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        let n = ids.len();
        Self {
            ids,
            cells: vec![None; n * n],
        }
    }

    /// Same as [`Matrix::new`] with the diagonal set to 0.
    pub fn with_zero_diagonal(ids: Vec<Id>) -> Self {
        let mut matrix = Self::new(ids);
        for i in 0..matrix.size() {
            matrix.set_at(i, i, Some(0.0));
        }
        matrix
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: Id) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Cell value; `None` when either id is unknown or the cell is empty.
    pub fn get(&self, row: Id, col: Id) -> Option<f64> {
        let i = self.index_of(row)?;
        let j = self.index_of(col)?;
        self.at(i, j)
    }

    /// Set a cell by id. Returns `false` when either id is not on the axes.
    pub fn set(&mut self, row: Id, col: Id, value: Option<f64>) -> bool {
        match (self.index_of(row), self.index_of(col)) {
            (Some(i), Some(j)) => {
                self.set_at(i, j, value);
                true
            }
            _ => false,
        }
    }

    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i * self.size() + j]
    }

    pub fn set_at(&mut self, i: usize, j: usize, value: Option<f64>) {
        let n = self.size();
        self.cells[i * n + j] = value;
    }

    /// Cells of row `i`, in id order.
    pub fn row(&self, i: usize) -> &[Option<f64>] {
        let n = self.size();
        &self.cells[i * n..(i + 1) * n]
    }

    /// Iterate `(row id, row cells)`.
    pub fn rows(&self) -> impl Iterator<Item = (Id, &[Option<f64>])> + '_ {
        self.ids.iter().enumerate().map(|(i, &id)| (id, self.row(i)))
    }

    /// Apply `f` to every defined cell.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            ids: self.ids.clone(),
            cells: self.cells.iter().map(|c| c.map(&f)).collect(),
        }
    }

    pub fn transpose(&self) -> Self {
        let n = self.size();
        let mut out = Self::new(self.ids.clone());
        for i in 0..n {
            for j in 0..n {
                out.set_at(j, i, self.at(i, j));
            }
        }
        out
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (i + 1..n).all(|j| self.at(i, j) == self.at(j, i)))
    }
}

#[derive(Serialize)]
struct MatrixJson<'a> {
    ids: &'a [Id],
    rows: Vec<&'a [Option<f64>]>,
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MatrixJson {
            ids: &self.ids,
            rows: (0..self.size()).map(|i| self.row(i)).collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_sorted_and_unique() {
        let matrix = Matrix::new(vec![3, 1, 2, 3]);
        assert_eq!(matrix.ids(), [1, 2, 3]);
        assert_eq!(matrix.get(1, 3), None);
    }

    #[test]
    fn test_set_and_transpose() {
        let mut matrix = Matrix::with_zero_diagonal(vec![10, 20]);
        assert!(matrix.set(10, 20, Some(4.5)));
        assert!(!matrix.set(10, 99, Some(1.0)));

        assert_eq!(matrix.get(10, 10), Some(0.0));
        assert!(!matrix.is_symmetric());

        let t = matrix.transpose();
        assert_eq!(t.get(20, 10), Some(4.5));
        assert_eq!(t.get(10, 20), None);
    }

    #[test]
    fn test_json_shape() {
        let mut matrix = Matrix::with_zero_diagonal(vec![1, 2]);
        matrix.set(1, 2, Some(3.0));

        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json, serde_json::json!({"ids": [1, 2], "rows": [[0.0, 3.0], [null, 0.0]]}));
    }
}
