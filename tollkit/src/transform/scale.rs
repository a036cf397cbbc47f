//! Conditional elementwise scaling of a [`Matrix`].

use serde::{Deserialize, Serialize};

use super::matrix::Matrix;

/// Cells above `pivot` are multiplied by `above_factor`, the rest by `below_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingRule {
    pub pivot: f64,
    pub above_factor: f64,
    pub below_factor: f64,
    /// Decimal places kept after scaling
    pub decimals: u32,
}

impl Default for ScalingRule {
    fn default() -> Self {
        Self {
            pivot: 20.0,
            above_factor: 0.75,
            below_factor: 1.25,
            decimals: 1,
        }
    }
}

impl ScalingRule {
    pub fn apply(&self, value: f64) -> f64 {
        let scaled = if value > self.pivot {
            value * self.above_factor
        } else {
            value * self.below_factor
        };
        round_to(scaled, self.decimals)
    }
}

/// Scale every defined cell; missing cells stay missing.
pub fn scale_matrix(matrix: &Matrix, rule: &ScalingRule) -> Matrix {
    matrix.map_values(|v| rule.apply(v))
}

/// Scale with the default rule (`> 20` → ×0.75, else ×1.25, one decimal).
pub fn multiply_matrix(matrix: &Matrix) -> Matrix {
    scale_matrix(matrix, &ScalingRule::default())
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule() {
        let rule = ScalingRule::default();
        assert_eq!(rule.apply(40.0), 30.0);
        assert_eq!(rule.apply(20.0), 25.0);
        assert_eq!(rule.apply(9.7), 12.1);
        assert_eq!(rule.apply(0.0), 0.0);
    }

    #[test]
    fn test_multiply_matrix() {
        let mut matrix = Matrix::with_zero_diagonal(vec![1, 2, 3]);
        matrix.set(1, 2, Some(21.3));
        matrix.set(2, 1, Some(13.0));

        let scaled = multiply_matrix(&matrix);
        assert_eq!(scaled.get(1, 2), Some(16.0));
        assert_eq!(scaled.get(2, 1), Some(16.3));
        assert_eq!(scaled.get(1, 3), None);
        assert_eq!(scaled.get(3, 3), Some(0.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.26, 1), 1.3);
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(7.6, 0), 8.0);
    }
}
