use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::errors::{RecommendError, RecommendResult};

/// Standard deviations at or below this are treated as a constant column.
const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

/// Per-column statistics learned by [`StandardScaler::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerState {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl ScalerState {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

/// Zero-mean / unit-variance column standardisation.
///
/// Statistics include every cell of a column, unrated sentinels too.
pub struct StandardScaler;

impl StandardScaler {
    pub fn fit(data: &Array2<f64>) -> RecommendResult<ScalerState> {
        let (n_rows, n_cols) = data.dim();
        if n_rows == 0 {
            return Err(RecommendError::Numeric("cannot scale a matrix with zero users".into()));
        }
        if n_cols == 0 {
            return Err(RecommendError::Numeric("cannot scale a matrix with zero items".into()));
        }

        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| RecommendError::Numeric("column mean of empty matrix".into()))?;

        let mut variance = Array1::<f64>::zeros(n_cols);
        for row in data.rows() {
            for (j, &x) in row.iter().enumerate() {
                variance[j] += (x - mean[j]).powi(2);
            }
        }
        let std = variance.mapv(|v| (v / n_rows as f64).sqrt());

        Ok(ScalerState { mean, std })
    }

    pub fn transform(data: &Array2<f64>, state: &ScalerState) -> RecommendResult<Array2<f64>> {
        if data.ncols() != state.n_features() {
            return Err(RecommendError::Numeric(format!(
                "scaler fitted on {} columns, got {}",
                state.n_features(),
                data.ncols()
            )));
        }

        let mut scaled = data.clone();
        for mut row in scaled.rows_mut() {
            for (j, x) in row.iter_mut().enumerate() {
                *x = scale_value(*x, state.mean[j], state.std[j]);
            }
        }
        Ok(scaled)
    }

    pub fn transform_row(row: ArrayView1<'_, f64>, state: &ScalerState) -> RecommendResult<Array1<f64>> {
        if row.len() != state.n_features() {
            return Err(RecommendError::Numeric(format!(
                "scaler fitted on {} columns, got {}",
                state.n_features(),
                row.len()
            )));
        }
        Ok(Array1::from_iter(
            row.iter()
                .enumerate()
                .map(|(j, &x)| scale_value(x, state.mean[j], state.std[j])),
        ))
    }

    pub fn fit_transform(data: &Array2<f64>) -> RecommendResult<(ScalerState, Array2<f64>)> {
        let state = Self::fit(data)?;
        let scaled = Self::transform(data, &state)?;
        Ok((state, scaled))
    }
}

fn scale_value(x: f64, mean: f64, std: f64) -> f64 {
    if std <= ZERO_VARIANCE_EPSILON {
        0.0
    } else {
        (x - mean) / std
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_scaled_columns_have_zero_mean_unit_std() {
        let data = array![[5.0, 0.0, 1.0], [0.0, 4.0, 2.0], [3.0, 0.0, 3.0], [0.0, 2.5, 4.0]];
        let (_, scaled) = StandardScaler::fit_transform(&data).unwrap();

        for column in scaled.columns() {
            let mean = column.sum() / column.len() as f64;
            let var = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / column.len() as f64;
            assert!(mean.abs() < TOLERANCE);
            assert!((var.sqrt() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_statistics_include_unrated_cells() {
        let data = array![[4.0], [0.0]];
        let state = StandardScaler::fit(&data).unwrap();
        assert!((state.mean[0] - 2.0).abs() < TOLERANCE);
        assert!((state.std[0] - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_variance_column_becomes_zero() {
        let data = array![[3.0, 0.0], [3.0, 0.0], [3.0, 0.0]];
        let (state, scaled) = StandardScaler::fit_transform(&data).unwrap();
        assert_eq!(state.std[0], 0.0);
        assert!(scaled.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_inputs_are_numeric_errors() {
        let no_rows = Array2::<f64>::zeros((0, 3));
        let no_cols = Array2::<f64>::zeros((3, 0));
        assert!(matches!(StandardScaler::fit(&no_rows), Err(RecommendError::Numeric(_))));
        assert!(matches!(StandardScaler::fit(&no_cols), Err(RecommendError::Numeric(_))));
    }

    #[test]
    fn test_transform_rejects_mismatched_width() {
        let state = StandardScaler::fit(&array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let result = StandardScaler::transform(&array![[1.0, 2.0, 3.0]], &state);
        assert!(matches!(result, Err(RecommendError::Numeric(_))));
    }

    #[test]
    fn test_transform_row_matches_matrix_transform() {
        let data = array![[5.0, 1.0], [1.0, 0.0], [2.0, 4.0]];
        let (state, scaled) = StandardScaler::fit_transform(&data).unwrap();
        let row = StandardScaler::transform_row(data.row(1), &state).unwrap();
        assert_eq!(row, scaled.row(1).to_owned());
    }
}
