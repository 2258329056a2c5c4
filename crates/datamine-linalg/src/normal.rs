use datamine_core::{DataError, DataResult};

use crate::matrix::Matrix;

/// Design matrix with a leading column of ones for the intercept.
pub fn design_matrix(features: &[Vec<f64>]) -> DataResult<Matrix> {
    let augmented: Vec<Vec<f64>> = features
        .iter()
        .map(|row| std::iter::once(1.0).chain(row.iter().copied()).collect())
        .collect();
    Matrix::from_rows(&augmented)
}

/// Assemble the normal equations `(XᵀX) β = Xᵀy`, with `X` the design matrix
/// of `features` (intercept column first).
pub fn normal_equations(features: &[Vec<f64>], targets: &[f64]) -> DataResult<(Matrix, Vec<f64>)> {
    if features.len() != targets.len() {
        return Err(DataError::DimensionMismatch(format!(
            "{} feature rows but {} targets",
            features.len(),
            targets.len()
        )));
    }
    let x = design_matrix(features)?;
    let xtx = x.gram();
    let xty = x.transpose_mul_vec(targets)?;
    Ok((xtx, xty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_matrix_prepends_ones() {
        let x = design_matrix(&[vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
        assert_eq!(x.cols(), 3);
        assert_eq!(x.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(x.row(1), &[1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_normal_equations() {
        // X = [[1, 0], [1, 1], [1, 2]], y = [1, 3, 5]
        let (xtx, xty) = normal_equations(&[vec![0.0], vec![1.0], vec![2.0]], &[1.0, 3.0, 5.0]).unwrap();
        assert_eq!(xtx.row(0), &[3.0, 3.0]);
        assert_eq!(xtx.row(1), &[3.0, 5.0]);
        assert_eq!(xty, vec![9.0, 13.0]);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(normal_equations(&[vec![1.0]], &[1.0, 2.0]).is_err());
    }
}
