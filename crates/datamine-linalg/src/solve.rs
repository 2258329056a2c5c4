use datamine_core::{DataError, DataResult};

use crate::matrix::Matrix;

/// Solve `Ax = b` by Gaussian elimination with partial pivoting.
///
/// At each step the row with the largest absolute value in the pivot column
/// is swapped into place before eliminating below it. No singularity check is
/// made: a zero pivot propagates infinities or NaN into the result. Use
/// [`solve_checked`] to get [`DataError::SingularMatrix`] instead.
pub fn gaussian_elimination(a: &Matrix, b: &[f64]) -> DataResult<Vec<f64>> {
    eliminate(a, b, false)
}

/// Like [`gaussian_elimination`], but fails on a pivot below `f64::EPSILON`.
pub fn solve_checked(a: &Matrix, b: &[f64]) -> DataResult<Vec<f64>> {
    eliminate(a, b, true)
}

fn eliminate(a: &Matrix, b: &[f64], check_singular: bool) -> DataResult<Vec<f64>> {
    if !a.is_square() {
        return Err(DataError::InvalidArgument(format!(
            "solve: A must be square, got {}x{}",
            a.rows(),
            a.cols()
        )));
    }
    let n = a.rows();
    if b.len() != n {
        return Err(DataError::DimensionMismatch(format!(
            "solve: b has {} elements but A is {}x{}",
            b.len(),
            n,
            n
        )));
    }

    let mut u = a.clone();
    let mut rhs = b.to_vec();

    for k in 0..n {
        // Find pivot
        let mut max_val = u.get(k, k).abs();
        let mut max_row = k;
        for i in (k + 1)..n {
            let v = u.get(i, k).abs();
            if v > max_val {
                max_val = v;
                max_row = i;
            }
        }

        if check_singular && max_val < f64::EPSILON {
            return Err(DataError::SingularMatrix);
        }

        u.swap_rows(k, max_row);
        rhs.swap(k, max_row);

        let pivot = u.get(k, k);
        for i in (k + 1)..n {
            let factor = u.get(i, k) / pivot;
            for j in k..n {
                let updated = u.get(i, j) - factor * u.get(k, j);
                u.set(i, j, updated);
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    // Back substitution: U * x = rhs
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += u.get(i, j) * x[j];
        }
        x[i] = (rhs[i] - sum) / u.get(i, i);
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_solve() {
        // 2x + y = 5
        // x + 3y = 7
        // Solution: x=1.6, y=1.8
        let a = Matrix::new(vec![2.0, 1.0, 1.0, 3.0], 2, 2).unwrap();
        let x = gaussian_elimination(&a, &[5.0, 7.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.6, epsilon = 1e-10);
        assert_abs_diff_eq!(x[1], 1.8, epsilon = 1e-10);
    }

    #[test]
    fn test_needs_pivoting() {
        // Zero in the top-left corner forces a row swap.
        let a = Matrix::new(vec![0.0, 1.0, 1.0, 1.0], 2, 2).unwrap();
        let x = gaussian_elimination(&a, &[2.0, 3.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_three_by_three() {
        let a = Matrix::from_rows(&[
            vec![2.0, 1.0, -1.0],
            vec![-3.0, -1.0, 2.0],
            vec![-2.0, 1.0, 2.0],
        ])
        .unwrap();
        let x = gaussian_elimination(&a, &[8.0, -11.0, -3.0]).unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_singular_yields_non_finite() {
        let a = Matrix::new(vec![1.0, 2.0, 2.0, 4.0], 2, 2).unwrap();
        let x = gaussian_elimination(&a, &[3.0, 6.0]).unwrap();
        assert!(x.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_checked_reports_singular() {
        let a = Matrix::new(vec![1.0, 2.0, 2.0, 4.0], 2, 2).unwrap();
        assert!(matches!(solve_checked(&a, &[3.0, 6.0]), Err(DataError::SingularMatrix)));
    }

    #[test]
    fn test_shape_errors() {
        let a = Matrix::zeros(2, 3);
        assert!(gaussian_elimination(&a, &[1.0, 2.0]).is_err());
        let a = Matrix::zeros(2, 2);
        assert!(gaussian_elimination(&a, &[1.0]).is_err());
    }
}
