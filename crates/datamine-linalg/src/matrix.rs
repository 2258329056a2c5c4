use datamine_core::{DataError, DataResult};

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> DataResult<Self> {
        if data.len() != rows * cols {
            return Err(DataError::DimensionMismatch(format!(
                "{} values cannot fill a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Matrix { data, rows, cols })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Build from equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> DataResult<Self> {
        let cols = datamine_core::dataset::uniform_width(rows)?;
        let data = rows.iter().flatten().copied().collect();
        Matrix::new(data, rows.len(), cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// `XᵀX` for this matrix `X`.
    pub fn gram(&self) -> Matrix {
        let p = self.cols;
        let mut out = Matrix::zeros(p, p);
        for r in 0..self.rows {
            let row = self.row(r);
            for i in 0..p {
                for j in 0..p {
                    out.data[i * p + j] += row[i] * row[j];
                }
            }
        }
        out
    }

    /// `Xᵀy` for this matrix `X`.
    pub fn transpose_mul_vec(&self, y: &[f64]) -> DataResult<Vec<f64>> {
        if y.len() != self.rows {
            return Err(DataError::DimensionMismatch(format!(
                "vector of length {} against {} rows",
                y.len(),
                self.rows
            )));
        }
        let mut out = vec![0.0; self.cols];
        for (r, &yr) in y.iter().enumerate() {
            for (j, o) in out.iter_mut().enumerate() {
                *o += self.get(r, j) * yr;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_and_xty() {
        // X = [[1, 2], [3, 4]]
        let x = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let g = x.gram();
        assert_eq!(g.row(0), &[10.0, 14.0]);
        assert_eq!(g.row(1), &[14.0, 20.0]);

        let xty = x.transpose_mul_vec(&[1.0, 1.0]).unwrap();
        assert_eq!(xty, vec![4.0, 6.0]);
    }

    #[test]
    fn test_shape_checks() {
        assert!(Matrix::new(vec![1.0, 2.0, 3.0], 2, 2).is_err());
        assert!(Matrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]).is_err());
        let x = Matrix::zeros(3, 2);
        assert!(x.transpose_mul_vec(&[1.0]).is_err());
    }

    #[test]
    fn test_swap_rows() {
        let mut m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.swap_rows(0, 1);
        assert_eq!(m.row(0), &[3.0, 4.0]);
        assert_eq!(m.row(1), &[1.0, 2.0]);
    }
}
