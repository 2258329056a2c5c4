use datamine_core::dataset::uniform_width;
use datamine_core::{DataError, DataResult, RegressionDataset};
use datamine_linalg::{gaussian_elimination, normal_equations};
use datamine_metrics::r2_score;
use tracing::debug;

/// Closed-form simple linear regression. Returns `(slope, intercept)`.
///
/// `slope = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)`, `intercept = (Σy − slope·Σx) / n`.
/// A constant `x` makes the denominator zero and the result NaN or infinite.
pub fn simple_linear_regression(x: &[f64], y: &[f64]) -> DataResult<(f64, f64)> {
    if x.len() != y.len() {
        return Err(DataError::DimensionMismatch(format!(
            "{} x values but {} y values",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    let n = x.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        sum_x += xi;
        sum_y += yi;
        sum_xy += xi * yi;
        sum_xx += xi * xi;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    Ok((slope, intercept))
}

/// Ordinary Least Squares linear regression with an intercept.
///
/// One feature is fitted in closed form; two or more go through the normal
/// equations `(XᵀX)β = Xᵀy`, solved by Gaussian elimination with partial
/// pivoting. A singular `XᵀX` is not detected and yields NaN/infinite
/// coefficients.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    pub coefficients: Option<Vec<f64>>,
    pub intercept: Option<f64>,
}

impl LinearRegression {
    pub fn new() -> Self {
        LinearRegression {
            coefficients: None,
            intercept: None,
        }
    }

    pub fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> DataResult<()> {
        if features.len() != targets.len() {
            return Err(DataError::DimensionMismatch(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }
        if features.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        let p = uniform_width(features)?;
        if p == 0 {
            return Err(DataError::InvalidArgument("no feature columns to fit".into()));
        }

        if p == 1 {
            let x: Vec<f64> = features.iter().map(|row| row[0]).collect();
            let (slope, intercept) = simple_linear_regression(&x, targets)?;
            self.coefficients = Some(vec![slope]);
            self.intercept = Some(intercept);
        } else {
            let (xtx, xty) = normal_equations(features, targets)?;
            let beta = gaussian_elimination(&xtx, &xty)?;
            self.intercept = Some(beta[0]);
            self.coefficients = Some(beta[1..].to_vec());
        }

        debug!(samples = features.len(), features = p, "fitted linear regression");
        Ok(())
    }

    pub fn fit_dataset(&mut self, data: &RegressionDataset) -> DataResult<()> {
        self.fit(data.features(), data.targets())
    }

    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Slope of a single-feature model.
    pub fn slope(&self) -> Option<f64> {
        match self.coefficients.as_deref() {
            Some([slope]) => Some(*slope),
            _ => None,
        }
    }

    /// `intercept + Σ coefficient_i · x_i`.
    pub fn predict(&self, x: &[f64]) -> DataResult<f64> {
        let (w, b) = match (&self.coefficients, self.intercept) {
            (Some(w), Some(b)) => (w, b),
            _ => return Err(DataError::NotFitted),
        };
        if x.len() != w.len() {
            return Err(DataError::DimensionMismatch(format!(
                "model has {} coefficients, input has {} features",
                w.len(),
                x.len()
            )));
        }
        Ok(b + w.iter().zip(x.iter()).map(|(wi, xi)| wi * xi).sum::<f64>())
    }

    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> DataResult<Vec<f64>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// R² of this model's predictions on any dataset.
    pub fn score(&self, features: &[Vec<f64>], targets: &[f64]) -> DataResult<f64> {
        let pred = self.predict_batch(features)?;
        Ok(r2_score(targets, &pred))
    }

    /// Human-readable model, e.g. `price = 3.00 + 2.00*size`.
    pub fn equation(&self, target: &str, feature_names: &[String]) -> Option<String> {
        let w = self.coefficients.as_ref()?;
        let b = self.intercept?;
        let mut eq = format!("{} = {:.2}", target, b);
        for (j, wj) in w.iter().enumerate() {
            let name = feature_names
                .get(j)
                .cloned()
                .unwrap_or_else(|| format!("x{}", j + 1));
            eq.push_str(&format!(" + {:.2}*{}", wj, name));
        }
        Some(eq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_simple_closed_form() {
        // y = 2x + 3
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        let (slope, intercept) = simple_linear_regression(&x, &y).unwrap();
        assert_abs_diff_eq!(slope, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(intercept, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_feature_model() {
        let x: Vec<Vec<f64>> = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let y = [3.0, 5.0, 7.0, 9.0];

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert_abs_diff_eq!(model.slope().unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept.unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(model.score(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(model.predict(&[10.0]).unwrap(), 23.0, epsilon = 1e-10);
    }

    #[test]
    fn test_linear_regression() {
        // y = 2*x1 + 3*x2 + 1
        let x: Vec<Vec<f64>> = vec![
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![3.0, 4.0],
            vec![4.0, 3.0],
            vec![5.0, 5.0],
        ];
        let y: Vec<f64> = x.iter().map(|r| 2.0 * r[0] + 3.0 * r[1] + 1.0).collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let w = model.coefficients.as_ref().unwrap();
        assert_abs_diff_eq!(model.intercept.unwrap(), 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(w[0], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(w[1], 3.0, epsilon = 1e-8);

        let pred = model.predict_batch(&x).unwrap();
        for i in 0..5 {
            assert_abs_diff_eq!(pred[i], y[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_recovers_five_coefficients() {
        let truth = [4.0, -1.5, 0.5, 2.0, -3.0];
        let intercept = 10.0;
        let x: Vec<Vec<f64>> = (0..12)
            .map(|i| {
                let t = i as f64;
                vec![t, (t * 1.7) % 5.0, t * t * 0.1, (t * 3.1) % 7.0, 1.0 / (t + 1.0)]
            })
            .collect();
        let y: Vec<f64> = x
            .iter()
            .map(|r| intercept + r.iter().zip(truth.iter()).map(|(a, b)| a * b).sum::<f64>())
            .collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert_abs_diff_eq!(model.intercept.unwrap(), intercept, epsilon = 1e-6);
        for (got, want) in model.coefficients.as_ref().unwrap().iter().zip(truth.iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_constant_feature_is_not_finite() {
        let (slope, intercept) = simple_linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!(!slope.is_finite());
        assert!(!intercept.is_finite());
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LinearRegression::new();
        assert!(matches!(model.predict(&[1.0]), Err(DataError::NotFitted)));
    }

    #[test]
    fn test_predict_wrong_width() {
        let mut model = LinearRegression::new();
        model.fit(&[vec![0.0], vec![1.0]], &[0.0, 1.0]).unwrap();
        assert!(matches!(model.predict(&[1.0, 2.0]), Err(DataError::DimensionMismatch(_))));
    }

    #[test]
    fn test_fit_rejects_empty() {
        let mut model = LinearRegression::new();
        assert!(matches!(model.fit(&[], &[]), Err(DataError::EmptyDataset)));
    }

    #[test]
    fn test_equation() {
        let mut model = LinearRegression::new();
        model.fit(&[vec![0.0], vec![1.0]], &[3.0, 5.0]).unwrap();
        assert_eq!(
            model.equation("price", &["size".to_string()]).unwrap(),
            "price = 3.00 + 2.00*size"
        );
    }
}
