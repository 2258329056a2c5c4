use tracing::warn;

fn usable(y_true: &[f64], y_pred: &[f64], metric: &str) -> bool {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        warn!(
            metric,
            actual = y_true.len(),
            predicted = y_pred.len(),
            "length mismatch or empty input, returning 0"
        );
        return false;
    }
    true
}

/// Mean Squared Error. Returns 0 for empty or mismatched input.
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if !usable(y_true, y_pred, "mse") {
        return 0.0;
    }
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let d = t - p;
            d * d
        })
        .sum();
    sum / y_true.len() as f64
}

/// Root Mean Squared Error. Returns 0 for empty or mismatched input.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if !usable(y_true, y_pred, "rmse") {
        return 0.0;
    }
    mse(y_true, y_pred).sqrt()
}

/// Mean Absolute Error. Returns 0 for empty or mismatched input.
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if !usable(y_true, y_pred, "mae") {
        return 0.0;
    }
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).abs())
        .sum();
    sum / y_true.len() as f64
}

/// R² (coefficient of determination): `1 - SS_res / SS_total`.
///
/// NaN when the target is constant (`SS_total == 0`), when the inputs are
/// empty, or when their lengths differ.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.len() != y_pred.len() {
        warn!(actual = y_true.len(), predicted = y_pred.len(), "r2 length mismatch");
        return f64::NAN;
    }
    let n = y_true.len() as f64;
    let mean_true = y_true.iter().sum::<f64>() / n;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let d = t - p;
            d * d
        })
        .sum();

    let ss_tot: f64 = y_true
        .iter()
        .map(|&t| {
            let d = t - mean_true;
            d * d
        })
        .sum();

    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}
