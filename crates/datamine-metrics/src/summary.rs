use crate::distance::mean;
use datamine_core::Dataset;

/// Smallest value; NaN for an empty slice.
pub fn min_value(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest value; NaN for an empty slice.
pub fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Descriptive statistics of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSummary {
    pub name: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FeatureSummary {
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        FeatureSummary {
            name: name.into(),
            mean: mean(values),
            min: min_value(values),
            max: max_value(values),
        }
    }
}

/// One summary per feature column, named after the dataset's headers
/// (or `feature_{j}` when it has none).
pub fn feature_summaries<T>(data: &Dataset<T>) -> Vec<FeatureSummary> {
    (0..data.n_features())
        .map(|j| {
            let name = data
                .feature_names()
                .get(j)
                .cloned()
                .unwrap_or_else(|| format!("feature_{}", j));
            let values: Vec<f64> = data.features().iter().map(|row| row[j]).collect();
            FeatureSummary::from_values(name, &values)
        })
        .collect()
}
