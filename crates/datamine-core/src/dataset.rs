use crate::error::{DataError, DataResult};

/// A numeric feature vector (one clustering observation).
pub type Point = Vec<f64>;

/// Dataset with a continuous target per row.
pub type RegressionDataset = Dataset<f64>;

/// Dataset with a categorical label per row.
pub type LabeledDataset = Dataset<String>;

/// Rows of numeric features, each paired with one target value.
///
/// Every row has the same number of features; the constructors reject
/// anything else, so downstream engines never see ragged input.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    features: Vec<Vec<f64>>,
    targets: Vec<T>,
    feature_names: Vec<String>,
    target_name: Option<String>,
}

impl<T> Dataset<T> {
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<T>) -> DataResult<Self> {
        if features.len() != targets.len() {
            return Err(DataError::DimensionMismatch(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }
        uniform_width(&features)?;
        Ok(Dataset {
            features,
            targets,
            feature_names: Vec::new(),
            target_name: None,
        })
    }

    /// Attach column names. `feature_names` must be empty or match the feature width.
    pub fn with_names(
        mut self,
        feature_names: Vec<String>,
        target_name: Option<String>,
    ) -> DataResult<Self> {
        if !feature_names.is_empty() && !self.is_empty() && feature_names.len() != self.n_features() {
            return Err(DataError::DimensionMismatch(format!(
                "{} feature names for {} features",
                feature_names.len(),
                self.n_features()
            )));
        }
        self.feature_names = feature_names;
        self.target_name = target_name;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of every feature vector; 0 for an empty dataset.
    pub fn n_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    pub fn row(&self, idx: usize) -> Option<(&[f64], &T)> {
        Some((self.features.get(idx)?.as_slice(), self.targets.get(idx)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &T)> + '_ {
        self.features
            .iter()
            .map(Vec::as_slice)
            .zip(self.targets.iter())
    }

    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<T>) {
        (self.features, self.targets)
    }

    /// Values of feature column `j`, in row order.
    pub fn column(&self, j: usize) -> DataResult<Vec<f64>> {
        if j >= self.n_features() {
            return Err(DataError::InvalidArgument(format!(
                "feature column {} out of range for {} features",
                j,
                self.n_features()
            )));
        }
        Ok(self.features.iter().map(|row| row[j]).collect())
    }
}

impl<T: Clone> Dataset<T> {
    /// Copy the rows at `indices`, in the given order.
    pub fn subset(&self, indices: &[usize]) -> DataResult<Self> {
        let mut features = Vec::with_capacity(indices.len());
        let mut targets = Vec::with_capacity(indices.len());
        for &idx in indices {
            let (x, y) = self.row(idx).ok_or_else(|| {
                DataError::InvalidArgument(format!("row {} out of range for {} rows", idx, self.len()))
            })?;
            features.push(x.to_vec());
            targets.push(y.clone());
        }
        Ok(Dataset {
            features,
            targets,
            feature_names: self.feature_names.clone(),
            target_name: self.target_name.clone(),
        })
    }

    /// Keep only the listed feature columns, in the listed order.
    pub fn select_features(&self, columns: &[usize]) -> DataResult<Self> {
        let width = self.n_features();
        if let Some(&bad) = columns.iter().find(|&&c| c >= width) {
            return Err(DataError::InvalidArgument(format!(
                "feature column {} out of range for {} features",
                bad, width
            )));
        }
        let features = self
            .features
            .iter()
            .map(|row| columns.iter().map(|&c| row[c]).collect())
            .collect();
        let feature_names = if self.feature_names.len() == width {
            columns.iter().map(|&c| self.feature_names[c].clone()).collect()
        } else {
            Vec::new()
        };
        Ok(Dataset {
            features,
            targets: self.targets.clone(),
            feature_names,
            target_name: self.target_name.clone(),
        })
    }
}

/// Check that all rows share one width and return it (0 when there are no rows).
pub fn uniform_width(rows: &[Vec<f64>]) -> DataResult<usize> {
    let width = rows.first().map_or(0, Vec::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(DataError::DimensionMismatch(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                width
            )));
        }
    }
    Ok(width)
}
