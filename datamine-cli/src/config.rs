use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for the three exercises. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    pub datasets_dir: PathBuf,
    pub classification: ClassificationConfig,
    pub clustering: ClusteringConfig,
    pub regression: RegressionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub dataset: String,
    pub k: usize,
    pub train_ratio: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub dataset: String,
    pub k: usize,
    pub max_iterations: usize,
    /// Name column left out of the features.
    pub id_column: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    pub dataset: String,
    /// Feature used for the single-variable fit.
    pub simple_feature: usize,
    pub target_column: usize,
    /// Hold out a test set when set; otherwise fit and score on every row.
    pub train_ratio: Option<f64>,
    pub seed: Option<u64>,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        WorkshopConfig {
            datasets_dir: PathBuf::from("datasets"),
            classification: ClassificationConfig::default(),
            clustering: ClusteringConfig::default(),
            regression: RegressionConfig::default(),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        ClassificationConfig {
            dataset: "sleep_classification.csv".into(),
            k: 3,
            train_ratio: 0.8,
            seed: Some(42),
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        ClusteringConfig {
            dataset: "zones_clustering.csv".into(),
            k: 3,
            max_iterations: 100,
            id_column: Some(0),
            seed: None,
        }
    }
}

impl Default for RegressionConfig {
    fn default() -> Self {
        RegressionConfig {
            dataset: "housing_prices.csv".into(),
            simple_feature: 0,
            target_column: 5,
            train_ratio: None,
            seed: None,
        }
    }
}

impl WorkshopConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Use one seed for every randomized step.
    pub fn set_seed(&mut self, seed: u64) {
        self.classification.seed = Some(seed);
        self.clustering.seed = Some(seed);
        self.regression.seed = Some(seed);
    }

    pub fn dataset_path(&self, file: &str) -> PathBuf {
        self.datasets_dir.join(file)
    }

    pub fn dataset_paths(&self) -> Vec<PathBuf> {
        [
            &self.classification.dataset,
            &self.clustering.dataset,
            &self.regression.dataset,
        ]
        .into_iter()
        .map(|f| self.dataset_path(f))
        .collect()
    }
}
