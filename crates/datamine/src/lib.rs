//! # Datamine
//!
//! Three classic learning algorithms written from scratch, plus the loading,
//! splitting and scoring helpers they share.
//!
//! ## Modules
//!
//! - **core**: `Dataset<T>`, `Point` and the `DataError` type
//! - **io**: CSV loading into regression, labeled or point datasets
//! - **preprocessing**: Seeded or random train/test split
//! - **metrics**: Euclidean distance, accuracy, MAE, MSE, RMSE, R², confusion matrix, feature summaries
//! - **linalg**: Normal equations and Gaussian elimination with partial pivoting
//! - **linear**: Ordinary least squares: simple and multiple linear regression
//! - **neighbors**: KNN classifier with majority voting
//! - **cluster**: K-Means (Lloyd's algorithm)

/// Datasets and errors.
pub use datamine_core as core;

/// CSV loading.
pub use datamine_io as io;

/// Train/test split.
pub use datamine_preprocessing as preprocessing;

/// Evaluation metrics.
pub use datamine_metrics as metrics;

/// Linear algebra operations.
pub use datamine_linalg as linalg;

/// Linear models.
pub use datamine_linear as linear;

/// Nearest neighbors.
pub use datamine_neighbors as neighbors;

/// Clustering algorithms.
pub use datamine_cluster as cluster;

pub use datamine_core::{DataError, DataResult, Dataset};
