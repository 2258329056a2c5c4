pub mod dataset;
pub mod error;

pub use dataset::{Dataset, LabeledDataset, Point, RegressionDataset};
pub use error::{DataError, DataResult};
