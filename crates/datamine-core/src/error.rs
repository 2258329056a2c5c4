use std::path::PathBuf;
use thiserror::Error;

/// Core error type shared by every datamine crate.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Parse error at line {line}, column {column} ({header}): cannot read {value:?} as a number")]
    Parse {
        line: u64,
        column: usize,
        header: String,
        value: String,
    },

    #[error("Empty dataset: no usable rows")]
    EmptyDataset,

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Singular matrix: cannot solve the linear system")]
    SingularMatrix,

    #[error("Model not fitted")]
    NotFitted,
}

pub type DataResult<T> = Result<T, DataError>;
