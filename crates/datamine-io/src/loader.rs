use datamine_core::{DataError, DataResult, Dataset, LabeledDataset, Point, RegressionDataset};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Which column of the file holds the target or label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetColumn {
    #[default]
    Last,
    Index(usize),
}

/// One data row that survived filtering, with its line number in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Header plus every complete data row of a delimited file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// Feature vectors loaded for clustering, with the names of the kept columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    pub feature_names: Vec<String>,
    pub points: Vec<Point>,
}

/// Read a delimited file with a header row.
///
/// Rows that are blank or contain any field that is empty after trimming are
/// dropped. Fields are returned trimmed.
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: u8) -> DataResult<CsvTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(file);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DataError::Malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for result in rdr.records() {
        let record = result.map_err(|e| DataError::Malformed(e.to_string()))?;
        if record.is_empty() || record.iter().any(|field| field.trim().is_empty()) {
            dropped += 1;
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());
        rows.push(CsvRow {
            line,
            fields: record.iter().map(|f| f.trim().to_string()).collect(),
        });
    }

    debug!(path = %path.display(), kept = rows.len(), dropped, "read csv table");
    Ok(CsvTable { headers, rows })
}

/// Builder-style loader turning a CSV file into typed datasets.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
    target: TargetColumn,
    skip_columns: Vec<usize>,
}

impl CsvLoader {
    pub fn new() -> Self {
        CsvLoader {
            delimiter: b',',
            target: TargetColumn::Last,
            skip_columns: Vec::new(),
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn target(mut self, target: TargetColumn) -> Self {
        self.target = target;
        self
    }

    /// Ignore a column entirely (e.g. a name or identifier).
    pub fn skip_column(mut self, column: usize) -> Self {
        if !self.skip_columns.contains(&column) {
            self.skip_columns.push(column);
        }
        self
    }

    /// Numeric features plus a numeric target column.
    pub fn load_regression<P: AsRef<Path>>(&self, path: P) -> DataResult<RegressionDataset> {
        let table = read_table(path, self.delimiter)?;
        let (feature_cols, target_col) = self.resolve_columns(&table)?;

        let mut features = Vec::with_capacity(table.rows.len());
        let mut targets = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            features.push(parse_columns(&table.headers, row, &feature_cols)?);
            targets.push(parse_field(&table.headers, row, target_col)?);
        }

        build(features, targets, &table.headers, &feature_cols, target_col)
    }

    /// Numeric features plus a categorical label kept as text.
    pub fn load_labeled<P: AsRef<Path>>(&self, path: P) -> DataResult<LabeledDataset> {
        let table = read_table(path, self.delimiter)?;
        let (feature_cols, target_col) = self.resolve_columns(&table)?;

        let mut features = Vec::with_capacity(table.rows.len());
        let mut labels = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            features.push(parse_columns(&table.headers, row, &feature_cols)?);
            labels.push(row.fields[target_col].clone());
        }

        build(features, labels, &table.headers, &feature_cols, target_col)
    }

    /// Every non-skipped column as a feature; the target setting is not used.
    pub fn load_points<P: AsRef<Path>>(&self, path: P) -> DataResult<PointTable> {
        let table = read_table(path, self.delimiter)?;
        if table.rows.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        let width = table.headers.len();
        let feature_cols: Vec<usize> = (0..width)
            .filter(|c| !self.skip_columns.contains(c))
            .collect();
        if feature_cols.is_empty() {
            return Err(DataError::InvalidArgument("every column is skipped".into()));
        }

        let points = table
            .rows
            .iter()
            .map(|row| parse_columns(&table.headers, row, &feature_cols))
            .collect::<DataResult<Vec<Point>>>()?;
        let feature_names = feature_cols.iter().map(|&c| table.headers[c].clone()).collect();

        Ok(PointTable {
            feature_names,
            points,
        })
    }

    fn resolve_columns(&self, table: &CsvTable) -> DataResult<(Vec<usize>, usize)> {
        if table.rows.is_empty() {
            return Err(DataError::EmptyDataset);
        }
        let width = table.headers.len();
        if width < 2 {
            return Err(DataError::InvalidArgument(format!(
                "need at least one feature and one target column, found {} columns",
                width
            )));
        }
        let target_col = match self.target {
            TargetColumn::Last => width - 1,
            TargetColumn::Index(idx) if idx < width => idx,
            TargetColumn::Index(idx) => {
                return Err(DataError::InvalidArgument(format!(
                    "target column {} out of range for {} columns",
                    idx, width
                )))
            }
        };
        let feature_cols: Vec<usize> = (0..width)
            .filter(|&c| c != target_col && !self.skip_columns.contains(&c))
            .collect();
        if feature_cols.is_empty() {
            return Err(DataError::InvalidArgument("no feature columns left".into()));
        }
        Ok((feature_cols, target_col))
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field(headers: &[String], row: &CsvRow, column: usize) -> DataResult<f64> {
    let value = &row.fields[column];
    value.parse::<f64>().map_err(|_| DataError::Parse {
        line: row.line,
        column,
        header: headers.get(column).cloned().unwrap_or_default(),
        value: value.clone(),
    })
}

fn parse_columns(headers: &[String], row: &CsvRow, columns: &[usize]) -> DataResult<Vec<f64>> {
    columns
        .iter()
        .map(|&c| parse_field(headers, row, c))
        .collect()
}

fn build<T>(
    features: Vec<Vec<f64>>,
    targets: Vec<T>,
    headers: &[String],
    feature_cols: &[usize],
    target_col: usize,
) -> DataResult<Dataset<T>> {
    let names = feature_cols.iter().map(|&c| headers[c].clone()).collect();
    Dataset::new(features, targets)?.with_names(names, Some(headers[target_col].clone()))
}
