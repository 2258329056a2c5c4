use datamine_core::{DataError, DataResult};
use std::fmt;

/// Fraction of positions where `actual` and `predicted` agree.
///
/// Returns 0 when the lengths differ and NaN when both are empty.
pub fn accuracy<L: PartialEq>(actual: &[L], predicted: &[L]) -> f64 {
    if actual.len() != predicted.len() {
        return 0.0;
    }
    let correct = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a == p)
        .count();
    correct as f64 / actual.len() as f64
}

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics<L> {
    pub label: L,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Actual × predicted counts over the sorted set of labels seen in either sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix<L> {
    labels: Vec<L>,
    counts: Vec<Vec<usize>>,
}

impl<L: Ord + Clone> ConfusionMatrix<L> {
    pub fn new(actual: &[L], predicted: &[L]) -> DataResult<Self> {
        if actual.len() != predicted.len() {
            return Err(DataError::DimensionMismatch(format!(
                "{} actual labels but {} predictions",
                actual.len(),
                predicted.len()
            )));
        }

        let mut labels: Vec<L> = actual.iter().chain(predicted.iter()).cloned().collect();
        labels.sort();
        labels.dedup();

        let n = labels.len();
        let mut counts = vec![vec![0usize; n]; n];
        for (a, p) in actual.iter().zip(predicted.iter()) {
            // Both are present by construction.
            if let (Ok(ai), Ok(pi)) = (labels.binary_search(a), labels.binary_search(p)) {
                counts[ai][pi] += 1;
            }
        }

        Ok(ConfusionMatrix { labels, counts })
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    fn index(&self, label: &L) -> Option<usize> {
        self.labels.binary_search(label).ok()
    }

    /// Number of samples with the given actual and predicted labels.
    pub fn count(&self, actual: &L, predicted: &L) -> usize {
        match (self.index(actual), self.index(predicted)) {
            (Some(a), Some(p)) => self.counts[a][p],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal.
    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    pub fn accuracy(&self) -> f64 {
        self.correct() as f64 / self.total() as f64
    }

    /// TP / (TP + FP); 0 when the class was never predicted.
    pub fn precision(&self, label: &L) -> f64 {
        let Some(c) = self.index(label) else {
            return 0.0;
        };
        let tp = self.counts[c][c];
        let predicted: usize = self.counts.iter().map(|row| row[c]).sum();
        ratio(tp, predicted)
    }

    /// TP / (TP + FN); 0 when the class never occurs.
    pub fn recall(&self, label: &L) -> f64 {
        let Some(c) = self.index(label) else {
            return 0.0;
        };
        let tp = self.counts[c][c];
        let actual: usize = self.counts[c].iter().sum();
        ratio(tp, actual)
    }

    pub fn f1(&self, label: &L) -> f64 {
        let p = self.precision(label);
        let r = self.recall(label);
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Per-class metrics in label order.
    pub fn class_report(&self) -> Vec<ClassMetrics<L>> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| ClassMetrics {
                label: label.clone(),
                precision: self.precision(label),
                recall: self.recall(label),
                f1: self.f1(label),
                support: self.counts[i].iter().sum(),
            })
            .collect()
    }

    pub fn macro_precision(&self) -> f64 {
        self.macro_average(|l| self.precision(l))
    }

    pub fn macro_recall(&self) -> f64 {
        self.macro_average(|l| self.recall(l))
    }

    pub fn macro_f1(&self) -> f64 {
        self.macro_average(|l| self.f1(l))
    }

    fn macro_average<F: Fn(&L) -> f64>(&self, metric: F) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.labels.iter().map(metric).sum();
        sum / self.labels.len() as f64
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl<L: fmt::Display> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15}", "Actual \\ Pred")?;
        for label in &self.labels {
            write!(f, "{:<15}", label.to_string())?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(self.counts.iter()) {
            write!(f, "{:<15}", label.to_string())?;
            for count in row {
                write!(f, "{:<15}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
