use crate::config::WorkshopConfig;
use crate::console::Console;
use clap::ValueEnum;
use std::error::Error;
use std::io::{BufRead, Write};

pub mod classification;
pub mod clustering;
pub mod regression;

pub type ExerciseResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Exercise {
    Classification,
    Clustering,
    Regression,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [
        Exercise::Classification,
        Exercise::Clustering,
        Exercise::Regression,
    ];

    /// Menu entries are numbered from 1 in `ALL` order.
    pub fn from_menu(choice: &str) -> Option<Self> {
        let n: usize = choice.trim().parse().ok()?;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn title(self) -> &'static str {
        match self {
            Exercise::Classification => "Classification",
            Exercise::Clustering => "Clustering",
            Exercise::Regression => "Regression",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Exercise::Classification => "Predict sleep quality with k-nearest neighbors",
            Exercise::Clustering => "Group city zones by lifestyle with k-means",
            Exercise::Regression => "Predict housing prices with linear regression",
        }
    }

    pub fn dataset(self, config: &WorkshopConfig) -> &str {
        match self {
            Exercise::Classification => &config.classification.dataset,
            Exercise::Clustering => &config.clustering.dataset,
            Exercise::Regression => &config.regression.dataset,
        }
    }

    pub fn run<R: BufRead, W: Write>(
        self,
        config: &WorkshopConfig,
        console: &mut Console<R, W>,
    ) -> ExerciseResult {
        match self {
            Exercise::Classification => classification::run(config, console),
            Exercise::Clustering => clustering::run(config, console),
            Exercise::Regression => regression::run(config, console),
        }
    }
}

/// `1.00, 2.50, ...`
pub(crate) fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.2}", v))
        .collect::<Vec<_>>()
        .join(", ")
}
