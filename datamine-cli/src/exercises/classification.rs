use super::ExerciseResult;
use crate::config::WorkshopConfig;
use crate::console::{parse_point, Console};
use datamine::io::CsvLoader;
use datamine::metrics::{accuracy, ConfusionMatrix};
use datamine::neighbors::KNNClassifier;
use datamine::preprocessing::train_test_split;
use std::io::{BufRead, Write};
use tracing::info;

const SAMPLE_PREDICTIONS: usize = 10;

pub fn run<R: BufRead, W: Write>(
    config: &WorkshopConfig,
    console: &mut Console<R, W>,
) -> ExerciseResult {
    let settings = &config.classification;
    let path = config.dataset_path(&settings.dataset);
    let data = CsvLoader::new().load_labeled(&path)?;
    info!(path = %path.display(), rows = data.len(), "loaded classification dataset");

    console.heading("Simple KNN Classifier")?;
    console.line(format!(
        "Loaded {} samples with features: {}",
        data.len(),
        data.feature_names().join(", ")
    ))?;

    let (train, test) = train_test_split(&data, settings.train_ratio, settings.seed)?;
    console.line(format!(
        "Training on {} samples, testing on {}",
        train.len(),
        test.len()
    ))?;

    let mut knn = KNNClassifier::new(settings.k);
    knn.fit(train)?;

    if test.is_empty() {
        console.warning("Test set is empty, nothing to evaluate")?;
    } else {
        let predicted = knn.predict_batch(test.features())?;
        console.line(format!("\nk = {}", settings.k))?;
        console.success(format!(
            "Accuracy: {:.2}%",
            accuracy(test.targets(), &predicted) * 100.0
        ))?;

        console.heading("Sample Predictions")?;
        for (actual, pred) in test.targets().iter().zip(&predicted).take(SAMPLE_PREDICTIONS) {
            console.line(format!("Actual: {:<15} Predicted: {:<15}", actual, pred))?;
        }

        let cm = ConfusionMatrix::new(test.targets(), &predicted)?;
        console.heading("Confusion Matrix (Actual vs Predicted)")?;
        console.line(cm.to_string().trim_end())?;

        console.heading("Per-class Metrics")?;
        console.line(format!(
            "{:<15}{:>10}{:>10}{:>10}{:>10}",
            "Label", "Precision", "Recall", "F1", "Support"
        ))?;
        for m in cm.class_report() {
            console.line(format!(
                "{:<15}{:>10.2}{:>10.2}{:>10.2}{:>10}",
                m.label, m.precision, m.recall, m.f1, m.support
            ))?;
        }
        console.line(format!("Macro F1: {:.2}", cm.macro_f1()))?;
    }

    let n = data.n_features();
    let question = format!(
        "\nEnter {} values separated by spaces ({}), or press Enter to skip: ",
        n,
        data.feature_names().join(" ")
    );
    if let Some(input) = console.prompt(question)? {
        if !input.is_empty() {
            match parse_point(&input, n) {
                Ok(point) => {
                    let label = knn.predict(&point)?;
                    console.success(format!("Prediction for your input: {}", label))?;
                }
                Err(e) => console.failure(format!("Invalid input: {}", e))?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::test_support::{config, console, output};

    #[test]
    fn test_report() {
        let mut c = console("", false);
        run(&config(), &mut c).unwrap();
        let text = output(c);
        assert!(text.contains("Loaded 120 samples"));
        assert!(text.contains("Training on 96 samples, testing on 24"));
        assert!(text.contains("Accuracy:"));
        assert!(text.contains("Actual \\ Pred"));
    }

    #[test]
    fn test_user_prediction() {
        let mut c = console("0 8.5 0.5 7\n", true);
        run(&config(), &mut c).unwrap();
        assert!(output(c).contains("Prediction for your input:"));
    }

    #[test]
    fn test_bad_user_input_is_reported() {
        let mut c = console("1 2\n", true);
        run(&config(), &mut c).unwrap();
        assert!(output(c).contains("expected 4 values, got 2"));
    }
}
