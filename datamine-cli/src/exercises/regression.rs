use super::ExerciseResult;
use crate::config::WorkshopConfig;
use crate::console::{parse_point, Console};
use datamine::core::RegressionDataset;
use datamine::io::{CsvLoader, TargetColumn};
use datamine::linear::LinearRegression;
use datamine::metrics::{feature_summaries, mae, mse, r2_score, rmse, FeatureSummary};
use datamine::preprocessing::train_test_split;
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub fn run<R: BufRead, W: Write>(
    config: &WorkshopConfig,
    console: &mut Console<R, W>,
) -> ExerciseResult {
    let settings = &config.regression;
    let path = config.dataset_path(&settings.dataset);
    let data = CsvLoader::new()
        .target(TargetColumn::Index(settings.target_column))
        .load_regression(&path)?;
    info!(path = %path.display(), rows = data.len(), "loaded regression dataset");
    let target = data.target_name().unwrap_or("target").to_string();

    console.heading("Housing Price Regression")?;
    console.line(format!(
        "Loaded {} records with features: {}",
        data.len(),
        data.feature_names().join(", ")
    ))?;

    let (train, test) = match settings.train_ratio {
        Some(ratio) => {
            let (train, test) = train_test_split(&data, ratio, settings.seed)?;
            if test.is_empty() {
                warn!(ratio, "test split is empty, scoring on the training rows");
                (train.clone(), train)
            } else {
                console.line(format!(
                    "Training on {} records, evaluating on {}",
                    train.len(),
                    test.len()
                ))?;
                (train, test)
            }
        }
        None => (data.clone(), data.clone()),
    };

    let simple_train = train.select_features(&[settings.simple_feature])?;
    let simple_test = test.select_features(&[settings.simple_feature])?;
    let simple_name = simple_train
        .feature_names()
        .first()
        .cloned()
        .unwrap_or_else(|| "x".to_string());
    console.heading(format!(
        "Simple Linear Regression: {} vs {}",
        simple_name, target
    ))?;
    let mut simple = LinearRegression::new();
    simple.fit_dataset(&simple_train)?;
    report(console, &simple, &simple_test, &target)?;

    console.heading(format!(
        "Multiple Linear Regression: All Features vs {}",
        target
    ))?;
    let mut multiple = LinearRegression::new();
    multiple.fit_dataset(&train)?;
    report(console, &multiple, &test, &target)?;

    console.heading("Feature Analysis")?;
    console.line(format!(
        "{:<28}{:>12}{:>12}{:>12}",
        "Feature", "Mean", "Min", "Max"
    ))?;
    for s in feature_summaries(&data) {
        console.line(format!(
            "{:<28}{:>12.2}{:>12.2}{:>12.2}",
            s.name, s.mean, s.min, s.max
        ))?;
    }

    let prices = FeatureSummary::from_values(target.clone(), data.targets());
    console.heading(format!("{} Analysis", target))?;
    console.line(format!("  Average: {:.2}", prices.mean))?;
    console.line(format!("  Minimum: {:.2}", prices.min))?;
    console.line(format!("  Maximum: {:.2}", prices.max))?;

    let n = data.n_features();
    let question = format!(
        "\nEnter {} values separated by spaces ({}) to predict {}, or press Enter to skip: ",
        n,
        data.feature_names().join(" "),
        target
    );
    if let Some(input) = console.prompt(question)? {
        if !input.is_empty() {
            match parse_point(&input, n) {
                Ok(point) => {
                    let price = multiple.predict(&point)?;
                    console.success(format!("Predicted {}: {:.2}", target, price))?;
                }
                Err(e) => console.failure(format!("Invalid input: {}", e))?,
            }
        }
    }

    Ok(())
}

fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    model: &LinearRegression,
    eval: &RegressionDataset,
    target: &str,
) -> ExerciseResult {
    let predicted = model.predict_batch(eval.features())?;
    let actual = eval.targets();
    if let Some(eq) = model.equation(target, eval.feature_names()) {
        console.line(format!("  Equation: {}", eq))?;
    }
    console.line(format!("  R² = {:.4}", r2_score(actual, &predicted)))?;
    console.line(format!("  Mean Absolute Error (MAE): {:.2}", mae(actual, &predicted)))?;
    console.line(format!("  Mean Squared Error (MSE): {:.2}", mse(actual, &predicted)))?;
    console.line(format!(
        "  Root Mean Squared Error (RMSE): {:.2}",
        rmse(actual, &predicted)
    ))?;
    Ok(())
}
