use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use datamine::cluster::KMeans;
use datamine::io::{CsvLoader, TargetColumn};
use datamine::linear::LinearRegression;
use datamine::metrics::{feature_summaries, mae, rmse, ConfusionMatrix};
use datamine::neighbors::KNNClassifier;
use datamine::preprocessing::train_test_split;
use datamine::DataError;

fn dataset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../datasets")
        .join(name)
}

#[test]
fn classification_pipeline() {
    let data = CsvLoader::new()
        .load_labeled(dataset("sleep_classification.csv"))
        .unwrap();
    // one row with a blank field is dropped
    assert_eq!(data.len(), 120);
    assert_eq!(data.n_features(), 4);
    assert_eq!(data.target_name(), Some("sleep_quality"));

    let (train, test) = train_test_split(&data, 0.8, Some(42)).unwrap();
    assert_eq!(train.len(), 96);
    assert_eq!(test.len(), 24);

    let mut knn = KNNClassifier::new(3);
    knn.fit(train).unwrap();
    let predicted = knn.predict_batch(test.features()).unwrap();
    let score = knn.score(&test).unwrap();
    assert!((0.0..=1.0).contains(&score));

    let cm = ConfusionMatrix::new(test.targets(), &predicted).unwrap();
    assert_eq!(cm.total(), 24);
    assert_abs_diff_eq!(cm.accuracy(), score, epsilon = 1e-12);
    assert!(cm.labels().iter().all(|l| l == "good" || l == "poor"));
}

#[test]
fn classification_self_test_is_perfect_with_k1() {
    let data = CsvLoader::new()
        .load_labeled(dataset("sleep_classification.csv"))
        .unwrap();
    let mut knn = KNNClassifier::new(1);
    knn.fit(data.clone()).unwrap();
    assert_abs_diff_eq!(knn.score(&data).unwrap(), 1.0);
}

#[test]
fn clustering_pipeline() {
    let table = CsvLoader::new()
        .skip_column(0)
        .load_points(dataset("zones_clustering.csv"))
        .unwrap();
    assert_eq!(table.points.len(), 60);
    assert_eq!(table.feature_names.len(), 4);
    assert_eq!(table.feature_names[0], "monthly_entertainment_spending");

    let result = KMeans::new(3).with_seed(Some(42)).fit(&table.points).unwrap();
    assert_eq!(result.clusters.len(), 3);
    assert_eq!(result.assignments.len(), 60);
    assert_eq!(result.cluster_sizes().iter().sum::<usize>(), 60);
    assert!(result.iterations <= 100);
    assert!(result.inertia().is_finite());
}

#[test]
fn regression_pipeline() {
    let data = CsvLoader::new()
        .target(TargetColumn::Index(5))
        .load_regression(dataset("housing_prices.csv"))
        .unwrap();
    assert_eq!(data.len(), 80);
    assert_eq!(data.n_features(), 5);
    assert_eq!(data.target_name(), Some("price_eur"));

    let size_only = data.select_features(&[0]).unwrap();
    let mut simple = LinearRegression::new();
    simple.fit_dataset(&size_only).unwrap();
    assert!(simple.slope().unwrap() > 0.0);
    assert!(simple.score(size_only.features(), size_only.targets()).unwrap() > 0.85);

    let mut multiple = LinearRegression::new();
    multiple.fit_dataset(&data).unwrap();
    assert_eq!(multiple.coefficients.as_ref().unwrap().len(), 5);
    assert!(multiple.score(data.features(), data.targets()).unwrap() > 0.95);

    let predicted = multiple.predict_batch(data.features()).unwrap();
    assert!(mae(data.targets(), &predicted) <= rmse(data.targets(), &predicted));

    let summaries = feature_summaries(&data);
    assert_eq!(summaries[0].name, "size_sqm");
    assert!(summaries[0].min <= summaries[0].mean && summaries[0].mean <= summaries[0].max);
}

#[test]
fn missing_file_is_reported() {
    let err = CsvLoader::new()
        .load_regression(dataset("does_not_exist.csv"))
        .unwrap_err();
    assert!(matches!(err, DataError::FileAccess { .. }));
}
