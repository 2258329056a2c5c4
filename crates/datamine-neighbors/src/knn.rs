use datamine_core::{DataError, DataResult, Dataset};
use datamine_metrics::{accuracy, euclidean_distance};
use tracing::debug;

/// A training row ranked against a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the training set.
    pub index: usize,
    pub distance: f64,
}

/// K-Nearest Neighbors Classifier.
///
/// Keeps the whole training set and ranks every row by Euclidean distance for
/// each query. Equal distances keep training order. The predicted label is the
/// one with the highest count among the `k` nearest; when several labels share
/// that count, the label whose closest neighbor ranks first wins.
#[derive(Debug, Clone)]
pub struct KNNClassifier<L> {
    pub k: usize,
    train: Option<Dataset<L>>,
}

impl<L: Clone + PartialEq> KNNClassifier<L> {
    pub fn new(k: usize) -> Self {
        KNNClassifier { k, train: None }
    }

    pub fn fit(&mut self, train: Dataset<L>) -> DataResult<()> {
        if self.k == 0 {
            return Err(DataError::InvalidArgument("k must be positive".into()));
        }
        if train.is_empty() {
            return Err(DataError::InvalidArgument(
                "cannot fit KNN on an empty dataset".into(),
            ));
        }
        debug!(samples = train.len(), features = train.n_features(), k = self.k, "fitted KNN");
        self.train = Some(train);
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.train.is_some()
    }

    pub fn training_data(&self) -> Option<&Dataset<L>> {
        self.train.as_ref()
    }

    /// The `k` nearest training rows, closest first. `k` is clamped to the
    /// training set size.
    pub fn kneighbors(&self, query: &[f64]) -> DataResult<Vec<Neighbor>> {
        let train = self.train.as_ref().ok_or(DataError::NotFitted)?;

        let mut ranked: Vec<Neighbor> = train
            .features()
            .iter()
            .enumerate()
            .map(|(index, row)| Neighbor {
                index,
                distance: euclidean_distance(query, row),
            })
            .collect();
        // sort_by is stable, so ties keep training order
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked.truncate(self.k.min(train.len()));
        Ok(ranked)
    }

    pub fn predict(&self, query: &[f64]) -> DataResult<L> {
        let train = self.train.as_ref().ok_or(DataError::NotFitted)?;
        let neighbors = self.kneighbors(query)?;
        let labels = neighbors.iter().map(|n| &train.targets()[n.index]);
        majority_vote(labels).ok_or(DataError::EmptyDataset)
    }

    pub fn predict_batch(&self, queries: &[Vec<f64>]) -> DataResult<Vec<L>> {
        queries.iter().map(|q| self.predict(q)).collect()
    }

    /// Accuracy of the predictions on a labeled dataset.
    pub fn score(&self, test: &Dataset<L>) -> DataResult<f64> {
        let predicted = self.predict_batch(test.features())?;
        Ok(accuracy(test.targets(), &predicted))
    }
}

/// Most frequent label, with ties going to the label seen first.
///
/// Returns `None` for an empty iterator.
pub fn majority_vote<'a, L, I>(labels: I) -> Option<L>
where
    L: Clone + PartialEq + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let mut tally: Vec<(&L, usize)> = Vec::new();
    for label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(&L, usize)> = None;
    for &(label, count) in &tally {
        // strict comparison keeps the earlier label on a tie
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn toy() -> Dataset<String> {
        let features = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 10.0],
            vec![11.0, 10.0],
            vec![10.0, 11.0],
        ];
        let labels = ["a", "a", "a", "b", "b", "b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Dataset::new(features, labels).unwrap()
    }

    #[test]
    fn test_knn_classifier() {
        let mut knn = KNNClassifier::new(3);
        knn.fit(toy()).unwrap();

        assert_eq!(knn.predict(&[0.5, 0.5]).unwrap(), "a");
        assert_eq!(knn.predict(&[10.5, 10.5]).unwrap(), "b");
    }

    #[test]
    fn test_k1_picks_nearest_label() {
        let data = toy();
        let mut knn = KNNClassifier::new(1);
        knn.fit(data.clone()).unwrap();

        for (row, label) in data.iter() {
            let shifted: Vec<f64> = row.iter().map(|v| v + 0.1).collect();
            assert_eq!(&knn.predict(&shifted).unwrap(), label);
        }
    }

    #[test]
    fn test_k1_self_accuracy() {
        let data = toy();
        let mut knn = KNNClassifier::new(1);
        knn.fit(data.clone()).unwrap();
        assert_abs_diff_eq!(knn.score(&data).unwrap(), 1.0);
    }

    #[test]
    fn test_kneighbors_ranking() {
        let mut knn = KNNClassifier::new(2);
        knn.fit(toy()).unwrap();

        let nn = knn.kneighbors(&[0.9, 0.0]).unwrap();
        assert_eq!(nn.len(), 2);
        assert_eq!(nn[0].index, 1);
        assert_eq!(nn[1].index, 0);
        assert_abs_diff_eq!(nn[0].distance, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_equal_distances_keep_training_order() {
        let features = vec![vec![1.0], vec![-1.0], vec![1.0]];
        let labels = vec![0, 1, 2];
        let mut knn = KNNClassifier::new(3);
        knn.fit(Dataset::new(features, labels).unwrap()).unwrap();

        let order: Vec<usize> = knn.kneighbors(&[0.0]).unwrap().iter().map(|n| n.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_k_clamped_to_training_size() {
        let mut knn = KNNClassifier::new(50);
        knn.fit(toy()).unwrap();
        assert_eq!(knn.kneighbors(&[0.0, 0.0]).unwrap().len(), 6);
        // 3 vs 3: the label of the closest row wins
        assert_eq!(knn.predict(&[9.0, 9.0]).unwrap(), "b");
        assert_eq!(knn.predict(&[0.0, 0.0]).unwrap(), "a");
    }

    #[test]
    fn test_tie_goes_to_nearest_label() {
        let features = vec![vec![0.0], vec![1.0], vec![3.0], vec![4.0]];
        let labels = vec!["x", "y", "y", "x"];
        let mut knn = KNNClassifier::new(2);
        knn.fit(Dataset::new(features, labels).unwrap()).unwrap();

        // neighbors of 0.9: y at 0.1, then x at 0.9
        assert_eq!(knn.predict(&[0.9]).unwrap(), "y");
        // neighbors of 0.2: x at 0.2, then y at 0.8
        assert_eq!(knn.predict(&[0.2]).unwrap(), "x");
    }

    #[test]
    fn test_majority_vote() {
        assert_eq!(majority_vote(&["b", "a", "a"]), Some("a"));
        assert_eq!(majority_vote(&["b", "a"]), Some("b"));
        assert_eq!(majority_vote::<&str, _>(&[]), None);
    }

    #[test]
    fn test_mismatched_query_never_wins() {
        let mut knn = KNNClassifier::new(1);
        knn.fit(toy()).unwrap();
        let nn = knn.kneighbors(&[1.0]).unwrap();
        assert!(nn[0].distance.is_infinite());
    }

    #[test]
    fn test_errors() {
        let knn: KNNClassifier<String> = KNNClassifier::new(3);
        assert!(matches!(knn.predict(&[0.0, 0.0]), Err(DataError::NotFitted)));

        let mut zero_k = KNNClassifier::new(0);
        assert!(matches!(zero_k.fit(toy()), Err(DataError::InvalidArgument(_))));

        let empty: Dataset<String> = Dataset::new(vec![], vec![]).unwrap();
        let mut knn = KNNClassifier::new(1);
        assert!(matches!(knn.fit(empty), Err(DataError::InvalidArgument(_))));
    }
}
