use datamine_core::dataset::uniform_width;
use datamine_core::{DataError, DataResult, Point};
use datamine_metrics::euclidean_distance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// K-Means clustering (Lloyd's algorithm).
///
/// Initial centroids are `n_clusters` data points drawn uniformly with
/// replacement, so two centroids may start on the same point. A centroid
/// that loses all of its points stays where it is.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    pub max_iter: usize,
    /// Largest centroid movement (Euclidean) still counted as converged.
    pub tol: f64,
    pub seed: Option<u64>,
}

/// One centroid and the points assigned to it, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: Point,
    pub points: Vec<Point>,
    /// Input positions of `points`.
    pub indices: Vec<usize>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    pub clusters: Vec<Cluster>,
    /// Cluster index of every input point.
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

impl KMeansResult {
    pub fn centroids(&self) -> Vec<&Point> {
        self.clusters.iter().map(|c| &c.centroid).collect()
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Cluster::len).collect()
    }

    /// Sum of squared distances from each point to its centroid.
    pub fn inertia(&self) -> f64 {
        self.clusters
            .iter()
            .flat_map(|c| {
                c.points
                    .iter()
                    .map(move |p| euclidean_distance(p, &c.centroid).powi(2))
            })
            .sum()
    }

    /// Index of the centroid nearest to `point`.
    pub fn predict(&self, point: &[f64]) -> DataResult<usize> {
        let dim = self.clusters.first().map_or(0, |c| c.centroid.len());
        if point.len() != dim {
            return Err(DataError::DimensionMismatch(format!(
                "point has {} values, centroids have {}",
                point.len(),
                dim
            )));
        }
        let centroids: Vec<Point> = self.clusters.iter().map(|c| c.centroid.clone()).collect();
        Ok(nearest_centroid(point, &centroids))
    }
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        KMeans {
            n_clusters,
            max_iter: 100,
            tol: 1e-6,
            seed: None,
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Cluster `points`, seeding from `self.seed` or from entropy.
    pub fn fit(&self, points: &[Point]) -> DataResult<KMeansResult> {
        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(points, &mut rng)
    }

    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> DataResult<KMeansResult> {
        self.validate(points)?;
        let n = points.len();
        let initial: Vec<Point> = (0..self.n_clusters)
            .map(|_| points[rng.gen_range(0..n)].clone())
            .collect();
        self.fit_from_centroids(points, initial)
    }

    /// Run Lloyd iterations from the given starting centroids.
    pub fn fit_from_centroids(
        &self,
        points: &[Point],
        initial: Vec<Point>,
    ) -> DataResult<KMeansResult> {
        let dim = self.validate(points)?;
        if initial.len() != self.n_clusters {
            return Err(DataError::InvalidArgument(format!(
                "expected {} initial centroids, got {}",
                self.n_clusters,
                initial.len()
            )));
        }
        if initial.iter().any(|c| c.len() != dim) {
            return Err(DataError::DimensionMismatch(format!(
                "initial centroids must have {} values",
                dim
            )));
        }

        let mut centroids = initial;
        for iteration in 1..=self.max_iter {
            let assignments = assign(points, &centroids);
            let updated = update_centroids(points, &assignments, &centroids);

            let shift = centroids
                .iter()
                .zip(updated.iter())
                .map(|(old, new)| euclidean_distance(old, new))
                .fold(0.0, f64::max);
            trace!(iteration, shift, "k-means iteration");
            centroids = updated;

            if shift <= self.tol {
                debug!(iterations = iteration, k = self.n_clusters, "k-means converged");
                return Ok(collect(points, centroids, assignments, iteration, true));
            }
        }

        // the last update moved the centroids, so reassign once more
        let assignments = assign(points, &centroids);
        debug!(iterations = self.max_iter, k = self.n_clusters, "k-means hit iteration cap");
        Ok(collect(points, centroids, assignments, self.max_iter, false))
    }

    fn validate(&self, points: &[Point]) -> DataResult<usize> {
        if self.n_clusters == 0 {
            return Err(DataError::InvalidArgument("k must be positive".into()));
        }
        if points.is_empty() {
            return Err(DataError::InvalidArgument("cannot cluster an empty dataset".into()));
        }
        uniform_width(points)
    }
}

/// Nearest centroid index; the first centroid wins exact ties.
fn nearest_centroid(point: &[f64], centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (k, c) in centroids.iter().enumerate() {
        let d = euclidean_distance(point, c);
        if d < best_dist {
            best_dist = d;
            best = k;
        }
    }
    best
}

fn assign(points: &[Point], centroids: &[Point]) -> Vec<usize> {
    points.iter().map(|p| nearest_centroid(p, centroids)).collect()
}

fn update_centroids(points: &[Point], assignments: &[usize], previous: &[Point]) -> Vec<Point> {
    let dim = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dim]; previous.len()];
    let mut counts = vec![0usize; previous.len()];
    for (p, &k) in points.iter().zip(assignments.iter()) {
        counts[k] += 1;
        for (s, v) in sums[k].iter_mut().zip(p.iter()) {
            *s += v;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous.iter())
        .map(|((sum, count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

fn collect(
    points: &[Point],
    centroids: Vec<Point>,
    assignments: Vec<usize>,
    iterations: usize,
    converged: bool,
) -> KMeansResult {
    let mut clusters: Vec<Cluster> = centroids
        .into_iter()
        .map(|centroid| Cluster {
            centroid,
            points: Vec::new(),
            indices: Vec::new(),
        })
        .collect();
    for (i, &k) in assignments.iter().enumerate() {
        clusters[k].points.push(points[i].clone());
        clusters[k].indices.push(i);
    }
    KMeansResult {
        clusters,
        assignments,
        iterations,
        converged,
    }
}
