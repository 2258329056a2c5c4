use datamine_core::{DataError, DataResult, Dataset};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Shuffle row indices and cut them into `(train, test)`.
///
/// The train part holds the first `floor(n * train_ratio)` permuted indices.
pub fn split_indices<R: Rng + ?Sized>(
    n: usize,
    train_ratio: f64,
    rng: &mut R,
) -> DataResult<(Vec<usize>, Vec<usize>)> {
    if !(0.0..=1.0).contains(&train_ratio) {
        return Err(DataError::InvalidArgument(format!(
            "train ratio must lie in [0, 1], got {}",
            train_ratio
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let train_size = ((n as f64 * train_ratio).floor() as usize).min(n);
    let test = indices.split_off(train_size);
    Ok((indices, test))
}

/// Split a dataset into training and test sets.
///
/// With `seed` set the split is reproducible; without it the generator is
/// seeded from the OS. A ratio that leaves the test set empty is allowed.
pub fn train_test_split<T: Clone>(
    data: &Dataset<T>,
    train_ratio: f64,
    seed: Option<u64>,
) -> DataResult<(Dataset<T>, Dataset<T>)> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    train_test_split_with_rng(data, train_ratio, &mut rng)
}

/// Same as [`train_test_split`] but draws from a caller-owned generator.
pub fn train_test_split_with_rng<T: Clone, R: Rng + ?Sized>(
    data: &Dataset<T>,
    train_ratio: f64,
    rng: &mut R,
) -> DataResult<(Dataset<T>, Dataset<T>)> {
    let (train_idx, test_idx) = split_indices(data.len(), train_ratio, rng)?;
    Ok((data.subset(&train_idx)?, data.subset(&test_idx)?))
}
