use super::{format_values, ExerciseResult};
use crate::config::WorkshopConfig;
use crate::console::Console;
use datamine::cluster::KMeans;
use datamine::io::CsvLoader;
use std::io::{BufRead, Write};
use tracing::info;

const EXAMPLES_PER_CLUSTER: usize = 3;

pub fn run<R: BufRead, W: Write>(
    config: &WorkshopConfig,
    console: &mut Console<R, W>,
) -> ExerciseResult {
    let settings = &config.clustering;
    let path = config.dataset_path(&settings.dataset);
    let mut loader = CsvLoader::new();
    if let Some(id) = settings.id_column {
        loader = loader.skip_column(id);
    }
    let table = loader.load_points(&path)?;
    info!(path = %path.display(), points = table.points.len(), "loaded clustering dataset");

    console.heading("K-Means Clustering")?;
    console.line(format!(
        "Loaded {} data points with {} dimensions",
        table.points.len(),
        table.feature_names.len()
    ))?;
    console.dim(format!("Features: {}", table.feature_names.join(", ")))?;

    let result = KMeans::new(settings.k)
        .with_max_iter(settings.max_iterations)
        .with_seed(settings.seed)
        .fit(&table.points)?;

    if result.converged {
        console.line(format!("Converged after {} iterations", result.iterations))?;
    } else {
        console.warning(format!(
            "Stopped after {} iterations without converging",
            result.iterations
        ))?;
    }

    console.heading(format!("K-means clustering results (k={})", settings.k))?;
    for (i, cluster) in result.clusters.iter().enumerate() {
        console.line(format!(
            "Cluster {}: {} points, Centroid: {}",
            i + 1,
            cluster.len(),
            format_values(&cluster.centroid)
        ))?;
    }
    console.line(format!("Inertia: {:.2}", result.inertia()))?;

    console.heading("Example points from each cluster")?;
    for (i, cluster) in result.clusters.iter().enumerate() {
        console.line(format!("Cluster {} examples:", i + 1))?;
        for point in cluster.points.iter().take(EXAMPLES_PER_CLUSTER) {
            console.line(format!("  [{}]", format_values(point)))?;
        }
    }

    Ok(())
}
