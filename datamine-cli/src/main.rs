//! Datamine workshop runner.
//!
//! Shows a numbered menu of the three exercises (KNN classification,
//! k-means clustering, linear regression) and runs the chosen one over the
//! bundled CSV datasets. `--exercise` runs a single exercise and exits.

mod config;
mod console;
mod exercises;
mod menu;

use clap::Parser;
use config::WorkshopConfig;
use console::Console;
use exercises::Exercise;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "datamine")]
#[command(about = "Interactive machine learning workshop", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with exercise settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the CSV datasets
    #[arg(short, long)]
    datasets_dir: Option<PathBuf>,

    /// Seed for the train/test split and k-means initialization
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run one exercise and exit instead of showing the menu
    #[arg(short, long, value_enum)]
    exercise: Option<Exercise>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => WorkshopConfig::load(path)?,
        None => WorkshopConfig::default(),
    };
    if let Some(dir) = cli.datasets_dir {
        config.datasets_dir = dir;
    }
    if let Some(seed) = cli.seed {
        config.set_seed(seed);
    }
    debug!(?config, "workshop configuration");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), true);

    menu::banner(&mut console)?;
    menu::check_datasets(&config, &mut console)?;
    match cli.exercise {
        Some(exercise) => {
            menu::run_exercise(exercise, &config, &mut console)?;
        }
        None => menu::run_menu(&config, &mut console)?,
    }
    Ok(())
}
