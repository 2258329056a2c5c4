use crate::config::WorkshopConfig;
use crate::console::Console;
use crate::exercises::Exercise;
use std::io::{self, BufRead, Write};
use tracing::error;

pub fn banner<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.heading("Datamine Workshop")?;
    console.dim("Regression, classification and clustering from scratch")
}

/// Report which bundled datasets are present. Returns `true` when all are.
pub fn check_datasets<R: BufRead, W: Write>(
    config: &WorkshopConfig,
    console: &mut Console<R, W>,
) -> io::Result<bool> {
    console.heading("Dataset Status Check")?;
    let mut all_found = true;
    for path in config.dataset_paths() {
        if path.is_file() {
            console.success(format!("  Found    {}", path.display()))?;
        } else {
            console.failure(format!("  Missing  {}", path.display()))?;
            all_found = false;
        }
    }
    if !all_found {
        console.warning(format!(
            "Some datasets are missing. Put them in '{}' or pass --datasets-dir.",
            config.datasets_dir.display()
        ))?;
    }
    Ok(all_found)
}

/// Run one exercise, reporting a failure instead of returning it.
pub fn run_exercise<R: BufRead, W: Write>(
    exercise: Exercise,
    config: &WorkshopConfig,
    console: &mut Console<R, W>,
) -> io::Result<bool> {
    console.line(format!("\nRunning {} exercise...", exercise.title()))?;
    match exercise.run(config, console) {
        Ok(()) => {
            console.success(format!("\n{} exercise completed successfully!", exercise.title()))?;
            Ok(true)
        }
        Err(e) => {
            error!(exercise = exercise.title(), error = %e, "exercise failed");
            console.failure(format!("Error running {} exercise: {}", exercise.title(), e))?;
            Ok(false)
        }
    }
}

/// Numbered menu loop; `0` or end of input exits.
pub fn run_menu<R: BufRead, W: Write>(
    config: &WorkshopConfig,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    loop {
        console.heading("Choose an exercise")?;
        for (i, exercise) in Exercise::ALL.iter().enumerate() {
            console.line(format!(
                "  {}. {:<15} {} ({})",
                i + 1,
                exercise.title(),
                exercise.summary(),
                exercise.dataset(config)
            ))?;
        }
        console.line("  0. Exit")?;

        let choice = match console.prompt("\nEnter your choice (0-3): ")? {
            Some(choice) => choice,
            None => break,
        };
        if choice == "0" {
            break;
        }
        match Exercise::from_menu(&choice) {
            Some(exercise) => {
                run_exercise(exercise, config, console)?;
            }
            None => console.failure(format!("Invalid exercise choice: '{}'", choice))?,
        }
    }
    console.line("Goodbye!")
}
