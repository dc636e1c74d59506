//! CutKit command line entry
//!
//! Runs one optimization against the parameter library and prints the
//! outcome as JSON.

mod settings;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use cutkit_optimizer::{OptimizationRequest, Optimizer, OptimizerOptions};
use cutkit_toollib::ParameterLibrary;
use tracing::info;
use tracing_subscriber::EnvFilter;

use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        bail!(
            "usage: cutkit <material-id> <tool-id> <machine-id> <strategy-id> [--plain]\n\
             example: cutkit P2 FM25-2 VMC-850 ROUGH-MILL"
        );
    }
    let plain = args.iter().any(|a| a == "--plain");

    let settings = Settings::load(Path::new("cutkit.toml"))?;
    info!(library = %settings.library_path.display(), "loading parameter library");

    let library = ParameterLibrary::new(settings.library_path.clone());
    library.load().context("Failed to load the parameter library")?;

    let optimizer = Optimizer::new(Arc::new(library)).with_options(OptimizerOptions {
        timeout: Duration::from_secs(settings.timeout_secs),
        default_seed: settings.seed,
        ..OptimizerOptions::default()
    });

    let request = OptimizationRequest {
        material_id: args[0].clone(),
        tool_id: args[1].clone(),
        machine_id: args[2].clone(),
        strategy_id: args[3].clone(),
        population_size: settings.population_size,
        generations: settings.generations,
        crossover_rate: None,
        mutation_rate: None,
        seed: settings.seed,
    };

    let outcome = if plain || !settings.assisted {
        optimizer.optimize(&request).await?
    } else {
        optimizer.optimize_assisted(&request).await?
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
