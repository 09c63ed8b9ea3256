use anyhow::{Context, Result, anyhow};
use clap::Parser;
use emshower::io::{
    MaterialReport, curves_file_name, read_config, write_curves_csv, write_reports,
};
use emshower::{EnsembleAggregator, EnsembleConfig, MaterialLibrary};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Longitudinal development of electromagnetic showers in homogeneous absorbers.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Ensemble config (JSON); command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Independent showers per initial energy (>= 2)
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Step length as a fraction of the radiation length
    #[arg(short, long)]
    step: Option<f64>,

    /// Master random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Initial energies in MeV, comma separated
    #[arg(long, value_delimiter = ',')]
    energies: Option<Vec<f64>>,

    /// Absorber material (repeatable); defaults to cesium iodide and water
    #[arg(short, long)]
    material: Vec<String>,

    /// Run showers on a single thread
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Write all results to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write per-step curves as CSV files into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<EnsembleConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => EnsembleConfig::new(),
    };
    if let Some(n) = args.iterations {
        config.iterations = n;
    }
    if let Some(step) = args.step {
        config.step_size = step;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(energies) = &args.energies {
        config.initial_energies = energies.clone();
    }
    if args.sequential {
        config.parallel = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let library = MaterialLibrary::with_presets();
    let names = if args.material.is_empty() {
        vec!["cesium iodide".to_string(), "liquid water".to_string()]
    } else {
        args.material.clone()
    };

    let mut reports = Vec::with_capacity(names.len());
    for name in &names {
        let material = library.get(name).cloned().ok_or_else(|| {
            anyhow!(
                "Unknown material '{name}'; available: {}",
                library.names().join(", ")
            )
        })?;

        info!(
            material = %material.name,
            iterations = config.iterations,
            step_size = config.step_size,
            "starting ensemble"
        );
        let aggregator = EnsembleAggregator::new(config.clone(), material.clone())
            .with_context(|| format!("Invalid ensemble for {}", material.name))?;
        let results = aggregator.run_with_progress(|p| {
            info!(
                "{}: {}/{} energies done ({} MeV, {} steps max)",
                material.name,
                p.energy_index + 1,
                p.energy_count,
                p.initial_energy,
                p.max_length
            );
        })?;

        println!(
            "\n{} (Ec = {} MeV, Ei = {} MeV)",
            material.name, material.critical_energy, material.ionization_energy
        );
        println!(
            "{:>12} {:>10} {:>12} {:>18}",
            "E0 [MeV]", "max steps", "peak step", "E_ion [MeV]"
        );
        for r in &results {
            println!(
                "{:>12.1} {:>10} {:>12} {:>11.2} ± {:<8.2}",
                r.initial_energy,
                r.max_length,
                r.shower_maximum().unwrap_or(0),
                r.mean_total_ionized,
                r.std_err_total_ionized
            );
        }

        if let Some(dir) = &args.csv_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            for r in &results {
                let path = dir.join(curves_file_name(&material.name, r.initial_energy));
                write_curves_csv(&path, r)?;
            }
        }

        reports.push(MaterialReport {
            material,
            config: config.clone(),
            results,
        });
    }

    if let Some(path) = &args.output {
        write_reports(path, &reports)?;
        info!(path = %path.display(), "results written");
    }

    Ok(())
}
