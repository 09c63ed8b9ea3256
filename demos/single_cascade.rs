//! Runs a single shower and prints its step-by-step development.
//!
//! Usage: `cargo run --example single_cascade -- [E0_MeV] [step] [seed]`

use anyhow::{Context, Result};
use emshower::{CascadeSimulator, Material, seeded};
use std::time::Instant;

fn arg_or<T: std::str::FromStr>(index: usize, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::args().nth(index) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid argument #{index}: {raw}")),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    let initial_energy: f64 = arg_or(1, 1000.0)?;
    let step_size: f64 = arg_or(2, 0.5)?;
    let seed: u64 = arg_or(3, 0)?;

    let material = Material::cesium_iodide();
    let simulator = CascadeSimulator::from_material(initial_energy, &material)?;

    let start = Instant::now();
    let (trajectory, total) = simulator.run(step_size, &mut seeded(seed))?;
    let elapsed = start.elapsed();

    println!(
        "{} MeV electron in {} (step = {step_size} X0)\n",
        initial_energy, material.name
    );
    println!(
        "{:>6} {:>14} {:>14} {:>8}",
        "step", "E_ion total", "E_ion step", "active"
    );
    for r in trajectory.records() {
        println!(
            "{:>6} {:>14.4} {:>14.4} {:>8}",
            r.step, r.total_ionized, r.step_ionized, r.active_particles
        );
    }
    println!(
        "\nTotal ionized energy: {total:.4} MeV ({:.1}% of E0)",
        100.0 * total / initial_energy
    );
    println!("Elapsed: {:.5} s", elapsed.as_secs_f64());

    Ok(())
}
