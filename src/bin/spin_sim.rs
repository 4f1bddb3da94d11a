//! Headless simulation runner
//!
//! Runs a configured simulation for a fixed number of trials, optionally
//! injecting a named event at the midpoint, then prints metrics and
//! writes the final state as JSON.

use std::path::PathBuf;

use clap::Parser;

use spin_factions::sim::{build_decay_schedule, EventPreset};
use spin_factions::{SimConfig, Simulation};

#[derive(Parser, Debug)]
#[command(name = "spin_sim", about = "Territorial Ising simulation runner")]
struct Args {
    /// Lattice side length
    #[arg(long)]
    size: Option<usize>,

    /// Temperature (must be positive)
    #[arg(long)]
    temperature: Option<f64>,

    /// Same-territory coupling
    #[arg(long)]
    j_intra: Option<f64>,

    /// Cross-territory coupling
    #[arg(long)]
    j_inter: Option<f64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of Metropolis trials to run
    #[arg(long, default_value_t = 10_000)]
    trials: usize,

    /// Capture a snapshot every 10 trials
    #[arg(long)]
    record_snapshots: bool,

    /// Inject this event preset halfway through the run
    #[arg(long, value_enum)]
    event: Option<EventPreset>,

    /// Follow the injected event with a decaying field schedule
    #[arg(long)]
    with_decay: bool,

    /// TOML file overriding the built-in config defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the final state as JSON
    #[arg(long, default_value = "simulation_state.json")]
    output: PathBuf,
}

fn load_config(args: &Args) -> Result<SimConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            toml::from_str(&content)
                .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?
        }
        None => SimConfig::default(),
    };

    // Explicit flags override whatever the file said
    if let Some(n) = args.size {
        config.n = n;
    }
    if let Some(t) = args.temperature {
        config.temperature = t;
    }
    if let Some(j) = args.j_intra {
        config.j_intra = j;
    }
    if let Some(j) = args.j_inter {
        config.j_inter = j;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    Ok(config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Failed to construct simulation: {}", e);
            std::process::exit(1);
        }
    };

    println!("Territorial Ising Simulation");
    println!("============================");
    println!("Lattice: {}x{}", sim.n(), sim.n());
    println!("Factions: {}", sim.faction_count());
    println!("Running {} trials...", args.trials);
    println!();

    let start = std::time::Instant::now();

    let first_half = args.trials / 2;
    sim.step(first_half, args.record_snapshots);

    if let Some(preset) = args.event {
        let flipped = sim.inject_preset(preset);
        println!("Injected {:?}: {} cells flipped", preset, flipped);
        if args.with_decay {
            // Fade the shock out over the following trials
            sim.install_decay_schedule(build_decay_schedule(0.3, 0.1, 50));
        }
    }

    sim.step(args.trials - first_half, args.record_snapshots);

    let elapsed = start.elapsed();

    println!("Completed in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!();
    println!("--- Metrics ---");
    println!("Magnetization: {:.4}", sim.magnetization());
    println!("Agreement score: {:.4}", sim.agreement_score());
    for (id, percent) in sim.spin_percentages().iter().enumerate() {
        println!("Faction {}: {:+.2}% net spin", id, percent);
    }
    if args.record_snapshots {
        println!("Snapshots captured: {}", sim.snapshot_count());
    }

    let state = sim.get_current_state();
    let json = match serde_json::to_string_pretty(&state) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize state: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&args.output, json) {
        eprintln!("Failed to write {}: {}", args.output.display(), e);
        std::process::exit(1);
    }
    println!("\nFinal state written to {}", args.output.display());
}
