use bison_sim_core::{Landscape, SeedPolicy, Simulation, SimulationConfig, SimulationError, Snapshot};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Bison colonization demo on a synthetic prairie
#[derive(Parser, Debug)]
#[command(name = "bison-sim-demo")]
#[command(about = "Headless herbivore colonization simulation", long_about = None)]
struct Args {
    /// Edge length of the square landscape in cells
    #[arg(short, long, default_value_t = 120)]
    size: usize,

    /// Cell edge length in kilometres
    #[arg(short, long, default_value_t = 1.0)]
    cell_size_km: f32,

    /// Years to simulate
    #[arg(short, long, default_value_t = 25)]
    years: u32,

    /// Animals in the founding herd
    #[arg(short, long, default_value_t = 200)]
    population: u32,

    /// Release row (default: centre)
    #[arg(long)]
    start_row: Option<usize>,

    /// Release column (default: centre)
    #[arg(long)]
    start_col: Option<usize>,

    /// Seed for the release draw (default: fixed seed)
    #[arg(long, conflicts_with = "entropy")]
    seed: Option<u64>,

    /// Draw the release from OS entropy instead of a seed
    #[arg(long)]
    entropy: bool,

    /// Emit one JSON summary per year instead of a table
    #[arg(long)]
    json: bool,
}

/// Radial forage gradient peaking at the centre, a lake north-east of it,
/// and water all around the edge
fn synthetic_prairie(size: usize, cell_size_km: f32) -> Result<Landscape, SimulationError> {
    let centre = size as f32 / 2.0;
    let max_distance = centre * std::f32::consts::SQRT_2;
    let lake_row = size as f32 / 3.0;
    let lake_col = size as f32 * 2.0 / 3.0;
    let lake_radius = size as f32 / 10.0;

    let mut biomass = vec![0.0_f32; size * size];
    for row in 1..size.saturating_sub(1) {
        for col in 1..size - 1 {
            let (r, c) = (row as f32, col as f32);
            if (r - lake_row).hypot(c - lake_col) < lake_radius {
                continue;
            }
            let distance = (r - centre).hypot(c - centre);
            biomass[row * size + col] = 20.0 + 60.0 * (1.0 - distance / max_distance);
        }
    }

    Landscape::new(biomass, size, size, cell_size_km)
}

fn report(snapshot: &Snapshot, json: bool) {
    if json {
        match serde_json::to_string(&snapshot.summary()) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to encode year {}: {}", snapshot.year, e),
        }
    } else {
        println!(
            "{:4} | {:12.1} | {:8}",
            snapshot.year, snapshot.total_population, snapshot.occupied_cells
        );
    }
}

fn run(args: &Args) -> Result<(), SimulationError> {
    let seed_policy = match (args.entropy, args.seed) {
        (true, _) => SeedPolicy::Entropy,
        (false, Some(seed)) => SeedPolicy::Fixed(seed),
        (false, None) => SeedPolicy::default(),
    };
    let config = SimulationConfig::default().with_seed_policy(seed_policy);
    let mut sim = Simulation::new(config)?;

    let landscape = synthetic_prairie(args.size, args.cell_size_km)?;
    let row = args.start_row.unwrap_or(args.size / 2);
    let col = args.start_col.unwrap_or(args.size / 2);

    if !args.json {
        println!("=== Bison Colonization Demo ===\n");
        println!(
            "Landscape: {0}x{0} cells at {1:.2} km, {2} habitable",
            args.size,
            args.cell_size_km,
            landscape.land_cells()
        );
        println!(
            "Releasing {} animals at ({}, {}) for {} years\n",
            args.population, row, col, args.years
        );
        println!("Year |         Herd | Occupied");
        println!("-----|--------------|---------");
    }

    let mut snapshot = sim.initialize(landscape, row, col, args.population)?;
    report(&snapshot, args.json);
    for _ in 0..args.years {
        snapshot = sim.step()?;
        report(&snapshot, args.json);
    }

    if !args.json {
        let peak = snapshot
            .population
            .as_slice()
            .iter()
            .copied()
            .fold(0.0_f32, f32::max);
        println!("\n=== Simulation Complete ===");
        println!("Final herd: {:.1} animals", snapshot.total_population);
        println!("Occupied cells: {}", snapshot.occupied_cells);
        println!("Peak density: {:.2} animals/cell", peak);
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
