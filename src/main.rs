//! EVODRIVE - CLI entry point
//!
//! Headless evolutionary driving simulator.

use clap::{Parser, Subcommand};
use evodrive::{benchmark, Config, Race};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "evodrive")]
#[command(version)]
#[command(about = "Genetic-algorithm driving simulator with neural steering controllers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an evolution session
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of generations to evolve
        #[arg(short, long, default_value = "50")]
        generations: u32,

        /// Output directory for the stats history
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "20")]
        generations: u32,

        /// Population size
        #[arg(short, long, default_value = "100")]
        population: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            output,
            seed,
            quiet,
        } => run_session(config, generations, output, seed, quiet),

        Commands::Benchmark {
            generations,
            population,
        } => run_benchmark(generations, population),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_session(
    config_path: PathBuf,
    generations: u32,
    output: PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // Create output directory
    std::fs::create_dir_all(&output)?;

    let mut race = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Race::new_with_seed(config.clone(), s)?
    } else {
        Race::new(config.clone())?
    };

    println!("Starting evolution");
    println!("  Population: {}", config.evolution.population_size);
    println!(
        "  Track: {}x{} ring",
        config.track.width, config.track.height
    );
    println!("  Generations: {}", generations);
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval.max(1);

    for i in 0..generations {
        while !race.generation_complete() {
            race.tick();
        }
        race.end_generation()?;

        if !quiet && i % stats_interval == 0 {
            if let Some(record) = race.stats.latest() {
                println!("{}", record.summary());
            }
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Evolution Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations: {}", race.generation());
    println!(
        "Speed: {:.1} generations/s",
        race.generation() as f64 / elapsed.as_secs_f64()
    );
    println!("Best score overall: {}", race.stats.best_score_overall());

    // Save stats history
    let stats_path = output.join("stats_history.json");
    race.stats.save_json(stats_path.to_string_lossy().as_ref())?;
    println!("Stats history: {:?}", stats_path);

    Ok(())
}

fn run_benchmark(generations: u32, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== EVODRIVE Benchmark ===");
    println!("Generations: {}", generations);
    println!("Population: {}", population);
    println!();

    let result = benchmark(generations, population)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
