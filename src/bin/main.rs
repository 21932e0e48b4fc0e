use std::path::PathBuf;

use clap::Parser;

use cgt::*;

/// Stable coalition structures reachable from the grand coalition by
/// sequential coalition breaking.
#[derive(Parser)]
#[command(name = "cgt-breakup", version)]
struct Cli {
    /// Number of agents
    n: usize,

    /// Largest number of coalitions whose levels are kept for the extraction
    max_parts: usize,

    /// Solver configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for large levels
    #[arg(long)]
    workers: Option<usize>,

    /// Smallest level, in partitions, that is split among workers
    #[arg(long)]
    min_parallel: Option<usize>,

    /// Directory receiving log.txt and result.txt
    #[arg(long, default_value = "results_and_logs")]
    output_dir: PathBuf,
}

fn main() {
    logger::init_logging("info");

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SolverConfig::load_from(path)?,
        None => SolverConfig::default(),
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(min_parallel) = cli.min_parallel {
        config.min_parallel = min_parallel;
    }

    let game = BreakupGame::from_config(cli.n, cli.max_parts, config)?;
    let mut reporter = FileReporter::open(&cli.output_dir)?;
    let extraction = game.run(&mut reporter)?;
    for p in &extraction.stable {
        println!("{p}");
    }
    Ok(())
}
