//! nr-text — run `;`-separated road-map commands from a file or stdin.
//!
//! Route descriptions are printed to stdout; `ERROR <line>` and log output
//! go to stderr.
//!
//! ```text
//! nr-text commands.txt
//! RUST_LOG=debug nr-text < commands.txt
//! nr-text --max-route-id 5000 -v commands.txt
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use nr_core::MapConfig;
use nr_routes::RoadMap;
use nr_text::run_commands;

/// Command-line interface for nr-text
#[derive(Parser)]
#[command(name = "nr-text")]
#[command(about = "Maintain a road map and its routes from a command script")]
struct Cli {
    /// Command file; standard input when omitted
    input: Option<PathBuf>,

    /// Largest route id accepted by newRoute and route descriptions
    #[arg(long, default_value_t = MapConfig::default().max_route_id)]
    max_route_id: u32,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let config = MapConfig { max_route_id: cli.max_route_id, ..MapConfig::default() };
    let mut map = RoadMap::with_config(config);

    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr().lock();
    let started = Instant::now();

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            run_commands(&mut map, BufReader::new(file), &mut out, &mut err)?
        }
        None => run_commands(&mut map, io::stdin().lock(), &mut out, &mut err)?,
    };

    info!(
        "{} lines, {} commands, {} failed; {} cities, {} roads, {} routes in {:.1?}",
        summary.lines,
        summary.commands,
        summary.failures,
        map.city_count(),
        map.network().road_count(),
        map.route_ids().count(),
        started.elapsed(),
    );
    Ok(())
}
