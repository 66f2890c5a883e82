//! route_day: one simulated day on a single bus route.
//!
//! Loads a `RouteConfig` (built-in defaults, a JSON file, or terminal
//! prompts), runs the discrete-event simulation, prints the passenger, bus
//! and summary report plus text histograms, and optionally writes CSV
//! tables and a replication summary.
//!
//! ```text
//! route_day --interactive
//! route_day --config route.json --seed 7 --out output/route_day
//! route_day --replications 20
//! RUST_LOG=debug route_day --horizon 600
//! ```

mod prompt;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use bt_core::{Minute, RouteConfig};
use bt_output::{CsvWriter, SimOutputObserver, report};
use bt_schedule::load_traffic_windows_csv;
use bt_sim::{NoopObserver, ReplicationSummary, SimBuilder, SimOutcome, run_replications};

// ── Constants ─────────────────────────────────────────────────────────────────

const HISTOGRAM_BIN_MINS: u64 = 5;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "route_day", version, about = "Simulate a day of buses and passengers on one route")]
struct Args {
    /// JSON file with a RouteConfig; missing fields take default values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ask for the main parameters on the terminal.
    #[arg(long, short)]
    interactive: bool,

    /// CSV of `start,end` traffic windows (HH:MM or minutes); replaces the
    /// configured windows.
    #[arg(long)]
    traffic: Option<PathBuf>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the horizon, in minutes.
    #[arg(long)]
    horizon: Option<u64>,

    /// Write trips.csv, stop_visits.csv, queue_samples.csv and summary.csv here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also run N independent replications and print their averages.
    #[arg(long, default_value_t = 0)]
    replications: usize,

    /// Print only the summary and histograms.
    #[arg(long, short)]
    quiet: bool,
}

// ── Config assembly ───────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<RouteConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => RouteConfig::default(),
    };

    if args.interactive {
        config = prompt::route_config(config)?;
    }
    if let Some(path) = &args.traffic {
        config.traffic_windows = load_traffic_windows_csv(path)
            .with_context(|| format!("loading traffic windows from {}", path.display()))?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = Minute(horizon);
    }

    config.validate().context("invalid route configuration")?;
    Ok(config)
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run_once(config: RouteConfig, out: Option<&Path>) -> Result<SimOutcome> {
    let mut sim = SimBuilder::new(config).build()?;
    let t0 = Instant::now();

    match out {
        Some(dir) => {
            let mut obs = SimOutputObserver::new(CsvWriter::new(dir)?);
            sim.run(&mut obs);
            if let Some(e) = obs.take_error() {
                return Err(e).context("writing CSV output");
            }
            println!("CSV tables written to {}", dir.display());
        }
        None => {
            sim.run(&mut NoopObserver);
        }
    }

    log::info!("simulation finished in {:.3} s", t0.elapsed().as_secs_f64());
    Ok(sim.into_outcome())
}

fn print_replications(config: &RouteConfig, count: usize) -> Result<()> {
    let t0 = Instant::now();
    let outcomes = run_replications(config, count)?;
    let s = ReplicationSummary::from_outcomes(&outcomes);

    println!();
    println!("=== {} replications ({:.3} s) ===", s.runs, t0.elapsed().as_secs_f64());
    println!("{:<6} {:>8} {:>10} {:>10} {:>8}", "Run", "Served", "Avg wait", "Avg queue", "Max q");
    println!("{}", "-".repeat(46));
    for (i, o) in outcomes.iter().enumerate() {
        println!(
            "{:<6} {:>8} {:>10.2} {:>10.2} {:>8}",
            i,
            o.summary.total_served,
            o.summary.average_waiting_time,
            o.summary.average_queue_size,
            o.summary.max_queue_size,
        );
    }
    println!("{}", "-".repeat(46));
    println!(
        "{:<6} {:>8.1} {:>10.2} {:>10.2} {:>8}",
        "mean",
        s.mean_served,
        s.mean_average_waiting_time,
        s.mean_average_queue_size,
        s.max_queue_size,
    );
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;

    println!("=== route_day: single-route bus simulation ===");
    println!(
        "Stops: {}  |  Capacity: {}  |  Bus every {} min from {} to {}  |  Horizon: {}  |  Seed: {}",
        config.stop_count,
        config.bus_capacity,
        config.headway_mins,
        config.service_start.clock(),
        config.service_end.clock(),
        config.horizon.clock(),
        config.seed,
    );
    println!();

    let outcome = run_once(config.clone(), args.out.as_deref())?;

    if args.quiet {
        print!("{}", report::render_summary(&outcome));
    } else {
        print!("{}", report::render(&outcome));
    }
    println!();
    print!("{}", report::render_histograms(&outcome.metrics, HISTOGRAM_BIN_MINS));

    if args.replications > 0 {
        print_replications(&config, args.replications)?;
    }
    Ok(())
}
