//! Cache hierarchy simulator CLI.
//!
//! This binary runs a memory trace through the two-level cache hierarchy. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then per-parameter flags.
//! 2. **Simulation:** Reads the trace from a file or stdin and processes every event.
//! 3. **Reporting:** Prints the statistics report, or JSON with `--json`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use cachesim_core::common::{SimError, TraceError};
use cachesim_core::config::SimConfig;
use cachesim_core::sim::{Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level cache hierarchy simulator with an L1 victim cache",
    long_about = "Runs a memory trace (one `r|w <hex address>` per line) through L1 → L2 → memory.\n\nSizes are powers of two given as exponents: total size 2^C bytes, 2^B-byte blocks, 2^S blocks per set.\n\nExamples:\n  cachesim -i traces/gcc.trace\n  cachesim -c 10 -b 6 -s 0 -v 1 < traces/astar.trace\n  cachesim --config hierarchy.json --json -i traces/mcf.trace"
)]
struct Cli {
    /// Trace file; reads stdin when omitted.
    #[arg(short, long)]
    input: Option<String>,

    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<String>,

    /// L1 size exponent (2^C bytes).
    #[arg(short = 'c')]
    c1: Option<u64>,

    /// L1 block size exponent (2^B bytes).
    #[arg(short = 'b')]
    b1: Option<u64>,

    /// L1 associativity exponent (2^S blocks per set).
    #[arg(short = 's')]
    s1: Option<u64>,

    /// Victim cache blocks (0 disables it).
    #[arg(short = 'v')]
    victim: Option<u64>,

    /// L2 size exponent.
    #[arg(short = 'C')]
    c2: Option<u64>,

    /// L2 block size exponent.
    #[arg(short = 'B')]
    b2: Option<u64>,

    /// L2 associativity exponent.
    #[arg(short = 'S')]
    s2: Option<u64>,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Print one outcome code per event (e.g. `M1MVH2`).
    #[arg(long)]
    outcomes: bool,

    /// Enable debug logging on stderr (`RUST_LOG` takes precedence).
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    /// Builds the configuration: defaults, then `--config`, then individual flags.
    fn sim_config(&self) -> Result<SimConfig, SimError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_file(path)?,
            None => SimConfig::default(),
        };

        let overrides = [
            (self.c1, &mut config.l1.c),
            (self.b1, &mut config.l1.b),
            (self.s1, &mut config.l1.s),
            (self.victim, &mut config.victim_blocks),
            (self.c2, &mut config.l2.c),
            (self.b2, &mut config.l2.b),
            (self.s2, &mut config.l2.s),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    fmt::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .compact()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Runs the configured trace and prints the report.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = cli.sim_config()?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(TraceError::from)?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    if !cli.json {
        print_config(&config);
    }

    let mut sim = Simulator::new(&config);
    let victim_enabled = sim.hierarchy.victim_enabled();
    let show = cli.outcomes;
    let events = sim.run(TraceReader::new(reader), |_, outcome| {
        if show {
            println!("{}", outcome.code(victim_enabled));
        }
    })?;
    tracing::info!(events, "trace complete");

    let stats = sim.finish();
    if cli.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("[!] failed to serialize statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        stats.print();
    }
    Ok(())
}

/// Prints the effective configuration, in exponent form.
fn print_config(config: &SimConfig) {
    println!("Cache Settings");
    println!("c1: {}", config.l1.c);
    println!("b1: {}", config.l1.b);
    println!("s1: {}", config.l1.s);
    println!("v:  {}", config.victim_blocks);
    println!("c2: {}", config.l2.c);
    println!("b2: {}", config.l2.b);
    println!("s2: {}", config.l2.s);
}
