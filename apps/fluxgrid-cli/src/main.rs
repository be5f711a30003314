use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fluxgrid_common::{CellCoord, GRID_HEIGHT, GRID_WIDTH};
use fluxgrid_kernel::{FluidConfig, SeedPattern, Simulation};
use fluxgrid_tools::{FieldInspector, FieldSummary, StepTimer, heatmap};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod config;

use config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "fluxgrid-cli", about = "Headless driver for the fluxgrid fluid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Seed a field and step it, printing heatmaps and a final summary
    Run {
        #[command(flatten)]
        seed: SeedArgs,
        #[command(flatten)]
        tuning: TuningArgs,
        /// Number of steps to simulate
        #[arg(short, long, default_value = "100")]
        steps: u64,
        /// Print a heatmap every N steps (0 prints only the final field)
        #[arg(short, long, default_value = "0")]
        every: u64,
        /// Pour mass every step, as `x,y,amount`
        #[arg(long, value_parser = parse_pour)]
        pour: Option<Pour>,
        /// Emit the final report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check conservation, determinism and replay for a seeded run.
    ///
    /// The replay copy consumes the event log after every step, so memory
    /// stays flat however many steps are requested.
    Verify {
        #[command(flatten)]
        seed: SeedArgs,
        #[command(flatten)]
        tuning: TuningArgs,
        /// Number of steps to simulate
        #[arg(short, long, default_value = "1000")]
        steps: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PatternKind {
    Empty,
    Uniform,
    Spike,
    Block,
    Corner,
}

#[derive(clap::Args)]
struct SeedArgs {
    /// Initial mass distribution
    #[arg(short, long, value_enum, default_value = "spike")]
    pattern: PatternKind,
    /// Mass used by the seed pattern
    #[arg(long, default_value = "255")]
    level: u8,
}

impl SeedArgs {
    fn pattern(&self) -> SeedPattern {
        let center = CellCoord::new(GRID_WIDTH / 2, GRID_HEIGHT / 2);
        match self.pattern {
            PatternKind::Empty => SeedPattern::Empty,
            PatternKind::Uniform => SeedPattern::Uniform(self.level),
            PatternKind::Spike => SeedPattern::Spike {
                at: center,
                mass: self.level,
            },
            PatternKind::Block => SeedPattern::Block {
                origin: CellCoord::new(center.x - 5, center.y - 5),
                size: 10,
                mass: self.level,
            },
            PatternKind::Corner => SeedPattern::Corner { mass: self.level },
        }
    }
}

#[derive(clap::Args)]
struct TuningArgs {
    /// JSON file with fluid configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the per-face exchange cap
    #[arg(long)]
    max_exchange: Option<u8>,
    /// Override the per-face spread divisor
    #[arg(long)]
    spread_divisor: Option<u8>,
}

impl TuningArgs {
    fn resolve(&self, record_events: Option<bool>) -> Result<FluidConfig> {
        config::resolve(
            self.config.as_deref(),
            ConfigOverrides {
                max_exchange: self.max_exchange,
                spread_divisor: self.spread_divisor,
                record_events,
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pour {
    at: CellCoord,
    amount: i32,
}

fn parse_pour(s: &str) -> Result<Pour, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, amount] = parts.as_slice() else {
        return Err(format!("expected x,y,amount, got {s:?}"));
    };
    let x: usize = x.parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: usize = y.parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    let amount: i32 = amount
        .parse()
        .map_err(|e| format!("bad amount {amount:?}: {e}"))?;
    let at = CellCoord::new(x, y);
    if !at.in_bounds() {
        return Err(format!("pour target {at} is outside the grid"));
    }
    Ok(Pour { at, amount })
}

#[derive(Serialize)]
struct RunReport {
    config: FluidConfig,
    summary: FieldSummary,
    steps: u64,
    step_avg_us: u128,
    step_max_us: u128,
}

/// Two independent runs of one seeded field plus a mirror rebuilt from the
/// first run's event log.
struct Verification {
    first: Simulation,
    second: Simulation,
    replayed: Simulation,
    conserved: bool,
    /// Longest the first run's event log grew before being drained.
    peak_log_len: usize,
}

fn verify_run(pattern: SeedPattern, config: FluidConfig, steps: u64) -> Result<Verification> {
    let quiet = FluidConfig {
        record_events: false,
        ..config
    };
    let mut first = pattern.build(FluidConfig {
        record_events: true,
        ..config
    })?;
    let mut replayed = Simulation::from_mass(quiet, first.mass_field())?;
    let total = first.total_mass();
    let mut conserved = true;
    let mut peak_log_len = 0;
    for _ in 0..steps {
        first.step();
        conserved &= first.total_mass() == total;
        peak_log_len = peak_log_len.max(first.events().len());
        replayed
            .apply_events(&first.drain_events())
            .context("replaying event log")?;
    }

    let mut second = pattern.build(quiet)?;
    for _ in 0..steps {
        second.step();
    }

    Ok(Verification {
        first,
        second,
        replayed,
        conserved,
        peak_log_len,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("fluxgrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("grid: {GRID_WIDTH}x{GRID_HEIGHT}");
            println!("config: {:?}", FluidConfig::default());
            println!("common: {}", fluxgrid_common::crate_info());
            println!("kernel: {}", fluxgrid_kernel::crate_info());
            println!("tools: {}", fluxgrid_tools::crate_info());
        }
        Commands::Run {
            seed,
            tuning,
            steps,
            every,
            pour,
            json,
        } => {
            let config = tuning.resolve(None)?;
            let mut sim = seed.pattern().build(config)?;
            tracing::info!(pattern = ?seed.pattern, steps, "running fluid");

            let mut timer = StepTimer::new(256);
            for _ in 0..steps {
                if let Some(pour) = pour {
                    sim.inject(pour.at.x, pour.at.y, pour.amount)?;
                }
                let start = Instant::now();
                sim.step();
                timer.record(start.elapsed());

                if !json && every > 0 && sim.tick() % every == 0 {
                    print!("{}", heatmap(&sim));
                }
            }

            let report = RunReport {
                config,
                summary: FieldInspector::summary(&sim),
                steps,
                step_avg_us: timer.average().as_micros(),
                step_max_us: timer.max().as_micros(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                if every == 0 {
                    print!("{}", heatmap(&sim));
                }
                println!("{}", report.summary);
                println!(
                    "Step time: avg={}us max={}us",
                    report.step_avg_us, report.step_max_us
                );
            }
        }
        Commands::Verify {
            seed,
            tuning,
            steps,
        } => {
            let config = tuning.resolve(Some(true))?;
            println!("Verify: pattern={:?}, steps={steps}", seed.pattern);
            let Verification {
                first,
                second,
                replayed,
                conserved,
                ..
            } = verify_run(seed.pattern(), config, steps)?;

            let deterministic = first.state_hash() == second.state_hash();
            let replay_matches = first.state_hash() == replayed.state_hash();
            println!("Run 1:  {}", FieldInspector::summary(&first));
            println!("Run 2:  {}", FieldInspector::summary(&second));
            println!("Replay: {}", FieldInspector::summary(&replayed));

            for (name, ok) in [
                ("conservation", conserved),
                ("determinism", deterministic),
                ("replay", replay_matches),
            ] {
                println!("{name}: {}", if ok { "OK" } else { "MISMATCH" });
            }
            if !(conserved && deterministic && replay_matches) {
                anyhow::bail!("verification failed");
            }
        }
    }

    Ok(())
}
