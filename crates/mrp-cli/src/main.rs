//! Command-line front end for the MRP engine: loads a JSON fixture into an
//! in-memory storage adapter, runs one pipeline pass, and prints the
//! resulting summary.

mod fixture;
mod output;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use mrp_calc::Engine;
use mrp_core::{EngineConfig, Run, TracingEventSink};

#[derive(Parser)]
#[command(name = "mrp")]
#[command(about = "Material Requirements Planning engine")]
#[command(version)]
struct Cli {
    /// Fixture file (JSON) carrying the BOM, item master, and demand/supply sources.
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Planning date; defaults to today if omitted.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Include MRP demand records as requirements.
    #[arg(long)]
    use_mrp_demands: bool,

    /// Include reorder-point top-ups as requirements.
    #[arg(long)]
    use_reorder_level_demands: bool,

    /// Apply EOQ lot size when larger than net need.
    #[arg(long)]
    use_eoq: bool,

    /// Round planned quantity up to pan-size multiples.
    #[arg(long)]
    use_pan_size: bool,

    /// Inflate planned quantity for shrink factor.
    #[arg(long)]
    use_shrinkage: bool,

    /// Days of slack before a late supply triggers an advisory reschedule.
    #[arg(long, default_value_t = 0)]
    leeway_days: i64,

    /// Location codes to filter reorder/on-hand sources by (repeatable); omit or pass "All" to aggregate every location.
    #[arg(long = "location")]
    locations: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Verbose stage-by-stage logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let fixture = fixture::load(&cli.input)?;
    let storage = fixture::into_storage(fixture);

    let config = EngineConfig::new(cli.leeway_days)?
        .with_use_mrp_demands(cli.use_mrp_demands)
        .with_use_reorder_level_demands(cli.use_reorder_level_demands)
        .with_use_eoq(cli.use_eoq)
        .with_use_pan_size(cli.use_pan_size)
        .with_use_shrinkage(cli.use_shrinkage)
        .with_locations(cli.locations.into_iter().collect::<HashSet<_>>());

    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let run = Run::new();
    let event_sink = TracingEventSink;

    let engine = Engine::with_event_sink(&storage, &storage, &event_sink);
    let summary = engine.run(&config, today, &run)?;

    match cli.format {
        Format::Table => output::print_table(&summary),
        Format::Json => output::print_json(&summary)?,
    }

    Ok(())
}
