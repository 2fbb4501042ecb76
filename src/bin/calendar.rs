//! Puzzle calendar CLI.
//!
//! Generates the puzzles for a range of days and writes them as JSONL, one
//! line per day in date order. Useful for checking that every upcoming day
//! has a puzzle before publishing a data update.
//!
//! Usage:
//!   cargo run --release --bin calendar -- --data regions.json [--from DATE] [--days N]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{error, info};

use rayonlarimiz::cli::PuzzleArgs;
use rayonlarimiz::data::load_regions;
use rayonlarimiz::graph::build_adjacency;
use rayonlarimiz::puzzle::{calendar, write_jsonl, CalendarEntry, PuzzleGenerator};

/// Generate a calendar of daily puzzles as JSON lines.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// First day (default: local today)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Number of days
    #[arg(long, default_value_t = 30)]
    days: u64,

    /// Worker threads, 0 for one per core
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("failed to build thread pool: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let regions = match load_regions(&args.puzzle.data) {
        Ok(regions) => regions,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let from = args.from.unwrap_or_else(|| Local::now().date_naive());
    let entries = pool.install(|| {
        let graph = build_adjacency(&regions)?;
        let generator = PuzzleGenerator::with_config(&graph, args.puzzle.puzzle_config());
        Ok::<_, rayonlarimiz::graph::GraphError>(calendar(&generator, from, args.days))
    });
    let entries = match entries {
        Ok(entries) => entries,
        Err(e) => {
            error!("cannot build adjacency graph: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let missing = entries
        .iter()
        .filter(|e| matches!(e, CalendarEntry::Missing { .. }))
        .count();
    info!(
        "generated {} days from {} in {:.2}s ({} without a puzzle)",
        entries.len(),
        from,
        start.elapsed().as_secs_f64(),
        missing
    );

    let written = match &args.output {
        Some(path) => File::create(path).and_then(|file| write_all(&entries, BufWriter::new(file))),
        None => write_all(&entries, BufWriter::new(io::stdout().lock())),
    };
    match written {
        Ok(()) if missing == 0 => ExitCode::SUCCESS,
        Ok(()) => ExitCode::from(2),
        Err(e) => {
            error!("failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_all<W: Write>(entries: &[CalendarEntry], mut out: W) -> io::Result<()> {
    write_jsonl(entries, &mut out)
}
