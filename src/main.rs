//! Rayonlarimiz -- the daily district hop puzzle over a line protocol.
//!
//! This binary loads the region data, builds the adjacency graph once and
//! then reads commands from stdin, writing one reply per line to stdout.

use std::io::{self, BufRead};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use log::{error, info};

use rayonlarimiz::cli::PuzzleArgs;
use rayonlarimiz::data::load_regions;
use rayonlarimiz::game::Game;
use rayonlarimiz::protocol::{parse_command, Command};
use rayonlarimiz::session::Session;

/// Serve the daily puzzle over stdin/stdout.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Pin the session to a date (default: the local date of each command)
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let regions = match load_regions(&args.puzzle.data) {
        Ok(regions) => regions,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let game = match Game::new(regions, args.puzzle.game_config()) {
        Ok(game) => game,
        Err(e) => {
            error!("cannot build adjacency graph: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.date {
        Some(date) => info!("session pinned to {}", date),
        None => info!("session follows the local date"),
    }
    let mut session = Session::new(game, args.date);

    match run(&mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("i/o error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the protocol loop until `quit` or end of input.
fn run(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => session.handle_isready(&mut out)?,
            Command::SetDate { date } => session.set_date(date),
            Command::Today { date } => session.handle_today(date, &mut out)?,
            Command::Guess { query } => session.handle_guess(&query, &mut out)?,
            Command::Search { query } => session.handle_search(&query, &mut out)?,
            Command::Adjacents { id } => session.handle_adjacents(&id, &mut out)?,
            Command::Path { from, to } => session.handle_path(&from, &to, &mut out)?,
            Command::Regions => session.handle_regions(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
