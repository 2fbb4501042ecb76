//! Deterministic daily puzzles.
//!
//! A calendar date is hashed into a wide seed, and the seed walks the
//! mainland region list until it finds a start/end pair whose shortest path
//! has a par in the configured range.

pub mod calendar;
pub mod daily;
pub mod seed;

pub use calendar::{calendar, write_jsonl, CalendarEntry};
pub use daily::{Puzzle, PuzzleConfig, PuzzleGenerator, DEFAULT_PREFIX};
pub use seed::DailySeed;

use chrono::NaiveDate;

/// Errors raised by puzzle generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error(
        "no puzzle with par {min_par}..={max_par} found for {date} after {attempts} attempts"
    )]
    Exhausted {
        date: NaiveDate,
        attempts: u64,
        min_par: usize,
        max_par: usize,
    },
}
