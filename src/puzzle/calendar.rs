//! Puzzle calendars: many consecutive days generated in parallel.

use std::io::{self, Write};

use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;

use super::{Puzzle, PuzzleError, PuzzleGenerator};

/// One calendar line: the day's puzzle or why there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CalendarEntry {
    Puzzle(Puzzle),
    Missing {
        date: NaiveDate,
        error: &'static str,
        message: String,
    },
}

impl CalendarEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEntry::Puzzle(puzzle) => puzzle.date,
            CalendarEntry::Missing { date, .. } => *date,
        }
    }
}

impl From<(NaiveDate, Result<Puzzle, PuzzleError>)> for CalendarEntry {
    fn from((date, result): (NaiveDate, Result<Puzzle, PuzzleError>)) -> Self {
        match result {
            Ok(puzzle) => CalendarEntry::Puzzle(puzzle),
            Err(err) => CalendarEntry::Missing {
                date,
                error: "generation_exhausted",
                message: err.to_string(),
            },
        }
    }
}

/// Generates `days` consecutive puzzles starting at `from`, in date order.
///
/// Days run on the current rayon pool. Dates past the end of the calendar
/// range are skipped.
pub fn calendar(generator: &PuzzleGenerator<'_>, from: NaiveDate, days: u64) -> Vec<CalendarEntry> {
    (0..days)
        .into_par_iter()
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .map(|date| CalendarEntry::from((date, generator.generate(date))))
        .collect()
}

/// Writes entries as JSON lines.
pub fn write_jsonl<W: Write>(entries: &[CalendarEntry], out: &mut W) -> io::Result<()> {
    for entry in entries {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
    }
    out.flush()
}
