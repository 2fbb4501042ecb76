//! Line command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop can dispatch on.

use chrono::NaiveDate;
use log::warn;

/// A parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; the server must reply `readyok`.
    IsReady,

    /// Set the session date: `date <YYYY-MM-DD>`.
    SetDate { date: NaiveDate },

    /// Today's puzzle, optionally for an explicit date.
    Today { date: Option<NaiveDate> },

    /// Check a free-text guess against the session puzzle.
    Guess { query: String },

    /// Search region names.
    Search { query: String },

    /// Neighbors of a region id.
    Adjacents { id: String },

    /// Shortest path between two region ids: `path <from> | <to>`.
    Path { from: String, to: String },

    /// Every region with its geometry.
    Regions,

    /// End the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "isready" => Some(Command::IsReady),
        "regions" => Some(Command::Regions),
        "quit" => Some(Command::Quit),
        "date" => parse_date(rest).map(|date| Command::SetDate { date }),
        "today" => parse_today(rest),
        "guess" => required(keyword, rest).map(|query| Command::Guess { query }),
        "search" => required(keyword, rest).map(|query| Command::Search { query }),
        "adjacents" => required(keyword, rest).map(|id| Command::Adjacents { id }),
        "path" => parse_path(rest),
        other => {
            warn!("unknown command: '{}'", other);
            None
        }
    }
}

fn required(keyword: &str, rest: &str) -> Option<String> {
    if rest.is_empty() {
        warn!("malformed {}: missing argument", keyword);
        return None;
    }
    Some(rest.to_string())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("invalid date '{}': {}", text, e);
            None
        }
    }
}

/// Parses `today [YYYY-MM-DD]`.
fn parse_today(rest: &str) -> Option<Command> {
    if rest.is_empty() {
        return Some(Command::Today { date: None });
    }
    parse_date(rest).map(|date| Command::Today { date: Some(date) })
}

/// Parses `path <from> | <to>`. Ids may contain spaces, hence the bar.
fn parse_path(rest: &str) -> Option<Command> {
    let Some((from, to)) = rest.split_once('|') else {
        warn!("malformed path: expected 'path <from> | <to>'");
        return None;
    };
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        warn!("malformed path: expected 'path <from> | <to>'");
        return None;
    }
    Some(Command::Path {
        from: from.to_string(),
        to: to.to_string(),
    })
}
