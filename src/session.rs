//! Protocol session state.
//!
//! Holds the game and an optional pinned date, and writes one reply line
//! per command. Without a pinned date every command uses the local calendar
//! date at the moment it is handled. Successful replies are JSON documents; failures are
//! `{"error": <kind>, "message": <text>}` so clients can tell a missing
//! region from a day without a puzzle.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::game::{Game, GameError};

/// Error reply body.
#[derive(Debug, Serialize)]
struct ErrorReply<'a> {
    error: &'static str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct PathReply<'a> {
    from: &'a str,
    to: &'a str,
    path: Option<Vec<String>>,
}

/// Mutable state of one client session.
pub struct Session {
    game: Game,
    date: Option<NaiveDate>,
}

impl Session {
    /// Creates a session, optionally pinned to a fixed date.
    pub fn new(game: Game, date: Option<NaiveDate>) -> Self {
        Session { game, date }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The pinned date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Pins the session to `date`.
    pub fn set_date(&mut self, date: NaiveDate) {
        debug!("session date set to {}", date);
        self.date = Some(date);
    }

    /// Date used by `today` and `guess` when none is given: the pinned date,
    /// or the local date read now.
    pub fn current_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    pub fn handle_today<W: Write>(&self, date: Option<NaiveDate>, out: &mut W) -> io::Result<()> {
        let date = date.unwrap_or_else(|| self.current_date());
        write_reply(out, self.game.today(date))
    }

    pub fn handle_guess<W: Write>(&self, query: &str, out: &mut W) -> io::Result<()> {
        write_reply(out, self.game.guess(query, self.current_date()))
    }

    pub fn handle_search<W: Write>(&self, query: &str, out: &mut W) -> io::Result<()> {
        write_reply(out, Ok(self.game.search(query)))
    }

    pub fn handle_adjacents<W: Write>(&self, id: &str, out: &mut W) -> io::Result<()> {
        write_reply(out, self.game.adjacents(id))
    }

    pub fn handle_path<W: Write>(&self, from: &str, to: &str, out: &mut W) -> io::Result<()> {
        let reply = self
            .game
            .path(from, to)
            .map(|path| PathReply { from, to, path });
        write_reply(out, reply)
    }

    pub fn handle_regions<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_reply(out, Ok(self.game.region_infos()))
    }
}

/// Writes a JSON reply line, or an error reply carrying the error kind.
fn write_reply<W: Write, T: Serialize>(out: &mut W, result: Result<T, GameError>) -> io::Result<()> {
    let line = match result {
        Ok(value) => serde_json::to_string(&value)?,
        Err(err) => {
            debug!("replying with {}: {}", err.kind(), err);
            let message = err.to_string();
            serde_json::to_string(&ErrorReply {
                error: err.kind(),
                message: &message,
            })?
        }
    };
    writeln!(out, "{}", line)?;
    out.flush()
}
