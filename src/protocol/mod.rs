//! Line protocol handling.
//!
//! Clients send one command per line and receive one reply per line: either
//! `readyok` or a JSON document.

pub mod parser;

pub use parser::{parse_command, Command};
