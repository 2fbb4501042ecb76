//! Command-line options shared by the binaries.

use std::path::PathBuf;

use clap::Args;

use crate::game::GameConfig;
use crate::puzzle::{PuzzleConfig, DEFAULT_PREFIX};

/// Where regions come from and how puzzles are selected.
#[derive(Debug, Clone, Args)]
pub struct PuzzleArgs {
    /// JSON file with the region records
    #[arg(short, long)]
    pub data: PathBuf,

    /// Prefix hashed together with the date
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Smallest accepted par
    #[arg(long, default_value_t = 3)]
    pub min_par: usize,

    /// Largest accepted par
    #[arg(long, default_value_t = 8)]
    pub max_par: usize,

    /// Attempts per date before giving up
    #[arg(long, default_value_t = 512)]
    pub max_attempts: u64,
}

impl PuzzleArgs {
    pub fn puzzle_config(&self) -> PuzzleConfig {
        PuzzleConfig {
            prefix: self.prefix.clone(),
            min_par: self.min_par,
            max_par: self.max_par,
            max_attempts: self.max_attempts,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            puzzle: self.puzzle_config(),
            ..GameConfig::default()
        }
    }
}
