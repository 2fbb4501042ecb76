//! Daily puzzle selection.
//!
//! Candidates come from the mainland (the largest connected component), in
//! id order, so disconnected exclaves never become endpoints. Each attempt
//! derives a start and an end index from the day's seed; the first pair whose
//! shortest path has an acceptable par is the puzzle.

use std::num::NonZeroUsize;

use chrono::{Local, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::graph::{mainland, shortest_path, AdjacencyGraph, NodeId};

use super::{DailySeed, PuzzleError};

/// Default application prefix mixed into every seed.
pub const DEFAULT_PREFIX: &str = "rayonlarimiz";

/// Settings for puzzle selection.
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    /// Prefix hashed together with the date.
    pub prefix: String,
    /// Smallest accepted par (intermediate hops).
    pub min_par: usize,
    /// Largest accepted par.
    pub max_par: usize,
    /// Attempts before giving up on a date.
    pub max_attempts: u64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            prefix: DEFAULT_PREFIX.to_string(),
            min_par: 3,
            max_par: 8,
            max_attempts: 512,
        }
    }
}

/// One day's puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    pub date: NaiveDate,
    pub start_id: String,
    pub end_id: String,
    /// Intermediate hops on the canonical path: `path.len() - 2`.
    pub par: usize,
    /// Canonical shortest path, start and end inclusive.
    pub path: Vec<String>,
    /// Zero-based attempt that produced the puzzle.
    pub attempt: u64,
}

impl Puzzle {
    /// Returns true if the region lies on the canonical path.
    pub fn contains(&self, id: &str) -> bool {
        self.path.iter().any(|step| step == id)
    }

    /// Guess allowance: par plus a fixed bonus.
    pub fn max_guesses(&self, bonus: usize) -> usize {
        self.par + bonus
    }
}

/// Selects daily puzzles over a borrowed, immutable graph.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator<'g> {
    graph: &'g AdjacencyGraph,
    mainland: Vec<NodeId>,
    config: PuzzleConfig,
}

impl<'g> PuzzleGenerator<'g> {
    pub fn new(graph: &'g AdjacencyGraph) -> Self {
        Self::with_config(graph, PuzzleConfig::default())
    }

    pub fn with_config(graph: &'g AdjacencyGraph, config: PuzzleConfig) -> Self {
        let mainland = mainland(graph);
        debug!(
            "mainland has {} of {} regions",
            mainland.len(),
            graph.len()
        );
        PuzzleGenerator {
            graph,
            mainland,
            config,
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Mainland region ids, sorted.
    pub fn mainland(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.mainland.iter().map(|&n| self.graph.id(n))
    }

    /// Returns true if the region belongs to the mainland.
    pub fn in_mainland(&self, id: &str) -> bool {
        self.graph
            .node(id)
            .map(|node| self.mainland.binary_search(&node).is_ok())
            .unwrap_or(false)
    }

    /// The puzzle for `date`. Same date and graph, same puzzle.
    pub fn generate(&self, date: NaiveDate) -> Result<Puzzle, PuzzleError> {
        let exhausted = |attempts: u64| PuzzleError::Exhausted {
            date,
            attempts,
            min_par: self.config.min_par,
            max_par: self.config.max_par,
        };
        let Some(size) = NonZeroUsize::new(self.mainland.len()) else {
            return Err(exhausted(0));
        };
        let seed = DailySeed::new(&self.config.prefix, date);

        for attempt in 0..self.config.max_attempts {
            let start = self.mainland[seed.offset_mod(attempt as u128, size)];
            let end = self.mainland[seed.offset_mod(attempt as u128 * 7 + 13, size)];
            if start == end {
                continue;
            }

            let Some(path) = shortest_path(self.graph, start, end) else {
                continue;
            };
            let par = path.len() - 2;
            if par < self.config.min_par || par > self.config.max_par {
                continue;
            }

            debug!(
                "{}: {} -> {} par {} after {} attempts",
                date,
                self.graph.id(start),
                self.graph.id(end),
                par,
                attempt + 1
            );
            return Ok(Puzzle {
                date,
                start_id: self.graph.id(start).to_string(),
                end_id: self.graph.id(end).to_string(),
                par,
                path: path.into_iter().map(|n| self.graph.id(n).to_string()).collect(),
                attempt,
            });
        }

        Err(exhausted(self.config.max_attempts))
    }

    /// The puzzle for the local calendar date.
    pub fn today(&self) -> Result<Puzzle, PuzzleError> {
        self.generate(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// R0 - R1 - ... - R9 in a line, plus an island pair X0 - X1.
    fn line_with_island() -> AdjacencyGraph {
        let mut ids: Vec<String> = (0..10).map(|i| format!("R{i}")).collect();
        ids.push("X0".to_string());
        ids.push("X1".to_string());
        let mut edges: Vec<(String, String)> =
            (0..9).map(|i| (format!("R{i}"), format!("R{}", i + 1))).collect();
        edges.push(("X0".to_string(), "X1".to_string()));
        AdjacencyGraph::from_edges(ids, edges).unwrap()
    }

    #[test]
    fn corridor_scenario() {
        let graph = AdjacencyGraph::from_edges(
            ["A", "B", "C", "D", "E", "F"],
            [("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")],
        )
        .unwrap();
        let generator = PuzzleGenerator::new(&graph);
        assert_eq!(generator.mainland().collect::<Vec<_>>(), vec!["A", "B", "C", "D", "E"]);
        assert!(!generator.in_mainland("F"));

        // Only A-E has par 3 in a five-region line.
        let puzzle = generator.generate(date("2026-10-17")).unwrap();
        assert_eq!(puzzle.par, 3);
        let ends = [puzzle.start_id.as_str(), puzzle.end_id.as_str()];
        assert_eq!(ends, ["E", "A"]);
        assert_eq!(puzzle.path, vec!["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn known_day_selection() {
        let graph = line_with_island();
        let generator = PuzzleGenerator::new(&graph);

        let puzzle = generator.generate(date("2026-10-17")).unwrap();
        assert_eq!(puzzle.start_id, "R3");
        assert_eq!(puzzle.end_id, "R8");
        assert_eq!(puzzle.path, vec!["R3", "R4", "R5", "R6", "R7", "R8"]);
        assert_eq!(puzzle.par, 4);
        assert_eq!(puzzle.attempt, 2);
    }

    #[test]
    fn same_date_same_puzzle() {
        let graph = line_with_island();
        let generator = PuzzleGenerator::new(&graph);
        let day = date("2025-03-20");
        assert_eq!(generator.generate(day).unwrap(), generator.generate(day).unwrap());
    }

    #[test]
    fn par_bound_and_mainland_over_a_year() {
        let graph = line_with_island();
        let generator = PuzzleGenerator::new(&graph);
        let mut day = date("2026-01-01");
        for _ in 0..365 {
            let puzzle = generator.generate(day).unwrap();
            assert!((3..=8).contains(&puzzle.par), "{day}: par {}", puzzle.par);
            assert_eq!(puzzle.path.len(), puzzle.par + 2);
            assert_eq!(puzzle.path.first(), Some(&puzzle.start_id));
            assert_eq!(puzzle.path.last(), Some(&puzzle.end_id));
            assert!(generator.in_mainland(&puzzle.start_id));
            assert!(generator.in_mainland(&puzzle.end_id));
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn path_membership() {
        let graph = line_with_island();
        let puzzle = PuzzleGenerator::new(&graph).generate(date("2026-10-17")).unwrap();
        assert!(puzzle.contains("R5"));
        assert!(!puzzle.contains("R9"));
        assert!(!puzzle.contains("X0"));
        assert_eq!(puzzle.max_guesses(4), 8);
    }

    #[test]
    fn too_small_graph_is_exhausted() {
        let graph = AdjacencyGraph::from_edges(["a", "b", "c"], [("a", "b"), ("b", "c")]).unwrap();
        let config = PuzzleConfig {
            max_attempts: 50,
            ..PuzzleConfig::default()
        };
        let err = PuzzleGenerator::with_config(&graph, config)
            .generate(date("2026-10-17"))
            .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Exhausted {
                date: date("2026-10-17"),
                attempts: 50,
                min_par: 3,
                max_par: 8,
            }
        );
    }

    #[test]
    fn par_range_is_configurable() {
        let graph = line_with_island();
        let config = PuzzleConfig {
            min_par: 6,
            max_par: 6,
            ..PuzzleConfig::default()
        };
        let puzzle = PuzzleGenerator::with_config(&graph, config)
            .generate(date("2026-10-17"))
            .unwrap();
        assert_eq!(puzzle.par, 6);
        assert_eq!(puzzle.start_id, "R0");
        assert_eq!(puzzle.end_id, "R7");
    }
}
