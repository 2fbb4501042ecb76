//! Game service.
//!
//! Owns the loaded regions and their adjacency graph and answers the
//! questions a client asks: today's puzzle, whether a guess lies on the
//! canonical path, name search, neighbor lists and the full region list.
//! Everything is read-only after construction, so one `Game` can be shared
//! across threads by reference.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::geometry::Region;
use crate::graph::{build_adjacency, shortest_path_between, AdjacencyGraph, GraphError};
use crate::puzzle::{Puzzle, PuzzleConfig, PuzzleError, PuzzleGenerator};

/// Message returned when a guess matches no region.
pub const UNKNOWN_GUESS_MESSAGE: &str = "Rayon tapılmadı";

/// Service-level settings.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub puzzle: PuzzleConfig,
    /// Guesses allowed beyond par.
    pub guess_bonus: usize,
    /// Maximum number of search results.
    pub search_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            puzzle: PuzzleConfig::default(),
            guess_bonus: 4,
            search_limit: 8,
        }
    }
}

/// Errors surfaced to clients. The two kinds are distinct so that a
/// degenerate graph is never mistaken for a bad request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

impl GameError {
    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::Graph(GraphError::UnknownRegion(_)) => "not_found",
            GameError::Graph(_) => "invalid_graph",
            GameError::Puzzle(PuzzleError::Exhausted { .. }) => "generation_exhausted",
        }
    }
}

/// Today's puzzle as shown to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPuzzle {
    pub start_id: String,
    pub start_name: String,
    pub end_id: String,
    pub end_name: String,
    pub par: usize,
    pub date: String,
    pub max_guesses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuessResult {
    pub valid: bool,
    pub region_id: Option<String>,
    pub region_name: Option<String>,
    pub is_on_shortest_path: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub name_en: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjacents {
    pub region_id: String,
    pub adjacents: Vec<String>,
}

/// Region with drawable geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionInfo {
    pub id: String,
    pub name: String,
    pub name_en: String,
    /// One polygon: a list of rings, each a list of `[lon, lat]`.
    pub polygons: Vec<Vec<Vec<[f64; 2]>>>,
    pub centroid: [f64; 2],
}

/// Immutable game state: regions, their graph and settings.
pub struct Game {
    regions: Vec<Region>,
    by_id: HashMap<String, usize>,
    graph: AdjacencyGraph,
    config: GameConfig,
}

impl Game {
    /// Builds the adjacency graph and wraps it with the regions.
    ///
    /// An empty region list or duplicate ids fail with kind `invalid_graph`.
    pub fn new(regions: Vec<Region>, config: GameConfig) -> Result<Self, GameError> {
        let graph = build_adjacency(&regions)?;
        Ok(Self::with_graph(regions, graph, config))
    }

    /// Uses an already built graph. Its ids must be the region ids.
    pub fn with_graph(regions: Vec<Region>, graph: AdjacencyGraph, config: GameConfig) -> Self {
        let by_id = regions
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Game {
            regions,
            by_id,
            graph,
            config,
        }
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn region(&self, id: &str) -> Result<&Region, GameError> {
        self.by_id
            .get(id)
            .map(|&i| &self.regions[i])
            .ok_or_else(|| GraphError::UnknownRegion(id.to_string()).into())
    }

    pub fn generator(&self) -> PuzzleGenerator<'_> {
        PuzzleGenerator::with_config(&self.graph, self.config.puzzle.clone())
    }

    /// The raw puzzle for a date.
    pub fn puzzle(&self, date: NaiveDate) -> Result<Puzzle, GameError> {
        Ok(self.generator().generate(date)?)
    }

    /// The puzzle for a date with display names and guess allowance.
    pub fn today(&self, date: NaiveDate) -> Result<DailyPuzzle, GameError> {
        let puzzle = self.puzzle(date)?;
        let start = self.region(&puzzle.start_id)?;
        let end = self.region(&puzzle.end_id)?;
        Ok(DailyPuzzle {
            start_id: puzzle.start_id.clone(),
            start_name: start.name.clone(),
            end_id: puzzle.end_id.clone(),
            end_name: end.name.clone(),
            par: puzzle.par,
            date: date.format("%Y-%m-%d").to_string(),
            max_guesses: puzzle.max_guesses(self.config.guess_bonus),
        })
    }

    /// Resolves free text to a region: exact match on either name or the
    /// id first, then substring match on either name. Case-insensitive;
    /// the first region in load order wins.
    pub fn find_region(&self, query: &str) -> Option<&Region> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.regions
            .iter()
            .find(|r| {
                r.name.to_lowercase() == query
                    || r.name_en.to_lowercase() == query
                    || r.id.to_lowercase() == query
            })
            .or_else(|| {
                self.regions.iter().find(|r| {
                    r.name.to_lowercase().contains(&query) || r.name_en.to_lowercase().contains(&query)
                })
            })
    }

    /// Checks a guess against the canonical path of the date's puzzle.
    pub fn guess(&self, query: &str, date: NaiveDate) -> Result<GuessResult, GameError> {
        let Some(region) = self.find_region(query) else {
            return Ok(GuessResult {
                valid: false,
                region_id: None,
                region_name: None,
                is_on_shortest_path: false,
                message: UNKNOWN_GUESS_MESSAGE.to_string(),
            });
        };

        let puzzle = self.puzzle(date)?;
        Ok(GuessResult {
            valid: true,
            region_id: Some(region.id.clone()),
            region_name: Some(region.name.clone()),
            is_on_shortest_path: puzzle.contains(&region.id),
            message: String::new(),
        })
    }

    /// Case-insensitive substring search on both names, in load order.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.regions
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&query) || r.name_en.to_lowercase().contains(&query))
            .take(self.config.search_limit)
            .map(|r| SearchResult {
                id: r.id.clone(),
                name: r.name.clone(),
                name_en: r.name_en.clone(),
            })
            .collect()
    }

    /// Sorted neighbor ids of a region.
    pub fn adjacents(&self, id: &str) -> Result<Adjacents, GameError> {
        let adjacents = self
            .graph
            .neighbors(id)?
            .into_iter()
            .map(str::to_string)
            .collect();
        Ok(Adjacents {
            region_id: id.to_string(),
            adjacents,
        })
    }

    /// Shortest path between two regions, `None` if they are not connected.
    pub fn path(&self, from: &str, to: &str) -> Result<Option<Vec<String>>, GameError> {
        let path = shortest_path_between(&self.graph, from, to)?;
        Ok(path.map(|steps| steps.into_iter().map(str::to_string).collect()))
    }

    /// All regions with geometry, in load order.
    pub fn region_infos(&self) -> Vec<RegionInfo> {
        self.regions
            .iter()
            .map(|r| RegionInfo {
                id: r.id.clone(),
                name: r.name.clone(),
                name_en: r.name_en.clone(),
                polygons: vec![r.rings()],
                centroid: [r.centroid().x(), r.centroid().y()],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    const DISTRICTS: [(&str, &str); 7] = [
        ("Abşeron", "Absheron"),
        ("Bakı", "Baku"),
        ("Qobustan", "Gobustan"),
        ("Şamaxı", "Shamakhi"),
        ("İsmayıllı", "Ismayilli"),
        ("Qəbələ", "Gabala"),
        ("Oğuz", "Oguz"),
    ];

    fn square(x: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]),
            vec![],
        )
    }

    /// Seven districts side by side plus a detached exclave.
    fn game() -> Game {
        let mut regions: Vec<Region> = DISTRICTS
            .iter()
            .enumerate()
            .map(|(i, (name, en))| Region::new(*en, *name, *en, square(i as f64)).unwrap())
            .collect();
        regions.push(Region::new("Nakhchivan", "Naxçıvan", "Nakhchivan", square(20.0)).unwrap());
        Game::new(regions, GameConfig::default()).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn today_has_names_and_allowance() {
        let daily = game().today(date("2026-10-17")).unwrap();
        assert_eq!(
            daily,
            DailyPuzzle {
                start_id: "Absheron".to_string(),
                start_name: "Abşeron".to_string(),
                end_id: "Ismayilli".to_string(),
                end_name: "İsmayıllı".to_string(),
                par: 3,
                date: "2026-10-17".to_string(),
                max_guesses: 7,
            }
        );
    }

    #[test]
    fn guess_on_and_off_the_path() {
        let game = game();
        let day = date("2026-10-17");

        let hit = game.guess("qobustan", day).unwrap();
        assert!(hit.valid);
        assert_eq!(hit.region_id.as_deref(), Some("Gobustan"));
        assert!(hit.is_on_shortest_path);

        let miss = game.guess("Oguz", day).unwrap();
        assert!(miss.valid);
        assert!(!miss.is_on_shortest_path);
    }

    #[test]
    fn guess_prefers_exact_over_partial_match() {
        let game = game();
        // "ab" only matches Abşeron/Absheron by substring.
        assert_eq!(game.find_region("  BAKU ").unwrap().id, "Baku");
        assert_eq!(game.find_region("ab").unwrap().id, "Absheron");
        assert_eq!(game.find_region("şamaxı").unwrap().id, "Shamakhi");
    }

    #[test]
    fn unknown_guess_is_invalid() {
        let result = game().guess("Paris", date("2026-10-17")).unwrap();
        assert!(!result.valid);
        assert_eq!(result.region_id, None);
        assert_eq!(result.message, UNKNOWN_GUESS_MESSAGE);
    }

    #[test]
    fn search_is_limited_and_ordered() {
        let game = game();
        let hits: Vec<String> = game.search("a").into_iter().map(|r| r.id).collect();
        assert_eq!(
            hits,
            vec!["Absheron", "Baku", "Gobustan", "Shamakhi", "Ismayilli", "Gabala", "Nakhchivan"]
        );
        assert!(game.search("   ").is_empty());
        assert_eq!(game.search("gab")[0].name, "Qəbələ");

        let config = GameConfig {
            search_limit: 3,
            ..GameConfig::default()
        };
        let limited = Game::with_graph(game.regions().to_vec(), game.graph().clone(), config);
        assert_eq!(limited.search("a").len(), 3);
    }

    #[test]
    fn adjacents_sorted_and_not_found_kind() {
        let game = game();
        assert_eq!(
            game.adjacents("Shamakhi").unwrap().adjacents,
            vec!["Gobustan", "Ismayilli"]
        );
        assert!(game.adjacents("Nakhchivan").unwrap().adjacents.is_empty());

        let err = game.adjacents("Atlantis").unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn exhausted_generation_has_its_own_kind() {
        let regions = vec![
            Region::new("a", "a", "a", square(0.0)).unwrap(),
            Region::new("b", "b", "b", square(1.0)).unwrap(),
        ];
        let game = Game::new(regions, GameConfig::default()).unwrap();
        let err = game.today(date("2026-10-17")).unwrap_err();
        assert_eq!(err.kind(), "generation_exhausted");
    }

    #[test]
    fn unusable_region_sets_are_invalid_graphs() {
        let err = Game::new(Vec::new(), GameConfig::default()).err().unwrap();
        assert_eq!(err, GameError::Graph(GraphError::Empty));
        assert_eq!(err.kind(), "invalid_graph");

        let twins = vec![
            Region::new("Quba", "Quba", "Quba", square(0.0)).unwrap(),
            Region::new("Quba", "Quba", "Quba", square(1.0)).unwrap(),
        ];
        let err = Game::new(twins, GameConfig::default()).err().unwrap();
        assert_eq!(err.kind(), "invalid_graph");
        assert_eq!(err.to_string(), "duplicate region id 'Quba'");
    }

    #[test]
    fn path_between_regions() {
        let game = game();
        assert_eq!(
            game.path("Baku", "Shamakhi").unwrap(),
            Some(vec!["Baku".to_string(), "Gobustan".to_string(), "Shamakhi".to_string()])
        );
        assert_eq!(game.path("Baku", "Nakhchivan").unwrap(), None);
    }

    #[test]
    fn region_infos_carry_geometry() {
        let infos = game().region_infos();
        assert_eq!(infos.len(), 8);
        assert_eq!(infos[1].id, "Baku");
        assert!((infos[1].centroid[0] - 1.5).abs() < 1e-12);
        assert!((infos[1].centroid[1] - 0.5).abs() < 1e-12);
        assert_eq!(infos[1].polygons[0][0][0], [1.0, 0.0]);
    }
}
