//! Symmetric adjacency graph over region ids.
//!
//! Region ids are sorted lexicographically and numbered densely, so `NodeId`
//! order is id order. Neighbors live in one flat table with per-node offsets;
//! each node's slice is sorted ascending. The table is symmetric and has no
//! self-loops: if A lists B then B lists A.

use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use super::GraphError;

/// Dense index of a region in the graph.
pub type NodeId = usize;

/// Immutable region adjacency graph.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    ids: Vec<String>,
    index: HashMap<String, NodeId>,
    offsets: Vec<usize>,
    entries: Vec<NodeId>,
}

impl AdjacencyGraph {
    /// Builds a graph from region ids and undirected id pairs.
    ///
    /// Every id becomes a node, isolated or not. Self-pairs are dropped and
    /// each pair is recorded in both directions. Pairs naming an id outside
    /// `ids` fail with `UnknownRegion`.
    pub fn from_edges<I, S, E, T>(ids: I, edges: E) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (T, T)>,
        T: AsRef<str>,
    {
        let mut ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(GraphError::Empty);
        }
        ids.sort();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(GraphError::DuplicateRegion(pair[0].clone()));
        }

        let index: HashMap<String, NodeId> = ids
            .iter()
            .enumerate()
            .map(|(node, id)| (id.clone(), node))
            .collect();

        let mut neighbors: Vec<BTreeSet<NodeId>> = vec![BTreeSet::new(); ids.len()];
        for (a, b) in edges {
            let a = lookup(&index, a.as_ref())?;
            let b = lookup(&index, b.as_ref())?;
            if a == b {
                continue;
            }
            neighbors[a].insert(b);
            neighbors[b].insert(a);
        }

        let mut offsets = Vec::with_capacity(ids.len() + 1);
        let mut entries = Vec::new();
        offsets.push(0);
        for set in neighbors {
            entries.extend(set);
            offsets.push(entries.len());
        }

        Ok(AdjacencyGraph {
            ids,
            index,
            offsets,
            entries,
        })
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false for a constructed graph; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All node indices in id order.
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.ids.len()
    }

    /// All region ids, sorted.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Region id of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in `0..self.len()`.
    pub fn id(&self, node: NodeId) -> &str {
        &self.ids[node]
    }

    /// Resolves a region id to its node.
    pub fn node(&self, id: &str) -> Result<NodeId, GraphError> {
        lookup(&self.index, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Neighbors of a node, ascending.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in `0..self.len()`.
    #[inline]
    pub fn neighbors_of(&self, node: NodeId) -> &[NodeId] {
        &self.entries[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Neighbor ids of a region, sorted.
    pub fn neighbors(&self, id: &str) -> Result<Vec<&str>, GraphError> {
        let node = self.node(id)?;
        Ok(self
            .neighbors_of(node)
            .iter()
            .map(|&n| self.id(n))
            .collect())
    }

    /// Number of neighbors of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in `0..self.len()`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Returns true if the two regions share a border.
    pub fn are_adjacent(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        let a = self.node(a)?;
        let b = self.node(b)?;
        Ok(self.neighbors_of(a).binary_search(&b).is_ok())
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.entries.len() / 2
    }

    /// Undirected edges as `(low, high)` node pairs, ascending.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes().flat_map(move |a| {
            self.neighbors_of(a)
                .iter()
                .copied()
                .filter(move |&b| a < b)
                .map(move |b| (a, b))
        })
    }
}

fn lookup(index: &HashMap<String, NodeId>, id: &str) -> Result<NodeId, GraphError> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| GraphError::UnknownRegion(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AdjacencyGraph {
        AdjacencyGraph::from_edges(
            ["Quba", "Xaçmaz", "Qusar", "Şabran", "Naxçıvan"],
            [("Quba", "Xaçmaz"), ("Quba", "Qusar"), ("Xaçmaz", "Qusar"), ("Quba", "Şabran")],
        )
        .unwrap()
    }

    #[test]
    fn ids_are_sorted_and_indexed() {
        let graph = sample();
        assert_eq!(graph.len(), 5);
        for node in graph.nodes() {
            assert_eq!(graph.node(graph.id(node)).unwrap(), node);
        }
        let mut sorted = graph.ids().to_vec();
        sorted.sort();
        assert_eq!(graph.ids(), sorted.as_slice());
    }

    #[test]
    fn adjacency_symmetry() {
        let graph = sample();
        for a in graph.nodes() {
            for &b in graph.neighbors_of(a) {
                assert!(
                    graph.neighbors_of(b).contains(&a),
                    "missing reverse edge {} -> {}",
                    graph.id(b),
                    graph.id(a)
                );
            }
        }
    }

    #[test]
    fn isolated_region_is_still_a_key() {
        let graph = sample();
        assert!(graph.contains("Naxçıvan"));
        assert!(graph.neighbors("Naxçıvan").unwrap().is_empty());
    }

    #[test]
    fn neighbors_are_sorted() {
        let graph = sample();
        assert_eq!(graph.neighbors("Quba").unwrap(), vec!["Qusar", "Xaçmaz", "Şabran"]);
    }

    #[test]
    fn self_pairs_and_duplicates_are_dropped() {
        let graph =
            AdjacencyGraph::from_edges(["a", "b"], [("a", "a"), ("a", "b"), ("b", "a")]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.neighbors("a").unwrap() == vec!["b"]);
        assert!(!graph.are_adjacent("a", "a").unwrap());
    }

    #[test]
    fn unknown_region_is_not_found() {
        let graph = sample();
        assert_eq!(
            graph.neighbors("Atlantis").unwrap_err(),
            GraphError::UnknownRegion("Atlantis".to_string())
        );
        let err = AdjacencyGraph::from_edges(["a"], [("a", "z")]).unwrap_err();
        assert_eq!(err, GraphError::UnknownRegion("z".to_string()));
    }

    #[test]
    fn empty_and_duplicate_inputs_fail() {
        let none: [(&str, &str); 0] = [];
        assert_eq!(
            AdjacencyGraph::from_edges(Vec::<String>::new(), none).unwrap_err(),
            GraphError::Empty
        );
        assert_eq!(
            AdjacencyGraph::from_edges(["a", "b", "a"], none).unwrap_err(),
            GraphError::DuplicateRegion("a".to_string())
        );
    }

    #[test]
    fn edges_are_listed_once() {
        let graph = sample();
        let edges: Vec<(NodeId, NodeId)> = graph.edges().collect();
        assert_eq!(edges.len(), graph.edge_count());
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|&(a, b)| a < b));
        assert_eq!(graph.degree(graph.node("Quba").unwrap()), 3);
    }

    #[test]
    #[should_panic]
    fn out_of_range_node_panics() {
        let graph = AdjacencyGraph::from_edges(["a", "b"], [("a", "b")]).unwrap();
        graph.neighbors_of(2);
    }
}
