//! Breadth-first traversal over the adjacency graph.
//!
//! Neighbors are always visited in ascending id order and the first visit to
//! a node fixes its predecessor. Among several shortest paths this yields the
//! lexicographically smallest one, so results are reproducible for a given
//! graph regardless of how it was built.

use std::collections::VecDeque;

use super::{AdjacencyGraph, GraphError, NodeId};

/// Shortest path from `start` to `end`, both inclusive.
///
/// Returns `[start]` when the endpoints coincide and `None` when `end` is
/// unreachable.
///
/// # Panics
///
/// Panics if either node is out of range for `graph`; use
/// [`shortest_path_between`] to resolve region ids with errors instead.
pub fn shortest_path(graph: &AdjacencyGraph, start: NodeId, end: NodeId) -> Option<Vec<NodeId>> {
    if start == end {
        return Some(vec![start]);
    }

    let mut parent: Vec<Option<NodeId>> = vec![None; graph.len()];
    let mut visited = vec![false; graph.len()];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors_of(current) {
            if visited[next] {
                continue;
            }
            visited[next] = true;
            parent[next] = Some(current);
            if next == end {
                return Some(trace_back(&parent, end));
            }
            queue.push_back(next);
        }
    }
    None
}

fn trace_back(parent: &[Option<NodeId>], end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut node = end;
    while let Some(prev) = parent[node] {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

/// Shortest path between two region ids.
///
/// Unknown ids are an error; an unreachable target is `Ok(None)`.
pub fn shortest_path_between<'g>(
    graph: &'g AdjacencyGraph,
    start: &str,
    end: &str,
) -> Result<Option<Vec<&'g str>>, GraphError> {
    let start = graph.node(start)?;
    let end = graph.node(end)?;
    Ok(shortest_path(graph, start, end).map(|path| path.into_iter().map(|n| graph.id(n)).collect()))
}

/// Hop distance from `start` to every node; `None` for unreachable nodes.
///
/// # Panics
///
/// Panics if `start` is out of range for `graph`.
pub fn distances_from(graph: &AdjacencyGraph, start: NodeId) -> Vec<Option<usize>> {
    let mut dist = vec![None; graph.len()];
    let mut queue = VecDeque::from([start]);
    dist[start] = Some(0);

    while let Some(current) = queue.pop_front() {
        let d = dist[current].unwrap_or(0);
        for &next in graph.neighbors_of(current) {
            if dist[next].is_none() {
                dist[next] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

/// Partitions all nodes into connected components.
///
/// Each component is sorted; components are ordered by their smallest node.
pub fn components(graph: &AdjacencyGraph) -> Vec<Vec<NodeId>> {
    let mut seen = vec![false; graph.len()];
    let mut result = Vec::new();

    for root in graph.nodes() {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        let mut members = vec![root];
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for &next in graph.neighbors_of(node) {
                if !seen[next] {
                    seen[next] = true;
                    members.push(next);
                    stack.push(next);
                }
            }
        }
        members.sort_unstable();
        result.push(members);
    }
    result
}

/// The largest connected component, sorted.
///
/// Ties go to the component holding the smallest id.
pub fn mainland(graph: &AdjacencyGraph) -> Vec<NodeId> {
    let mut best: Vec<NodeId> = Vec::new();
    for component in components(graph) {
        if component.len() > best.len() {
            best = component;
        }
    }
    best
}
