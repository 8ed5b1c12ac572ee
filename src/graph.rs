// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{earth_distance, Edge, Node, SearchError};
use std::collections::btree_map::{BTreeMap, Entry};

/// Read-only adjacency view of an undirected, weighted graph,
/// as required by [find_route](crate::find_route).
///
/// Implementations must be undirected (`edge_weight(a, b) == edge_weight(b, a)`)
/// and must only report finite, non-negative weights.
pub trait WeightedGraph {
    /// Returns true if a node with the given id exists.
    fn contains(&self, id: &str) -> bool;

    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns the ids of all nodes adjacent to `id`,
    /// or [SearchError::UnknownNode] if there is no such node.
    fn neighbors<'a>(
        &'a self,
        id: &str,
    ) -> Result<impl Iterator<Item = &'a str> + 'a, SearchError>;

    /// Returns the cost of the edge between `from` and `to`.
    ///
    /// Fails with [SearchError::UnknownNode] if either node doesn't exist, or
    /// with [SearchError::NoSuchEdge] if the nodes are not adjacent.
    fn edge_weight(&self, from: &str, to: &str) -> Result<f64, SearchError>;
}

/// Error conditions which may occur when building a [Graph].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("invalid cost of edge {from} - {to}: {cost}")]
    InvalidCost { from: String, to: String, cost: f64 },

    #[error("edge from {0} to itself")]
    SelfLoop(String),
}

/// Represents a network of cities as a set of [Nodes](Node)
/// and undirected [Edges](Edge) between them.
///
/// The graph is meant to be built once and then shared (immutably)
/// between any number of concurrent searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph(BTreeMap<String, (Node, Vec<Edge>)>);

impl Graph {
    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.0.values().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.0.get(id).map(|(node, _)| node)
    }

    /// Creates or updates a [Node] with `node.id`. All edges of the node are preserved.
    pub fn set_node(&mut self, node: Node) {
        match self.0.entry(node.id.clone()) {
            Entry::Vacant(e) => {
                e.insert((node, Vec::default()));
            }
            Entry::Occupied(mut e) => {
                debug_assert_eq!(e.get().0.id, node.id);
                e.get_mut().0 = node;
            }
        }
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// This function requires computing the distance to every [Node] in the graph,
    /// and is not suitable for large graphs.
    pub fn find_nearest_node(&self, lat: f64, lon: f64) -> Option<&Node> {
        self.iter()
            .map(|nd| (earth_distance(lat, lon, nd.lat, nd.lon), nd))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, nd)| nd)
    }

    /// Gets all [Edges](Edge) incident to a node with a given id.
    pub fn get_edges(&self, id: &str) -> &[Edge] {
        self.0
            .get(id)
            .map(|(_, e)| e.as_slice())
            .unwrap_or_default()
    }

    /// Gets the cost of an [Edge] between two nodes, if such an edge exists.
    pub fn get_edge(&self, from: &str, to: &str) -> Option<f64> {
        self.get_edges(from)
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.cost)
    }

    /// Creates or updates an undirected edge between two existing nodes.
    ///
    /// `cost` must be finite and non-negative.
    pub fn set_edge(&mut self, a: &str, b: &str, cost: f64) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a.to_owned()));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost {
                from: a.to_owned(),
                to: b.to_owned(),
                cost,
            });
        }
        for id in [a, b] {
            if !self.0.contains_key(id) {
                return Err(GraphError::UnknownNode(id.to_owned()));
            }
        }

        self.set_half_edge(a, b, cost);
        self.set_half_edge(b, a, cost);
        Ok(())
    }

    fn set_half_edge(&mut self, from: &str, to: &str, cost: f64) {
        if let Some((_, edges)) = self.0.get_mut(from) {
            if let Some(candidate) = edges.iter_mut().find(|e| e.to == to) {
                candidate.cost = cost;
            } else {
                edges.push(Edge {
                    to: to.to_owned(),
                    cost,
                });
            }
        }
    }
}

impl WeightedGraph for Graph {
    fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    fn node_count(&self) -> usize {
        self.len()
    }

    fn neighbors<'a>(
        &'a self,
        id: &str,
    ) -> Result<impl Iterator<Item = &'a str> + 'a, SearchError> {
        let (_, edges) = self
            .0
            .get(id)
            .ok_or_else(|| SearchError::UnknownNode(id.to_owned()))?;
        Ok(edges.iter().map(|e| e.to.as_str()))
    }

    fn edge_weight(&self, from: &str, to: &str) -> Result<f64, SearchError> {
        for id in [from, to] {
            if !self.contains(id) {
                return Err(SearchError::UnknownNode(id.to_owned()));
            }
        }
        self.get_edge(from, to)
            .ok_or_else(|| SearchError::NoSuchEdge(from.to_owned(), to.to_owned()))
    }
}

impl<G: WeightedGraph> WeightedGraph for &G {
    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }

    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn neighbors<'a>(
        &'a self,
        id: &str,
    ) -> Result<impl Iterator<Item = &'a str> + 'a, SearchError> {
        (**self).neighbors(id)
    }

    fn edge_weight(&self, from: &str, to: &str) -> Result<f64, SearchError> {
        (**self).edge_weight(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::default();
        g.set_node(Node::new("A", 0.0, 0.0));
        g.set_node(Node::new("B", 0.0, 1.0));
        g.set_node(Node::new("C", 1.0, 0.0));
        g.set_edge("A", "B", 120.0).unwrap();
        g.set_edge("B", "C", 160.0).unwrap();
        g
    }

    #[test]
    fn edges_are_undirected() {
        let g = triangle();
        assert_eq!(g.edge_weight("A", "B"), Ok(120.0));
        assert_eq!(g.edge_weight("B", "A"), Ok(120.0));
        assert_eq!(g.edge_weight("C", "B"), Ok(160.0));

        let mut neighbors: Vec<&str> = g.neighbors("B").unwrap().collect();
        neighbors.sort();
        assert_eq!(neighbors, ["A", "C"]);
    }

    #[test]
    fn set_edge_replaces_cost() {
        let mut g = triangle();
        g.set_edge("B", "A", 130.0).unwrap();
        assert_eq!(g.get_edge("A", "B"), Some(130.0));
        assert_eq!(g.get_edges("A").len(), 1);
        assert_eq!(g.get_edges("B").len(), 2);
    }

    #[test]
    fn set_node_keeps_edges() {
        let mut g = triangle();
        g.set_node(Node::new("A", 0.5, 0.5));
        assert_eq!(g.len(), 3);
        assert_eq!(g.get_node("A").unwrap().lat, 0.5);
        assert_eq!(g.get_edge("A", "B"), Some(120.0));
    }

    #[test]
    fn set_edge_rejects_invalid() {
        let mut g = triangle();
        assert_eq!(
            g.set_edge("A", "X", 1.0),
            Err(GraphError::UnknownNode("X".to_owned()))
        );
        assert_eq!(g.set_edge("A", "A", 1.0), Err(GraphError::SelfLoop("A".to_owned())));
        assert!(matches!(
            g.set_edge("A", "C", -1.0),
            Err(GraphError::InvalidCost { .. })
        ));
        assert!(matches!(
            g.set_edge("A", "C", f64::NAN),
            Err(GraphError::InvalidCost { .. })
        ));
        assert_eq!(g.get_edge("A", "C"), None);
    }

    #[test]
    fn query_errors() {
        let g = triangle();
        assert_eq!(
            g.neighbors("X").err(),
            Some(SearchError::UnknownNode("X".to_owned()))
        );
        assert_eq!(
            g.edge_weight("A", "X"),
            Err(SearchError::UnknownNode("X".to_owned()))
        );
        assert_eq!(
            g.edge_weight("A", "C"),
            Err(SearchError::NoSuchEdge("A".to_owned(), "C".to_owned()))
        );
    }

    #[test]
    fn find_nearest_node() {
        let g = triangle();
        assert_eq!(g.find_nearest_node(0.1, 0.9).unwrap().id, "B");
        assert_eq!(g.find_nearest_node(0.8, -0.3).unwrap().id, "C");
        assert!(Graph::default().find_nearest_node(0.0, 0.0).is_none());
    }
}
