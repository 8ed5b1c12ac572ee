// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest routes between geographically located cities.
//!
//! Cities are kept in an undirected, weighted [Graph], and routes are found
//! with A*, using the great-circle distance between cities as the heuristic.
//!
//! # Example
//!
//! ```
//! use cityroute::{AStar, GreatCircle, Graph, Node};
//!
//! let mut g = Graph::default();
//! g.set_node(Node::new("Ningbo", 29.87, 121.54));
//! g.set_node(Node::new("Hangzhou", 30.27, 120.15));
//! g.set_node(Node::new("Shanghai", 31.23, 121.47));
//! g.set_edge("Ningbo", "Hangzhou", 160.0).unwrap();
//! g.set_edge("Hangzhou", "Shanghai", 190.0).unwrap();
//!
//! let astar = AStar::new(&g, GreatCircle::new(&g));
//! let route = astar.search("Ningbo", "Shanghai").unwrap();
//! assert_eq!(route.path, ["Ningbo", "Hangzhou", "Shanghai"]);
//! assert_eq!(route.cost, 350.0);
//! ```

mod astar;
mod distance;
mod graph;
mod heuristic;
pub mod io;

pub use astar::{find_route, AStar, SearchError, DEFAULT_STEP_LIMIT};
pub use distance::earth_distance;
pub use graph::{Graph, GraphError, WeightedGraph};
pub use heuristic::{Coordinates, GreatCircle, Heuristic, ZeroHeuristic};

/// Represents a city in the [Graph], identified by its unique name.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new<S: Into<String>>(id: S, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }
}

/// Represents one direction of an undirected connection from a specific [Node].
///
/// `cost` is always finite and non-negative, and the [Graph] keeps
/// a matching edge with the same `cost` in the opposite direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: String,
    pub cost: f64,
}

/// Shortest path found by [find_route] or [AStar::search].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Identifiers of the visited nodes, from the start to the goal (inclusive).
    pub path: Vec<String>,

    /// Sum of edge costs along `path`.
    pub cost: f64,
}
