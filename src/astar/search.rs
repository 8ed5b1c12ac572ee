// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::path::reconstruct_path;
use crate::{Heuristic, Route, SearchError, WeightedGraph, DEFAULT_STEP_LIMIT};

#[derive(Debug, Clone, Copy)]
struct FrontierItem<'a> {
    at: &'a str,
    cost: f64,
    score: f64,
    seq: u64,
}

impl PartialEq for FrontierItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierItem<'_> {}

impl PartialOrd for FrontierItem<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierItem<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Among equal scores, items pushed earlier win.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the cheapest route between two nodes in the provided graph.
///
/// The route is optimal as long as edge costs are non-negative and `heuristic`
/// never overestimates the remaining cost. Frontier entries with equal
/// priorities are expanded in insertion order, so results are reproducible.
///
/// Fails with [SearchError::UnknownNode] if `start` or `goal` doesn't exist,
/// and with [SearchError::PathNotFound] if `goal` is unreachable from `start`.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [SearchError::StepLimitExceeded]. Concluding that no route exists requires
/// expanding all nodes accessible from the start. The recommended value is
/// [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route<'a, G, H>(
    g: &'a G,
    heuristic: &H,
    start: &'a str,
    goal: &'a str,
    step_limit: usize,
) -> Result<Route, SearchError>
where
    G: WeightedGraph,
    H: Heuristic + ?Sized,
{
    for id in [start, goal] {
        if !g.contains(id) {
            return Err(SearchError::UnknownNode(id.to_owned()));
        }
    }

    if start == goal {
        return Ok(Route {
            path: vec![start.to_owned()],
            cost: 0.0,
        });
    }

    let mut frontier: BinaryHeap<FrontierItem<'a>> = BinaryHeap::default();
    let mut came_from: HashMap<&'a str, Option<&'a str>> = HashMap::default();
    let mut cost_so_far: HashMap<&'a str, f64> = HashMap::default();
    let mut seq: u64 = 0;
    let mut steps: usize = 0;

    frontier.push(FrontierItem {
        at: start,
        cost: 0.0,
        score: 0.0,
        seq,
    });
    came_from.insert(start, None);
    cost_so_far.insert(start, 0.0);

    while let Some(item) = frontier.pop() {
        if item.at == goal {
            break;
        }

        // Contrary to the wikipedia definition, we might keep multiple items in the queue for the same node.
        if item.cost > cost_so_far.get(item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        steps += 1;
        if steps > step_limit {
            log::debug!("search {start} -> {goal}: step limit of {step_limit} exceeded");
            return Err(SearchError::StepLimitExceeded);
        }

        log::trace!("expanding {} (cost {})", item.at, item.cost);

        for neighbor in g.neighbors(item.at)? {
            // Check if this is the cheapest way to the neighbor
            let neighbor_cost = item.cost + g.edge_weight(item.at, neighbor)?;
            if let Some(&known) = cost_so_far.get(neighbor) {
                if neighbor_cost >= known {
                    continue;
                }
            }

            // Push the new item into the queue
            seq += 1;
            cost_so_far.insert(neighbor, neighbor_cost);
            came_from.insert(neighbor, Some(item.at));
            frontier.push(FrontierItem {
                at: neighbor,
                cost: neighbor_cost,
                score: neighbor_cost + heuristic.estimate(goal, neighbor)?,
                seq,
            });
        }
    }

    let cost = cost_so_far
        .get(goal)
        .copied()
        .ok_or_else(|| SearchError::path_not_found(start, goal))?;
    let path = reconstruct_path(&came_from, start, goal, g.node_count())?;

    log::debug!(
        "search {start} -> {goal}: cost {cost}, {} nodes, {steps} expansions",
        path.len()
    );
    Ok(Route { path, cost })
}

/// A* route finder bound to a specific graph and heuristic.
///
/// Searches only borrow the graph and the heuristic, so a single
/// (shared) `AStar` can serve many searches at once.
#[derive(Debug, Clone)]
pub struct AStar<G, H> {
    graph: G,
    heuristic: H,
    step_limit: usize,
}

impl<G, H> AStar<G, H>
where
    G: WeightedGraph,
    H: Heuristic,
{
    pub fn new(graph: G, heuristic: H) -> Self {
        Self {
            graph,
            heuristic,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Overrides the maximum number of node expansions per search,
    /// [DEFAULT_STEP_LIMIT] by default.
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Finds the cheapest route from `start` to `goal`, see [find_route].
    pub fn search<'a>(&'a self, start: &'a str, goal: &'a str) -> Result<Route, SearchError> {
        find_route(&self.graph, &self.heuristic, start, goal, self.step_limit)
    }
}
