// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::SearchError;

/// Walks the predecessor links back from `goal` to `start` and returns the
/// visited nodes in start-to-goal order.
///
/// `came_from` must map `start` to `None`. The walk gives up after visiting
/// `bound` nodes, as a longer path would mean the links form a cycle.
pub(super) fn reconstruct_path(
    came_from: &HashMap<&str, Option<&str>>,
    start: &str,
    goal: &str,
    bound: usize,
) -> Result<Vec<String>, SearchError> {
    let mut path = vec![goal.to_owned()];
    let mut last = goal;

    while last != start {
        last = match came_from.get(last) {
            Some(&Some(nd)) => nd,
            _ => return Err(SearchError::path_not_found(start, goal)),
        };

        path.push(last.to_owned());
        if path.len() > bound {
            return Err(SearchError::path_not_found(start, goal));
        }
    }

    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstruct() {
        let came_from = HashMap::from([
            ("A", None),
            ("B", Some("A")),
            ("C", Some("B")),
            ("D", Some("A")),
        ]);
        assert_eq!(
            reconstruct_path(&came_from, "A", "C", 4).unwrap(),
            ["A", "B", "C"]
        );
        assert_eq!(reconstruct_path(&came_from, "A", "D", 4).unwrap(), ["A", "D"]);
        assert_eq!(reconstruct_path(&came_from, "A", "A", 4).unwrap(), ["A"]);
    }

    #[test]
    fn reconstruct_missing_goal() {
        let came_from = HashMap::from([("A", None), ("B", Some("A"))]);
        assert_eq!(
            reconstruct_path(&came_from, "A", "C", 3),
            Err(SearchError::path_not_found("A", "C"))
        );
    }

    #[test]
    fn reconstruct_broken_chain() {
        // "B" doesn't lead back to "A"
        let came_from = HashMap::from([("A", None), ("B", None), ("C", Some("B"))]);
        assert_eq!(
            reconstruct_path(&came_from, "A", "C", 3),
            Err(SearchError::path_not_found("A", "C"))
        );
    }

    #[test]
    fn reconstruct_cycle() {
        let came_from = HashMap::from([
            ("A", None),
            ("B", Some("C")),
            ("C", Some("B")),
        ]);
        assert_eq!(
            reconstruct_path(&came_from, "A", "C", 3),
            Err(SearchError::path_not_found("A", "C"))
        );
    }
}
