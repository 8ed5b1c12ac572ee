// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{earth_distance, Graph, SearchError};

/// Lookup of geographic positions (latitude and longitude, in degrees) of nodes.
pub trait Coordinates {
    fn position(&self, id: &str) -> Option<(f64, f64)>;
}

impl Coordinates for Graph {
    fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.get_node(id).map(|nd| (nd.lat, nd.lon))
    }
}

impl Coordinates for HashMap<String, (f64, f64)> {
    fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.get(id).copied()
    }
}

impl<C: Coordinates + ?Sized> Coordinates for &C {
    fn position(&self, id: &str) -> Option<(f64, f64)> {
        (**self).position(id)
    }
}

/// Estimate of the remaining cost between two nodes, used to order the A* frontier.
///
/// To guarantee optimal routes, the estimate must never exceed the cheapest
/// path cost between the nodes, and it must be symmetric.
pub trait Heuristic {
    fn estimate(&self, a: &str, b: &str) -> Result<f64, SearchError>;
}

/// Great-circle distance between nodes, in kilometers multiplied by `scale`.
///
/// The default scale of 1.0 is admissible if edge costs are at least the
/// crow-flies distance between connected nodes, in kilometers. For other
/// units (e.g. minutes of travel), set `scale` to the reciprocal of the
/// highest possible speed. For costs measured in degrees of latitude/longitude
/// (e.g. euclidean distances between raw coordinates), use a scale of
/// `1.0 / 111.2` (one degree spans 111.195 km on the mean-radius sphere).
#[derive(Debug, Clone)]
pub struct GreatCircle<C> {
    coordinates: C,
    scale: f64,
}

impl<C: Coordinates> GreatCircle<C> {
    pub fn new(coordinates: C) -> Self {
        Self::with_scale(coordinates, 1.0)
    }

    /// Creates a heuristic returning great-circle kilometers multiplied by `scale`.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is negative or not finite.
    pub fn with_scale(coordinates: C, scale: f64) -> Self {
        assert!(scale.is_finite() && scale >= 0.0);
        Self { coordinates, scale }
    }

    fn position(&self, id: &str) -> Result<(f64, f64), SearchError> {
        self.coordinates
            .position(id)
            .ok_or_else(|| SearchError::UnknownNode(id.to_owned()))
    }
}

impl<C: Coordinates> Heuristic for GreatCircle<C> {
    fn estimate(&self, a: &str, b: &str) -> Result<f64, SearchError> {
        let (lat1, lon1) = self.position(a)?;
        let (lat2, lon2) = self.position(b)?;
        Ok(earth_distance(lat1, lon1, lat2, lon2) * self.scale)
    }
}

/// Heuristic always returning zero, which turns A* into Dijkstra's algorithm.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &str, _: &str) -> Result<f64, SearchError> {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> HashMap<String, (f64, f64)> {
        HashMap::from([
            ("Beijing".to_owned(), (39.9042, 116.4074)),
            ("Shanghai".to_owned(), (31.2304, 121.4737)),
            ("Sanya".to_owned(), (18.2528, 109.5119)),
            ("Ningbo".to_owned(), (29.8683, 121.5440)),
        ])
    }

    #[test]
    fn estimate_is_symmetric() {
        let c = cities();
        let h = GreatCircle::new(&c);
        for a in c.keys() {
            for b in c.keys() {
                assert_eq!(h.estimate(a, b), h.estimate(b, a));
            }
            assert_eq!(h.estimate(a, a), Ok(0.0));
        }
    }

    #[test]
    fn estimate_is_scaled() {
        let c = cities();
        let km = GreatCircle::new(&c).estimate("Beijing", "Shanghai").unwrap();
        let hours = GreatCircle::with_scale(&c, 1.0 / 350.0)
            .estimate("Beijing", "Shanghai")
            .unwrap();
        assert!((km / 350.0 - hours).abs() < 1e-9);
    }

    #[test]
    fn degree_scale_is_admissible() {
        let c = cities();
        let h = GreatCircle::with_scale(&c, 1.0 / 111.2);
        for (a, &(lat1, lon1)) in &c {
            for (b, &(lat2, lon2)) in &c {
                let degrees = ((lat1 - lat2).powi(2) + (lon1 - lon2).powi(2)).sqrt();
                assert!(h.estimate(a, b).unwrap() <= degrees + 1e-9);
            }
        }
    }

    #[test]
    #[should_panic]
    fn negative_scale() {
        GreatCircle::with_scale(cities(), -1.0);
    }

    #[test]
    fn estimate_unknown_node() {
        let h = GreatCircle::new(cities());
        assert_eq!(
            h.estimate("Beijing", "Atlantis"),
            Err(SearchError::UnknownNode("Atlantis".to_owned()))
        );
        assert_eq!(
            h.estimate("Atlantis", "Beijing"),
            Err(SearchError::UnknownNode("Atlantis".to_owned()))
        );
    }

    #[test]
    fn zero_heuristic() {
        assert_eq!(ZeroHeuristic.estimate("Atlantis", "Beijing"), Ok(0.0));
    }
}
