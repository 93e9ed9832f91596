//! Target sites and the built-in nest catalog.

use crate::geometry::{Point, distance};
use serde::{Deserialize, Serialize};

/// Built-in nests as `(x, y, ants)`.
const CATALOG: [(f64, f64, u32); 12] = [
    (25.0, 65.0, 100),
    (23.0, 8.0, 200),
    (7.0, 13.0, 327),
    (95.0, 53.0, 440),
    (3.0, 3.0, 450),
    (54.0, 56.0, 639),
    (67.0, 78.0, 650),
    (32.0, 4.0, 678),
    (24.0, 76.0, 750),
    (66.0, 89.0, 801),
    (84.0, 4.0, 945),
    (34.0, 23.0, 967),
];

/// Number of catalog nests that are active when nothing else is requested.
pub const DEFAULT_NEST_COUNT: usize = 8;

/// The full built-in catalog, in order.
pub fn catalog() -> Vec<Point> {
    CATALOG
        .iter()
        .map(|&(x, y, ants)| Point::weighted(x, y, ants))
        .collect()
}

/// Ordered, read-only set of nests for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestRegistry {
    nests: Vec<Point>,
}

impl Default for NestRegistry {
    fn default() -> Self {
        Self::from_catalog(DEFAULT_NEST_COUNT)
    }
}

impl NestRegistry {
    pub fn new(nests: Vec<Point>) -> Self {
        Self { nests }
    }

    /// The first `count` catalog nests. Counts past the catalog size are clamped.
    pub fn from_catalog(count: usize) -> Self {
        let mut nests = catalog();
        nests.truncate(count);
        Self { nests }
    }

    pub fn nests(&self) -> &[Point] {
        &self.nests
    }

    pub fn len(&self) -> usize {
        self.nests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nests.is_empty()
    }

    pub fn total_ants(&self) -> u64 {
        self.nests.iter().map(|n| u64::from(n.weight)).sum()
    }

    /// Largest distance between any two nests, or 0 with fewer than two.
    pub fn max_pairwise_distance(&self) -> f64 {
        let mut dmax = 0.0;
        for (i, a) in self.nests.iter().enumerate() {
            for b in &self.nests[i + 1..] {
                let d = distance(a, b);
                if d > dmax {
                    dmax = d;
                }
            }
        }
        dmax
    }
}
