use rand::Rng;
use serde::{Deserialize, Serialize};

/// A location on the grid.
///
/// For nests `weight` holds the ant count. Bombs always carry `weight = 0`
/// and the fitness model never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub weight: u32,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, weight: 0 }
    }

    pub fn weighted(x: f64, y: f64, weight: u32) -> Self {
        Self { x, y, weight }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        distance(self, other)
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}

/// Rectangular area bombs are placed in, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

impl Grid {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Draws a bomb point uniformly from `[0, width) x [0, height)`.
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.random::<f64>() * self.width,
            rng.random::<f64>() * self.height,
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}
