use crate::Evaluator;
use crate::geometry::{Grid, Point};
use rand::Rng;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One bomb layout and the kills it scores.
///
/// `fitness` is only ever written by a full evaluation of the current genes,
/// so it cannot drift out of sync with `bombs`.
///
/// Serializes as its genes only. There is no `Deserialize`: a stored layout
/// is loaded back through [`Candidate::new`] so its fitness is recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    bombs: Vec<Point>,
    fitness: f64,
}

impl Candidate {
    /// Copies `bombs` (dropping any weight) and evaluates them.
    pub fn new<E: Evaluator + ?Sized>(bombs: &[Point], evaluator: &E) -> Self {
        let bombs: Vec<Point> = bombs.iter().map(|b| Point::new(b.x, b.y)).collect();
        let fitness = evaluator.evaluate(&bombs);
        Self { bombs, fitness }
    }

    /// A layout of `count` uniformly placed bombs.
    pub fn random<R: Rng, E: Evaluator + ?Sized>(
        rng: &mut R,
        count: usize,
        grid: &Grid,
        evaluator: &E,
    ) -> Self {
        let bombs: Vec<Point> = (0..count).map(|_| grid.random_point(rng)).collect();
        Self::new(&bombs, evaluator)
    }

    pub fn bombs(&self) -> &[Point] {
        &self.bombs
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Re-draws each bomb with probability `rate`, then re-evaluates once.
    pub fn mutate<R: Rng, E: Evaluator + ?Sized>(
        &mut self,
        rng: &mut R,
        rate: f64,
        grid: &Grid,
        evaluator: &E,
    ) {
        for bomb in &mut self.bombs {
            if rng.random::<f64>() < rate {
                *bomb = grid.random_point(rng);
            }
        }
        self.fitness = evaluator.evaluate(&self.bombs);
    }
}

impl Serialize for Candidate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Candidate", 1)?;
        state.serialize_field("bombs", &self.bombs)?;
        state.end()
    }
}
