//! Genetic search for bomb placements against ant nests.
//!
//! A [`Candidate`] is a fixed-length list of bomb positions. Its fitness is the
//! number of ants it kills under the [`KillEvaluator`] model, and an
//! [`Evolution`] loop breeds a population of candidates with roulette
//! selection, single-point crossover and point mutation.
//!
//! ```rust
//! use bombard_ant::{Evolution, Evolver, RunConfig};
//!
//! let mut evo = Evolution::new();
//! evo.reset(RunConfig::default().with_population_size(20))?;
//! evo.run(10)?;
//! assert_eq!(evo.generation(), 10);
//! assert_eq!(evo.population().len(), 20);
//! println!("best kills: {:.1}", evo.best_fitness());
//! # Ok::<(), bombard_ant::EvolutionError>(())
//! ```

/// Scores a bomb layout. Higher is better and results are never negative.
pub trait Evaluator {
    fn evaluate(&self, bombs: &[Point]) -> f64;
}

/// The master engine trait.
pub trait Evolver {
    /// Replaces the population with one new generation.
    fn step(&mut self) -> Result<(), EvolutionError>;
    fn population(&self) -> &[Candidate];
}

pub mod algorithms {
    pub mod generational;
}
pub mod candidate;
pub mod config;
pub mod error;
pub mod fitness;
pub mod geometry;
pub mod nests;
pub mod operators;

pub use algorithms::generational::{Evolution, EvolutionState};
pub use candidate::Candidate;
pub use config::{ConfigError, RunConfig};
pub use error::EvolutionError;
pub use fitness::{KillEvaluator, KillReport};
pub use geometry::{Grid, Point};
pub use nests::NestRegistry;
