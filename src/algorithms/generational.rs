//! Generational genetic algorithm over bomb layouts.
//!
//! Every step replaces the whole population: parents are picked by roulette
//! wheel against one fitness snapshot, each pair yields two children through
//! single-point crossover and mutation, and the children become the next
//! generation. No individual survives a step; instead the loop keeps its own
//! copy of the best candidate ever seen.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --reset--> Ready --step/run--> Running --stop/exhausted--> Stopped
//!                            ^                                               |
//!                            +--------------------reset----------------------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use bombard_ant::{Evolution, EvolutionState, RunConfig};
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//!
//! let mut evo = Evolution::with_rng(Pcg64::seed_from_u64(42));
//! evo.reset(RunConfig::default())?;
//!
//! // Stop as soon as half the ants are dead.
//! evo.run_with(200, |e| {
//!     if e.kill_rate() >= 50.0 {
//!         ControlFlow::Break(())
//!     } else {
//!         ControlFlow::Continue(())
//!     }
//! })?;
//! assert_eq!(evo.state(), EvolutionState::Stopped);
//! # Ok::<(), bombard_ant::EvolutionError>(())
//! ```

use crate::candidate::Candidate;
use crate::config::{ConfigError, RunConfig};
use crate::error::EvolutionError;
use crate::fitness::KillEvaluator;
use crate::nests::NestRegistry;
use crate::operators::{crossover, fittest, roulette_select, total_fitness};
use crate::{Evolver, Point};
use rand::Rng;
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionState {
    /// No population yet.
    Uninitialized,
    /// Freshly seeded, no generation stepped.
    Ready,
    Running,
    Stopped,
}

/// Generational GA engine that owns its configuration, nests and population.
#[derive(Debug)]
pub struct Evolution<R: Rng = Pcg64> {
    config: RunConfig,
    evaluator: KillEvaluator,
    population: Vec<Candidate>,
    best: Option<Candidate>,
    generation: usize,
    state: EvolutionState,
    rng: R,
}

impl Evolution<Pcg64> {
    /// Creates an engine whose generator is seeded from the thread RNG.
    pub fn new() -> Self {
        Self::with_rng(Pcg64::from_rng(&mut rand::rng()))
    }
}

impl Default for Evolution<Pcg64> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Evolution<R> {
    /// Creates an engine drawing all randomness from `rng`.
    pub fn with_rng(rng: R) -> Self {
        let config = RunConfig::default();
        let evaluator = KillEvaluator::new(
            NestRegistry::from_catalog(config.nest_count),
            config.blast_radius,
        );
        Self {
            config,
            evaluator,
            population: Vec::new(),
            best: None,
            generation: 0,
            state: EvolutionState::Uninitialized,
            rng,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn state(&self) -> EvolutionState {
        self.state
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn nests(&self) -> &NestRegistry {
        self.evaluator.nests()
    }

    pub fn evaluator(&self) -> &KillEvaluator {
        &self.evaluator
    }

    /// Best fitness ever observed, 0 before the first reset.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(0.0, Candidate::fitness)
    }

    pub fn best_candidate(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Bomb positions of the best candidate, for drawing.
    pub fn best_bombs(&self) -> &[Point] {
        match &self.best {
            Some(best) => best.bombs(),
            None => &[],
        }
    }

    pub fn total_ants(&self) -> u64 {
        self.nests().total_ants()
    }

    /// Best fitness as a percentage of all ants in the active nests.
    pub fn kill_rate(&self) -> f64 {
        let total = self.total_ants();
        if total == 0 {
            return 0.0;
        }
        self.best_fitness() / total as f64 * 100.0
    }

    /// Whether the configured generation budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.generation >= self.config.max_generations
    }

    /// Starts over with the first `config.nest_count` catalog nests.
    pub fn reset(&mut self, config: RunConfig) -> Result<(), EvolutionError> {
        let nests = NestRegistry::from_catalog(config.nest_count);
        self.reset_with_nests(config, nests)
    }

    /// Starts over against an explicit nest set.
    ///
    /// On error the engine is left as it was.
    #[instrument(
        level = "debug",
        skip_all,
        fields(population_size = config.population_size, nests = nests.len())
    )]
    pub fn reset_with_nests(
        &mut self,
        config: RunConfig,
        nests: NestRegistry,
    ) -> Result<(), EvolutionError> {
        config.validate()?;
        if nests.is_empty() {
            return Err(ConfigError::NoNests.into());
        }

        let evaluator = KillEvaluator::new(nests, config.blast_radius);
        let population: Vec<Candidate> = (0..config.population_size)
            .map(|_| {
                Candidate::random(
                    &mut self.rng,
                    config.bombs_per_candidate,
                    &config.grid,
                    &evaluator,
                )
            })
            .collect();

        self.config = config;
        self.evaluator = evaluator;
        self.population = population;
        self.generation = 0;
        self.best = None;
        self.capture_best();
        self.state = EvolutionState::Ready;

        tracing::info!(
            population_size = self.config.population_size,
            bombs = self.config.bombs_per_candidate,
            total_ants = self.total_ants(),
            best_fitness = self.best_fitness(),
            "Population seeded"
        );
        Ok(())
    }

    /// Steps until `max_generations` is reached, then stops.
    pub fn run(&mut self, max_generations: usize) -> Result<(), EvolutionError> {
        self.run_with(max_generations, |_| ControlFlow::Continue(()))
    }

    /// Like [`run`](Self::run), calling `observer` after every step.
    ///
    /// The observer sees the fully replaced generation and may end the run
    /// early by returning [`ControlFlow::Break`].
    pub fn run_with<F>(
        &mut self,
        max_generations: usize,
        mut observer: F,
    ) -> Result<(), EvolutionError>
    where
        F: FnMut(&Self) -> ControlFlow<()>,
    {
        if self.population.is_empty() {
            return Err(EvolutionError::InvalidState);
        }

        self.state = EvolutionState::Running;
        while self.generation < max_generations {
            self.step()?;
            if observer(self).is_break() {
                break;
            }
        }
        self.stop();
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.state == EvolutionState::Uninitialized {
            return;
        }
        self.state = EvolutionState::Stopped;
        tracing::info!(
            generation = self.generation,
            best_fitness = self.best_fitness(),
            "Evolution stopped"
        );
    }

    /// Keeps a copy of the fittest current candidate if it beats the record.
    fn capture_best(&mut self) {
        let Some(idx) = fittest(&self.population) else {
            return;
        };
        let candidate = &self.population[idx];
        if self
            .best
            .as_ref()
            .is_none_or(|best| candidate.fitness() > best.fitness())
        {
            tracing::debug!(
                generation = self.generation,
                fitness = candidate.fitness(),
                "New best candidate"
            );
            self.best = Some(candidate.clone());
        }
    }
}

impl<R: Rng> Evolver for Evolution<R> {
    #[instrument(level = "debug", skip(self), fields(generation = self.generation))]
    fn step(&mut self) -> Result<(), EvolutionError> {
        if self.population.is_empty() {
            return Err(EvolutionError::InvalidState);
        }

        self.capture_best();

        // One snapshot for every spin in this generation.
        let total = total_fitness(&self.population);
        let size = self.config.population_size;
        let mut next_gen = Vec::with_capacity(size);
        for _ in (0..size).step_by(2) {
            let p1 = roulette_select(&mut self.rng, &self.population, total);
            let p2 = roulette_select(&mut self.rng, &self.population, total);
            let (child1, child2) = crossover(
                &mut self.rng,
                &self.population[p1],
                &self.population[p2],
                self.config.crossover_rate,
                self.config.mutation_rate,
                &self.config.grid,
                &self.evaluator,
            );
            next_gen.push(child1);
            if next_gen.len() < size {
                next_gen.push(child2);
            }
        }

        self.population = next_gen;
        self.generation += 1;
        self.capture_best();
        if self.state == EvolutionState::Ready {
            self.state = EvolutionState::Running;
        }
        Ok(())
    }

    fn population(&self) -> &[Candidate] {
        &self.population
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Evolution<Pcg64> {
        Evolution::with_rng(Pcg64::seed_from_u64(seed))
    }

    #[test]
    fn test_new_engine_is_uninitialized() {
        let evo = seeded(1);
        assert_eq!(evo.state(), EvolutionState::Uninitialized);
        assert!(evo.population().is_empty());
        assert_eq!(evo.best_fitness(), 0.0);
        assert!(evo.best_bombs().is_empty());
    }

    #[test]
    fn test_step_before_reset_is_invalid() {
        let mut evo = seeded(1);
        assert_eq!(evo.step(), Err(EvolutionError::InvalidState));
        assert_eq!(evo.run(5), Err(EvolutionError::InvalidState));
    }

    #[test]
    fn test_stop_before_reset_is_noop() {
        let mut evo = seeded(1);
        evo.stop();
        assert_eq!(evo.state(), EvolutionState::Uninitialized);
    }

    #[test]
    fn test_reset_seeds_population_and_best() {
        let mut evo = seeded(2);
        evo.reset(RunConfig::default().with_population_size(12)).unwrap();
        assert_eq!(evo.state(), EvolutionState::Ready);
        assert_eq!(evo.population().len(), 12);
        assert_eq!(evo.generation(), 0);
        let seed_best = evo
            .population()
            .iter()
            .map(Candidate::fitness)
            .fold(0.0, f64::max);
        assert_eq!(evo.best_fitness(), seed_best);
    }

    #[test]
    fn test_invalid_reset_keeps_previous_run() {
        let mut evo = seeded(3);
        evo.reset(RunConfig::default()).unwrap();
        evo.run(3).unwrap();
        let err = evo
            .reset(RunConfig::default().with_mutation_rate(2.0))
            .unwrap_err();
        assert!(matches!(err, EvolutionError::Config(_)));
        assert_eq!(evo.generation(), 3);
        assert_eq!(evo.state(), EvolutionState::Stopped);
    }

    #[test]
    fn test_reset_without_nests_fails() {
        let mut evo = seeded(4);
        let err = evo
            .reset(RunConfig::default().with_nest_count(0))
            .unwrap_err();
        assert_eq!(err, EvolutionError::Config(ConfigError::NoNests));
    }

    #[test]
    fn test_odd_population_size_is_preserved() {
        let mut evo = seeded(5);
        evo.reset(RunConfig::default().with_population_size(7)).unwrap();
        for _ in 0..5 {
            evo.step().unwrap();
            assert_eq!(evo.population().len(), 7);
        }
    }

    #[test]
    fn test_step_marks_running() {
        let mut evo = seeded(6);
        evo.reset(RunConfig::default()).unwrap();
        evo.step().unwrap();
        assert_eq!(evo.state(), EvolutionState::Running);
        assert_eq!(evo.generation(), 1);
    }

    #[test]
    fn test_run_with_break_stops_early() {
        let mut evo = seeded(7);
        evo.reset(RunConfig::default()).unwrap();
        evo.run_with(100, |e| {
            if e.generation() == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(evo.generation(), 4);
        assert_eq!(evo.state(), EvolutionState::Stopped);
    }

    #[test]
    fn test_run_resumes_after_stop() {
        let mut evo = seeded(8);
        evo.reset(RunConfig::default()).unwrap();
        evo.run(2).unwrap();
        evo.run(5).unwrap();
        assert_eq!(evo.generation(), 5);
        assert_eq!(evo.state(), EvolutionState::Stopped);
    }

    #[test]
    fn test_kill_rate_is_relative_to_total_ants() {
        let mut evo = seeded(9);
        evo.reset(RunConfig::default()).unwrap();
        let expected = evo.best_fitness() / evo.total_ants() as f64 * 100.0;
        assert_eq!(evo.kill_rate(), expected);
    }
}
