//! Selection and recombination on candidates.

use crate::Evaluator;
use crate::candidate::Candidate;
use crate::geometry::{Grid, Point};
use rand::Rng;
use tracing::instrument;

/// Sum of fitness over a population.
pub fn total_fitness(population: &[Candidate]) -> f64 {
    population.iter().map(Candidate::fitness).sum()
}

/// Index of the fittest candidate. Earlier candidates win ties.
pub fn fittest(population: &[Candidate]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, c) in population.iter().enumerate() {
        if best.is_none_or(|b| c.fitness() > population[b].fitness()) {
            best = Some(i);
        }
    }
    best
}

/// Fitness-proportionate parent selection.
///
/// Spins once over `total_fitness` and walks the population in order until the
/// running sum reaches the spin. When `total_fitness` is not positive every
/// index is equally likely. If rounding keeps the running sum short of the
/// spin, the last index is returned.
///
/// # Panics
///
/// Panics if `population` is empty.
#[instrument(level = "debug", skip(rng, population), fields(population_size = population.len()))]
pub fn roulette_select<R: Rng>(
    rng: &mut R,
    population: &[Candidate],
    total_fitness: f64,
) -> usize {
    assert!(!population.is_empty(), "cannot select from an empty population");
    if total_fitness <= 0.0 || !total_fitness.is_finite() {
        return rng.random_range(0..population.len());
    }

    let slice = rng.random_range(0.0..total_fitness);
    let mut cumulative = 0.0;
    for (i, c) in population.iter().enumerate() {
        cumulative += c.fitness();
        if cumulative >= slice {
            return i;
        }
    }
    population.len() - 1
}

/// Exchanges genes after index `point`: the first child keeps `parent1` up to
/// and including `point` and takes `parent2` after it; the second child is the
/// mirror image. No mutation is applied.
pub fn crossover_at<E: Evaluator + ?Sized>(
    parent1: &Candidate,
    parent2: &Candidate,
    point: usize,
    evaluator: &E,
) -> (Candidate, Candidate) {
    let (genes1, genes2): (Vec<Point>, Vec<Point>) = parent1
        .bombs()
        .iter()
        .zip(parent2.bombs())
        .enumerate()
        .map(|(i, (&a, &b))| if i <= point { (a, b) } else { (b, a) })
        .unzip();
    (
        Candidate::new(&genes1, evaluator),
        Candidate::new(&genes2, evaluator),
    )
}

/// Single-point crossover followed by mutation of both children.
///
/// With probability `crossover_rate` a cut point is drawn from
/// `0..bombs_per_candidate` and genes are exchanged with [`crossover_at`];
/// otherwise the children start as copies of their parents.
#[instrument(
    level = "debug",
    skip_all,
    fields(crossover_rate = crossover_rate, mutation_rate = mutation_rate)
)]
pub fn crossover<R: Rng, E: Evaluator + ?Sized>(
    rng: &mut R,
    parent1: &Candidate,
    parent2: &Candidate,
    crossover_rate: f64,
    mutation_rate: f64,
    grid: &Grid,
    evaluator: &E,
) -> (Candidate, Candidate) {
    let len = parent1.bombs().len();
    let (mut child1, mut child2) = if len > 0 && rng.random::<f64>() < crossover_rate {
        let point = rng.random_range(0..len);
        crossover_at(parent1, parent2, point, evaluator)
    } else {
        (
            Candidate::new(parent1.bombs(), evaluator),
            Candidate::new(parent2.bombs(), evaluator),
        )
    };

    child1.mutate(rng, mutation_rate, grid, evaluator);
    child2.mutate(rng, mutation_rate, grid, evaluator);
    (child1, child2)
}
