//! Kill model used as the fitness of a bomb layout.
//!
//! A bomb kills ants at every nest inside its blast radius. The number killed
//! grows with the bomb-nest distance and with the spread of the whole nest
//! set (`dmax`), and is capped by the ants still alive at that nest. Bombs are
//! applied in gene order against a shared pool of remaining ants, so a nest
//! emptied by an earlier bomb gives nothing to later ones.

use crate::Evaluator;
use crate::geometry::{Point, distance};
use crate::nests::NestRegistry;

/// Floor added to every kill so a bomb sitting on a nest still scores.
pub const KILL_EPSILON: f64 = 0.00001;

/// Divisor applied to `dmax` when scaling kills.
const DMAX_SCALE: f64 = 20.0;

/// Raw kill count for one bomb against one nest, before clamping.
pub fn kill_contribution(ants: f64, dmax: f64, distance: f64) -> f64 {
    ants * (dmax / DMAX_SCALE) * distance + KILL_EPSILON
}

/// Per-nest breakdown of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct KillReport {
    pub total_kills: f64,
    /// Ants killed at each nest, in registry order.
    pub kills: Vec<f64>,
    /// Ants left at each nest, in registry order.
    pub remaining: Vec<f64>,
}

/// Fitness evaluator bound to one nest set and blast radius.
#[derive(Debug, Clone)]
pub struct KillEvaluator {
    nests: NestRegistry,
    blast_radius: f64,
    dmax: f64,
}

impl KillEvaluator {
    pub fn new(nests: NestRegistry, blast_radius: f64) -> Self {
        let dmax = nests.max_pairwise_distance();
        Self {
            nests,
            blast_radius,
            dmax,
        }
    }

    pub fn nests(&self) -> &NestRegistry {
        &self.nests
    }

    pub fn blast_radius(&self) -> f64 {
        self.blast_radius
    }

    /// Maximum pairwise nest distance, computed once per nest set.
    pub fn dmax(&self) -> f64 {
        self.dmax
    }

    /// Runs the kill simulation and keeps the per-nest tallies.
    pub fn evaluate_detailed(&self, bombs: &[Point]) -> KillReport {
        let nests = self.nests.nests();
        let mut remaining: Vec<f64> = nests.iter().map(|n| f64::from(n.weight)).collect();
        let mut kills = vec![0.0; nests.len()];
        let mut total_kills = 0.0;

        for bomb in bombs {
            for (i, nest) in nests.iter().enumerate() {
                let d = distance(nest, bomb);
                if d > self.blast_radius || remaining[i] <= 0.0 {
                    continue;
                }
                let raw = kill_contribution(remaining[i], self.dmax, d);
                let taken = if raw >= remaining[i] {
                    remaining[i]
                } else {
                    raw
                };
                remaining[i] -= taken;
                kills[i] += taken;
                total_kills += taken;
            }
        }

        KillReport {
            total_kills,
            kills,
            remaining,
        }
    }
}

impl Evaluator for KillEvaluator {
    fn evaluate(&self, bombs: &[Point]) -> f64 {
        self.evaluate_detailed(bombs).total_kills
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_nests() -> NestRegistry {
        NestRegistry::new(vec![
            Point::weighted(0.0, 0.0, 100),
            Point::weighted(3.0, 4.0, 100),
        ])
    }

    #[test]
    fn test_bomb_on_lone_nest_scores_epsilon() {
        let nests = NestRegistry::new(vec![Point::weighted(0.0, 0.0, 100)]);
        let eval = KillEvaluator::new(nests, 10.0);
        assert_eq!(eval.dmax(), 0.0);
        let fitness = eval.evaluate(&[Point::new(0.0, 0.0)]);
        assert!((fitness - KILL_EPSILON).abs() < 1e-12, "got {fitness}");
    }

    #[test]
    fn test_out_of_radius_bomb_scores_nothing() {
        let eval = KillEvaluator::new(two_nests(), 1.0);
        assert_eq!(eval.evaluate(&[Point::new(50.0, 50.0)]), 0.0);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        // Bomb at (3, 0): 3 from the first nest, 4 from the second.
        let eval = KillEvaluator::new(two_nests(), 3.0);
        let report = eval.evaluate_detailed(&[Point::new(3.0, 0.0)]);
        assert!(report.kills[0] > 0.0);
        assert_eq!(report.kills[1], 0.0);
    }

    #[test]
    fn test_partial_kill_uses_formula() {
        // dmax = 5, d = 0.1 -> 100 * 0.25 * 0.1 + eps = 2.50001
        let eval = KillEvaluator::new(two_nests(), 1.0);
        let fitness = eval.evaluate(&[Point::new(0.1, 0.0)]);
        assert!((fitness - 2.50001).abs() < 1e-9, "got {fitness}");
    }

    #[test]
    fn test_large_kill_exhausts_nest() {
        // dmax = 5, d = 5 -> 100 * 0.25 * 5 = 125 >= 100, clamps to 100.
        let eval = KillEvaluator::new(two_nests(), 10.0);
        let report = eval.evaluate_detailed(&[Point::new(0.0, 5.0)]);
        assert_eq!(report.kills[0], 100.0);
        assert_eq!(report.remaining[0], 0.0);
    }

    #[test]
    fn test_later_bombs_see_depleted_pool() {
        let eval = KillEvaluator::new(two_nests(), 1.0);
        let bomb = Point::new(0.1, 0.0);
        let single = eval.evaluate(&[bomb]);
        let double = eval.evaluate(&[bomb, bomb]);
        // Second bomb works on 100 - 2.50001 ants, so it adds less than the first.
        let second = double - single;
        assert!(second > 0.0);
        assert!(second < single);
        let expected = kill_contribution(100.0 - single, 5.0, 0.1);
        assert!((second - expected).abs() < 1e-9);
    }

    #[test]
    fn test_exhausted_nest_yields_nothing_more() {
        let eval = KillEvaluator::new(two_nests(), 10.0);
        let bomb = Point::new(0.0, 5.0);
        let report = eval.evaluate_detailed(&[bomb, bomb, bomb]);
        assert_eq!(report.kills[0], 100.0);
    }

    #[test]
    fn test_evaluation_leaves_registry_untouched() {
        let nests = two_nests();
        let eval = KillEvaluator::new(nests.clone(), 10.0);
        eval.evaluate(&[Point::new(0.0, 5.0), Point::new(3.0, 4.0)]);
        assert_eq!(eval.nests(), &nests);
    }

    #[test]
    fn test_empty_layout_scores_zero() {
        let eval = KillEvaluator::new(two_nests(), 10.0);
        assert_eq!(eval.evaluate(&[]), 0.0);
    }
}
