use crate::geometry::Grid;
use crate::nests::DEFAULT_NEST_COUNT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be between 0.0 and 1.0, got: {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("population_size must be greater than 0")]
    ZeroPopulation,
    #[error("bombs_per_candidate must be greater than 0")]
    ZeroBombs,
    #[error("at least one nest is required")]
    NoNests,
    #[error("blast_radius must be a non-negative number, got: {0}")]
    NegativeRadius(f64),
    #[error("grid must have positive finite dimensions, got: {width}x{height}")]
    InvalidGrid { width: f64, height: f64 },
}

/// Parameters of one run. Changing any of them means starting over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub population_size: usize,
    pub bombs_per_candidate: usize,
    pub blast_radius: f64,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub max_generations: usize,
    /// How many catalog nests are active, counted from the start.
    pub nest_count: usize,
    pub grid: Grid,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            bombs_per_candidate: 3,
            blast_radius: 10.0,
            crossover_rate: 0.8,
            mutation_rate: 0.02,
            max_generations: 100,
            nest_count: DEFAULT_NEST_COUNT,
            grid: Grid::default(),
        }
    }
}

impl RunConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_bombs_per_candidate(mut self, bombs: usize) -> Self {
        self.bombs_per_candidate = bombs;
        self
    }

    pub fn with_blast_radius(mut self, radius: f64) -> Self {
        self.blast_radius = radius;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    pub fn with_nest_count(mut self, count: usize) -> Self {
        self.nest_count = count;
        self
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.bombs_per_candidate == 0 {
            return Err(ConfigError::ZeroBombs);
        }
        if self.blast_radius.is_nan() || self.blast_radius < 0.0 {
            return Err(ConfigError::NegativeRadius(self.blast_radius));
        }
        validate_rate("crossover_rate", self.crossover_rate)?;
        validate_rate("mutation_rate", self.mutation_rate)?;

        let Grid { width, height } = self.grid;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidGrid { width, height });
        }
        Ok(())
    }
}

fn validate_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::RateOutOfRange { name, value });
    }
    Ok(())
}
