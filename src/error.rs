use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolutionError {
    #[error("InvalidState: population is empty, call reset() first")]
    InvalidState,
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
}
