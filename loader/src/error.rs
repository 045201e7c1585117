//! Everything that can go wrong between a scenario file and a BodyStore.

use simulator::{ConfigError, SatelliteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read the scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse the scenario: {0}")]
    Parse(#[from] json5::Error),
    #[error("no prefab body named `{0}`")]
    UnknownPrefab(String),
    /// A form field or color string that doesn't parse.
    #[error("`{value}` is not a valid {field}")]
    Field { field: &'static str, value: String },
    #[error("the timestep has to be finite, not {0}")]
    BadTimestep(f64),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Satellite(#[from] SatelliteError),
}
