//! What can go wrong when building or querying a BodyStore.

use thiserror::Error;

/// The starting bodies (or a new satellite) don't make sense.
/// Fatal when building a store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("two bodies are labelled `{0}`")]
    DuplicateLabel(String),
    #[error("body `{label}` has a non-positive mass of {mass} kg")]
    NonPositiveMass { label: String, mass: f64 },
    #[error("body `{label}` has a non-positive radius of {radius} m")]
    NonPositiveRadius { label: String, radius: f64 },
    #[error("body `{label}` has a non-finite {field}")]
    NonFinite { label: String, field: &'static str },
    #[error("anchor `{label}` orbits `{primary}`, which is not an anchor in the store")]
    BadPrimary { label: String, primary: String },
    #[error("satellite `{0}` can't orbit a single anchor; satellites feel every anchor")]
    SatelliteWithPrimary(String),
}

/// Nothing in the store has that label.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("no body labelled `{0}`")]
pub struct NotFoundError(pub String);

/// Why `add_satellite` refused.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SatelliteError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
