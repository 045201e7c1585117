//! Handles the simulation of satellites falling around their anchors

pub mod bodies;
pub mod error;
pub mod scheduler;
pub mod stepper;
pub mod store;
pub mod trail;

pub use crate::bodies::{Body, BodyConfig, Kinemat};
pub use crate::error::{ConfigError, NotFoundError, SatelliteError};
pub use crate::scheduler::{Renderer, Scheduler};
pub use crate::stepper::Stepper;
pub use crate::store::{BodyStore, SatelliteRequest};
pub use crate::trail::{Trail, TRAIL_LENGTH};

pub const GRAV_CONSTANT: f64 = 6.6743e-11;
