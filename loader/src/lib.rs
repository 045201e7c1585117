//! The root of this crate doesn't do anything.
//! It just re-exports its contents.

pub mod constellation;
pub mod deserialize;
pub mod error;
pub mod form;
pub mod prefabs; // prefabs::bodies::whatever
pub use constellation::Constellation;
pub use deserialize::*;
pub use error::LoadError;
pub use form::SatelliteForm;

#[macro_use]
extern crate lazy_static;
