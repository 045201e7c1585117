//! Handles bodies and such

use crate::trail::Trail;
use euclid::default::{Point3D, Vector3D};

/// A Kinemat holds all the kinematic information about something.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Kinemat {
    pub pos: Point3D<f64>,
    pub vel: Vector3D<f64>,
}

impl Kinemat {
    pub fn new(pos: Point3D<f64>, vel: Vector3D<f64>) -> Self {
        Self { pos, vel }
    }

    pub fn zero() -> Self {
        Self {
            pos: Point3D::zero(),
            vel: Vector3D::zero(),
        }
    }

    /// Move along the current velocity for `dt` seconds.
    pub fn drift(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Apply a planar acceleration for `dt` seconds.
    /// Non-finite velocity components are zeroed instead of kept.
    pub fn kick(&mut self, dt: f64, acc: Vector3D<f64>) {
        self.vel.x = finite_or_zero(self.vel.x + acc.x * dt);
        self.vel.y = finite_or_zero(self.vel.y + acc.y * dt);
    }

    pub fn is_zero(&self) -> bool {
        *self == Kinemat::zero()
    }
}

/// Everything needed to put one body into a [`BodyStore`](crate::BodyStore).
/// Checked when the store is built, not here.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub label: String,
    pub kinemat: Kinemat,
    /// kg
    pub mass: f64,
    /// m
    pub radius: f64,
    /// Satellites get pulled around. Everything else is an anchor.
    pub satellite: bool,
    /// Color is stored as 0xRRGGBB. The simulator never looks at it.
    pub color: Option<u32>,
    /// Label of the anchor this anchor goes around, if any.
    pub orbits: Option<String>,
}

impl BodyConfig {
    /// An anchor that stays put unless told to orbit something.
    pub fn anchor(label: &str, mass: f64, radius: f64) -> Self {
        Self {
            label: label.to_string(),
            kinemat: Kinemat::zero(),
            mass,
            radius,
            satellite: false,
            color: None,
            orbits: None,
        }
    }

    /// A satellite at `kinemat`.
    pub fn satellite(label: &str, kinemat: Kinemat) -> Self {
        Self {
            label: label.to_string(),
            kinemat,
            mass: SATELLITE_MASS,
            radius: SATELLITE_RADIUS,
            satellite: true,
            color: None,
            orbits: None,
        }
    }

    pub fn at(mut self, kinemat: Kinemat) -> Self {
        self.kinemat = kinemat;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn orbiting(mut self, primary: &str) -> Self {
        self.orbits = Some(primary.to_string());
        self
    }
}

/// The representation of a body, like a star, planet, satellite...
/// Only the store can make one, so mass and radius are always positive.
#[derive(Clone, Debug)]
pub struct Body {
    label: String,
    pub(crate) kinemat: Kinemat,
    mass: f64,
    radius: f64,
    satellite: bool,
    color: Option<u32>,
    orbits: Option<String>,
    pub(crate) trail: Trail,
    /// Set once the body has crashed into an anchor.
    pub(crate) terminated: bool,
}

impl Body {
    /// Build a body from an already-validated config.
    pub(crate) fn from_config(config: BodyConfig) -> Self {
        Self {
            label: config.label,
            kinemat: config.kinemat,
            mass: config.mass,
            radius: config.radius,
            satellite: config.satellite,
            color: config.color,
            orbits: config.orbits,
            trail: Trail::default(),
            terminated: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kinemat(&self) -> Kinemat {
        self.kinemat
    }

    pub fn position(&self) -> Point3D<f64> {
        self.kinemat.pos
    }

    pub fn velocity(&self) -> Vector3D<f64> {
        self.kinemat.vel
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_satellite(&self) -> bool {
        self.satellite
    }

    pub fn is_anchor(&self) -> bool {
        !self.satellite
    }

    pub fn color(&self) -> Option<u32> {
        self.color
    }

    /// The anchor this one goes around, for anchors that move.
    pub fn orbits(&self) -> Option<&str> {
        self.orbits.as_deref()
    }

    /// Recent positions, oldest first.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Whether this body crashed and is now parked at the origin for good.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Park the body at the origin and stop it forever.
    pub(crate) fn terminate(&mut self) {
        self.kinemat = Kinemat::zero();
        self.terminated = true;
    }
}

pub(crate) fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Satellites are point-ish: 1 kg, 1 m.
pub const SATELLITE_MASS: f64 = 1.0;
pub const SATELLITE_RADIUS: f64 = 1.0;
