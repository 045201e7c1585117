//! Advances the bodies in a BodyStore by one explicit-Euler step.

use crate::bodies::{finite_or_zero, Body};
use crate::store::BodyStore;
use crate::GRAV_CONSTANT;

use euclid::default::{Point3D, Vector3D};
use tracing::{debug, warn};

/// Pushes satellites (and anchors that orbit something) around.
/// Holds no state of its own besides G, so one Stepper can drive any store.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stepper {
    pub grav_constant: f64,
}

/// Just the parts of an anchor that pull on things.
#[derive(Clone, Debug)]
struct Source {
    label: String,
    pos: Point3D<f64>,
    mass: f64,
    radius: f64,
}

impl From<&Body> for Source {
    fn from(body: &Body) -> Self {
        Source {
            label: body.label().to_string(),
            pos: body.position(),
            mass: body.mass(),
            radius: body.radius(),
        }
    }
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new(GRAV_CONSTANT)
    }
}

impl Stepper {
    pub fn new(grav_constant: f64) -> Self {
        Self { grav_constant }
    }

    /// Move the whole store forward by `dt` seconds.
    ///
    /// Anchors that orbit another anchor go first, pulled only by their primary.
    /// Then every live satellite gets pulled by every anchor.
    /// Never fails: bad numbers get zeroed and crashed bodies just stay crashed.
    /// A non-finite `dt` leaves the store untouched.
    pub fn step(&self, store: &mut BodyStore, dt: f64) {
        if !dt.is_finite() {
            warn!(dt, "refusing to step by a non-finite timestep");
            return;
        }

        // Find every orbiting anchor's primary before anything moves.
        let primaries: Vec<(usize, Source)> = store
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| !body.is_terminated())
            .filter_map(|(idx, body)| {
                let primary = body.orbits()?;
                store
                    .bodies
                    .iter()
                    .find(|other| other.label() == primary)
                    .map(|other| (idx, Source::from(other)))
            })
            .collect();
        for (idx, source) in primaries {
            self.advance(&mut store.bodies[idx], &[source], dt);
        }

        let sources: Vec<Source> = store.all_anchors().map(Source::from).collect();
        for sat in store
            .bodies
            .iter_mut()
            .filter(|b| b.is_satellite() && !b.is_terminated())
        {
            self.advance(sat, &sources, dt);
        }
    }

    /// Gravitational acceleration an anchor puts on a point at `at`.
    /// Only x and y matter; z is always zero.
    pub fn gravity_at(&self, anchor: &Body, at: Point3D<f64>) -> Vector3D<f64> {
        let d = at - anchor.position();
        self.pull(anchor.mass(), d, d.x.hypot(d.y))
    }

    /// One Euler step of one body against some anchors.
    fn advance(&self, body: &mut Body, sources: &[Source], dt: f64) {
        body.trail.push(body.kinemat.pos);
        body.kinemat.drift(dt);

        let mut acc: Vector3D<f64> = Vector3D::zero();
        for source in sources {
            let d = body.kinemat.pos - source.pos;
            let distance = d.x.hypot(d.y);
            if distance < source.radius {
                // Splat. Shove it in the middle and leave it there.
                warn!(body = body.label(), into = %source.label, "body crashed");
                body.terminate();
                return;
            }
            acc += self.pull(source.mass, d, distance);
        }

        body.kinemat.kick(dt, acc);
    }

    /// Acceleration toward a mass, given the displacement from it.
    fn pull(&self, mass: f64, d: Vector3D<f64>, distance: f64) -> Vector3D<f64> {
        // Negative means toward the mass.
        let force = -self.grav_constant * mass / (distance * distance);
        let theta = d.y.atan2(d.x);
        let ax = theta.cos() * force;
        let ay = theta.sin() * force;
        if !(ax.is_finite() && ay.is_finite()) {
            debug!(ax, ay, distance, "clamping non-finite acceleration");
        }
        Vector3D::new(finite_or_zero(ax), finite_or_zero(ay), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BodyConfig, Kinemat};

    fn earth() -> BodyConfig {
        BodyConfig::anchor("Earth", 5.97e24, 6_371_000.0)
    }

    fn sat_at(x: f64, y: f64) -> BodyConfig {
        BodyConfig::satellite(
            "JJB01",
            Kinemat::new(Point3D::new(x, y, 0.0), Vector3D::zero()),
        )
    }

    #[test]
    fn pull_points_at_the_anchor_in_every_quadrant() {
        let store = BodyStore::initialize(vec![earth()]).unwrap();
        let earth = store.find_by_label("Earth").unwrap();
        let stepper = Stepper::default();
        let r = 7e6;
        for &(x, y) in &[(r, 0.0), (0.0, r), (-r, 0.0), (0.0, -r), (r, r), (-r, r), (-r, -r), (r, -r)] {
            let acc = stepper.gravity_at(earth, Point3D::new(x, y, 0.0));
            // Acceleration should be antiparallel to the position.
            let dot = acc.x * x + acc.y * y;
            let cross = acc.x * y - acc.y * x;
            assert!(dot < 0.0, "({}, {}) got {:?}", x, y, acc);
            assert!(cross.abs() < 1e-9 * dot.abs(), "({}, {}) got {:?}", x, y, acc);
        }
    }

    #[test]
    fn pull_matches_newton() {
        let store = BodyStore::initialize(vec![earth()]).unwrap();
        let earth = store.find_by_label("Earth").unwrap();
        let acc = Stepper::default().gravity_at(earth, Point3D::new(7e6, 0.0, 0.0));
        let expected = GRAV_CONSTANT * 5.97e24 / (7e6 * 7e6);
        assert!((acc.x + expected).abs() < 1e-12 * expected);
        assert!(acc.y.abs() < 1e-12);
        assert_eq!(acc.z, 0.0);
    }

    #[test]
    fn z_does_not_change_the_distance() {
        let store = BodyStore::initialize(vec![earth()]).unwrap();
        let earth = store.find_by_label("Earth").unwrap();
        let stepper = Stepper::default();
        let flat = stepper.gravity_at(earth, Point3D::new(7e6, 0.0, 0.0));
        let high = stepper.gravity_at(earth, Point3D::new(7e6, 0.0, 1e9));
        assert_eq!(flat, high);
    }

    #[test]
    fn anchors_without_a_primary_stay_put() {
        let mut store = BodyStore::initialize(vec![earth(), sat_at(7e6, 0.0)]).unwrap();
        Stepper::default().step(&mut store, 60.0);
        let earth = store.find_by_label("Earth").unwrap();
        assert!(earth.kinemat().is_zero());
        assert!(earth.trail().is_empty());
    }

    #[test]
    fn position_moves_once_per_step_with_two_anchors() {
        let far_a = BodyConfig::anchor("A", 1.0, 1.0).at(Kinemat::new(
            Point3D::new(1e9, 0.0, 0.0),
            Vector3D::zero(),
        ));
        let far_b = BodyConfig::anchor("B", 1.0, 1.0).at(Kinemat::new(
            Point3D::new(-1e9, 0.0, 0.0),
            Vector3D::zero(),
        ));
        let sat = BodyConfig::satellite(
            "S",
            Kinemat::new(Point3D::new(0.0, 1e6, 0.0), Vector3D::new(10.0, 0.0, 0.0)),
        );
        let mut store = BodyStore::initialize(vec![far_a, far_b, sat]).unwrap();
        Stepper::default().step(&mut store, 2.0);
        let sat = store.find_by_label("S").unwrap();
        assert_eq!(sat.position(), Point3D::new(20.0, 1e6, 0.0));
    }

    #[test]
    fn non_finite_timesteps_are_ignored() {
        let mut store = BodyStore::initialize(vec![earth(), sat_at(7e6, 0.0)]).unwrap();
        let before = store.find_by_label("JJB01").unwrap().kinemat();
        let stepper = Stepper::default();
        for &dt in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            stepper.step(&mut store, dt);
        }
        let sat = store.find_by_label("JJB01").unwrap();
        assert_eq!(sat.kinemat(), before);
        assert!(sat.trail().is_empty());

        stepper.step(&mut store, 1.0);
        let sat = store.find_by_label("JJB01").unwrap();
        assert!(sat.position().x.is_finite() && sat.position().y.is_finite());
    }
}
