//! Drives the simulation from a display refresh: step, then draw.

use crate::stepper::Stepper;
use crate::store::BodyStore;

use tracing::warn;

/// Something that can draw the store.
/// Gets called once per tick, after the step.
pub trait Renderer {
    type Error;

    fn render(&mut self, store: &BodyStore) -> Result<(), Self::Error>;
}

/// Owns the stepper and the timestep. The store and the renderer are lent in every tick.
#[derive(Copy, Clone, Debug)]
pub struct Scheduler {
    stepper: Stepper,
    /// How many seconds are simulated per tick
    dt: f64,
    /// When paused, ticks still draw but don't step.
    running: bool,
    /// Ticks that actually stepped
    frames: u64,
}

impl Scheduler {
    /// A non-finite `dt` becomes 0: ticks draw but nothing moves.
    pub fn new(stepper: Stepper, dt: f64) -> Self {
        let dt = if dt.is_finite() {
            dt
        } else {
            warn!(dt, "timestep isn't finite, holding still");
            0.0
        };
        Self {
            stepper,
            dt,
            running: true,
            frames: 0,
        }
    }

    /// Step once (if running), then hand the store to the renderer.
    pub fn tick<R: Renderer>(
        &mut self,
        store: &mut BodyStore,
        renderer: &mut R,
    ) -> Result<(), R::Error> {
        if self.running {
            self.stepper.step(store, self.dt);
            self.frames += 1;
        }
        renderer.render(store)
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Keeps the old timestep if the new one isn't finite.
    pub fn set_dt(&mut self, dt: f64) {
        if dt.is_finite() {
            self.dt = dt;
        } else {
            warn!(dt, old = self.dt, "ignoring non-finite timestep");
        }
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BodyConfig, Kinemat};
    use euclid::default::{Point3D, Vector3D};

    /// Remembers where the satellite was every time it got drawn.
    struct Recorder(Vec<f64>);

    impl Renderer for Recorder {
        type Error = ();

        fn render(&mut self, store: &BodyStore) -> Result<(), ()> {
            let sat = store.all_satellites().next().ok_or(())?;
            self.0.push(sat.position().y);
            Ok(())
        }
    }

    fn store() -> BodyStore {
        BodyStore::initialize(vec![BodyConfig::satellite(
            "drifter",
            Kinemat::new(Point3D::zero(), Vector3D::new(0.0, 1.0, 0.0)),
        )])
        .unwrap()
    }

    #[test]
    fn renders_after_stepping() {
        let mut store = store();
        let mut recorder = Recorder(Vec::new());
        let mut scheduler = Scheduler::new(Stepper::default(), 2.0);
        for _ in 0..3 {
            scheduler.tick(&mut store, &mut recorder).unwrap();
        }
        assert_eq!(recorder.0, vec![2.0, 4.0, 6.0]);
        assert_eq!(scheduler.frames(), 3);
    }

    #[test]
    fn paused_ticks_only_draw() {
        let mut store = store();
        let mut recorder = Recorder(Vec::new());
        let mut scheduler = Scheduler::new(Stepper::default(), 1.0);
        scheduler.tick(&mut store, &mut recorder).unwrap();
        scheduler.pause();
        assert!(!scheduler.is_running());
        scheduler.tick(&mut store, &mut recorder).unwrap();
        scheduler.toggle();
        scheduler.tick(&mut store, &mut recorder).unwrap();
        assert_eq!(recorder.0, vec![1.0, 1.0, 2.0]);
        assert_eq!(scheduler.frames(), 2);
    }

    #[test]
    fn non_finite_timesteps_never_reach_the_store() {
        let mut store = store();
        let mut recorder = Recorder(Vec::new());
        let mut scheduler = Scheduler::new(Stepper::default(), 1.0);
        scheduler.set_dt(f64::NAN);
        scheduler.set_dt(f64::INFINITY);
        assert_eq!(scheduler.dt(), 1.0);
        scheduler.tick(&mut store, &mut recorder).unwrap();
        scheduler.tick(&mut store, &mut recorder).unwrap();
        assert_eq!(recorder.0, vec![1.0, 2.0]);

        let mut frozen = Scheduler::new(Stepper::default(), f64::NEG_INFINITY);
        assert_eq!(frozen.dt(), 0.0);
        frozen.tick(&mut store, &mut recorder).unwrap();
        assert_eq!(recorder.0, vec![1.0, 2.0, 2.0]);
    }

    #[test]
    fn renderer_errors_come_back_out() {
        let mut empty = BodyStore::initialize(Vec::new()).unwrap();
        let mut recorder = Recorder(Vec::new());
        let mut scheduler = Scheduler::new(Stepper::default(), 1.0);
        assert_eq!(scheduler.tick(&mut empty, &mut recorder), Err(()));
    }
}
