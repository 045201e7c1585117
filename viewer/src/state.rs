//! Handles the state for the viewer.

use crate::canvas::{Canvas, Focus, View};

use loader::{SatelliteForm, Scenario};
use simulator::{BodyStore, Scheduler};

use euclid::default::Point2D;
use ggez::event::{EventHandler, KeyCode};
use ggez::{graphics, input::keyboard, timer, Context, GameResult};
use tracing::{info, warn};

use std::collections::HashSet;

/// The state of the simulation and the window looking at it.
pub struct State {
    store: BodyStore,
    /// Steps the store then draws it, once per frame
    scheduler: Scheduler,
    /// The new-satellite form
    form: SatelliteForm,
    /// All the keypresses last frame
    prev_keys: HashSet<KeyCode>,
    view: View,
    /// What the form said last time it didn't parse
    last_error: Option<String>,
}

impl State {
    pub fn new(_ctx: &mut Context, scenario: Scenario) -> Self {
        let scheduler = scenario.scheduler();
        let view = View::fit(&scenario.store);
        State {
            store: scenario.store,
            scheduler,
            form: SatelliteForm::default(),
            prev_keys: HashSet::new(),
            view,
            last_error: None,
        }
    }

    /// Fix the screen space to always have (0, 0) in the corner and (w, h) in the other.
    fn fix_coordinates(&mut self, ctx: &mut Context, width: f32, height: f32) -> GameResult<()> {
        let rect = graphics::Rect::new(0.0, 0.0, width, height);
        graphics::set_screen_coordinates(ctx, rect)
    }

    fn just_pressed(&self, ctx: &Context, key: KeyCode) -> bool {
        keyboard::is_key_pressed(ctx, key) && !self.prev_keys.contains(&key)
    }

    /// The anchor new satellites launch from: the focused body if it's an anchor,
    /// otherwise the first anchor there is.
    fn launch_anchor(&self) -> Option<String> {
        if let Focus::Body(label) = &self.view.focus {
            if let Ok(body) = self.store.find_by_label(label) {
                if body.is_anchor() {
                    return Some(label.clone());
                }
            }
        }
        self.store.all_anchors().next().map(|b| b.label().to_string())
    }

    /// Submit the form and put the satellite in.
    fn launch(&mut self) {
        let anchor = match self.launch_anchor() {
            Some(anchor) => anchor,
            None => {
                warn!("nothing to launch a satellite from");
                return;
            }
        };
        let result = self
            .form
            .submit(&anchor)
            .map_err(|e| e.to_string())
            .and_then(|request| {
                self.store
                    .add_satellite(request)
                    .map(|sat| sat.label().to_string())
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(label) => {
                info!(label = %label, "launched from the form");
                self.last_error = None;
            }
            Err(e) => {
                warn!("couldn't launch: {}", e);
                self.last_error = Some(e);
            }
        }
    }

    /// Cycle the focus through every body, in store order.
    fn cycle_focus(&mut self, forward: bool) {
        let labels: Vec<&str> = self.store.iter().map(|b| b.label()).collect();
        if labels.is_empty() {
            self.view.focus = Focus::Position(Point2D::zero());
            return;
        }
        let current = match &self.view.focus {
            Focus::Body(label) => labels.iter().position(|l| *l == label.as_str()),
            Focus::Position(_) => None,
        };
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(idx), true) => (idx + 1) % labels.len(),
            (Some(idx), false) => (idx + labels.len() - 1) % labels.len(),
        };
        self.view.focus = Focus::Body(labels[next].to_string());
    }

    fn hud(&self) -> String {
        let mut hud = format!(
            "{} s/frame{}  |  frame {}\nalt {} km  speed {} m/s  color {}  [Return] launch",
            self.scheduler.dt(),
            if self.scheduler.is_running() { "" } else { " (paused)" },
            self.scheduler.frames(),
            self.form.altitude_km,
            self.form.speed,
            self.form.color,
        );
        if let Some(e) = &self.last_error {
            hud.push('\n');
            hud.push_str(e);
        }
        hud
    }
}

impl EventHandler for State {
    fn update(&mut self, ctx: &mut Context) -> GameResult<()> {
        const DESIRED_FPS: u32 = 60;
        while timer::check_update_time(ctx, DESIRED_FPS) {
            // Press tilde to reset scales
            if keyboard::is_key_pressed(ctx, KeyCode::Grave) {
                self.view.distance_scale = self.view.home_scale;
                self.view.planet_scale = DEFAULT_PLANET_SCALE;
                self.view.fake_planet_scale = true;
            } else {
                // Zoom & pan if i'm not trying to reset.
                if keyboard::is_key_pressed(ctx, KeyCode::Q) {
                    self.view.distance_scale /= ZOOM_SPEED;
                }
                if keyboard::is_key_pressed(ctx, KeyCode::Z) {
                    self.view.distance_scale *= ZOOM_SPEED;
                }
                if keyboard::is_key_pressed(ctx, KeyCode::E) {
                    self.view.planet_scale /= ZOOM_SPEED;
                }
                if keyboard::is_key_pressed(ctx, KeyCode::C) {
                    self.view.planet_scale *= ZOOM_SPEED;
                }

                // Flip faking the planet size with the X key
                if self.just_pressed(ctx, KeyCode::X) {
                    self.view.fake_planet_scale = !self.view.fake_planet_scale;
                }
            }

            // Speed and slow the simulation with []
            let dt = self.scheduler.dt();
            if keyboard::is_key_pressed(ctx, KeyCode::LBracket) && dt.abs() > 0.01 {
                // if it goes to zero, it's never coming back. so be careful
                self.scheduler.set_dt(dt / SPEED_SPEED);
            }
            if keyboard::is_key_pressed(ctx, KeyCode::RBracket) {
                self.scheduler.set_dt((dt * SPEED_SPEED).min(MAX_DT));
            }
            if self.just_pressed(ctx, KeyCode::P) {
                self.scheduler.toggle();
            }

            // The form
            if self.just_pressed(ctx, KeyCode::Up) {
                self.form.nudge_altitude(ALTITUDE_STEP_KM);
            }
            if self.just_pressed(ctx, KeyCode::Down) {
                self.form.nudge_altitude(-ALTITUDE_STEP_KM);
            }
            if self.just_pressed(ctx, KeyCode::Equals) {
                self.form.nudge_speed(SPEED_STEP);
            }
            if self.just_pressed(ctx, KeyCode::Minus) {
                self.form.nudge_speed(-SPEED_STEP);
            }
            if self.just_pressed(ctx, KeyCode::Tab) {
                self.form.cycle_color();
            }
            if self.just_pressed(ctx, KeyCode::Return) {
                self.launch();
            }

            // Focus and panning
            let pan_speed = PAN_SPEED * self.view.distance_scale;
            let panning = [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D]
                .iter()
                .any(|&key| keyboard::is_key_pressed(ctx, key));
            if self.just_pressed(ctx, KeyCode::Right) {
                self.cycle_focus(true);
            } else if self.just_pressed(ctx, KeyCode::Left) {
                self.cycle_focus(false);
            } else if self.just_pressed(ctx, KeyCode::Space) {
                // Reset to the origin
                self.view.focus = Focus::Position(Point2D::zero());
            } else if panning {
                // Let go of whatever body is focused, right where it is
                let mut pos = self.view.focus_coord(&self.store);
                if keyboard::is_key_pressed(ctx, KeyCode::W) {
                    pos.y -= pan_speed;
                }
                if keyboard::is_key_pressed(ctx, KeyCode::S) {
                    pos.y += pan_speed;
                }
                if keyboard::is_key_pressed(ctx, KeyCode::A) {
                    pos.x -= pan_speed;
                }
                if keyboard::is_key_pressed(ctx, KeyCode::D) {
                    pos.x += pan_speed;
                }
                self.view.focus = Focus::Position(pos);
            }

            // Update previous keys
            self.prev_keys = keyboard::pressed_keys(ctx).to_owned();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult<()> {
        let mut canvas = Canvas {
            ctx,
            view: &self.view,
            hud: self.hud(),
        };
        self.scheduler.tick(&mut self.store, &mut canvas)
    }

    fn resize_event(&mut self, ctx: &mut Context, width: f32, height: f32) {
        if let Err(e) = self.fix_coordinates(ctx, width, height) {
            warn!("couldn't fix the screen coordinates: {}", e);
        }
    }
}

const PAN_SPEED: f64 = 10f64; // Pan this many pixels per frame
const ZOOM_SPEED: f64 = 1.1f64; // multiply / divide by this many meters per frame
const SPEED_SPEED: f64 = 1.05f64; // speed speed... the number of seconds simulated per frame changes by this amount per frame
const DEFAULT_PLANET_SCALE: f64 = 1f64;
/// Nobody needs more than a year a frame.
const MAX_DT: f64 = 3.156e7;

const ALTITUDE_STEP_KM: f64 = 50.0;
const SPEED_STEP: f64 = 100.0;
