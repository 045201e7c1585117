//! Draws a BodyStore from above with ggez.

use simulator::{Body, BodyStore, Renderer};

use euclid::default::{Point2D, Point3D};
use ggez::nalgebra::Point2;
use ggez::{
    graphics::{self, Color, DrawMode, DrawParam, Mesh, MeshBuilder, Text},
    Context, GameError, GameResult,
};

/// Where the camera is and how far it's zoomed out.
pub struct View {
    /// This many meters in distance = 1 pixel
    pub distance_scale: f64,
    /// What `distance_scale` resets to
    pub home_scale: f64,
    /// The radius of bodies are additionally scaled by this much
    pub planet_scale: f64,
    /// Whether to fake the scale of planets by squishing them, for less existential dread
    pub fake_planet_scale: bool,
    /// What I'm focusing on
    pub focus: Focus,
}

/// What my focus is on
pub enum Focus {
    /// Contains the label of the body I'm focusing on
    Body(String),
    /// I'm focusing on a point in space
    Position(Point2D<f64>),
}

impl View {
    /// Zoom out far enough that everything in the store fits on a screen.
    pub fn fit(store: &BodyStore) -> Self {
        let extent = store
            .iter()
            .map(|b| b.position().x.hypot(b.position().y) + b.radius())
            .fold(0f64, f64::max);
        let home_scale = if extent > 0.0 {
            extent / FIT_PIXELS
        } else {
            DEFAULT_SCALE
        };
        Self {
            distance_scale: home_scale,
            home_scale,
            planet_scale: DEFAULT_PLANET_SCALE,
            fake_planet_scale: true,
            focus: Focus::Position(Point2D::zero()),
        }
    }

    /// The point in space at the middle of the screen.
    pub fn focus_coord(&self, store: &BodyStore) -> Point2D<f64> {
        match &self.focus {
            Focus::Body(label) => match store.find_by_label(label) {
                Ok(body) => body.position().xy(),
                Err(_) => Point2D::zero(),
            },
            Focus::Position(pos) => *pos,
        }
    }

    /// Make (0, 0) in pixel coords the center of the screen
    fn to_screen(&self, pos: Point3D<f64>, focus: Point2D<f64>, (w, h): (f32, f32)) -> Point2<f32> {
        let relative = pos.xy() - focus;
        Point2::new(
            w / 2f32 + (relative.x / self.distance_scale) as f32,
            h / 2f32 + (relative.y / self.distance_scale) as f32,
        )
    }
}

/// One frame's worth of drawing.
pub struct Canvas<'a> {
    pub ctx: &'a mut Context,
    pub view: &'a View,
    /// Text drawn in the corner
    pub hud: String,
}

impl Renderer for Canvas<'_> {
    type Error = GameError;

    fn render(&mut self, store: &BodyStore) -> GameResult<()> {
        graphics::clear(self.ctx, Color::from_rgb_u32(BACKGROUND));

        let focus = self.view.focus_coord(store);
        let screen = graphics::drawable_size(self.ctx);

        // Trails first so the bodies sit on top of them.
        for body in store.iter() {
            self.draw_trail(body, focus, screen)?;
        }
        for body in store.iter() {
            self.draw_body(body, focus, screen)?;
        }

        let hud = Text::new(self.hud.as_str());
        graphics::draw(
            self.ctx,
            &hud,
            DrawParam::default().dest(Point2::new(10.0, 10.0)),
        )?;

        graphics::present(self.ctx)
    }
}

impl Canvas<'_> {
    fn draw_body(&mut self, body: &Body, focus: Point2D<f64>, (w, h): (f32, f32)) -> GameResult<()> {
        let draw_pos = self.view.to_screen(body.position(), focus, (w, h));
        let draw_radius = scale_planet(
            body.radius(),
            self.view.distance_scale * self.view.planet_scale,
            self.view.fake_planet_scale,
        )
        .max(if body.is_satellite() { SATELLITE_PIXELS } else { 0.5 });

        // Only spend processing time drawing it if it's in frame.
        if draw_pos.x + draw_radius > 0.0
            && draw_pos.x - draw_radius <= w
            && draw_pos.y + draw_radius > 0.0
            && draw_pos.y - draw_radius <= h
        {
            let draw = MeshBuilder::new()
                .circle(
                    DrawMode::fill(),
                    draw_pos,
                    draw_radius,
                    0.01,
                    body_color(body),
                )
                .build(self.ctx)?;
            graphics::draw(self.ctx, &draw, DrawParam::default())?;
        }
        Ok(())
    }

    fn draw_trail(&mut self, body: &Body, focus: Point2D<f64>, screen: (f32, f32)) -> GameResult<()> {
        // Drop points that land on the same pixel; zero-length segments upset the tessellator.
        let mut points: Vec<Point2<f32>> = Vec::with_capacity(body.trail().len() + 1);
        let tail = body.trail().iter().copied();
        let head = if body.is_terminated() {
            None
        } else {
            Some(body.position())
        };
        for pos in tail.chain(head) {
            let p = self.view.to_screen(pos, focus, screen);
            let far_enough = match points.last() {
                Some(last) => (p.x - last.x).abs() + (p.y - last.y).abs() >= 1.0,
                None => true,
            };
            if far_enough {
                points.push(p);
            }
        }
        if points.len() < 2 {
            return Ok(());
        }

        let mut color = body_color(body);
        color.a = TRAIL_ALPHA;
        let line = Mesh::new_line(self.ctx, &points, 1.0, color)?;
        graphics::draw(self.ctx, &line, DrawParam::default())
    }
}

fn body_color(body: &Body) -> Color {
    Color::from_rgb_u32(body.color().unwrap_or(if body.is_satellite() {
        SATELLITE_COLOR
    } else {
        ANCHOR_COLOR
    }))
}

fn scale_planet(radius: f64, scale: f64, fake: bool) -> f32 {
    if fake {
        (10f64 * (radius / scale).powf(0.3)) as f32
    } else {
        (radius / scale) as f32
    }
    .max(0.5f32) // Everything has to be at least half a pixel wide. Otherwise it becomes impossible to see.
}

const BACKGROUND: u32 = 0x200b2b;
const ANCHOR_COLOR: u32 = 0x3669FF;
const SATELLITE_COLOR: u32 = 0xff00ff;
const TRAIL_ALPHA: f32 = 0.6;
/// Satellites are a meter wide; draw them bigger than that.
const SATELLITE_PIXELS: f32 = 3.0;

/// How many pixels from the middle the farthest body lands after `View::fit`.
const FIT_PIXELS: f64 = 300.0;
const DEFAULT_SCALE: f64 = 1e5;
const DEFAULT_PLANET_SCALE: f64 = 1f64;
