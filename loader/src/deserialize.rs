//! Lets you load a scenario from a file.

use crate::constellation::Constellation;
use crate::form::parse_color;
use crate::LoadError;

use euclid::default::{Point3D, Vector3D};
use serde::Deserialize;
use simulator::{BodyConfig, BodyStore, Kinemat, SatelliteRequest, Scheduler, Stepper};
use tracing::info;

use std::path::Path;

/// A ready-to-run simulation: the bodies plus how to step them.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Seconds simulated per frame
    pub dt: f64,
    pub grav_constant: f64,
    pub store: BodyStore,
}

impl Scenario {
    /// A scheduler that steps this scenario at its own dt.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(Stepper::new(self.grav_constant), self.dt)
    }
}

/// A Vector3D or Point3D.
#[derive(Deserialize, Default)]
struct Vec3D(f64, f64, f64);

/// Numbers go straight through, strings get parsed like the form does.
#[derive(Deserialize)]
#[serde(untagged)]
enum Color {
    Rgb(u32),
    Text(String),
}

/// A body in space
#[derive(Deserialize)]
#[serde(untagged)]
enum Body {
    Prefab(String), // A pre-made pre-defined Body
    Custom {
        label: String,
        #[serde(default)]
        pos: Vec3D,
        #[serde(default)]
        vel: Vec3D,
        mass: f64,
        radius: f64,
        #[serde(default)]
        satellite: bool,
        #[serde(default)]
        color: Option<Color>,
        #[serde(default)]
        orbits: Option<String>,
    },
}

/// A satellite launched from an anchor once the bodies exist.
#[derive(Deserialize)]
struct Satellite {
    anchor: String,
    altitude_km: f64,
    speed: f64,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<Color>,
}

#[derive(Deserialize)]
struct RawConstellation {
    anchor: String,
    count: usize,
    min_altitude_km: f64,
    max_altitude_km: f64,
    min_speed: f64,
    max_speed: f64,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    color: Option<Color>,
}

/// Serde needs you to define the thing to use it on...
#[derive(Deserialize)]
struct RawScenario {
    #[serde(default = "default_dt")]
    dt: f64,
    #[serde(default = "default_grav_constant")]
    grav_constant: f64,
    bodies: Vec<Body>,
    #[serde(default)]
    satellites: Vec<Satellite>,
    #[serde(default)]
    constellations: Vec<RawConstellation>,
}

/// Returns five seconds because Serde needs a function
fn default_dt() -> f64 {
    5.0
}

fn default_grav_constant() -> f64 {
    simulator::GRAV_CONSTANT
}

/// Reads a file and loads the scenario in it.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Scenario, LoadError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    info!(path = %path.as_ref().display(), "loading scenario");
    load(&contents)
}

/// Parses a scenario, builds its store, then launches its satellites and constellations.
pub fn load(contents: &str) -> Result<Scenario, LoadError> {
    let raw: RawScenario = json5::from_str(contents)?;
    if !raw.dt.is_finite() {
        return Err(LoadError::BadTimestep(raw.dt));
    }

    let configs = raw
        .bodies
        .into_iter()
        .map(to_config)
        .collect::<Result<Vec<_>, _>>()?;
    let mut store = BodyStore::initialize(configs)?;

    for sat in raw.satellites {
        let mut request = SatelliteRequest::new(&sat.anchor, sat.altitude_km, sat.speed);
        request.label = sat.label;
        request.color = color(sat.color)?;
        store.add_satellite(request)?;
    }

    for entry in raw.constellations {
        let constellation = Constellation {
            anchor: entry.anchor,
            count: entry.count,
            min_altitude_km: entry.min_altitude_km,
            max_altitude_km: entry.max_altitude_km,
            min_speed: entry.min_speed,
            max_speed: entry.max_speed,
            seed: entry.seed,
            color: color(entry.color)?,
        };
        constellation.launch(&mut store)?;
    }

    Ok(Scenario {
        dt: raw.dt,
        grav_constant: raw.grav_constant,
        store,
    })
}

/// Convert from serde to real
fn to_config(body: Body) -> Result<BodyConfig, LoadError> {
    match body {
        Body::Prefab(id) => get_body_from_id(&id),
        Body::Custom {
            label,
            pos,
            vel,
            mass,
            radius,
            satellite,
            color: raw_color,
            orbits,
        } => Ok(BodyConfig {
            label,
            kinemat: Kinemat::new(
                Point3D::new(pos.0, pos.1, pos.2),
                Vector3D::new(vel.0, vel.1, vel.2),
            ),
            mass,
            radius,
            satellite,
            color: color(raw_color)?,
            orbits,
        }),
    }
}

fn color(raw: Option<Color>) -> Result<Option<u32>, LoadError> {
    match raw {
        None => Ok(None),
        Some(Color::Rgb(rgb)) => Ok(Some(rgb)),
        Some(Color::Text(text)) => parse_color(&text),
    }
}

/// Gets a premade Body from a string
fn get_body_from_id(id: &str) -> Result<BodyConfig, LoadError> {
    use crate::prefabs;
    use std::collections::HashMap;

    macro_rules! maker {
        (
            $($name:ident),*
        ) => {
            {
                let mut h: HashMap<String, fn() -> BodyConfig> = HashMap::new();
                $( h.insert(stringify!($name).to_string(), prefabs::bodies::$name); )*
                h
            }
        };
    }

    lazy_static! {
        static ref BODIES: HashMap<String, fn() -> BodyConfig> = maker![sun, earth, luna, jjb01];
    }

    BODIES
        .get(&id.to_lowercase())
        .map(|make| make())
        .ok_or_else(|| LoadError::UnknownPrefab(id.to_string()))
}
