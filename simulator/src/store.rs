//! The authoritative set of bodies.

use crate::bodies::{Body, BodyConfig, Kinemat};
use crate::error::{ConfigError, NotFoundError, SatelliteError};

use euclid::default::Vector3D;
use tracing::info;

use std::collections::HashSet;

/// A request to put a new satellite above an anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteRequest {
    /// Label of the anchor to launch from.
    pub anchor: String,
    /// Height above the anchor's surface, in kilometers.
    pub altitude_km: f64,
    /// Launch speed in m/s. Launches go toward -y.
    pub speed: f64,
    /// Color is stored as 0xRRGGBB.
    pub color: Option<u32>,
    /// Make one up if None.
    pub label: Option<String>,
}

impl SatelliteRequest {
    pub fn new(anchor: &str, altitude_km: f64, speed: f64) -> Self {
        Self {
            anchor: anchor.to_string(),
            altitude_km,
            speed,
            color: None,
            label: None,
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

/// Holds every body, in the order they were added.
/// Satellites are never removed, only crashed.
#[derive(Clone, Debug)]
pub struct BodyStore {
    pub(crate) bodies: Vec<Body>,
    /// Bumped every time a satellite label gets made up.
    satellites_named: usize,
}

impl BodyStore {
    /// Check every config and build the store out of them.
    pub fn initialize(configs: Vec<BodyConfig>) -> Result<Self, ConfigError> {
        let mut labels: HashSet<&str> = HashSet::with_capacity(configs.len());
        for config in configs.iter() {
            validate(config)?;
            if !labels.insert(config.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(config.label.clone()));
            }
        }

        // Now that every label is known, check who orbits who.
        for config in configs.iter() {
            if let Some(primary) = &config.orbits {
                if config.satellite {
                    return Err(ConfigError::SatelliteWithPrimary(config.label.clone()));
                }
                let is_anchor = configs
                    .iter()
                    .any(|other| &other.label == primary && !other.satellite);
                if !is_anchor || primary == &config.label {
                    return Err(ConfigError::BadPrimary {
                        label: config.label.clone(),
                        primary: primary.clone(),
                    });
                }
            }
        }

        let bodies: Vec<Body> = configs.into_iter().map(Body::from_config).collect();
        info!(
            anchors = bodies.iter().filter(|b| b.is_anchor()).count(),
            satellites = bodies.iter().filter(|b| b.is_satellite()).count(),
            "body store initialized"
        );
        Ok(Self {
            bodies,
            satellites_named: 0,
        })
    }

    /// Look a body up by its exact label.
    pub fn find_by_label(&self, label: &str) -> Result<&Body, NotFoundError> {
        self.bodies
            .iter()
            .find(|b| b.label() == label)
            .ok_or_else(|| NotFoundError(label.to_string()))
    }

    /// Every anchor, in insertion order.
    pub fn all_anchors(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(|b| b.is_anchor())
    }

    /// Every satellite, in insertion order.
    pub fn all_satellites(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter().filter(|b| b.is_satellite())
    }

    /// Every body, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Launch a new satellite from the surface of an anchor.
    /// It starts `altitude_km` above the anchor on the +x side, moving toward -y
    /// (plus whatever velocity the anchor has).
    pub fn add_satellite(&mut self, request: SatelliteRequest) -> Result<&Body, SatelliteError> {
        let anchor = self
            .all_anchors()
            .find(|b| b.label() == request.anchor)
            .map(|b| (b.kinemat(), b.radius()))
            .ok_or_else(|| NotFoundError(request.anchor.clone()))?;
        let (anchor_kmat, anchor_radius) = anchor;

        let label = match request.label {
            Some(label) => {
                if self.find_by_label(&label).is_ok() {
                    return Err(ConfigError::DuplicateLabel(label).into());
                }
                label
            }
            None => self.next_satellite_label(),
        };

        let offset = Vector3D::new(anchor_radius + request.altitude_km * 1e3, 0.0, 0.0);
        let kinemat = Kinemat::new(
            anchor_kmat.pos + offset,
            anchor_kmat.vel + Vector3D::new(0.0, -request.speed, 0.0),
        );
        let mut config = BodyConfig::satellite(&label, kinemat);
        config.color = request.color;
        validate(&config)?;

        info!(
            label = %config.label,
            anchor = %request.anchor,
            altitude_km = request.altitude_km,
            speed = request.speed,
            "added satellite"
        );
        self.bodies.push(Body::from_config(config));
        Ok(&self.bodies[self.bodies.len() - 1])
    }

    /// Make up a satellite label nobody has taken yet.
    fn next_satellite_label(&mut self) -> String {
        loop {
            self.satellites_named += 1;
            let label = format!("SAT-{:03}", self.satellites_named);
            if self.find_by_label(&label).is_err() {
                return label;
            }
        }
    }
}

/// Per-body checks that don't need to know about the other bodies.
fn validate(config: &BodyConfig) -> Result<(), ConfigError> {
    let label = || config.label.clone();
    let k = &config.kinemat;
    let pos_ok = k.pos.x.is_finite() && k.pos.y.is_finite() && k.pos.z.is_finite();
    let vel_ok = k.vel.x.is_finite() && k.vel.y.is_finite() && k.vel.z.is_finite();
    if !pos_ok {
        return Err(ConfigError::NonFinite {
            label: label(),
            field: "position",
        });
    }
    if !vel_ok {
        return Err(ConfigError::NonFinite {
            label: label(),
            field: "velocity",
        });
    }
    // NaN fails both of these, so check finiteness on the way.
    if !(config.mass > 0.0 && config.mass.is_finite()) {
        return Err(ConfigError::NonPositiveMass {
            label: label(),
            mass: config.mass,
        });
    }
    if !(config.radius > 0.0 && config.radius.is_finite()) {
        return Err(ConfigError::NonPositiveRadius {
            label: label(),
            radius: config.radius,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::default::Point3D;

    fn earth() -> BodyConfig {
        BodyConfig::anchor("Earth", 5.97e24, 6_371_000.0)
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = BodyStore::initialize(vec![earth(), earth()]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLabel("Earth".to_string()));
    }

    #[test]
    fn non_positive_mass_and_radius_are_rejected() {
        let mut massless = earth();
        massless.mass = 0.0;
        assert!(matches!(
            BodyStore::initialize(vec![massless]),
            Err(ConfigError::NonPositiveMass { .. })
        ));

        let mut flat = earth();
        flat.radius = -1.0;
        assert!(matches!(
            BodyStore::initialize(vec![flat]),
            Err(ConfigError::NonPositiveRadius { .. })
        ));

        let mut weird = earth();
        weird.mass = f64::NAN;
        assert!(BodyStore::initialize(vec![weird]).is_err());
    }

    #[test]
    fn primaries_must_be_other_anchors() {
        let sun = BodyConfig::anchor("Sun", 1.989e30, 6.957e8);
        let ok = BodyStore::initialize(vec![sun.clone(), earth().orbiting("Sun")]);
        assert!(ok.is_ok());

        let missing = BodyStore::initialize(vec![earth().orbiting("Sun")]);
        assert!(matches!(missing, Err(ConfigError::BadPrimary { .. })));

        let itself = BodyStore::initialize(vec![earth().orbiting("Earth")]);
        assert!(matches!(itself, Err(ConfigError::BadPrimary { .. })));

        let sat = BodyConfig::satellite("JJB01", Kinemat::zero()).orbiting("Sun");
        let sat_primary = BodyStore::initialize(vec![sun, sat]);
        assert!(matches!(
            sat_primary,
            Err(ConfigError::SatelliteWithPrimary(_))
        ));
    }

    #[test]
    fn find_by_label_is_exact() {
        let store = BodyStore::initialize(vec![earth()]).unwrap();
        assert_eq!(store.find_by_label("Earth").unwrap().label(), "Earth");
        assert_eq!(
            store.find_by_label("earth").unwrap_err(),
            NotFoundError("earth".to_string())
        );
    }

    #[test]
    fn views_keep_insertion_order() {
        let sat = |label: &str| BodyConfig::satellite(label, Kinemat::zero());
        let store = BodyStore::initialize(vec![
            sat("B"),
            BodyConfig::anchor("Sun", 1.0, 1.0),
            sat("A"),
            earth(),
        ])
        .unwrap();
        let anchors: Vec<&str> = store.all_anchors().map(|b| b.label()).collect();
        let sats: Vec<&str> = store.all_satellites().map(|b| b.label()).collect();
        assert_eq!(anchors, vec!["Sun", "Earth"]);
        assert_eq!(sats, vec!["B", "A"]);
    }

    #[test]
    fn add_satellite_launches_from_the_surface() {
        let mut store = BodyStore::initialize(vec![earth()]).unwrap();
        let sat = store
            .add_satellite(SatelliteRequest::new("Earth", 200.0, 7900.0).with_color(0xff00ff))
            .unwrap();
        assert_eq!(sat.position(), Point3D::new(6_571_000.0, 0.0, 0.0));
        assert_eq!(sat.velocity(), Vector3D::new(0.0, -7900.0, 0.0));
        assert!(sat.is_satellite());
        assert!(sat.trail().is_empty());
        assert_eq!(sat.color(), Some(0xff00ff));
        assert!(sat.mass() > 0.0 && sat.radius() > 0.0);
    }

    #[test]
    fn add_satellite_rides_along_with_a_moving_anchor() {
        let moving = earth().at(Kinemat::new(
            Point3D::new(1e11, 0.0, 0.0),
            Vector3D::new(0.0, 30_000.0, 0.0),
        ));
        let mut store = BodyStore::initialize(vec![moving]).unwrap();
        let sat = store
            .add_satellite(SatelliteRequest::new("Earth", 0.0, 1000.0))
            .unwrap();
        assert_eq!(sat.position(), Point3D::new(1e11 + 6_371_000.0, 0.0, 0.0));
        assert_eq!(sat.velocity(), Vector3D::new(0.0, 29_000.0, 0.0));
    }

    #[test]
    fn add_satellite_needs_a_real_anchor() {
        let mut store = BodyStore::initialize(vec![earth()]).unwrap();
        let err = store
            .add_satellite(SatelliteRequest::new("Mars", 200.0, 7900.0))
            .unwrap_err();
        assert_eq!(err, SatelliteError::NotFound(NotFoundError("Mars".into())));

        store
            .add_satellite(SatelliteRequest::new("Earth", 200.0, 7900.0).with_label("JJB01"))
            .unwrap();
        // Satellites can't be launch sites.
        let err = store
            .add_satellite(SatelliteRequest::new("JJB01", 200.0, 7900.0))
            .unwrap_err();
        assert!(matches!(err, SatelliteError::NotFound(_)));
    }

    #[test]
    fn add_satellite_never_duplicates_labels() {
        let taken = BodyConfig::satellite("SAT-001", Kinemat::zero());
        let mut store = BodyStore::initialize(vec![earth(), taken]).unwrap();

        let first = store
            .add_satellite(SatelliteRequest::new("Earth", 200.0, 7900.0))
            .unwrap()
            .label()
            .to_string();
        let second = store
            .add_satellite(SatelliteRequest::new("Earth", 300.0, 7800.0))
            .unwrap()
            .label()
            .to_string();
        assert_eq!(first, "SAT-002");
        assert_eq!(second, "SAT-003");

        let err = store
            .add_satellite(SatelliteRequest::new("Earth", 1.0, 1.0).with_label("SAT-002"))
            .unwrap_err();
        assert_eq!(
            err,
            SatelliteError::Config(ConfigError::DuplicateLabel("SAT-002".into()))
        );
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn add_satellite_rejects_nonsense_numbers() {
        let mut store = BodyStore::initialize(vec![earth()]).unwrap();
        let err = store
            .add_satellite(SatelliteRequest::new("Earth", f64::NAN, 7900.0))
            .unwrap_err();
        assert!(matches!(
            err,
            SatelliteError::Config(ConfigError::NonFinite { .. })
        ));
        assert_eq!(store.len(), 1);
    }
}
