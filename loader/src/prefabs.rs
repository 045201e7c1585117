//! Prefabricated bodies and scenarios.

pub mod bodies {
    use euclid::default::{Point3D, Vector3D};
    use simulator::{BodyConfig, Kinemat};

    // REAL BODIES

    /// Returns our Sun.
    pub fn sun() -> BodyConfig {
        BodyConfig::anchor("Sun", 1.989e30, 6.957e8).with_color(0xFFDF22)
    }

    /// Returns the Earth, sitting still at the origin.
    pub fn earth() -> BodyConfig {
        BodyConfig::anchor("Earth", 5.97e24, 6371e3).with_color(0x3669FF) // blue
    }

    /// Returns our Moon, going around an Earth at the origin.
    /// Does not come with Wire.
    pub fn luna() -> BodyConfig {
        BodyConfig::anchor("Luna", 7.342e22, 1_737_400f64)
            .at(Kinemat::new(
                Point3D::new(384_400e3, 0.0, 0.0),
                Vector3D::new(0.0, 1022.0, 0.0),
            ))
            .with_color(0x3c3a38) // dark gray
            .orbiting("Earth")
    }

    // FAKE BODIES

    /// The first satellite: 200 km above an Earth at the origin, a bit too fast.
    pub fn jjb01() -> BodyConfig {
        BodyConfig::satellite(
            "JJB01",
            Kinemat::new(
                Point3D::new(6371e3 + 200e3, 0.0, 0.0),
                Vector3D::new(0.0, -9000.0, 0.0),
            ),
        )
        .with_color(0xff00ff) // magenta
    }
}

pub mod systems {
    use super::bodies;
    use crate::Scenario;

    use euclid::default::{Point3D, Vector3D};
    use simulator::{BodyStore, ConfigError, Kinemat, GRAV_CONSTANT};

    const AU: f64 = 1.496e11;

    /// The Earth and one satellite, five seconds a frame.
    pub fn earth_orbit() -> Result<Scenario, ConfigError> {
        Ok(Scenario {
            dt: 5.0,
            grav_constant: GRAV_CONSTANT,
            store: BodyStore::initialize(vec![bodies::earth(), bodies::jjb01()])?,
        })
    }

    /// The Earth going around the Sun, a week a frame.
    pub fn solar() -> Result<Scenario, ConfigError> {
        let earth = bodies::earth()
            .at(Kinemat::new(
                Point3D::new(AU, 0.0, 0.0),
                Vector3D::new(0.0, 29_780.0, 0.0),
            ))
            .orbiting("Sun");
        Ok(Scenario {
            dt: 604_800.0,
            grav_constant: GRAV_CONSTANT,
            store: BodyStore::initialize(vec![bodies::sun(), earth])?,
        })
    }
}
