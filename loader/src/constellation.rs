//! Scatter a bunch of satellites above one anchor.

use crate::error::LoadError;

use simulator::{BodyStore, SatelliteRequest};

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::info;

/// A seeded batch of satellites launched from the same anchor.
/// Same seed, same satellites.
#[derive(Clone, Debug, PartialEq)]
pub struct Constellation {
    pub anchor: String,
    pub count: usize,
    pub min_altitude_km: f64,
    pub max_altitude_km: f64,
    /// m/s
    pub min_speed: f64,
    pub max_speed: f64,
    pub seed: u64,
    /// Color is stored as 0xRRGGBB
    pub color: Option<u32>,
}

impl Constellation {
    /// Launch every satellite into the store.
    /// Returns the labels it made, in launch order.
    pub fn launch(&self, store: &mut BodyStore) -> Result<Vec<String>, LoadError> {
        for (field, value) in [
            ("constellation altitude", self.min_altitude_km),
            ("constellation altitude", self.max_altitude_km),
            ("constellation speed", self.min_speed),
            ("constellation speed", self.max_speed),
        ]
        .iter()
        {
            if !value.is_finite() {
                return Err(LoadError::Field {
                    field: *field,
                    value: value.to_string(),
                });
            }
        }

        // Hash
        let seed = (self.count as u64)
            .wrapping_add(self.min_altitude_km.to_bits())
            .wrapping_add(self.max_altitude_km.to_bits())
            .wrapping_add(self.min_speed.to_bits())
            .wrapping_add(self.max_speed.to_bits())
            .wrapping_add(self.seed)
            .wrapping_add(self.anchor.bytes().map(u64::from).sum::<u64>());
        let mut rand = SmallRng::seed_from_u64(seed);

        // Generate the prefix name for the constellation
        const CONSTELLATION_CHARS: &[u8] = "ABCDEFGHJKLMNPQRSTUVWXYZ1234567890".as_bytes();
        let system_name: String = std::iter::once('C')
            .chain((0..rand.gen_range(3, 6)).map(|_| {
                CONSTELLATION_CHARS[rand.gen_range(0, CONSTELLATION_CHARS.len())] as char
            }))
            .collect();

        let mut labels = Vec::with_capacity(self.count);
        for num in 0..self.count {
            let altitude_km = between(&mut rand, self.min_altitude_km, self.max_altitude_km);
            let speed = between(&mut rand, self.min_speed, self.max_speed);
            let mut request = SatelliteRequest::new(&self.anchor, altitude_km, speed);
            let label = format!("{}-{:02}", system_name, num);
            // Taken already? Let the store make one up.
            if store.find_by_label(&label).is_err() {
                request.label = Some(label);
            }
            request.color = self.color;
            let sat = store.add_satellite(request)?;
            labels.push(sat.label().to_string());
        }

        info!(
            name = %system_name,
            anchor = %self.anchor,
            count = self.count,
            "launched constellation"
        );
        Ok(labels)
    }
}

/// Uniform in [min, max). Gives back `min` if the range is empty.
fn between(rand: &mut SmallRng, min: f64, max: f64) -> f64 {
    if max > min {
        rand.gen_range(min, max)
    } else {
        min
    }
}
