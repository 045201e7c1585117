//! The new-satellite form: raw text fields in, a SatelliteRequest out.

use crate::LoadError;
use simulator::SatelliteRequest;

/// What the user has typed so far. Kept as text so half-typed values survive.
#[derive(Clone, Debug, PartialEq)]
pub struct SatelliteForm {
    /// km above the surface
    pub altitude_km: String,
    /// m/s
    pub speed: String,
    /// `#rrggbb`, `0xrrggbb`, or empty for the renderer's default
    pub color: String,
}

impl Default for SatelliteForm {
    fn default() -> Self {
        Self {
            altitude_km: DEFAULT_ALTITUDE_KM.to_string(),
            speed: DEFAULT_SPEED.to_string(),
            color: PALETTE[0].to_string(),
        }
    }
}

impl SatelliteForm {
    /// Parse every field and build a request to launch from `anchor`.
    pub fn submit(&self, anchor: &str) -> Result<SatelliteRequest, LoadError> {
        let altitude_km = parse_number("altitude", &self.altitude_km)?;
        let speed = parse_number("speed", &self.speed)?;
        let mut request = SatelliteRequest::new(anchor, altitude_km, speed);
        request.color = parse_color(&self.color)?;
        Ok(request)
    }

    /// Raise or lower the altitude. Never goes underground.
    pub fn nudge_altitude(&mut self, by_km: f64) {
        let now = parse_number("altitude", &self.altitude_km).unwrap_or(DEFAULT_ALTITUDE_KM);
        self.altitude_km = (now + by_km).max(0.0).to_string();
    }

    pub fn nudge_speed(&mut self, by: f64) {
        let now = parse_number("speed", &self.speed).unwrap_or(DEFAULT_SPEED);
        self.speed = (now + by).to_string();
    }

    /// Move on to the next color in the palette.
    pub fn cycle_color(&mut self) {
        let next = PALETTE
            .iter()
            .position(|&c| c.eq_ignore_ascii_case(self.color.trim()))
            .map(|idx| (idx + 1) % PALETTE.len())
            .unwrap_or(0);
        self.color = PALETTE[next].to_string();
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, LoadError> {
    match text.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(LoadError::Field {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parse `#rrggbb` or `0xrrggbb`. Empty means no color.
pub fn parse_color(text: &str) -> Result<Option<u32>, LoadError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let bad = || LoadError::Field {
        field: "color",
        value: text.to_string(),
    };
    let hex = if let Some(hex) = text.strip_prefix('#') {
        hex
    } else if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        hex
    } else {
        return Err(bad());
    };
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    u32::from_str_radix(hex, 16).map(Some).map_err(|_| bad())
}

const DEFAULT_ALTITUDE_KM: f64 = 200.0;
const DEFAULT_SPEED: f64 = 7900.0;

/// Colors Tab cycles through.
const PALETTE: &[&str] = &["#ff00ff", "#00ffff", "#ffff00", "#ff5c26", "#56ff2d", "#ffffff"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_submits_the_stock_satellite() {
        let request = SatelliteForm::default().submit("Earth").unwrap();
        assert_eq!(request.anchor, "Earth");
        assert_eq!(request.altitude_km, 200.0);
        assert_eq!(request.speed, 7900.0);
        assert_eq!(request.color, Some(0xff00ff));
        assert_eq!(request.label, None);
    }

    #[test]
    fn bad_fields_say_which_field() {
        let form = SatelliteForm {
            altitude_km: "two hundred".to_string(),
            ..SatelliteForm::default()
        };
        match form.submit("Earth") {
            Err(LoadError::Field { field, value }) => {
                assert_eq!(field, "altitude");
                assert_eq!(value, "two hundred");
            }
            other => panic!("expected a field error, got {:?}", other),
        }

        let form = SatelliteForm {
            speed: "inf".to_string(),
            ..SatelliteForm::default()
        };
        assert!(matches!(
            form.submit("Earth"),
            Err(LoadError::Field { field: "speed", .. })
        ));
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("#3669FF").unwrap(), Some(0x3669ff));
        assert_eq!(parse_color(" 0xff00ff ").unwrap(), Some(0xff00ff));
        assert_eq!(parse_color("").unwrap(), None);
        assert!(parse_color("ff00ff").is_err());
        assert!(parse_color("#ff00f").is_err());
        assert!(parse_color("#gg0000").is_err());
    }

    #[test]
    fn nudging() {
        let mut form = SatelliteForm::default();
        form.nudge_altitude(50.0);
        form.nudge_speed(-100.0);
        let request = form.submit("Earth").unwrap();
        assert_eq!(request.altitude_km, 250.0);
        assert_eq!(request.speed, 7800.0);

        form.nudge_altitude(-1000.0);
        assert_eq!(form.submit("Earth").unwrap().altitude_km, 0.0);

        form.speed = "garbage".to_string();
        form.nudge_speed(100.0);
        assert_eq!(form.submit("Earth").unwrap().speed, 8000.0);
    }

    #[test]
    fn color_cycle_wraps_around() {
        let mut form = SatelliteForm::default();
        for _ in 0..PALETTE.len() {
            form.cycle_color();
        }
        assert_eq!(form, SatelliteForm::default());

        form.color = "#123456".to_string();
        form.cycle_color();
        assert_eq!(form.color, PALETTE[0]);
    }
}
