use {
    crate::{
        constants::{EARTH_RADIUS, EARTH_ROTATION_RATE, GRAVITY, LAYER_DEPTH},
        error::ModelError,
    },
    serde::Deserialize,
    std::f64::consts::PI,
};

/// Physical constants of the rotating planet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Planet {
    /// Gravitational acceleration (m s^-2)
    pub gravity: f64,
    /// Depth of the barotropic layer (m)
    pub depth: f64,
    /// Planetary radius (m)
    pub radius: f64,
    /// Rotation rate (s^-1)
    pub rotation_rate: f64,
}

impl Default for Planet {
    fn default() -> Self {
        Planet {
            gravity: GRAVITY,
            depth: LAYER_DEPTH,
            radius: EARTH_RADIUS,
            rotation_rate: EARTH_ROTATION_RATE,
        }
    }
}

/// Quantities fixed by the choice of latitude circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeContext {
    pub latitude_deg: f64,
    pub latitude_rad: f64,
    /// Coriolis parameter f0 = 2 Omega sin(phi) (s^-1)
    pub coriolis: f64,
    /// Meridional Coriolis gradient beta = 2 Omega cos(phi) / a (m^-1 s^-1)
    pub beta: f64,
    /// Length of the latitude circle 2 pi a cos(phi) (m)
    pub circumference: f64,
}

impl LatitudeContext {
    /// Derives the beta-plane quantities at `latitude_deg`.
    ///
    /// The equator is legal (f0 = 0, so the response vanishes identically);
    /// the poles are not, since the latitude circle degenerates there.
    pub fn new(planet: &Planet, latitude_deg: f64) -> Result<Self, ModelError> {
        if !latitude_deg.is_finite() || latitude_deg.abs() >= 90.0 {
            return Err(ModelError::Configuration(format!(
                "latitude must lie strictly between -90 and 90 degrees, got {}",
                latitude_deg
            )));
        }

        let latitude_rad = latitude_deg.to_radians();

        Ok(LatitudeContext {
            latitude_deg,
            latitude_rad,
            coriolis: 2.0 * planet.rotation_rate * latitude_rad.sin(),
            beta: 2.0 * planet.rotation_rate * latitude_rad.cos() / planet.radius,
            circumference: 2.0 * PI * planet.radius * latitude_rad.cos(),
        })
    }
}
