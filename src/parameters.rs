use {
    crate::{planet::Planet, topography::Topography},
    serde::Deserialize,
};

/// Model run parameters
#[derive(Debug, PartialEq, Default, Deserialize)]
pub struct Parameters {
    pub numerical: Numerical,
    pub physical: Physical,
    pub planet: Planet,
    pub topography: Topography,
    pub sweep: Sweep,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Numerical {
    /// Number of longitude points; must be even
    pub grid_resolution: usize,
}

impl Default for Numerical {
    fn default() -> Self {
        Numerical {
            grid_resolution: 480,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Physical {
    /// Model latitude (degrees)
    pub latitude: f64,
    /// Zonal-mean wind u (m/s)
    pub zonal_wind: f64,
    /// Meridional wavenumber m (1/m); the default corresponds to a
    /// meridional wavelength of roughly 9000 km
    pub meridional_wavenumber: f64,
    /// Linear damping timescale tau (s)
    pub damping_timescale: f64,
}

impl Default for Physical {
    fn default() -> Self {
        Physical {
            latitude: 45.0,
            zonal_wind: 15.0,
            meridional_wavenumber: 7.0e-7,
            damping_timescale: 432000.0,
        }
    }
}

/// Wind range for the `sweep` subcommand
#[derive(Debug, PartialEq, Deserialize)]
pub struct Sweep {
    pub wind_start: f64,
    pub wind_stop: f64,
    pub steps: usize,
}

impl Default for Sweep {
    fn default() -> Self {
        Sweep {
            wind_start: 5.0,
            wind_stop: 30.0,
            steps: 26,
        }
    }
}
