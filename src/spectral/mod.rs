//! The per-wavenumber transfer function and its transform pairing.
//!
//! The steady linearized vorticity balance gives, for each zonal wavenumber,
//!
//!   psi_hat_j = f0 * h_hat_j / [ H * (K_j^2 - Ks^2 - i*eps_j) ]
//!
//! with Ks^2 = beta/u the squared stationary wavenumber, K_j^2 = k_j^2 + m^2
//! the squared total wavenumber and eps_j the dimensionless linear damping.
//! Resonance (K_j^2 -> Ks^2) is regularized by the damping term.


use {
    crate::{
        error::ModelError,
        grid::Grid,
        planet::{LatitudeContext, Planet},
    },
    ndarray::Array1,
    ndrustfft::{ndfft, ndifft, Complex, FftHandler},
    std::f64::consts::PI,
};

/// Relative bound on the imaginary residue left by the inverse transform.
const IMAGINARY_TOLERANCE: f64 = 1.0e-9;

/// Derived model constants consumed by the transfer function.
///
/// All arrays are indexed by the discrete-Fourier wavenumber index
/// j = 0..n-1, with the signed convention: k_j = 2*pi*j/Lx up to the fold
/// at n/2 and the negative aliases 2*pi*(j-n)/Lx above it. The transfer
/// function is then Hermitian for real topography, so the inverse transform
/// is real to rounding error.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    /// Zonal-mean wind u (m s^-1)
    pub zonal_wind: f64,
    /// Meridional wavenumber m (m^-1)
    pub meridional_wavenumber: f64,
    /// Linear damping timescale tau (s)
    pub damping_timescale: f64,
    /// Coriolis parameter at the model latitude (s^-1)
    pub coriolis: f64,
    /// Gravitational acceleration (m s^-2)
    pub gravity: f64,
    /// Barotropic layer depth H (m)
    pub depth: f64,
    /// Squared stationary wavenumber Ks^2 = beta/u (m^-2)
    pub stationary_wavenumber_sq: f64,
    /// Signed zonal wavenumbers k_j (m^-1)
    pub zonal_wavenumbers: Array1<f64>,
    /// Squared total wavenumbers K_j^2 = k_j^2 + m^2 (m^-2)
    pub total_wavenumber_sq: Array1<f64>,
    /// Dimensionless damping eps_j = K_j^2 / (tau * k_j * u); eps_0 = 0 by
    /// convention since the zonal mean carries no damping ratio
    pub damping: Array1<f64>,
}

impl ModelParameters {
    pub fn new(
        planet: &Planet,
        latitude: &LatitudeContext,
        grid: &Grid,
        zonal_wind: f64,
        meridional_wavenumber: f64,
        damping_timescale: f64,
    ) -> Result<Self, ModelError> {
        if !zonal_wind.is_finite() || zonal_wind == 0.0 {
            return Err(ModelError::Domain(format!(
                "zonal wind must be finite and nonzero, got {}",
                zonal_wind
            )));
        }
        if !(damping_timescale > 0.0) {
            return Err(ModelError::Domain(format!(
                "damping timescale must be positive, got {}",
                damping_timescale
            )));
        }

        let n = grid.num_points;

        let zonal_wavenumbers = Array1::from_shape_fn(n, |j| {
            let signed = if 2 * j <= n {
                j as f64
            } else {
                j as f64 - n as f64
            };
            2.0 * PI * signed / grid.length
        });

        let msq = meridional_wavenumber * meridional_wavenumber;
        let total_wavenumber_sq = zonal_wavenumbers.mapv(|k| k * k + msq);

        let damping = Array1::from_shape_fn(n, |j| {
            if j == 0 {
                // the general formula divides by k_0 = 0
                0.0
            } else {
                total_wavenumber_sq[j]
                    / (damping_timescale * zonal_wavenumbers[j] * zonal_wind)
            }
        });

        Ok(ModelParameters {
            zonal_wind,
            meridional_wavenumber,
            damping_timescale,
            coriolis: latitude.coriolis,
            gravity: planet.gravity,
            depth: planet.depth,
            stationary_wavenumber_sq: latitude.beta / zonal_wind,
            zonal_wavenumbers,
            total_wavenumber_sq,
            damping,
        })
    }
}

/// Stateless solver for the steady response on one latitude circle.
pub struct Solver {
    params: ModelParameters,
    num_points: usize,
    fft: FftHandler<f64>,
}

impl Solver {
    pub fn new(params: ModelParameters) -> Self {
        let num_points = params.zonal_wavenumbers.len();
        Solver {
            params,
            num_points,
            fft: FftHandler::new(num_points),
        }
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Steady stream-function perturbation psi for the given topography.
    pub fn solve(&self, topography: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
        let mut spectrum = self.to_spectral(topography)?;
        self.apply_transfer(&mut spectrum);
        Ok(self.to_physical(&spectrum))
    }

    /// Stream function scaled by f0/g: the geopotential-height perturbation
    /// in meters, comparable with observed height fields.
    pub fn height_perturbation(&self, psi: &Array1<f64>) -> Array1<f64> {
        psi.mapv(|p| p * self.params.coriolis / self.params.gravity)
    }

    /// Forward transform with the zonal-mean (j = 0) coefficient zeroed:
    /// the linearized model has no equation for the mean field.
    pub fn to_spectral(
        &self,
        field: &Array1<f64>,
    ) -> Result<Array1<Complex<f64>>, ModelError> {
        if field.len() != self.num_points {
            return Err(ModelError::Configuration(format!(
                "topography length {} does not match grid length {}; resample before solving",
                field.len(),
                self.num_points
            )));
        }

        let input = field.mapv(|v| Complex::new(v, 0.0));
        let mut spectrum = Array1::<Complex<f64>>::zeros(self.num_points);
        ndfft(&input, &mut spectrum, &self.fft, 0);
        spectrum[0] = Complex::new(0.0, 0.0);

        Ok(spectrum)
    }

    /// Applies the per-wavenumber response in place. The j = 0 slot is left
    /// at its zeroed value; every other denominator is bounded away from
    /// zero by the damping term.
    pub fn apply_transfer(&self, spectrum: &mut Array1<Complex<f64>>) {
        let p = &self.params;
        for j in 1..self.num_points {
            let denominator = Complex::new(
                p.total_wavenumber_sq[j] - p.stationary_wavenumber_sq,
                -p.damping[j],
            );
            spectrum[j] = p.coriolis * spectrum[j] / (p.depth * denominator);
        }
    }

    /// Inverse transform, discarding the imaginary part.
    ///
    /// For real topography the adjusted spectrum is Hermitian, so the
    /// imaginary part must vanish to rounding error; a residue above the
    /// tolerance means the transfer lost its symmetry and the truncation
    /// would be silently dropping signal.
    pub fn to_physical(&self, spectrum: &Array1<Complex<f64>>) -> Array1<f64> {
        let mut field = Array1::<Complex<f64>>::zeros(self.num_points);
        ndifft(spectrum, &mut field, &self.fft, 0);

        let scale = field
            .iter()
            .map(|c| c.re.abs())
            .fold(1.0, f64::max);
        let residue = field.iter().map(|c| c.im.abs()).fold(0.0, f64::max);
        assert!(
            residue <= IMAGINARY_TOLERANCE * scale,
            "imaginary residue {} exceeds tolerance for scale {}; \
             truncating it would drop real signal",
            residue,
            scale
        );

        field.mapv(|c| c.re)
    }
}
