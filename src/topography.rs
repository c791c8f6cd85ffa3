//! Surface height profiles forcing the stationary wave.

use {
    crate::{error::ModelError, grid::Grid, planet::Planet, utils::resample_periodic},
    byteorder::{LittleEndian, ReadBytesExt},
    log::debug,
    ndarray::Array1,
    serde::Deserialize,
    std::{
        f64::consts::PI,
        fs::File,
        io::BufReader,
        path::{Path, PathBuf},
    },
};

/// Half-width, in rows, of the latitude band averaged out of external data.
const LATITUDE_BAND: usize = 5;

/// Source of the surface height profile along the latitude circle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topography {
    /// Smooth isolated ridge mimicking a delta-function mountain.
    Analytic {
        /// Amplitude scale h0 (m). Note the peak height is h0/sqrt(pi),
        /// not h0: the profile is a normalized Gaussian scaled by h0*width.
        height: f64,
        /// Width scale of the ridge (m)
        width: f64,
    },
    /// Band-averaged surface geopotential read from a gridded file.
    External { path: PathBuf },
}

impl Default for Topography {
    fn default() -> Self {
        Topography::Analytic {
            height: 4000.0,
            width: 1.0e6,
        }
    }
}

impl Topography {
    /// Produces the height profile on `grid`.
    ///
    /// External data is resampled to the grid length by periodic linear
    /// interpolation, so the spectral engine always receives exactly
    /// `grid.num_points` values.
    pub fn generate(
        &self,
        grid: &Grid,
        planet: &Planet,
        latitude_deg: f64,
    ) -> Result<Array1<f64>, ModelError> {
        match self {
            Topography::Analytic { height, width } => Ok(gaussian_ridge(grid, *height, *width)),
            Topography::External { path } => {
                let row = read_height_row(path, planet, latitude_deg)?;
                Ok(resample_periodic(&row, grid.num_points))
            }
        }
    }
}

/// h(x) = h0 * w * exp(-(x/w)^2) / sqrt(pi w^2)
fn gaussian_ridge(grid: &Grid, height: f64, width: f64) -> Array1<f64> {
    let norm = (PI * width * width).sqrt();
    grid.x
        .mapv(|x| height * width * (-(x / width).powi(2)).exp() / norm)
}

/// Reads one band-averaged height row from a gridded geopotential file.
///
/// File layout (little-endian): u64 nlat, u64 nlon, nlat f64 latitudes in
/// degrees, then nlat*nlon f64 surface geopotential (m^2 s^-2) row-major by
/// latitude. The nearest latitude row to `latitude_deg` is averaged with up
/// to `LATITUDE_BAND` neighbours on each side, then divided by g to convert
/// geopotential to geometric height.
fn read_height_row(
    path: &Path,
    planet: &Planet,
    latitude_deg: f64,
) -> Result<Vec<f64>, ModelError> {
    let unavailable =
        |what: &str| ModelError::DataUnavailable(format!("{}: {}", path.display(), what));

    let file = File::open(path)
        .map_err(|e| unavailable(&format!("failed to open ({})", e)))?;
    let mut reader = BufReader::new(file);

    let nlat = reader
        .read_u64::<LittleEndian>()
        .map_err(|e| unavailable(&format!("truncated header ({})", e)))? as usize;
    let nlon = reader
        .read_u64::<LittleEndian>()
        .map_err(|e| unavailable(&format!("truncated header ({})", e)))? as usize;

    if nlat == 0 || nlon == 0 {
        return Err(unavailable("empty latitude or longitude dimension"));
    }

    let mut latitudes = vec![0.0; nlat];
    reader
        .read_f64_into::<LittleEndian>(&mut latitudes)
        .map_err(|e| unavailable(&format!("truncated latitude coordinate ({})", e)))?;

    let mut geopotential = vec![0.0; nlat * nlon];
    reader
        .read_f64_into::<LittleEndian>(&mut geopotential)
        .map_err(|e| unavailable(&format!("truncated geopotential field ({})", e)))?;

    // Nearest row to the target latitude; NaN coordinates never win the
    // comparison and are caught below if the file holds nothing else.
    let nearest = (0..nlat)
        .filter(|&i| latitudes[i].is_finite())
        .min_by(|&a, &b| {
            let da = (latitudes[a] - latitude_deg).abs();
            let db = (latitudes[b] - latitude_deg).abs();
            da.partial_cmp(&db).expect("finite by filter")
        })
        .ok_or_else(|| unavailable("latitude coordinate holds no finite values"))?;

    let lo = nearest.saturating_sub(LATITUDE_BAND);
    let hi = (nearest + LATITUDE_BAND).min(nlat - 1);

    debug!(
        "averaging rows {}..={} around latitude {} (target {})",
        lo, hi, latitudes[nearest], latitude_deg
    );

    let rows = (hi - lo + 1) as f64;
    let mut heights = vec![0.0; nlon];
    for row in lo..=hi {
        for (j, h) in heights.iter_mut().enumerate() {
            *h += geopotential[row * nlon + j] / (planet.gravity * rows);
        }
    }

    Ok(heights)
}

#[cfg(test)]
mod test {
    use {
        super::*,
        crate::{planet::LatitudeContext, utils::assert_approx_eq_slice},
        approx::assert_abs_diff_eq,
        byteorder::{LittleEndian, WriteBytesExt},
        std::io::Write,
        tempdir::TempDir,
    };

    fn grid(num_points: usize) -> Grid {
        let lat = LatitudeContext::new(&Planet::default(), 45.0).unwrap();
        Grid::new(&lat, num_points).unwrap()
    }

    #[test]
    fn gaussian_peak_height() {
        let grid = grid(480);
        let topo = Topography::Analytic {
            height: 4000.0,
            width: 1.0e6,
        }
        .generate(&grid, &Planet::default(), 45.0)
        .unwrap();

        // peak value is h0/sqrt(pi), attained at x = 0
        let peak = topo.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_abs_diff_eq!(peak, 2256.8, epsilon = 22.6);
        assert_abs_diff_eq!(topo[240], peak);
    }

    #[test]
    fn gaussian_decays_away_from_the_ridge() {
        let grid = grid(480);
        let topo = Topography::default()
            .generate(&grid, &Planet::default(), 45.0)
            .unwrap();

        assert!(topo[0].abs() < 1.0e-10);
        assert!(topo[120].abs() < 1.0e-10);
    }

    fn write_test_file(dir: &TempDir, latitudes: &[f64], rows: &[Vec<f64>]) -> PathBuf {
        let path = dir.path().join("topo.r8");
        let mut f = File::create(&path).unwrap();
        f.write_u64::<LittleEndian>(latitudes.len() as u64).unwrap();
        f.write_u64::<LittleEndian>(rows[0].len() as u64).unwrap();
        for lat in latitudes {
            f.write_f64::<LittleEndian>(*lat).unwrap();
        }
        for row in rows {
            for v in row {
                f.write_f64::<LittleEndian>(*v).unwrap();
            }
        }
        f.flush().unwrap();
        path
    }

    #[test]
    fn external_band_average_and_height_conversion() {
        let dir = TempDir::new("topo").unwrap();
        let planet = Planet::default();

        // three rows all within the band of the nearest (middle) row;
        // geopotential g*{100, 200, 600} averages to g*300
        let rows = vec![
            vec![planet.gravity * 100.0; 8],
            vec![planet.gravity * 200.0; 8],
            vec![planet.gravity * 600.0; 8],
        ];
        let path = write_test_file(&dir, &[40.0, 46.0, 50.0], &rows);

        let grid = grid(16);
        let topo = Topography::External { path }
            .generate(&grid, &planet, 45.0)
            .unwrap();

        assert_eq!(topo.len(), 16);
        assert_approx_eq_slice(topo.as_slice().unwrap(), &[300.0; 16], 1.0e-9);
    }

    #[test]
    fn external_missing_file_is_unavailable() {
        let grid = grid(16);
        let result = Topography::External {
            path: PathBuf::from("/nonexistent/topo.r8"),
        }
        .generate(&grid, &Planet::default(), 45.0);

        match result {
            Err(ModelError::DataUnavailable(_)) => {}
            other => panic!("expected data-unavailable error, got {:?}", other),
        }
    }

    #[test]
    fn external_truncated_file_is_unavailable() {
        let dir = TempDir::new("topo").unwrap();
        let path = dir.path().join("short.r8");
        let mut f = File::create(&path).unwrap();
        f.write_u64::<LittleEndian>(4).unwrap();
        f.write_u64::<LittleEndian>(8).unwrap();
        // no coordinate or field payload
        f.flush().unwrap();

        let grid = grid(16);
        match (Topography::External { path }).generate(&grid, &Planet::default(), 45.0) {
            Err(ModelError::DataUnavailable(_)) => {}
            other => panic!("expected data-unavailable error, got {:?}", other),
        }
    }
}
