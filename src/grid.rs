use {
    crate::{error::ModelError, planet::LatitudeContext},
    ndarray::Array1,
};

/// Periodic one-dimensional grid along a latitude circle.
///
/// Coordinates span [-Lx/2, Lx/2) with uniform spacing; the right endpoint
/// is identified with the left by periodic wrap-around.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub num_points: usize,
    /// Domain length Lx (m), the zonal circumference at the model latitude
    pub length: f64,
    /// Spacing dx = Lx / n (m)
    pub spacing: f64,
    /// Physical-space coordinates (m)
    pub x: Array1<f64>,
}

impl Grid {
    /// Builds the grid for `latitude` with `num_points` points.
    ///
    /// `num_points` must be even so the Nyquist wavenumber is well defined
    /// for the spectral engine.
    pub fn new(latitude: &LatitudeContext, num_points: usize) -> Result<Self, ModelError> {
        if num_points == 0 || num_points % 2 != 0 {
            return Err(ModelError::Configuration(format!(
                "grid resolution must be a positive even integer, got {}",
                num_points
            )));
        }

        let length = latitude.circumference;
        let spacing = length / num_points as f64;
        let x = Array1::from_shape_fn(num_points, |i| spacing * i as f64 - 0.5 * length);

        Ok(Grid {
            num_points,
            length,
            spacing,
            x,
        })
    }

    /// Grid coordinates as degrees of longitude on [-180, 180), for
    /// presentation against observational data.
    pub fn longitudes(&self) -> Array1<f64> {
        self.x.mapv(|x| 360.0 * x / self.length)
    }
}

#[cfg(test)]
mod test {
    use {
        super::*,
        crate::planet::Planet,
        approx::assert_abs_diff_eq,
    };

    fn grid(num_points: usize) -> Result<Grid, ModelError> {
        let lat = LatitudeContext::new(&Planet::default(), 45.0).unwrap();
        Grid::new(&lat, num_points)
    }

    #[test]
    fn spans_half_open_interval() {
        for &n in &[2usize, 16, 480] {
            let grid = grid(n).unwrap();

            assert_eq!(grid.x.len(), n);
            assert_abs_diff_eq!(grid.x[0], -0.5 * grid.length, epsilon = 1.0e-6);
            // last point stops one spacing short of +Lx/2
            assert_abs_diff_eq!(
                grid.x[n - 1],
                0.5 * grid.length - grid.spacing,
                epsilon = 1.0e-6
            );
            for i in 1..n {
                assert_abs_diff_eq!(grid.x[i] - grid.x[i - 1], grid.spacing, epsilon = 1.0e-6);
            }
        }
    }

    #[test]
    fn rejects_odd_or_zero_resolution() {
        for &n in &[0usize, 1, 3, 479] {
            match grid(n) {
                Err(ModelError::Configuration(_)) => {}
                other => panic!("expected configuration error for n = {}, got {:?}", n, other),
            }
        }
    }

    #[test]
    fn longitudes_cover_the_circle() {
        let grid = grid(480).unwrap();
        let lon = grid.longitudes();

        assert_abs_diff_eq!(lon[0], -180.0, epsilon = 1.0e-10);
        assert_abs_diff_eq!(lon[240], 0.0, epsilon = 1.0e-10);
        assert_abs_diff_eq!(lon[479], 180.0 - 360.0 / 480.0, epsilon = 1.0e-10);
    }
}
