use ndarray::Array1;

/// Resamples a periodic profile to `num_points` points by linear
/// interpolation, treating the input as wrapping around its last sample.
///
/// Used to bridge external topography (whose length is fixed by the source
/// file's longitude resolution) onto the model grid before the spectral
/// engine sees it.
pub fn resample_periodic(values: &[f64], num_points: usize) -> Array1<f64> {
    let len = values.len();

    Array1::from_shape_fn(num_points, |i| {
        let pos = i as f64 * len as f64 / num_points as f64;
        let frac = pos - pos.floor();
        let i0 = (pos.floor() as usize) % len;
        let i1 = (i0 + 1) % len;
        values[i0] * (1.0 - frac) + values[i1] * frac
    })
}

#[cfg(test)]
pub(crate) fn assert_approx_eq_slice(a: &[f64], b: &[f64], epsilon: f64) {
    assert_eq!(a.len(), b.len());
    for (i, e) in a.iter().enumerate() {
        approx::assert_abs_diff_eq!(*e, b[i], epsilon = epsilon);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resample_is_identity_at_matching_length() {
        let values = [1.0, -2.0, 3.5, 0.25];
        let out = resample_periodic(&values, 4);
        assert_approx_eq_slice(out.as_slice().unwrap(), &values, 1.0e-13);
    }

    #[test]
    fn upsampling_interpolates_across_the_wrap() {
        let values = [0.0, 1.0];
        let out = resample_periodic(&values, 4);
        // midpoint between the last sample and the (wrapped) first
        assert_approx_eq_slice(out.as_slice().unwrap(), &[0.0, 0.5, 1.0, 0.5], 1.0e-13);
    }

    #[test]
    fn downsampling_keeps_every_other_sample() {
        let values = [0.0, 10.0, 20.0, 30.0];
        let out = resample_periodic(&values, 2);
        assert_approx_eq_slice(out.as_slice().unwrap(), &[0.0, 20.0], 1.0e-13);
    }
}
