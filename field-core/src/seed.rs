use num_complex::Complex64;

use crate::cell::Cell;
use crate::gravity::GravityModel;

/// Seeds one cell from normalized grid coordinates.
///
/// Inside the disk `r2 = 2(x² + y²) < 1` the field is a wave packet
/// `(sin 38x, cos 38x)` under the compact-support bump envelope
/// `6·exp(-1/(1 - r2))`; the rate is the same packet rotated -90° in
/// the complex plane, so the initial "velocity" is orthogonal to the
/// initial "position" in phase space. The envelope and all of its
/// derivatives vanish as `r2 → 1`, so the seed joins the zero exterior
/// smoothly.
///
/// Outside the disk both `field` and `rate` are exactly zero. The
/// gravity bias is computed from `model` on both branches.
pub fn seed(x: f64, y: f64, model: GravityModel) -> Cell {
    let r2 = 2.0 * (x * x + y * y);
    let (field, rate) = if r2 < 1.0 {
        let (s, c) = (38.0 * x).sin_cos();
        let envelope = 6.0 * (-1.0 / (1.0 - r2)).exp();
        (
            Complex64::new(s, c) * envelope,
            Complex64::new(c, -s) * envelope,
        )
    } else {
        (Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0))
    };

    Cell {
        field,
        rate,
        gravity: model.compute(x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_the_disk_is_exactly_zero() {
        // r2 = 2 at (1, 0).
        let c = seed(1.0, 0.0, GravityModel::None);
        assert_eq!(c.field, Complex64::new(0.0, 0.0));
        assert_eq!(c.rate, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn disk_boundary_is_cleared() {
        // x = y = 0.5 puts r2 exactly at 1; the `<` comparison excludes it.
        let c = seed(0.5, 0.5, GravityModel::None);
        assert_eq!(c.field, Complex64::new(0.0, 0.0));
        assert_eq!(c.rate, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn magnitudes_match_the_envelope() {
        // r2 = 2 * (0.0625 + 0.0625) = 0.25.
        let c = seed(0.25, 0.25, GravityModel::None);
        let envelope = 6.0 * (-1.0f64 / (1.0 - 0.25)).exp();
        assert!((c.field.norm() - envelope).abs() < 1e-12);
        assert!((c.rate.norm() - envelope).abs() < 1e-12);
    }

    #[test]
    fn rate_is_the_field_rotated_minus_ninety_degrees() {
        let c = seed(0.2, -0.1, GravityModel::None);
        let rotated = c.field * Complex64::new(0.0, -1.0);
        assert!((c.rate - rotated).norm() < 1e-12);
    }

    #[test]
    fn gravity_is_set_on_both_radius_branches() {
        let inside = seed(0.1, 0.0, GravityModel::StaticBlackHole);
        assert_eq!(inside.gravity.z, 1.0);

        // r2 = 2: field cleared, gravity still evaluated.
        let outside = seed(1.0, 0.0, GravityModel::StaticBlackHole);
        assert_eq!(outside.field, Complex64::new(0.0, 0.0));
        assert!((outside.gravity.z - 0.025).abs() < 1e-12);
    }
}
