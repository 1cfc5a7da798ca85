use glam::DVec3;
use num_complex::Complex64;

use crate::gravity::GravityModel;
use crate::seed;

/// State of a single grid cell.
///
/// The simulated quantity is a complex scalar; the system is second
/// order in time and carried as a coupled first-order pair
/// (`field`, `rate`). `gravity` is the static background bias:
/// `x`/`y` skew the directional neighbor weighting, `z` is the
/// lapse-like scalar controlling the local time-flow rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub field: Complex64,
    pub rate: Complex64,
    pub gravity: DVec3,
}

impl Cell {
    /// A cell with zero field, zero rate and no gravity bias.
    pub fn cleared() -> Self {
        Self {
            field: Complex64::new(0.0, 0.0),
            rate: Complex64::new(0.0, 0.0),
            gravity: DVec3::ZERO,
        }
    }

    /// Seeds a cell from normalized grid coordinates under the given
    /// gravity model. See [`seed::seed`].
    pub fn seeded(x: f64, y: f64, model: GravityModel) -> Self {
        seed::seed(x, y, model)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::cleared()
    }
}
