//! One-cell evolution rules.
//!
//! Every rule reads only previous-generation state (the cell and its
//! four axis-aligned neighbors) and returns the cell's next state, so
//! callers are free to evaluate cells in any order or in parallel. The
//! gravity vector is a static background: it is carried through
//! unchanged by every mode.

use num_complex::Complex64;

use crate::cell::Cell;
use crate::config::{EvolutionMode, SimConfig};

/// Threshold below which a magnitude change is treated as zero.
const TINY: f64 = 1e-40;

/// Advances one cell from its previous-generation neighborhood.
pub fn step(
    prev: &Cell,
    left: &Cell,
    right: &Cell,
    up: &Cell,
    down: &Cell,
    cfg: &SimConfig,
) -> Cell {
    match cfg.evolution {
        EvolutionMode::KleinGordonLike => klein_gordon(prev, left, right, up, down, cfg),
        EvolutionMode::SchrodingerLike => schrodinger(prev, left, right, up, down, cfg),
        EvolutionMode::CurlBased => curl_based(prev, left, right, up, down, cfg),
    }
}

/// Gravitationally-weighted wave equation.
///
/// The weighted Laplacian couples the cell to its neighbors, `-field`
/// is the restoring mass term, and the field update is scaled by the
/// local lapse `sqrt(1 - gz²)` so strong-field regions evolve slower.
fn klein_gordon(
    prev: &Cell,
    left: &Cell,
    right: &Cell,
    up: &Cell,
    down: &Cell,
    cfg: &SimConfig,
) -> Cell {
    let g = prev.gravity;
    debug_assert!(g.z.abs() <= 1.0, "lapse scalar out of range: {}", g.z);

    let lap = weighted_laplacian(prev, left, right, up, down, cfg.eps);
    let rate = prev.rate + (lap - prev.field) * cfg.dt;

    // One factor of dt is already integrated into the rate.
    let lapse = (1.0 - g.z * g.z).max(0.0).sqrt();
    let mut d = rate * (cfg.dt * lapse);
    if cfg.conserve_amplitude {
        d = clamp_growth(prev, left, right, up, down, d);
    }

    Cell {
        field: prev.field + d,
        rate,
        gravity: prev.gravity,
    }
}

/// First-order Schrödinger-like evolution: the field diffuses along the
/// imaginary axis of the unweighted Laplacian. The rate state is not
/// consumed and passes through unchanged.
fn schrodinger(
    prev: &Cell,
    left: &Cell,
    right: &Cell,
    up: &Cell,
    down: &Cell,
    cfg: &SimConfig,
) -> Cell {
    let lap = laplacian(prev, left, right, up, down, cfg.eps);
    Cell {
        field: prev.field + lap * Complex64::new(0.0, cfg.dt),
        rate: prev.rate,
        gravity: prev.gravity,
    }
}

/// Curl-driven evolution: the rate integrates the discrete curls of the
/// field and of itself (each complex value read as a 2-D vector), and
/// the field follows the previous rate by simple Euler integration.
fn curl_based(
    prev: &Cell,
    left: &Cell,
    right: &Cell,
    up: &Cell,
    down: &Cell,
    cfg: &SimConfig,
) -> Cell {
    let curl_field = curl(left.field, right.field, up.field, down.field, cfg.eps);
    let curl_rate = curl(left.rate, right.rate, up.rate, down.rate, cfg.eps);
    Cell {
        field: prev.field + prev.rate * cfg.dt,
        rate: prev.rate + Complex64::new(curl_field, curl_rate) * (0.01 * cfg.dt),
        gravity: prev.gravity,
    }
}

/// Four-point Laplacian with neighbor contributions skewed by the
/// gravity bias: `(1 - g)` toward the negative axis direction, `(1 + g)`
/// toward the positive one.
fn weighted_laplacian(
    prev: &Cell,
    left: &Cell,
    right: &Cell,
    up: &Cell,
    down: &Cell,
    eps: f64,
) -> Complex64 {
    let g = prev.gravity;
    ((left.field * (1.0 - g.x) - prev.field)
        + (right.field * (1.0 + g.x) - prev.field)
        + (up.field * (1.0 - g.y) - prev.field)
        + (down.field * (1.0 + g.y) - prev.field))
        / (eps * eps)
}

/// Plain four-point Laplacian.
fn laplacian(prev: &Cell, left: &Cell, right: &Cell, up: &Cell, down: &Cell, eps: f64) -> Complex64 {
    (left.field + right.field + up.field + down.field - prev.field * 4.0) / (eps * eps)
}

/// Discrete curl of a complex value read as a 2-D vector.
fn curl(left: Complex64, right: Complex64, up: Complex64, down: Complex64, eps: f64) -> f64 {
    (down.re - up.re - right.im + left.im) / eps
}

/// Limits the magnitude change of the field update to the magnitude the
/// four neighbors carry, as a brake on secular drift from the explicit
/// integrator. When the proposed change `dr` exceeds the neighbor sum
/// `v`, the update is scaled down to `v/dr` of itself.
fn clamp_growth(
    prev: &Cell,
    left: &Cell,
    right: &Cell,
    up: &Cell,
    down: &Cell,
    d: Complex64,
) -> Complex64 {
    let v = left.field.norm() + right.field.norm() + up.field.norm() + down.field.norm();
    let dr = (prev.field + d).norm() - prev.field.norm();
    if dr.abs() > TINY && dr > v {
        d * (v / dr)
    } else {
        d
    }
}
