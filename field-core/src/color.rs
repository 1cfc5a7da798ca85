//! Polar colorization of complex field values.
//!
//! Each field value maps to a pixel through its polar form: the phase
//! picks the hue, the magnitude the lightness. The phase comes from a
//! polynomial `atan2` approximation so the per-cell cost stays low.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_PI, FRAC_PI_2, PI};

/// Below this magnitude a vector has no meaningful direction and the
/// angle is reported as zero.
const DEGENERATE: f64 = 1e-40;

/// Normalized polar angle of `(x, y)` in `[-0.5, 0.5]`, approximating
/// `atan2(y, x) / 2π` without a transcendental call.
///
/// A degree-7 odd minimax polynomial covers the first octant; octant
/// reflections extend it to the full circle. The result stays within
/// about 1e-3 radians of the true angle (sampled error is ~2e-4).
pub fn fast_arg(y: f64, x: f64) -> f64 {
    let f = x.abs().max(y.abs());
    if f < DEGENERATE {
        return 0.0;
    }
    let a = x.abs().min(y.abs()) / f;
    let s = a * a;
    let mut r = ((-0.0464964749 * s + 0.15931422) * s - 0.327622764) * s * a + a;
    if y.abs() > x.abs() {
        r = FRAC_PI_2 - r;
    }
    if x < 0.0 {
        r = PI - r;
    }
    if y < 0.0 {
        r = -r;
    }
    r * 0.5 * FRAC_1_PI
}

/// RGBA pixel for one field value.
///
/// Hue is the normalized field angle shifted into `[0.5, 1.5]`,
/// saturation is fixed at 1, lightness scales with magnitude and clamps
/// at 0.9 so strong cells never wash out to pure white.
pub fn colorize(field: Complex64) -> [u8; 4] {
    let magnitude = field.norm();
    let hue = fast_arg(field.im, field.re) + 1.0;
    hsl_to_rgba(hue, 1.0, (magnitude * 0.3).min(0.9))
}

/// HSL to RGBA. `h` is a turn fraction and wraps into `[0, 1)`; `s` and
/// `l` are in `[0, 1]`. Alpha is always opaque.
pub fn hsl_to_rgba(h: f64, s: f64, l: f64) -> [u8; 4] {
    let h = h.rem_euclid(1.0) * 6.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - 0.5 * c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
        255,
    ]
}
