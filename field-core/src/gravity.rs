use glam::DVec3;

/// Horizon radius shared by the black-hole variants, measured in the
/// seeding radius `r2 = 2(x² + y²)`. Inside `r2 < HORIZON_R2` the bias
/// factor is capped at 1.
pub const HORIZON_R2: f64 = 0.05;

/// Smallest denominator magnitude used by the bias formulas; divisions
/// are clamped here so singular inputs stay finite.
const DENOM_EPS: f64 = 1e-12;

/// Background gravity field, selected once per simulation run.
///
/// [`GravityModel::compute`] maps normalized grid coordinates to the
/// bias vector `(gx, gy, gz)`: the first two skew directional neighbor
/// weighting (a frame-dragging-like effect), `gz` drives the local
/// lapse. Every component is finite and `|gz| <= 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GravityModel {
    /// Flat background, no bias.
    None,
    /// A point mass below the grid: the lapse scalar grows toward `y = 2`.
    MassAtBottom,
    /// Non-rotating hole at the origin with horizon `r2 < HORIZON_R2`.
    StaticBlackHole,
    /// Rotating hole at the origin; also drags the `x`/`y` weights.
    #[default]
    RotatingBlackHole,
    /// Pure frame dragging with no lapse.
    RotationOnly,
}

impl GravityModel {
    /// All selectable variants, in configuration-UI order.
    pub const ALL: [GravityModel; 5] = [
        GravityModel::None,
        GravityModel::MassAtBottom,
        GravityModel::StaticBlackHole,
        GravityModel::RotatingBlackHole,
        GravityModel::RotationOnly,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            GravityModel::None => "None",
            GravityModel::MassAtBottom => "Mass at bottom",
            GravityModel::StaticBlackHole => "Static black hole",
            GravityModel::RotatingBlackHole => "Rotating black hole",
            GravityModel::RotationOnly => "Rotation only",
        }
    }

    /// Computes the bias vector at normalized coordinates `(x, y)`.
    ///
    /// `r2 = 2(x² + y²)` is the same radius measure the seeder uses.
    pub fn compute(self, x: f64, y: f64) -> DVec3 {
        let r2 = 2.0 * (x * x + y * y);
        match self {
            GravityModel::None => DVec3::ZERO,
            GravityModel::MassAtBottom => {
                let gz = 1.0 / clamp_denom(y - 2.0);
                DVec3::new(0.0, 0.0, gz.clamp(-1.0, 1.0))
            }
            GravityModel::StaticBlackHole => DVec3::new(0.0, 0.0, horizon_factor(r2)),
            GravityModel::RotatingBlackHole => {
                let f = horizon_factor(r2);
                let d = clamp_denom(r2);
                DVec3::new(f * y / d, -f * x / d, f)
            }
            GravityModel::RotationOnly => {
                let d = clamp_denom(r2);
                DVec3::new(0.4 * y / d, -0.4 * x / d, 0.0)
            }
        }
    }
}

/// `1` inside the horizon, `HORIZON_R2 / r2` (strictly below 1) outside.
fn horizon_factor(r2: f64) -> f64 {
    if r2 < HORIZON_R2 { 1.0 } else { HORIZON_R2 / r2 }
}

/// Clamps a denominator away from zero, preserving its sign.
fn clamp_denom(d: f64) -> f64 {
    if d.abs() < DENOM_EPS {
        if d < 0.0 { -DENOM_EPS } else { DENOM_EPS }
    } else {
        d
    }
}
