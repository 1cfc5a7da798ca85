use crate::gravity::GravityModel;

/// How neighbor lookups behave at the grid border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Toroidal topology: indices wrap to the opposite border.
    #[default]
    Wrap,
    /// Border cells reuse themselves as their missing neighbors.
    Clamp,
}

impl EdgePolicy {
    pub const ALL: [EdgePolicy; 2] = [EdgePolicy::Wrap, EdgePolicy::Clamp];

    pub const fn label(self) -> &'static str {
        match self {
            EdgePolicy::Wrap => "Wrap",
            EdgePolicy::Clamp => "Clamp",
        }
    }
}

/// Evolution rule applied to every cell, selected once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvolutionMode {
    /// Gravity-weighted wave equation with a restoring mass term and a
    /// lapse-scaled field update.
    #[default]
    KleinGordonLike,
    /// `field += i·dt·laplacian`; ignores gravity and the rate state.
    SchrodingerLike,
    /// Rate driven by the discrete curl of field and rate, field by
    /// Euler integration of the previous rate.
    CurlBased,
}

impl EvolutionMode {
    pub const ALL: [EvolutionMode; 3] = [
        EvolutionMode::KleinGordonLike,
        EvolutionMode::SchrodingerLike,
        EvolutionMode::CurlBased,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EvolutionMode::KleinGordonLike => "Klein-Gordon-like",
            EvolutionMode::SchrodingerLike => "Schrödinger-like",
            EvolutionMode::CurlBased => "Curl-based",
        }
    }
}

/// Run-level configuration, fixed between reseeds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub gravity: GravityModel,
    pub evolution: EvolutionMode,
    pub edge: EdgePolicy,
    /// Integration time step.
    pub dt: f64,
    /// Grid spacing used by the spatial differentials.
    pub eps: f64,
    /// Optional brake on magnitude growth, see [`crate::stencil`].
    pub conserve_amplitude: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            gravity: GravityModel::default(),
            evolution: EvolutionMode::default(),
            edge: EdgePolicy::default(),
            dt: 0.1,
            eps: 1.0,
            conserve_amplitude: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_parameters() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.dt, 0.1);
        assert_eq!(cfg.eps, 1.0);
        assert_eq!(cfg.gravity, GravityModel::RotatingBlackHole);
        assert_eq!(cfg.evolution, EvolutionMode::KleinGordonLike);
        assert_eq!(cfg.edge, EdgePolicy::Wrap);
        assert!(!cfg.conserve_amplitude);
    }
}
