//! Tolerances and limits shared by the flat-plane algorithms.
//!
//! - `parallel_tol_deg`: angular slack for parallel/orthogonal tests.
//! - `point_eps`: slack for "computed point lies on this segment" checks.
//! - `max_sample_attempts`: cap on polygon rejection sampling.

/// Geometry configuration (tolerances and limits).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub parallel_tol_deg: f64,
    pub point_eps: f64,
    pub max_sample_attempts: usize,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            parallel_tol_deg: 0.001,
            point_eps: 1e-9,
            max_sample_attempts: 100_000,
        }
    }
}
