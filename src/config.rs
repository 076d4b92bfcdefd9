use crate::geometry::{PARALLEL_EPSILON, SIDE_EPSILON};

/// Tolerances and execution mode for a diagram clip.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipConfig {
    /// Distance from a clip line within which a point is kept.
    pub side_epsilon: f64,
    /// Normalised determinant below which a crossing is dropped as degenerate.
    pub parallel_epsilon: f64,
    /// Distance within which a crossing snaps onto the diagram vertex it names.
    pub snap_epsilon: f64,
    /// Clip sites on the rayon thread pool. Ids are then assigned in scheduling order.
    pub parallel: bool,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            side_epsilon: SIDE_EPSILON,
            parallel_epsilon: PARALLEL_EPSILON,
            snap_epsilon: 1e-7,
            parallel: false,
        }
    }
}

impl ClipConfig {
    pub fn with_side_epsilon(mut self, eps: f64) -> Self {
        self.side_epsilon = eps;
        self
    }

    pub fn with_parallel_epsilon(mut self, eps: f64) -> Self {
        self.parallel_epsilon = eps;
        self
    }

    pub fn with_snap_epsilon(mut self, eps: f64) -> Self {
        self.snap_epsilon = eps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
