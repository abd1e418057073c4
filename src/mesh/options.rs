//! Construction options for [`TetraMesh`](crate::mesh::TetraMesh).
//!
//! Options serialize with serde, so a driver can keep them in a JSON or TOML
//! configuration file:
//!
//! ```rust
//! use tet_covolume::mesh::options::{DegeneratePolicy, TetraMeshOptions};
//! use tet_covolume::geometry::circumcenter::CircumcenterMode;
//!
//! let options = TetraMeshOptions::default()
//!     .with_mode(CircumcenterMode::Geometric)
//!     .with_degenerate_policy(DegeneratePolicy::Skip);
//! options.validate()?;
//! # Ok::<(), tet_covolume::mesh_error::MeshError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::cell::DEFAULT_CONDITION_LIMIT;
use crate::geometry::circumcenter::CircumcenterMode;
use crate::geometry::metrics::DEFAULT_DEGENERACY_TOL;
use crate::mesh_error::MeshError;

/// What to do with cells whose circumsphere cannot be solved, or whose
/// control-volume contributions are too ill-conditioned to be trusted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Keep NaN circumcenter, distances and ce-ratios; NaN reaches the
    /// control volumes of the cell's nodes.
    #[default]
    Propagate,
    /// Keep NaN circumcenter and distances but zero the ce-ratios, so the
    /// cell contributes nothing to control volumes.
    Skip,
    /// Fail construction with [`MeshError::DegenerateCell`].
    Error,
}

/// Options for building a [`TetraMesh`](crate::mesh::TetraMesh).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetraMeshOptions {
    pub mode: CircumcenterMode,
    pub degenerate_policy: DegeneratePolicy,
    /// Relative tolerance of the coplanarity test, see
    /// [`is_degenerate`](crate::geometry::metrics::is_degenerate).
    pub degeneracy_tolerance: f64,
    /// Cells whose [`partition_condition`](crate::geometry::cell::partition_condition)
    /// exceeds this are treated as degenerate. `f64::INFINITY` disables the
    /// check.
    pub condition_limit: f64,
}

impl Default for TetraMeshOptions {
    fn default() -> Self {
        TetraMeshOptions {
            mode: CircumcenterMode::Geometric,
            degenerate_policy: DegeneratePolicy::Propagate,
            degeneracy_tolerance: DEFAULT_DEGENERACY_TOL,
            condition_limit: DEFAULT_CONDITION_LIMIT,
        }
    }
}

impl TetraMeshOptions {
    pub fn with_mode(mut self, mode: CircumcenterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_degeneracy_tolerance(mut self, tolerance: f64) -> Self {
        self.degeneracy_tolerance = tolerance;
        self
    }

    pub fn with_condition_limit(mut self, limit: f64) -> Self {
        self.condition_limit = limit;
        self
    }

    /// Parse the mode from its string name (`"geometric"` or `"algebraic"`).
    pub fn with_mode_name(self, name: &str) -> Result<Self, MeshError> {
        Ok(self.with_mode(name.parse()?))
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let tol = self.degeneracy_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(MeshError::InvalidTolerance(tol));
        }
        if !(self.condition_limit > 0.0) {
            return Err(MeshError::InvalidConditionLimit(self.condition_limit));
        }
        Ok(())
    }
}
