//! Invariant checks for derived mesh data.
//!
//! The central invariant of the control-volume construction is that the
//! node control volumes partition the mesh: their sum equals the sum of the
//! cell volumes, whatever the mesh quality.

use crate::mesh_error::MeshError;

/// Relative tolerance used by [`check_partition`].
pub const PARTITION_RTOL: f64 = 1e-10;

/// Trait for validating derived-data invariants.
pub trait DebugInvariants {
    /// Panic on a broken invariant in debug builds or when invariant checking
    /// is enabled; no-op otherwise.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Check that `parts` sums to `total` within [`PARTITION_RTOL`] (relative to
/// `total`, absolute when `total` is zero).
pub fn check_partition(parts: &[f64], total: f64) -> Result<(), MeshError> {
    let sum: f64 = parts.iter().sum();
    let gap = (sum - total).abs();
    if gap <= PARTITION_RTOL * total.abs().max(f64::MIN_POSITIVE) || gap == 0.0 {
        Ok(())
    } else {
        Err(MeshError::InvariantViolation(format!(
            "control volumes sum to {sum}, cell volumes to {total}"
        )))
    }
}

/// Run a fallible check and panic on error when invariant checking is
/// enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_partition_passes() {
        assert!(check_partition(&[0.25, 0.25, 0.5], 1.0).is_ok());
    }

    #[test]
    fn negative_parts_are_allowed() {
        assert!(check_partition(&[1.5, -0.5], 1.0).is_ok());
    }

    #[test]
    fn gap_is_reported() {
        let err = check_partition(&[0.5, 0.4], 1.0).unwrap_err();
        assert!(matches!(err, MeshError::InvariantViolation(_)));
    }

    #[test]
    fn empty_mesh_partitions_zero() {
        assert!(check_partition(&[], 0.0).is_ok());
    }
}
