//! All derived quantities of one cell, computed in a single pass.

use crate::debug_invariants::PARTITION_RTOL;
use crate::geometry::ce_ratio::{FaceEdgeArray, ce_ratios};
use crate::geometry::circumcenter::CircumcenterMode;
use crate::geometry::metrics::{TetVertices, edge_lengths_squared, tet_volume};
use crate::geometry::vector::{NAN3, Vec3};
use crate::topology::local_index::{EDGES_PER_FACE, FACES_PER_CELL};

const NAN_FACE_EDGE: FaceEdgeArray = [[f64::NAN; EDGES_PER_FACE]; FACES_PER_CELL];

/// Largest partition condition number for which a cell's control-volume
/// contributions still sum to its volume within
/// [`PARTITION_RTOL`](crate::debug_invariants::PARTITION_RTOL).
pub const DEFAULT_CONDITION_LIMIT: f64 = PARTITION_RTOL / f64::EPSILON;

/// Geometry of one tetrahedron.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGeometry {
    pub volume: f64,
    pub circumcenter: Vec3,
    pub face_distances: [f64; FACES_PER_CELL],
    pub ce_ratios: FaceEdgeArray,
    pub edge_lengths_sq: FaceEdgeArray,
    /// See [`partition_condition`]; NaN when the circumsphere solve failed.
    pub condition: f64,
    /// Set when the circumsphere solve failed or the cell is too
    /// ill-conditioned for its control-volume contributions to be trusted;
    /// circumcenter, distances and ce-ratios are NaN in that case.
    pub degenerate: bool,
}

impl CellGeometry {
    /// Compute the geometry of `vertices`. Never fails: a singular
    /// circumsphere system, or a [`partition_condition`] above
    /// `condition_limit`, marks the cell degenerate instead.
    pub fn compute(
        vertices: &TetVertices,
        mode: CircumcenterMode,
        tol: f64,
        condition_limit: f64,
    ) -> Self {
        let volume = tet_volume(vertices);
        let edge_lengths_sq = edge_lengths_squared(vertices);
        let degenerate = |condition| CellGeometry {
            volume,
            circumcenter: NAN3,
            face_distances: [f64::NAN; FACES_PER_CELL],
            ce_ratios: NAN_FACE_EDGE,
            edge_lengths_sq,
            condition,
            degenerate: true,
        };
        let Ok(sphere) = mode.solve(vertices, tol) else {
            return degenerate(f64::NAN);
        };
        let ce_ratios = ce_ratios(vertices, &sphere.face_distances);
        let condition = partition_condition(&ce_ratios, &edge_lengths_sq, volume);
        if !(condition <= condition_limit) {
            return degenerate(condition);
        }
        CellGeometry {
            volume,
            circumcenter: sphere.center,
            face_distances: sphere.face_distances,
            ce_ratios,
            edge_lengths_sq,
            condition,
            degenerate: false,
        }
    }

    /// Drop the cell's ce-ratios so it contributes nothing to control
    /// volumes.
    pub fn zero_ce_ratios(&mut self) {
        self.ce_ratios = [[0.0; EDGES_PER_FACE]; FACES_PER_CELL];
    }
}

/// Sum of the magnitudes of a cell's control-volume contributions relative
/// to its volume.
///
/// The contributions are signed and must cancel down to the volume, so
/// their rounding error relative to the volume is about `f64::EPSILON`
/// times this number. It is close to 1 for well-shaped cells and grows like
/// `1 / h^2` for slivers of relative height `h`.
pub fn partition_condition(ce: &FaceEdgeArray, lengths_sq: &FaceEdgeArray, volume: f64) -> f64 {
    let magnitude: f64 = ce
        .iter()
        .flatten()
        .zip(lengths_sq.iter().flatten())
        .map(|(c, l2)| (c * l2).abs() / 3.0)
        .sum();
    magnitude / volume
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_cell_is_flagged_not_failed() {
        let v = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.5, 0.5, 0.0],
        ];
        let geometry =
            CellGeometry::compute(&v, CircumcenterMode::Geometric, 1e-12, DEFAULT_CONDITION_LIMIT);
        assert!(geometry.degenerate);
        assert_eq!(geometry.volume, 0.0);
        assert!(geometry.circumcenter.iter().all(|x| x.is_nan()));
        assert!(geometry.ce_ratios.iter().flatten().all(|x| x.is_nan()));
        assert!(geometry.edge_lengths_sq.iter().flatten().all(|x| x.is_finite()));
    }

    #[test]
    fn regular_cell_is_finite() {
        let v = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let geometry =
            CellGeometry::compute(&v, CircumcenterMode::Geometric, 1e-12, DEFAULT_CONDITION_LIMIT);
        assert!(!geometry.degenerate);
        assert_eq!(geometry.circumcenter, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn right_corner_condition() {
        let v = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let geometry =
            CellGeometry::compute(&v, CircumcenterMode::Geometric, 1e-12, DEFAULT_CONDITION_LIMIT);
        assert!((geometry.condition - 2.0).abs() < 1e-12);
    }

    #[test]
    fn sliver_over_the_limit_is_flagged() {
        let sliver = |h: f64| {
            [
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.5, 0.5, h],
            ]
        };
        // Condition is 1 / (2 h^2) for this family.
        let flat = CellGeometry::compute(&sliver(1e-2), CircumcenterMode::Geometric, 1e-12, 1e4);
        assert!(!flat.degenerate);
        assert!((flat.condition - 5e3).abs() < 1e-6);

        let flatter = CellGeometry::compute(&sliver(1e-3), CircumcenterMode::Geometric, 1e-12, 1e4);
        assert!(flatter.degenerate);
        assert!(flatter.circumcenter[0].is_nan());
        assert!((flatter.condition - 5e5).abs() < 1e-3);
        assert!(flatter.volume > 0.0);
    }
}
