//! Detection of local Delaunay violations.
//!
//! For an interior face shared by cells `A` and `B`, the signed distances
//! from both circumcenters to the face sum to the (signed) distance between
//! the circumcenters along the face normal. The sum is negative exactly
//! when the circumcenters have crossed over each other, which is the local
//! failure of the empty-circumsphere property across that face. Boundary
//! faces only see one cell and are flagged when its circumcenter lies
//! outside the mesh behind them.

use crate::geometry::ce_ratio::{FaceEdgeArray, cell_edge_ce_ratios};
use crate::topology::local_index::FACES_PER_CELL;
use crate::topology::relations::FaceRelations;

/// Sum of the signed circumcenter-face distances over the cells adjacent to
/// every unique face.
pub fn face_distance_sums(
    relations: &FaceRelations,
    face_distances: &[[f64; FACES_PER_CELL]],
) -> Vec<f64> {
    let mut sums = vec![0.0; relations.num_faces()];
    for (faces, distances) in relations.cell_faces.iter().zip(face_distances) {
        for (&face, distance) in faces.iter().zip(distances) {
            sums[face] += distance;
        }
    }
    sums
}

/// Unique faces whose distance sum is negative, in ascending order.
///
/// Faces touching a degenerate cell carry NaN sums and are never reported.
pub fn violating_faces(
    relations: &FaceRelations,
    face_distances: &[[f64; FACES_PER_CELL]],
) -> Vec<usize> {
    face_distance_sums(relations, face_distances)
        .iter()
        .enumerate()
        .filter(|(_, sum)| **sum < 0.0)
        .map(|(face, _)| face)
        .collect()
}

/// Cells with at least one negative per-edge ce-ratio.
pub fn cells_with_negative_ce_ratios(ce_ratios: &[FaceEdgeArray]) -> Vec<usize> {
    ce_ratios
        .iter()
        .enumerate()
        .filter(|(_, ce)| cell_edge_ce_ratios(ce).iter().any(|&v| v < 0.0))
        .map(|(cell, _)| cell)
        .collect()
}
