//! Covolume/edge-length ratios ("ce-ratios") of one tetrahedron.
//!
//! The dual facet of a cell edge, restricted to the cell, is the
//! quadrilateral spanned by the edge midpoint, the circumcenters of the two
//! adjacent faces and the cell circumcenter. Each adjacent face contributes
//! the triangle `(edge midpoint, face circumcenter, cell circumcenter)`,
//! which has a right angle at the face circumcenter. Its signed area is
//!
//! ```text
//! 1/2 * (c2d * |e|) * h_f
//! ```
//!
//! where `c2d = <p - o, q - o> / (4 A_f)` is the in-face ce-ratio of edge
//! `(p, q)` with opposite face node `o`, and `h_f` is the signed
//! circumcenter-face distance. Dividing by `|e|` gives the per-face entry
//! stored here; the two entries of an edge sum to its cell ce-ratio.
//!
//! Entries are negative when the cell circumcenter lies beyond the face
//! (`h_f < 0`) or the face circumcenter lies beyond the edge (obtuse
//! opposite angle). Such entries are part of the partition and are kept.

use crate::geometry::metrics::{TetVertices, face_area};
use crate::geometry::vector::{dot, sub};
use crate::topology::local_index::{
    EDGES_PER_CELL, EDGES_PER_FACE, FACE_EDGE_TO_CELL_EDGE, FACES_PER_CELL, face_edge,
    opposite_in_face,
};

/// Per-cell array in `[face][edge-within-face]` layout.
pub type FaceEdgeArray = [[f64; EDGES_PER_FACE]; FACES_PER_CELL];

/// In-face (2-D) ce-ratios, `cot(opposite angle) / 2` for every face edge.
pub fn face_ce_ratios(vertices: &TetVertices) -> FaceEdgeArray {
    std::array::from_fn(|face| {
        let area = face_area(vertices, face);
        std::array::from_fn(|edge| {
            let [p, q] = face_edge(face, edge);
            let o = vertices[opposite_in_face(face, edge)];
            dot(sub(vertices[p], o), sub(vertices[q], o)) / (4.0 * area)
        })
    })
}

/// Ce-ratio contributions of every face edge, given the signed
/// circumcenter-face distances of the cell.
pub fn ce_ratios(vertices: &TetVertices, face_distances: &[f64; FACES_PER_CELL]) -> FaceEdgeArray {
    let planar = face_ce_ratios(vertices);
    std::array::from_fn(|face| {
        std::array::from_fn(|edge| 0.5 * planar[face][edge] * face_distances[face])
    })
}

/// Fold the two face contributions of every cell edge into one value per
/// edge of [`CELL_EDGES`](crate::topology::local_index::CELL_EDGES).
pub fn cell_edge_ce_ratios(ce: &FaceEdgeArray) -> [f64; EDGES_PER_CELL] {
    let mut out = [0.0; EDGES_PER_CELL];
    for (face, row) in ce.iter().enumerate() {
        for (edge, value) in row.iter().enumerate() {
            out[FACE_EDGE_TO_CELL_EDGE[face][edge]] += value;
        }
    }
    out
}
