//! Volume, area and edge-length metrics of a single tetrahedron.
//!
//! Vertices are taken in cell order `[v0, v1, v2, v3]`; face `f` is the
//! triangle opposite `vf` as laid out in
//! [`local_index`](crate::topology::local_index).

use crate::geometry::vector::{Vec3, cross, norm, norm_sq, sub, triple};
use crate::topology::local_index::{EDGES_PER_FACE, FACES_PER_CELL, face_edge, face_nodes};

/// The four vertex coordinates of one cell.
pub type TetVertices = [Vec3; 4];

/// Relative degeneracy tolerance used when none is configured.
pub const DEFAULT_DEGENERACY_TOL: f64 = 1e-12;

/// Signed volume `det(v1 - v0, v2 - v0, v3 - v0) / 6`.
///
/// Positive for positively oriented cells; swapping two vertices flips the
/// sign.
pub fn signed_volume(vertices: &TetVertices) -> f64 {
    let [v0, v1, v2, v3] = *vertices;
    triple(sub(v1, v0), sub(v2, v0), sub(v3, v0)) / 6.0
}

/// Cell volume `|det(v1 - v0, v2 - v0, v3 - v0)| / 6`.
///
/// Never negative. A (near-)zero result marks a degenerate cell; that is a
/// signal for the caller, not an error.
pub fn tet_volume(vertices: &TetVertices) -> f64 {
    signed_volume(vertices).abs()
}

/// Scale-invariant degeneracy test.
///
/// The cell is degenerate when `|det| <= tol * |v1 - v0| |v2 - v0| |v3 - v0|`,
/// i.e. when the three spanning edges are (numerically) coplanar. Cells with
/// coincident vertices are always degenerate.
pub fn is_degenerate(vertices: &TetVertices, tol: f64) -> bool {
    let [v0, v1, v2, v3] = *vertices;
    let (a, b, c) = (sub(v1, v0), sub(v2, v0), sub(v3, v0));
    let scale = norm(a) * norm(b) * norm(c);
    let det = triple(a, b, c);
    !(det.is_finite() && scale > 0.0) || det.abs() <= tol * scale
}

/// Unsigned area of face `face`.
pub fn face_area(vertices: &TetVertices, face: usize) -> f64 {
    let [a, b, c] = face_nodes(face).map(|n| vertices[n]);
    0.5 * norm(cross(sub(b, a), sub(c, a)))
}

/// Areas of the four faces.
pub fn face_areas(vertices: &TetVertices) -> [f64; FACES_PER_CELL] {
    std::array::from_fn(|face| face_area(vertices, face))
}

/// Squared edge lengths in `[face][edge-within-face]` layout.
pub fn edge_lengths_squared(vertices: &TetVertices) -> [[f64; EDGES_PER_FACE]; FACES_PER_CELL] {
    std::array::from_fn(|face| {
        std::array::from_fn(|edge| {
            let [p, q] = face_edge(face, edge);
            norm_sq(sub(vertices[q], vertices[p]))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-14
    }

    fn right_corner(a: f64) -> TetVertices {
        [
            [0.0, 0.0, 0.0],
            [a, 0.0, 0.0],
            [0.0, a, 0.0],
            [0.0, 0.0, a],
        ]
    }

    #[test]
    fn right_corner_volume() {
        for a in [0.5, 1.0, 2.0] {
            assert!(approx(tet_volume(&right_corner(a)), a * a * a / 6.0));
        }
    }

    #[test]
    fn orientation_flips_sign_not_volume() {
        let mut v = right_corner(1.0);
        let positive = signed_volume(&v);
        v.swap(1, 2);
        assert!(approx(signed_volume(&v), -positive));
        assert!(approx(tet_volume(&v), positive));
    }

    #[test]
    fn flat_cell_is_degenerate() {
        let v = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.3, 0.3, 0.0],
        ];
        assert_eq!(tet_volume(&v), 0.0);
        assert!(is_degenerate(&v, DEFAULT_DEGENERACY_TOL));
        assert!(!is_degenerate(&right_corner(1e-3), DEFAULT_DEGENERACY_TOL));
    }

    #[test]
    fn coincident_vertices_are_degenerate() {
        let mut v = right_corner(1.0);
        v[3] = v[0];
        assert!(is_degenerate(&v, 0.0));
    }

    #[test]
    fn face_areas_of_right_corner() {
        let areas = face_areas(&right_corner(1.0));
        // Face 0 is the oblique equilateral face with side sqrt(2).
        assert!(approx(areas[0], 3f64.sqrt() / 2.0));
        for area in &areas[1..] {
            assert!(approx(*area, 0.5));
        }
    }

    #[test]
    fn edge_lengths_follow_face_layout() {
        let lengths = edge_lengths_squared(&right_corner(1.0));
        assert_eq!(lengths[0], [2.0, 2.0, 2.0]);
        assert_eq!(lengths[1], [1.0, 1.0, 2.0]);
    }
}
