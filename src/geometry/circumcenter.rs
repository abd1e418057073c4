//! Circumcenter solvers for a single tetrahedron.
//!
//! Two strategies sit behind [`CircumcenterMode`]:
//!
//! - [`CircumcenterMode::Geometric`] translates the vertices so that `v0` is
//!   the origin and intersects the three perpendicular bisector planes
//!   (a 3×3 linear solve). The signed circumcenter-face distances are then
//!   measured against the face planes. This is the supported mode: it is
//!   stable on well-shaped cells and fails loudly on coplanar ones.
//! - [`CircumcenterMode::Algebraic`] works from the six edge lengths alone:
//!   barycentric coordinates from the bordered Cayley-Menger system, face
//!   distances from `lambda_f * 3V / A_f`. It agrees with the geometric mode
//!   on exact input but amplifies input perturbations by orders of
//!   magnitude, so results are best effort only and must not be compared
//!   bit-for-bit against the geometric mode.

use std::fmt;
use std::str::FromStr;

use la_stack::{DEFAULT_PIVOT_TOL, LaError, Matrix, Vector};
use serde::{Deserialize, Serialize};

use crate::geometry::metrics::{TetVertices, is_degenerate};
use crate::geometry::vector::{Vec3, add, cross, dot, norm, norm_sq, scale, sub, triple};
use crate::mesh_error::MeshError;
use crate::topology::local_index::{FACES_PER_CELL, NODES_PER_CELL, face_nodes};

/// Strategy used to locate cell circumcenters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircumcenterMode {
    /// Perpendicular-bisector solve in local coordinates (supported).
    #[default]
    Geometric,
    /// Edge-length (Cayley-Menger) formulation (numerically unstable).
    Algebraic,
}

impl CircumcenterMode {
    /// Whether this mode carries an accuracy/stability guarantee.
    pub fn is_stable(self) -> bool {
        matches!(self, CircumcenterMode::Geometric)
    }

    /// Solve for the circumcenter of one cell and its signed distances to
    /// the four faces.
    ///
    /// Returns [`MeshError::SingularCircumsphere`] when the cell is
    /// degenerate under the relative tolerance `tol`.
    pub fn solve(self, vertices: &TetVertices, tol: f64) -> Result<Circumsphere, MeshError> {
        match self {
            CircumcenterMode::Geometric => {
                let center = geometric_circumcenter(vertices, tol)?;
                Ok(Circumsphere {
                    center,
                    face_distances: circumcenter_face_distances(vertices, center),
                })
            }
            CircumcenterMode::Algebraic => algebraic_circumsphere(vertices, tol),
        }
    }
}

impl fmt::Display for CircumcenterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircumcenterMode::Geometric => f.write_str("geometric"),
            CircumcenterMode::Algebraic => f.write_str("algebraic"),
        }
    }
}

impl FromStr for CircumcenterMode {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geometric" => Ok(CircumcenterMode::Geometric),
            "algebraic" => Ok(CircumcenterMode::Algebraic),
            other => Err(MeshError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Circumcenter of one cell together with its signed face distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circumsphere {
    pub center: Vec3,
    /// `face_distances[f]` is the signed distance from `center` to the plane
    /// of face `f`, positive on the side of the excluded node `f`.
    pub face_distances: [f64; FACES_PER_CELL],
}

/// Circumcenter via the perpendicular bisector planes.
///
/// With `r_i = v_i - v0`, the circumcenter `c` solves `r_i · (c - v0) =
/// |r_i|^2 / 2` for `i = 1, 2, 3`.
pub fn geometric_circumcenter(vertices: &TetVertices, tol: f64) -> Result<Vec3, MeshError> {
    if is_degenerate(vertices, tol) {
        return Err(MeshError::SingularCircumsphere);
    }
    let [v0, v1, v2, v3] = *vertices;
    let (a, b, c) = (sub(v1, v0), sub(v2, v0), sub(v3, v0));
    let det = triple(a, b, c);
    // Cramer's rule written with cofactor rows.
    let numerator = add(
        add(scale(cross(b, c), norm_sq(a)), scale(cross(c, a), norm_sq(b))),
        scale(cross(a, b), norm_sq(c)),
    );
    Ok(add(v0, scale(numerator, 0.5 / det)))
}

/// Signed distances from `center` to the four face planes.
///
/// A distance is positive when `center` lies on the same side of the face
/// as the node the face excludes, so all four are positive exactly when the
/// circumcenter is inside the cell. The sign does not depend on vertex
/// order.
pub fn circumcenter_face_distances(vertices: &TetVertices, center: Vec3) -> [f64; FACES_PER_CELL] {
    std::array::from_fn(|face| {
        let [a, b, c] = face_nodes(face).map(|n| vertices[n]);
        let normal = cross(sub(b, a), sub(c, a));
        let distance = dot(sub(center, a), normal) / norm(normal);
        if dot(sub(vertices[face], a), normal) < 0.0 {
            -distance
        } else {
            distance
        }
    })
}

/// Circumcenter and face distances from edge lengths only.
pub fn algebraic_circumsphere(vertices: &TetVertices, tol: f64) -> Result<Circumsphere, MeshError> {
    if is_degenerate(vertices, tol) {
        return Err(MeshError::SingularCircumsphere);
    }
    let d2: [[f64; NODES_PER_CELL]; NODES_PER_CELL] =
        std::array::from_fn(|i| std::array::from_fn(|j| norm_sq(sub(vertices[i], vertices[j]))));

    // Bordered Cayley-Menger system:
    //   [0 1ᵀ; 1 D] [mu; lambda] = [1; 0]
    // lambda are the circumcenter's barycentric coordinates.
    let cayley_menger = Matrix::<5>::from_rows(std::array::from_fn(|row| {
        std::array::from_fn(|col| match (row, col) {
            (0, 0) => 0.0,
            (0, _) | (_, 0) => 1.0,
            _ => d2[row - 1][col - 1],
        })
    }));
    // det(CM) = 288 V^2.
    let det = cayley_menger.det(0.0).map_err(singular)?;
    // Fall back to exact singularity detection for tiny but valid cells whose
    // squared lengths sit below the default pivot tolerance.
    let lu = match cayley_menger.lu(DEFAULT_PIVOT_TOL) {
        Ok(lu) => lu,
        Err(LaError::Singular { .. }) => cayley_menger.lu(0.0).map_err(singular)?,
        Err(e) => return Err(singular(e)),
    };
    let solution = lu
        .solve_vec(Vector::<5>::new([1.0, 0.0, 0.0, 0.0, 0.0]))
        .map_err(singular)?
        .into_array();
    let lambda = [solution[1], solution[2], solution[3], solution[4]];

    let center = (0..NODES_PER_CELL).fold([0.0; 3], |acc, i| add(acc, scale(vertices[i], lambda[i])));

    let volume = (det / 288.0).max(0.0).sqrt();
    let face_distances = std::array::from_fn(|face| {
        let [p, q, r] = face_nodes(face);
        let area = heron_area(d2[p][q], d2[q][r], d2[r][p]);
        lambda[face] * 3.0 * volume / area
    });
    Ok(Circumsphere {
        center,
        face_distances,
    })
}

fn singular(e: LaError) -> MeshError {
    log::trace!("Cayley-Menger solve failed: {e}");
    MeshError::SingularCircumsphere
}

/// Triangle area from squared side lengths.
fn heron_area(a2: f64, b2: f64, c2: f64) -> f64 {
    let s = a2 + b2 - c2;
    (0.25 * (4.0 * a2 * b2 - s * s).max(0.0).sqrt()).max(f64::MIN_POSITIVE)
}
