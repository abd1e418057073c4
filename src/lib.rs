//! # tet-covolume
//!
//! tet-covolume computes the geometric quantities a vertex-centered
//! finite-volume discretization needs from a raw tetrahedral mesh: cell
//! circumcenters, covolume/edge-length ratios ("ce-ratios"), cell volumes,
//! node control volumes, circumcenter-face distances, and a count of local
//! Delaunay violations.
//!
//! ## Features
//! - Static local index tables for the faces and edges of a tetrahedron
//! - Geometric (supported) and algebraic (best effort) circumcenter modes
//! - Signed ce-ratios whose control volumes partition the mesh exactly, also
//!   on non-Delaunay meshes
//! - Per-cell degeneracy flags with a configurable policy
//! - Optional `rayon` feature for the per-cell pass
//!
//! ## Determinism
//!
//! All derived data is a pure function of the node coordinates, the cell
//! connectivity and the options. Per-node accumulation is a sequential pass
//! in cell order, so results are bit-identical with and without `rayon`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! tet-covolume = "0.3"
//! # Optional features:
//! # features = ["rayon"]
//! ```
//!
//! ```rust
//! use tet_covolume::prelude::*;
//!
//! let a = 1.0;
//! let nodes = vec![[0.0, 0.0, 0.0], [a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]];
//! let mesh = TetraMesh::with_mode(nodes, vec![[0, 1, 2, 3]], "geometric")?;
//! let cv = mesh.control_volumes();
//! assert!((cv[0] - a * a * a / 8.0).abs() < 1e-14);
//! assert_eq!(mesh.num_delaunay_violations(), 1);
//! # Ok::<(), tet_covolume::mesh_error::MeshError>(())
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::ce_ratio::FaceEdgeArray;
    pub use crate::geometry::circumcenter::{Circumsphere, CircumcenterMode};
    pub use crate::geometry::metrics::TetVertices;
    pub use crate::geometry::vector::Vec3;
    pub use crate::mesh::{Cell, DegeneratePolicy, TetraMesh, TetraMeshOptions};
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::local_index::{CELL_EDGES, LOCAL_IDX, LOCAL_IDX_INV, LocalSlot};
    pub use crate::topology::relations::{EdgeRelations, FaceRelations};
}
