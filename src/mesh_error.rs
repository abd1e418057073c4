//! MeshError: Unified error type for tet-covolume public APIs
//!
//! Structural input errors (connectivity, coordinates, options) are reported
//! at construction time; geometric degeneracies are local to a cell and only
//! surface as an error when the caller asks for that policy.

use thiserror::Error;

/// Unified error type for mesh construction and geometric solves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A cell does not list exactly four node indices.
    #[error("cell {cell} has {found} nodes, expected 4")]
    InvalidCellArity { cell: usize, found: usize },
    /// A cell references a node outside the coordinate array.
    #[error("cell {cell} references node {node}, but the mesh has {num_nodes} nodes")]
    NodeIndexOutOfRange {
        cell: usize,
        node: usize,
        num_nodes: usize,
    },
    /// A cell lists the same node more than once.
    #[error("cell {cell} lists node {node} more than once")]
    RepeatedNode { cell: usize, node: usize },
    /// A node does not carry exactly three coordinates.
    #[error("node {node} has {found} coordinates, expected 3")]
    InvalidCoordinateDimension { node: usize, found: usize },
    /// A node coordinate is NaN or infinite.
    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate { node: usize },
    /// A circumcenter mode string was not recognized.
    #[error("unsupported circumcenter mode `{0}` (expected `geometric` or `algebraic`)")]
    UnsupportedMode(String),
    /// The degeneracy tolerance must be finite and non-negative.
    #[error("invalid degeneracy tolerance: {0}")]
    InvalidTolerance(f64),
    /// The condition limit must be positive.
    #[error("invalid condition limit: {0}")]
    InvalidConditionLimit(f64),
    /// The circumsphere system of a single tetrahedron is singular.
    #[error("circumsphere system is singular (coplanar or coincident vertices)")]
    SingularCircumsphere,
    /// A degenerate cell was found while the policy forbids them.
    #[error("cell {cell} is degenerate (volume = {volume:e})")]
    DegenerateCell { cell: usize, volume: f64 },
    /// A derived-data invariant does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
