//! Mesh-level reductions over per-cell geometry.

pub mod control_volume;
pub mod delaunay;
