//! Combinatorics of tetrahedral cells and meshes.

pub mod local_index;
pub mod relations;
