//! Per-cell geometric kernels.
//!
//! Everything here works on the four vertex coordinates of a single cell;
//! [`TetraMesh`](crate::mesh::TetraMesh) maps these kernels over the cell
//! array.

pub mod ce_ratio;
pub mod cell;
pub mod circumcenter;
pub mod metrics;
pub mod vector;
