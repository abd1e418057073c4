//! Node control volumes from per-cell ce-ratios.
//!
//! Within a cell, the Voronoi region of node `k` is a union of pyramids:
//! for every face-edge occurrence `(p, q)` incident to `k`, the pyramid
//! with apex `k` over half the dual facet piece, of volume
//! `1/3 * (ce * |e|) * |e| / 2 = ce * |e|^2 / 6`. Summing over all cells
//! that reference a node gives its control volume.
//!
//! The aggregation is split into a per-cell map ([`cell_partials`]) and a
//! sequential scatter-add ([`accumulate`]) so that the shared-node
//! reduction happens in one deterministic pass.

use itertools::izip;

use crate::geometry::ce_ratio::FaceEdgeArray;
use crate::topology::local_index::{LOCAL_IDX_INV, LocalSlot, NODES_PER_CELL};

/// Control-volume contribution of one cell to each of its local nodes.
pub fn cell_partials(ce: &FaceEdgeArray, lengths_sq: &FaceEdgeArray) -> [f64; NODES_PER_CELL] {
    std::array::from_fn(|node| {
        LOCAL_IDX_INV[node]
            .iter()
            .map(|&LocalSlot { edge, face, .. }| ce[face][edge] * lengths_sq[face][edge] / 6.0)
            .sum()
    })
}

/// Scatter-add per-cell partials onto the global nodes.
///
/// `cells` and `partials` run in parallel; every cell must only reference
/// nodes below `num_nodes`.
pub fn accumulate(
    num_nodes: usize,
    cells: &[[usize; NODES_PER_CELL]],
    partials: &[[f64; NODES_PER_CELL]],
) -> Vec<f64> {
    debug_assert_eq!(cells.len(), partials.len());
    let mut volumes = vec![0.0; num_nodes];
    for (cell, partial) in izip!(cells, partials) {
        for (&node, value) in izip!(cell, partial) {
            volumes[node] += value;
        }
    }
    volumes
}
