//! Local index tables for a single tetrahedron.
//!
//! A cell has local nodes `0..4`. Face `f` is the triangle opposite (i.e.
//! excluding) local node `f`. Every face lists its three edges in a fixed
//! cyclic order, and every edge is stored as a `(side 0, side 1)` pair of
//! local nodes. Each of the 6 cell edges therefore appears twice, once in
//! each of its two adjacent faces.
//!
//! [`LOCAL_IDX`] is laid out `[side][edge-within-face][face]`; per-cell
//! arrays elsewhere in the crate (ce-ratios, squared edge lengths) are laid
//! out `[face][edge-within-face]` and read their endpoints from this table.

use static_assertions::const_assert_eq;

/// Number of local nodes (and faces) of a tetrahedron.
pub const NODES_PER_CELL: usize = 4;
/// Number of faces of a tetrahedron.
pub const FACES_PER_CELL: usize = 4;
/// Number of edges listed per face.
pub const EDGES_PER_FACE: usize = 3;
/// Number of distinct edges of a tetrahedron.
pub const EDGES_PER_CELL: usize = 6;

/// `LOCAL_IDX[side][edge][face]` is the local node at `side` of the
/// `edge`-th edge of face `face`.
pub const LOCAL_IDX: [[[usize; FACES_PER_CELL]; EDGES_PER_FACE]; 2] = [
    [[2, 3, 0, 1], [3, 0, 1, 2], [1, 2, 3, 0]],
    [[3, 0, 1, 2], [1, 2, 3, 0], [2, 3, 0, 1]],
];

/// Position of a local node inside [`LOCAL_IDX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalSlot {
    pub side: usize,
    pub edge: usize,
    pub face: usize,
}

/// `LOCAL_IDX_INV[node]` lists every slot of [`LOCAL_IDX`] holding `node`,
/// in `(side, edge, face)` lexicographic order.
pub const LOCAL_IDX_INV: [[LocalSlot; 2 * EDGES_PER_FACE]; NODES_PER_CELL] = invert_local_idx();

/// The 6 distinct local edges, endpoints in increasing order.
pub const CELL_EDGES: [[usize; 2]; EDGES_PER_CELL] =
    [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// `FACE_EDGE_TO_CELL_EDGE[face][edge]` is the index into [`CELL_EDGES`] of
/// the `edge`-th edge of face `face`.
pub const FACE_EDGE_TO_CELL_EDGE: [[usize; EDGES_PER_FACE]; FACES_PER_CELL] = face_edge_map();

const_assert_eq!(NODES_PER_CELL * (NODES_PER_CELL - 1) / 2, EDGES_PER_CELL);
const_assert_eq!(FACES_PER_CELL * EDGES_PER_FACE, 2 * EDGES_PER_CELL);

/// Local nodes of face `face`, in the order `[side 0 of edge 0, side 1 of
/// edge 0, side 1 of edge 1]`.
#[inline]
pub const fn face_nodes(face: usize) -> [usize; 3] {
    [
        LOCAL_IDX[0][0][face],
        LOCAL_IDX[1][0][face],
        LOCAL_IDX[1][1][face],
    ]
}

/// Endpoints of the `edge`-th edge of face `face`.
#[inline]
pub const fn face_edge(face: usize, edge: usize) -> [usize; 2] {
    [LOCAL_IDX[0][edge][face], LOCAL_IDX[1][edge][face]]
}

/// The node of face `face` not on its `edge`-th edge.
#[inline]
pub const fn opposite_in_face(face: usize, edge: usize) -> usize {
    // Edges are listed cyclically, so the node opposite edge `e` is the
    // shared endpoint of the other two.
    LOCAL_IDX[1][(edge + 1) % EDGES_PER_FACE][face]
}

const fn invert_local_idx() -> [[LocalSlot; 2 * EDGES_PER_FACE]; NODES_PER_CELL] {
    let empty = LocalSlot {
        side: 0,
        edge: 0,
        face: 0,
    };
    let mut out = [[empty; 2 * EDGES_PER_FACE]; NODES_PER_CELL];
    let mut filled = [0usize; NODES_PER_CELL];
    let mut side = 0;
    while side < 2 {
        let mut edge = 0;
        while edge < EDGES_PER_FACE {
            let mut face = 0;
            while face < FACES_PER_CELL {
                let node = LOCAL_IDX[side][edge][face];
                out[node][filled[node]] = LocalSlot { side, edge, face };
                filled[node] += 1;
                face += 1;
            }
            edge += 1;
        }
        side += 1;
    }
    out
}

const fn face_edge_map() -> [[usize; EDGES_PER_FACE]; FACES_PER_CELL] {
    let mut out = [[0usize; EDGES_PER_FACE]; FACES_PER_CELL];
    let mut face = 0;
    while face < FACES_PER_CELL {
        let mut edge = 0;
        while edge < EDGES_PER_FACE {
            let a = LOCAL_IDX[0][edge][face];
            let b = LOCAL_IDX[1][edge][face];
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let mut k = 0;
            while k < EDGES_PER_CELL {
                if CELL_EDGES[k][0] == lo && CELL_EDGES[k][1] == hi {
                    out[face][edge] = k;
                }
                k += 1;
            }
            edge += 1;
        }
        face += 1;
    }
    out
}
