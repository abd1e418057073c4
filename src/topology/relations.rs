//! Global face and edge relationships of a tetrahedral mesh.
//!
//! Local faces/edges of all cells are deduplicated by their sorted node
//! tuples. Unique entities are numbered in order of first appearance while
//! scanning cells in order, so numbering is deterministic for a given
//! connectivity.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::topology::local_index::{CELL_EDGES, EDGES_PER_CELL, FACES_PER_CELL, face_nodes};

/// Unique faces and the cell → face map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceRelations {
    /// Node triples of the unique faces, sorted ascending.
    pub faces: Vec<[usize; 3]>,
    /// `cell_faces[c][f]` is the unique face index of local face `f` of cell
    /// `c`.
    pub cell_faces: Vec<[usize; FACES_PER_CELL]>,
}

/// Unique edges and the cell → edge map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeRelations {
    /// Node pairs of the unique edges, sorted ascending.
    pub edges: Vec<[usize; 2]>,
    /// `cell_edges[c][k]` is the unique edge index of local edge `k`
    /// (see [`CELL_EDGES`]) of cell `c`.
    pub cell_edges: Vec<[usize; EDGES_PER_CELL]>,
}

impl FaceRelations {
    pub fn build(cells: &[[usize; 4]]) -> Self {
        let mut index: HashMap<[usize; 3], usize> = HashMap::with_capacity(2 * cells.len());
        let mut faces = Vec::new();
        let cell_faces: Vec<[usize; FACES_PER_CELL]> = cells
            .iter()
            .map(|cell| {
                std::array::from_fn(|f| {
                    let mut key = face_nodes(f).map(|n| cell[n]);
                    key.sort_unstable();
                    intern(&mut index, &mut faces, key)
                })
            })
            .collect();
        FaceRelations { faces, cell_faces }
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of cells adjacent to every face (1 on the boundary, 2 inside a
    /// conforming mesh).
    pub fn cells_per_face(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.faces.len()];
        for faces in &self.cell_faces {
            for &face in faces {
                counts[face] += 1;
            }
        }
        counts
    }
}

impl EdgeRelations {
    pub fn build(cells: &[[usize; 4]]) -> Self {
        let mut index: HashMap<[usize; 2], usize> = HashMap::with_capacity(2 * cells.len());
        let mut edges = Vec::new();
        let cell_edges: Vec<[usize; EDGES_PER_CELL]> = cells
            .iter()
            .map(|cell| {
                std::array::from_fn(|k| {
                    let [p, q] = CELL_EDGES[k];
                    let key = [cell[p].min(cell[q]), cell[p].max(cell[q])];
                    intern(&mut index, &mut edges, key)
                })
            })
            .collect();
        EdgeRelations { edges, cell_edges }
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

fn intern<K: std::hash::Hash + Eq + Copy>(
    index: &mut HashMap<K, usize>,
    entities: &mut Vec<K>,
    key: K,
) -> usize {
    match index.entry(key) {
        Entry::Occupied(slot) => *slot.get(),
        Entry::Vacant(slot) => {
            entities.push(key);
            *slot.insert(entities.len() - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_cells_share_one_face() {
        let cells = [[0, 1, 2, 3], [1, 2, 3, 4]];
        let rel = FaceRelations::build(&cells);
        assert_eq!(rel.num_faces(), 7);
        // Local face 0 of cell 0 and local face 3 of cell 1 are both {1, 2, 3}.
        assert_eq!(rel.cell_faces[0][0], rel.cell_faces[1][3]);
        assert_eq!(rel.faces[rel.cell_faces[0][0]], [1, 2, 3]);
        let counts = rel.cells_per_face();
        assert_eq!(counts.iter().filter(|&&c| c == 2).count(), 1);
        assert_eq!(counts.iter().filter(|&&c| c == 1).count(), 6);
    }

    #[test]
    fn edges_are_deduplicated() {
        let cells = [[0, 1, 2, 3], [3, 2, 1, 4]];
        let rel = EdgeRelations::build(&cells);
        assert_eq!(rel.num_edges(), 9);
        assert_eq!(rel.edges[0], [0, 1]);
        // Local edge (0, 1) of the second cell is global edge {2, 3}.
        let e = rel.cell_edges[1][0];
        assert_eq!(rel.edges[e], [2, 3]);
        assert_eq!(rel.cell_edges[0][5], e);
    }
}
