//! `TetraMesh`: a tetrahedral mesh with its finite-volume geometry.
//!
//! All derived quantities are computed once, at construction, as a batched
//! map over the cell array followed by a single scatter-add onto the nodes.
//! Nothing is mutated afterwards; to change coordinates, build a new mesh.
//! Unique faces and edges are only needed by a few queries and are built
//! lazily on first use.
//!
//! ```rust
//! use tet_covolume::mesh::TetraMesh;
//!
//! let nodes = vec![
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ];
//! let mesh = TetraMesh::new(nodes, vec![[0, 1, 2, 3]])?;
//! assert_eq!(mesh.cell_circumcenters()[0], [0.5, 0.5, 0.5]);
//! let total: f64 = mesh.control_volumes().iter().sum();
//! assert!((total - 1.0 / 6.0).abs() < 1e-14);
//! # Ok::<(), tet_covolume::mesh_error::MeshError>(())
//! ```

pub mod options;

use once_cell::sync::OnceCell;

use crate::algs::control_volume::{accumulate, cell_partials};
use crate::algs::delaunay::{cells_with_negative_ce_ratios, violating_faces};
use crate::debug_invariants::{DebugInvariants, check_partition};
use crate::geometry::ce_ratio::{FaceEdgeArray, cell_edge_ce_ratios};
use crate::geometry::cell::CellGeometry;
use crate::geometry::metrics::TetVertices;
use crate::geometry::vector::{Vec3, is_finite};
use crate::mesh_error::MeshError;
use crate::topology::local_index::{EDGES_PER_CELL, FACES_PER_CELL, NODES_PER_CELL};
use crate::topology::relations::{EdgeRelations, FaceRelations};

pub use options::{DegeneratePolicy, TetraMeshOptions};

/// Cell connectivity: four node indices, order significant.
pub type Cell = [usize; NODES_PER_CELL];

/// A tetrahedral mesh and its circumcenter-based dual geometry.
#[derive(Clone, Debug)]
pub struct TetraMesh {
    nodes: Vec<Vec3>,
    cells: Vec<Cell>,
    options: TetraMeshOptions,
    cell_volumes: Vec<f64>,
    circumcenters: Vec<Vec3>,
    face_distances: Vec<[f64; FACES_PER_CELL]>,
    ce_ratios: Vec<FaceEdgeArray>,
    edge_lengths_sq: Vec<FaceEdgeArray>,
    degenerate: Vec<bool>,
    control_volumes: Vec<f64>,
    faces: OnceCell<FaceRelations>,
    edges: OnceCell<EdgeRelations>,
}

impl TetraMesh {
    /// Build a mesh with default options (geometric mode).
    pub fn new(nodes: Vec<Vec3>, cells: Vec<Cell>) -> Result<Self, MeshError> {
        Self::with_options(nodes, cells, TetraMeshOptions::default())
    }

    /// Build a mesh selecting the circumcenter mode by name.
    pub fn with_mode(nodes: Vec<Vec3>, cells: Vec<Cell>, mode: &str) -> Result<Self, MeshError> {
        let options = TetraMeshOptions::default().with_mode_name(mode)?;
        Self::with_options(nodes, cells, options)
    }

    /// Build a mesh from nested vectors, checking that every node has three
    /// coordinates and every cell four node indices.
    pub fn from_nested(
        nodes: &[Vec<f64>],
        cells: &[Vec<usize>],
        options: TetraMeshOptions,
    ) -> Result<Self, MeshError> {
        let nodes = nodes
            .iter()
            .enumerate()
            .map(|(node, xyz)| {
                <[f64; 3]>::try_from(xyz.as_slice()).map_err(|_| {
                    MeshError::InvalidCoordinateDimension {
                        node,
                        found: xyz.len(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let cells = cells
            .iter()
            .enumerate()
            .map(|(cell, ids)| {
                <Cell>::try_from(ids.as_slice()).map_err(|_| MeshError::InvalidCellArity {
                    cell,
                    found: ids.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_options(nodes, cells, options)
    }

    /// Build a mesh. Structural input errors are reported here; afterwards
    /// every query is infallible.
    pub fn with_options(
        nodes: Vec<Vec3>,
        cells: Vec<Cell>,
        options: TetraMeshOptions,
    ) -> Result<Self, MeshError> {
        options.validate()?;
        validate_nodes(&nodes)?;
        validate_cells(&cells, nodes.len())?;
        if !options.mode.is_stable() {
            log::warn!(
                "{} circumcenter mode selected; results are not numerically guaranteed",
                options.mode
            );
        }

        let mut geometry = batch_map(&cells, |cell| {
            let vertices: TetVertices = cell.map(|n| nodes[n]);
            CellGeometry::compute(
                &vertices,
                options.mode,
                options.degeneracy_tolerance,
                options.condition_limit,
            )
        });
        let num_degenerate = apply_degenerate_policy(&mut geometry, options.degenerate_policy)?;
        if num_degenerate > 0 {
            log::warn!(
                "{num_degenerate} of {} cells are degenerate ({:?} policy)",
                cells.len(),
                options.degenerate_policy
            );
        }

        let partials = batch_map(&geometry, |g| cell_partials(&g.ce_ratios, &g.edge_lengths_sq));
        let control_volumes = accumulate(nodes.len(), &cells, &partials);

        let mut mesh = TetraMesh {
            nodes,
            cells,
            options,
            cell_volumes: Vec::with_capacity(geometry.len()),
            circumcenters: Vec::with_capacity(geometry.len()),
            face_distances: Vec::with_capacity(geometry.len()),
            ce_ratios: Vec::with_capacity(geometry.len()),
            edge_lengths_sq: Vec::with_capacity(geometry.len()),
            degenerate: Vec::with_capacity(geometry.len()),
            control_volumes,
            faces: OnceCell::new(),
            edges: OnceCell::new(),
        };
        for g in geometry {
            mesh.cell_volumes.push(g.volume);
            mesh.circumcenters.push(g.circumcenter);
            mesh.face_distances.push(g.face_distances);
            mesh.ce_ratios.push(g.ce_ratios);
            mesh.edge_lengths_sq.push(g.edge_lengths_sq);
            mesh.degenerate.push(g.degenerate);
        }

        log::debug!(
            "built tetra mesh: {} nodes, {} cells, {} mode",
            mesh.nodes.len(),
            mesh.cells.len(),
            mesh.options.mode
        );
        crate::debug_invariants!(mesh.validate_layout(), "TetraMesh::with_options");
        Ok(mesh)
    }

    pub fn nodes(&self) -> &[Vec3] {
        &self.nodes
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn options(&self) -> &TetraMeshOptions {
        &self.options
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Give back the input arrays.
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Cell>) {
        (self.nodes, self.cells)
    }

    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// Sum of all cell volumes.
    pub fn total_volume(&self) -> f64 {
        self.cell_volumes.iter().sum()
    }

    /// One circumcenter per cell; NaN for degenerate cells.
    pub fn cell_circumcenters(&self) -> &[Vec3] {
        &self.circumcenters
    }

    /// Signed distance from each cell circumcenter to each of its faces,
    /// positive toward the node the face excludes.
    pub fn circumcenter_face_distances(&self) -> &[[f64; FACES_PER_CELL]] {
        &self.face_distances
    }

    /// Ce-ratio contributions per cell in `[face][edge-within-face]` layout.
    pub fn ce_ratios(&self) -> &[FaceEdgeArray] {
        &self.ce_ratios
    }

    /// Squared edge lengths per cell, same layout as [`Self::ce_ratios`].
    pub fn edge_lengths_squared(&self) -> &[FaceEdgeArray] {
        &self.edge_lengths_sq
    }

    /// One ce-ratio per cell and local edge
    /// ([`CELL_EDGES`](crate::topology::local_index::CELL_EDGES) order).
    pub fn cell_edge_ce_ratios(&self) -> Vec<[f64; EDGES_PER_CELL]> {
        self.ce_ratios.iter().map(cell_edge_ce_ratios).collect()
    }

    /// One control volume per node.
    pub fn control_volumes(&self) -> &[f64] {
        &self.control_volumes
    }

    pub fn is_degenerate(&self, cell: usize) -> bool {
        self.degenerate.get(cell).copied().unwrap_or(false)
    }

    pub fn degenerate_cells(&self) -> Vec<usize> {
        self.degenerate
            .iter()
            .enumerate()
            .filter_map(|(cell, &flag)| flag.then_some(cell))
            .collect()
    }

    /// Unique faces of the mesh (built on first use).
    pub fn faces(&self) -> &FaceRelations {
        self.faces.get_or_init(|| FaceRelations::build(&self.cells))
    }

    /// Unique edges of the mesh (built on first use).
    pub fn edges(&self) -> &EdgeRelations {
        self.edges.get_or_init(|| EdgeRelations::build(&self.cells))
    }

    /// One ce-ratio per unique edge, summed over all cells sharing it.
    pub fn ce_ratios_per_edge(&self) -> Vec<f64> {
        let edges = self.edges();
        let mut out = vec![0.0; edges.num_edges()];
        for (ids, ce) in edges.cell_edges.iter().zip(&self.ce_ratios) {
            for (&edge, value) in ids.iter().zip(cell_edge_ce_ratios(ce)) {
                out[edge] += value;
            }
        }
        out
    }

    /// Unique faces across which the Delaunay property fails locally.
    pub fn delaunay_violating_faces(&self) -> Vec<usize> {
        violating_faces(self.faces(), &self.face_distances)
    }

    /// Number of unique faces across which the Delaunay property fails.
    pub fn num_delaunay_violations(&self) -> usize {
        self.delaunay_violating_faces().len()
    }

    /// Cells with at least one negative per-edge ce-ratio.
    pub fn cells_with_negative_ce_ratios(&self) -> Vec<usize> {
        cells_with_negative_ce_ratios(&self.ce_ratios)
    }

    fn validate_layout(&self) -> Result<(), MeshError> {
        let n = self.cells.len();
        let lengths = [
            self.cell_volumes.len(),
            self.circumcenters.len(),
            self.face_distances.len(),
            self.ce_ratios.len(),
            self.edge_lengths_sq.len(),
            self.degenerate.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(MeshError::InvariantViolation(format!(
                "per-cell arrays {lengths:?} do not match {n} cells"
            )));
        }
        if self.control_volumes.len() != self.nodes.len() {
            return Err(MeshError::InvariantViolation(format!(
                "{} control volumes for {} nodes",
                self.control_volumes.len(),
                self.nodes.len()
            )));
        }
        for (cell, (&flag, center)) in self.degenerate.iter().zip(&self.circumcenters).enumerate() {
            if flag == is_finite(*center) {
                return Err(MeshError::InvariantViolation(format!(
                    "cell {cell}: degeneracy flag {flag} disagrees with circumcenter {center:?}"
                )));
            }
        }
        Ok(())
    }
}

impl DebugInvariants for TetraMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TetraMesh");
    }

    /// Checks array layout and, when all control volumes are finite, that
    /// they partition the volume of the contributing cells.
    fn validate_invariants(&self) -> Result<(), MeshError> {
        self.validate_layout()?;
        if self.control_volumes.iter().all(|v| v.is_finite()) {
            let contributing: f64 = self
                .cell_volumes
                .iter()
                .zip(&self.degenerate)
                .filter(|&(_, &flag)| !flag)
                .map(|(volume, _)| volume)
                .sum();
            check_partition(&self.control_volumes, contributing)?;
        }
        Ok(())
    }
}

fn validate_nodes(nodes: &[Vec3]) -> Result<(), MeshError> {
    match nodes.iter().position(|xyz| !is_finite(*xyz)) {
        Some(node) => Err(MeshError::NonFiniteCoordinate { node }),
        None => Ok(()),
    }
}

fn validate_cells(cells: &[Cell], num_nodes: usize) -> Result<(), MeshError> {
    for (cell, ids) in cells.iter().enumerate() {
        for (slot, &node) in ids.iter().enumerate() {
            if node >= num_nodes {
                return Err(MeshError::NodeIndexOutOfRange {
                    cell,
                    node,
                    num_nodes,
                });
            }
            if ids[..slot].contains(&node) {
                return Err(MeshError::RepeatedNode { cell, node });
            }
        }
    }
    Ok(())
}

/// Returns the number of degenerate cells.
fn apply_degenerate_policy(
    geometry: &mut [CellGeometry],
    policy: DegeneratePolicy,
) -> Result<usize, MeshError> {
    let mut count = 0;
    for (cell, g) in geometry.iter_mut().enumerate() {
        if !g.degenerate {
            continue;
        }
        log::trace!(
            "cell {cell} is degenerate (volume = {:e}, condition = {:e})",
            g.volume,
            g.condition
        );
        match policy {
            DegeneratePolicy::Propagate => {}
            DegeneratePolicy::Skip => g.zero_ce_ratios(),
            DegeneratePolicy::Error => {
                return Err(MeshError::DegenerateCell {
                    cell,
                    volume: g.volume,
                });
            }
        }
        count += 1;
    }
    Ok(count)
}

#[cfg(feature = "rayon")]
fn batch_map<I, T, F>(items: &[I], f: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> T + Sync + Send,
{
    use rayon::prelude::*;
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
fn batch_map<I, T, F>(items: &[I], f: F) -> Vec<T>
where
    F: Fn(&I) -> T,
{
    items.iter().map(f).collect()
}
