#![allow(dead_code)]
use tet_covolume::mesh::Cell;
use tet_covolume::geometry::vector::Vec3;

/// Assert two slices agree entry-wise within `tol` (absolute).
pub fn assert_near(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len(), "length mismatch\n got={got:?}\nwant={want:?}");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= tol,
            "entry {i}: {g} vs {w} (tol {tol})\n got={got:?}\nwant={want:?}"
        );
    }
}

pub fn norm2(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

pub fn norm_inf(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m, v| v.abs().max(m))
}

/// Regular tetrahedron with edge length `a`, base in the xy-plane and
/// centroid of the base at the origin.
pub fn regular_tet(a: f64) -> (Vec<Vec3>, Vec<Cell>) {
    let s3 = 3f64.sqrt();
    let nodes = [
        [1.0, 0.0, 0.0],
        [-0.5, s3 / 2.0, 0.0],
        [-0.5, -s3 / 2.0, 0.0],
        [0.0, 0.0, 2f64.sqrt()],
    ]
    .map(|p| p.map(|x| a * x / s3));
    (nodes.to_vec(), vec![[0, 1, 2, 3]])
}

/// Tetrahedron with a right-angled corner at the origin and legs `a`.
pub fn right_corner(a: f64) -> (Vec<Vec3>, Vec<Cell>) {
    (
        vec![[0.0, 0.0, 0.0], [a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]],
        vec![[0, 1, 2, 3]],
    )
}

/// A 1 x 1 x 10 box split into five tetrahedra.
pub fn cube_small() -> (Vec<Vec3>, Vec<Cell>) {
    (
        vec![
            [-0.5, -0.5, -5.0],
            [-0.5, 0.5, -5.0],
            [0.5, -0.5, -5.0],
            [-0.5, -0.5, 5.0],
            [0.5, 0.5, -5.0],
            [0.5, 0.5, 5.0],
            [-0.5, 0.5, 5.0],
            [0.5, -0.5, 5.0],
        ],
        vec![
            [0, 1, 2, 3],
            [1, 2, 4, 5],
            [1, 2, 3, 5],
            [1, 3, 5, 6],
            [2, 3, 5, 7],
        ],
    )
}

/// Four cells around the axis (4, 5), two of which break the Delaunay
/// property.
pub fn arrow() -> (Vec<Vec3>, Vec<Cell>) {
    (
        vec![
            [0.0, 0.0, 0.0],
            [2.0, -1.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.5, 0.0, -0.9],
            [0.5, 0.0, 0.9],
        ],
        vec![[1, 2, 4, 5], [2, 3, 4, 5], [0, 1, 4, 5], [0, 3, 4, 5]],
    )
}

/// Structured `n x n x n` grid on the unit cube, every hexahedron split
/// into six tetrahedra along its main diagonal.
pub fn box_mesh(n: usize) -> (Vec<Vec3>, Vec<Cell>) {
    let h = 1.0 / n as f64;
    let id = |i: usize, j: usize, k: usize| (k * (n + 1) + j) * (n + 1) + i;
    let mut nodes = Vec::with_capacity((n + 1).pow(3));
    for k in 0..=n {
        for j in 0..=n {
            for i in 0..=n {
                nodes.push([i as f64 * h, j as f64 * h, k as f64 * h]);
            }
        }
    }
    const AXIS_ORDERS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut cells = Vec::with_capacity(6 * n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                for order in AXIS_ORDERS {
                    let mut ijk = [i, j, k];
                    let mut cell = [id(i, j, k); 4];
                    for (step, axis) in order.into_iter().enumerate() {
                        ijk[axis] += 1;
                        cell[step + 1] = id(ijk[0], ijk[1], ijk[2]);
                    }
                    cells.push(cell);
                }
            }
        }
    }
    (nodes, cells)
}
