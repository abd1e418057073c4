use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tet_covolume::mesh::{Cell, TetraMesh, TetraMeshOptions};
use tet_covolume::geometry::circumcenter::CircumcenterMode;
use tet_covolume::geometry::vector::Vec3;

// Unit cube, n^3 hexahedra split into six tetrahedra each, interior nodes
// jittered so that the mesh is not Delaunay.
fn jittered_box(n: usize, seed: u64) -> (Vec<Vec3>, Vec<Cell>) {
    let h = 1.0 / n as f64;
    let id = |i: usize, j: usize, k: usize| (k * (n + 1) + j) * (n + 1) + i;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut nodes = Vec::with_capacity((n + 1).pow(3));
    for k in 0..=n {
        for j in 0..=n {
            for i in 0..=n {
                let interior = [i, j, k].iter().all(|&x| x > 0 && x < n);
                nodes.push([i, j, k].map(|x| {
                    let jitter = if interior { rng.gen_range(-0.1..0.1) } else { 0.0 };
                    (x as f64 + jitter) * h
                }));
            }
        }
    }
    let mut cells = Vec::with_capacity(6 * n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                for order in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
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

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("tetra_mesh_build");
    for &n in &[4usize, 8, 16] {
        let (nodes, cells) = jittered_box(n, 42);
        for mode in [CircumcenterMode::Geometric, CircumcenterMode::Algebraic] {
            let options = TetraMeshOptions::default().with_mode(mode);
            group.bench_with_input(
                BenchmarkId::new(mode.to_string(), cells.len()),
                &(nodes.clone(), cells.clone()),
                |b, (nodes, cells)| {
                    b.iter(|| {
                        let mesh =
                            TetraMesh::with_options(nodes.clone(), cells.clone(), options)
                                .unwrap();
                        black_box(mesh.control_volumes()[0])
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_delaunay_count(c: &mut Criterion) {
    let (nodes, cells) = jittered_box(12, 7);
    c.bench_function("delaunay_violations_fresh_mesh", |b| {
        b.iter(|| {
            let mesh = TetraMesh::new(nodes.clone(), cells.clone()).unwrap();
            black_box(mesh.num_delaunay_violations())
        })
    });
}

criterion_group!(benches, bench_construction, bench_delaunay_count);
criterion_main!(benches);
