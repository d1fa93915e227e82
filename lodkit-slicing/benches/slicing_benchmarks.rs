//! Benchmarks for grid slicing and loose-part separation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lodkit_core::{Point3f, TriangleMesh};
use lodkit_slicing::{separate_loose_parts, slice_into_parts, BoundingBox, GridSlicer};

/// Height field over a `size` x `size` grid, bumpy enough that cuts cross many faces
fn generate_grid_mesh(size: usize) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = y as f32 / (size - 1) as f32 * std::f32::consts::PI;
            vertices.push(Point3f::new(
                x as f32,
                y as f32,
                (fx.sin() * fy.sin()) * 2.0,
            ));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn bench_slicing(c: &mut Criterion) {
    let sizes = [20, 40, 80];
    let grids = [[2, 2, 1], [4, 4, 2], [8, 8, 2]];

    let mut group = c.benchmark_group("slicing");

    for &size in &sizes {
        let mesh = generate_grid_mesh(size);
        let face_count = mesh.face_count();

        for segments in grids {
            group.bench_with_input(
                BenchmarkId::new(
                    "slice_into_parts",
                    format!("{}f_{}x{}x{}", face_count, segments[0], segments[1], segments[2]),
                ),
                &(&mesh, segments),
                |b, &(mesh, segments)| {
                    let slicer = GridSlicer::new();
                    b.iter(|| {
                        let parts = slice_into_parts(black_box(mesh.clone()), segments, &slicer).unwrap();
                        black_box(parts);
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_separation(c: &mut Criterion) {
    let mut group = c.benchmark_group("separation");

    for &size in &[40, 80] {
        let mesh = generate_grid_mesh(size);
        let axes = BoundingBox::from_mesh(&mesh).axis_specs([8, 8, 1]).unwrap();
        let sliced = GridSlicer::new().slice_grid(mesh, &axes).unwrap();

        group.bench_with_input(
            BenchmarkId::new("separate_loose_parts", sliced.face_count()),
            &sliced,
            |b, sliced| {
                b.iter(|| black_box(separate_loose_parts(black_box(sliced))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_slicing, bench_separation);
criterion_main!(benches);
