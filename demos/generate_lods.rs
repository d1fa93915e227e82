//! LOD generation demo
//!
//! Builds a small scene with a subdivided box, optionally slices it on a
//! grid, generates LOD sets and prints the resulting objects.

use anyhow::{bail, Result};
use clap::Parser;
use lodkit_core::{Point3f, Transform3D, TriangleMesh, Vector3f};
use lodkit_lod::{
    Command, Dispatcher, LodHost, LodSession, LodSettings, Outcome, Scene, StrideReducer,
};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "generate_lods")]
#[command(about = "Slice a demo mesh and generate LOD sets", long_about = None)]
struct Cli {
    /// Settings file (TOML); defaults are used when absent
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Write the final session settings to this file
    #[arg(long)]
    save_settings: Option<PathBuf>,

    /// Slice the mesh before generating LODs
    #[arg(long)]
    slice: bool,

    /// Segments along x, y and z (e.g. 2,2,1)
    #[arg(long, value_delimiter = ',', num_args = 3)]
    segments: Option<Vec<u32>>,

    /// Extra decimation ratios to add to the list
    #[arg(short, long, value_delimiter = ',')]
    add: Vec<f32>,

    /// Quads per side of the demo box
    #[arg(long, default_value_t = 4)]
    subdivisions: usize,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = filter::Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target("lodkit_slicing", level)
        .with_target("lodkit_lod", level);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match &cli.settings {
        Some(path) => LodSettings::from_file(path)?,
        None => LodSettings::default(),
    };
    if cli.subdivisions == 0 {
        bail!("subdivisions must be at least 1");
    }

    let mut scene = Scene::new();
    let props = scene.add_collection("Props");
    let crate_box = scene.add_object("Crate", subdivided_box(cli.subdivisions), props)?;
    scene.set_transform(
        crate_box,
        Transform3D::translation(Vector3f::new(0.0, 0.0, 1.0)),
    )?;
    scene.set_material(crate_box, Some("Wood".to_string()))?;

    let dispatcher = Dispatcher::default();
    let mut session = LodSession::with_settings(&settings)?;
    let mut run = |scene: &mut Scene, command| {
        dispatcher.dispatch(&mut session, scene, &[crate_box], command)
    };

    if let Some(segments) = &cli.segments {
        let [x, y, z] = segments.as_slice() else {
            bail!("expected three segment counts, got {}", segments.len());
        };
        run(&mut scene, Command::SetSegments([*x, *y, *z]))?;
    }
    if cli.slice {
        run(&mut scene, Command::SetSliceEnabled(true))?;
    }
    for &ratio in &cli.add {
        run(&mut scene, Command::SetPendingRatio(ratio))?;
        run(&mut scene, Command::AddDecimation)?;
    }

    let Outcome::Generated(report) = run(&mut scene, Command::GenerateLods)? else {
        bail!("generation did not produce a report");
    };

    println!("Decimation levels: {:?}", session.levels().labels());
    println!(
        "Generated {} LOD sets with {} objects",
        report.sets.len(),
        report.object_count()
    );
    for set in &report.sets {
        println!("\n{}", set.source_name);
        for tier in &set.tiers {
            let evaluated = scene.evaluated_mesh(tier.object, &StrideReducer)?;
            println!(
                "  {:<24} ratio {:>5.2}  {:>5} faces",
                tier.name,
                tier.ratio,
                evaluated.face_count()
            );
        }
    }
    if let Some(failure) = &report.failure {
        println!(
            "\nStopped at '{}': {}",
            scene.object_name(failure.object)?,
            failure.error
        );
    }

    if let Some(path) = &cli.save_settings {
        session.to_settings().save(path)?;
        println!("\nSaved settings to {}", path.display());
    }

    Ok(())
}

/// Closed unit box with every side split into `n` x `n` quads.
/// Vertices are shared along the box edges.
fn subdivided_box(n: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let mut lattice: HashMap<[usize; 3], usize> = HashMap::new();

    // (fixed axis, at max?, u axis, v axis) with u x v pointing outward
    let sides = [
        (0, true, 1, 2),
        (0, false, 2, 1),
        (1, true, 2, 0),
        (1, false, 0, 2),
        (2, true, 0, 1),
        (2, false, 1, 0),
    ];
    for (axis, at_max, u, v) in sides {
        let mut index = |i: usize, j: usize| {
            let mut key = [0usize; 3];
            key[axis] = if at_max { n } else { 0 };
            key[u] = i;
            key[v] = j;
            *lattice.entry(key).or_insert_with(|| {
                mesh.add_vertex(Point3f::new(
                    key[0] as f32 / n as f32,
                    key[1] as f32 / n as f32,
                    key[2] as f32 / n as f32,
                ))
            })
        };

        let mut quads = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                quads.push([index(i, j), index(i + 1, j), index(i + 1, j + 1), index(i, j + 1)]);
            }
        }
        for [a, b, c, d] in quads {
            mesh.add_face([a, b, c]);
            mesh.add_face([a, c, d]);
        }
    }
    mesh
}
