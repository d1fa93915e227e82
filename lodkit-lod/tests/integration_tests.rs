//! Integration tests for lodkit-lod
//!
//! These tests drive the dispatcher against an in-memory scene the way a
//! panel would: load settings, edit levels, slice and generate.

use approx::assert_relative_eq;
use lodkit_core::{Point3f, TriangleMesh, Vector3f};
use lodkit_lod::*;
use lodkit_slicing::{BoundingBox, SliceConfig};

fn unit_cube() -> TriangleMesh {
    let vertices = vec![
        Point3f::new(0.0, 0.0, 0.0),
        Point3f::new(1.0, 0.0, 0.0),
        Point3f::new(1.0, 1.0, 0.0),
        Point3f::new(0.0, 1.0, 0.0),
        Point3f::new(0.0, 0.0, 1.0),
        Point3f::new(1.0, 0.0, 1.0),
        Point3f::new(1.0, 1.0, 1.0),
        Point3f::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 2, 1], [0, 3, 2],
        [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4],
        [3, 7, 6], [3, 6, 2],
        [0, 4, 7], [0, 7, 3],
        [1, 2, 6], [1, 6, 5],
    ];
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn generated(outcome: Outcome) -> GenerationReport {
    match outcome {
        Outcome::Generated(report) => report,
        other => panic!("expected a generation report, got {:?}", other),
    }
}

#[test]
fn test_generate_four_tiers_for_one_object() {
    let mut scene = Scene::new();
    let root = scene.root_collection();
    let cube = scene.add_object("Cube", unit_cube(), root).unwrap();

    let mut session = LodSession::new();
    let report = generated(
        Dispatcher::default()
            .dispatch(&mut session, &mut scene, &[cube], Command::GenerateLods)
            .unwrap(),
    );

    assert_eq!(report.sets.len(), 1);
    let names: Vec<&str> = report.sets[0].tiers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Cube_LOD0", "Cube_LOD1", "Cube_LOD2", "Cube_LOD3"]);

    // Tier 0 is the original object with untouched geometry
    assert_eq!(report.sets[0].tiers[0].object, cube);
    assert_eq!(scene.mesh(cube).unwrap(), &unit_cube());
    assert_eq!(scene.objects_in(root).unwrap().len(), 4);
}

#[test]
fn test_sliced_cube_gets_a_set_per_part() {
    let mut scene = Scene::new();
    let root = scene.root_collection();
    let cube = scene.add_object("Cube", unit_cube(), root).unwrap();
    scene.set_material(cube, Some("Stone".to_string())).unwrap();

    let dispatcher = Dispatcher::default();
    let mut session = LodSession::new();
    dispatcher
        .dispatch(&mut session, &mut scene, &[], Command::SetSegments([2, 2, 2]))
        .unwrap();
    dispatcher
        .dispatch(&mut session, &mut scene, &[], Command::SetSliceEnabled(true))
        .unwrap();
    let report = generated(
        dispatcher
            .dispatch(&mut session, &mut scene, &[cube], Command::GenerateLods)
            .unwrap(),
    );

    assert!(report.is_complete());
    assert_eq!(report.sets.len(), 8);
    assert_eq!(report.object_count(), 32);
    assert_eq!(scene.object_count(), 32);

    for set in &report.sets {
        let base = set.base().unwrap();
        let object = scene.object(base.object).unwrap();
        assert_eq!(object.material.as_deref(), Some("Stone"));

        let volume = BoundingBox::from_mesh(&object.mesh).volume();
        assert_relative_eq!(volume, 0.125, epsilon = 1e-4);

        // Every tier of a part shares the part's geometry before reduction
        for tier in &set.tiers[1..] {
            assert_eq!(scene.mesh(tier.object).unwrap(), &object.mesh);
        }
    }
}

#[test]
fn test_evaluated_tiers_shrink() {
    // Flat strip of 40 triangles so ratios map to exact face counts
    let mut strip = TriangleMesh::new();
    for i in 0..=20 {
        strip.add_vertex(Point3f::new(i as f32, 0.0, 0.0));
        strip.add_vertex(Point3f::new(i as f32, 1.0, 0.0));
    }
    for i in 0..20 {
        let a = 2 * i;
        strip.add_face([a, a + 2, a + 3]);
        strip.add_face([a, a + 3, a + 1]);
    }

    let mut scene = Scene::new();
    let root = scene.root_collection();
    let id = scene.add_object("Strip", strip, root).unwrap();

    let report = LodGenerator::new()
        .generate(
            &mut scene,
            &[id],
            &DecimationLevels::with_defaults(),
            &SliceConfig::default(),
        )
        .unwrap();

    let counts: Vec<usize> = report.sets[0]
        .tiers
        .iter()
        .map(|t| scene.evaluated_mesh(t.object, &StrideReducer).unwrap().face_count())
        .collect();
    assert_eq!(counts, vec![40, 20, 8, 4]);
}

#[test]
fn test_settings_drive_a_session() {
    let settings = LodSettings::from_toml_str(
        r#"
        seed_ratios = [1.0, 0.3]
        pending_ratio = 0.6

        [slice]
        enabled = true
        segments = [2, 1, 1]
        "#,
    )
    .unwrap();

    let mut scene = Scene::new();
    let root = scene.root_collection();
    let cube = scene.add_object("Cube", unit_cube(), root).unwrap();

    let dispatcher = Dispatcher::default();
    let mut session = LodSession::with_settings(&settings).unwrap();
    dispatcher
        .dispatch(&mut session, &mut scene, &[], Command::AddDecimation)
        .unwrap();
    assert_eq!(session.levels().ratios(), vec![1.0, 0.6, 0.3]);

    let report = generated(
        dispatcher
            .dispatch(&mut session, &mut scene, &[cube], Command::GenerateLods)
            .unwrap(),
    );
    assert_eq!(report.sets.len(), 2);
    assert_eq!(report.object_count(), 6);

    let mut names: Vec<String> = scene
        .object_ids()
        .map(|id| scene.object_name(id).unwrap())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Cube.001_LOD0",
            "Cube.001_LOD1",
            "Cube.001_LOD2",
            "Cube_LOD0",
            "Cube_LOD1",
            "Cube_LOD2",
        ]
    );
}

#[test]
fn test_parts_inherit_transform() {
    let mut scene = Scene::new();
    let root = scene.root_collection();
    let cube = scene.add_object("Cube", unit_cube(), root).unwrap();
    let offset = Vector3f::new(10.0, 0.0, 0.0);
    scene
        .set_transform(cube, lodkit_core::Transform3D::translation(offset))
        .unwrap();

    let parts = LodGenerator::new()
        .slice_object(&mut scene, cube, &SliceConfig::grid(2, 1, 1))
        .unwrap();
    assert_eq!(parts.len(), 2);

    let mut min_x: Vec<f32> = parts
        .iter()
        .map(|&id| BoundingBox::from_mesh(&scene.world_mesh(id).unwrap()).min().x)
        .collect();
    min_x.sort_by(f32::total_cmp);
    assert_relative_eq!(min_x[0], 10.0, epsilon = 1e-5);
    assert_relative_eq!(min_x[1], 10.5, epsilon = 1e-5);
}

#[test]
fn test_repeated_generation_keeps_names_unique() {
    let mut scene = Scene::new();
    let root = scene.root_collection();
    let cube = scene.add_object("Cube", unit_cube(), root).unwrap();
    let levels = DecimationLevels::from_ratios([1.0, 0.5]).unwrap();
    let generator = LodGenerator::new();

    generator
        .generate(&mut scene, &[cube], &levels, &SliceConfig::default())
        .unwrap();
    let report = generator
        .generate(&mut scene, &[cube], &levels, &SliceConfig::default())
        .unwrap();

    assert_eq!(report.sets[0].source_name, "Cube_LOD0");
    assert_eq!(report.sets[0].tiers[0].name, "Cube_LOD0_LOD0");
    assert_eq!(report.sets[0].tiers[1].name, "Cube_LOD0_LOD1");
    assert_eq!(scene.object_count(), 3);
}
