use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use strata_core::math::Vec3;
use strata_data::ecs::{MeshComponent, TransformComponent};
use strata_data::{Entity, Prefab, Scene, SceneSerializer};

/// A three-level tree with `fan_out` children per node.
fn build_tree(scene: &mut Scene, fan_out: usize) -> Entity {
    let root = scene.create_entity("Root");
    for i in 0..fan_out {
        let branch = scene.create_entity(&format!("Branch {i}"));
        scene.reparent(branch, Some(root)).unwrap();
        for j in 0..fan_out {
            let leaf = scene.create_entity(&format!("Leaf {i}.{j}"));
            scene.reparent(leaf, Some(branch)).unwrap();
            scene.add_component(leaf, MeshComponent::default());
            scene.get_component_mut::<TransformComponent>(leaf).unwrap().position =
                Vec3::new(i as f32, j as f32, 0.0);
        }
    }
    root
}

fn bench_prefabs(c: &mut Criterion) {
    let mut source = Scene::new("bench source");
    let root = build_tree(&mut source, 16);
    let prefab = Prefab::from_entity(&source, root);

    let mut group = c.benchmark_group("Prefabs");

    group.bench_function("Capture (273 entities)", |b| {
        b.iter(|| black_box(Prefab::from_entity(&source, root)));
    });

    group.bench_function("Instantiate (273 entities)", |b| {
        b.iter(|| {
            let mut target = Scene::new("bench target");
            black_box(prefab.instantiate(&mut target));
        });
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut scene = Scene::new("bench scene");
    build_tree(&mut scene, 16);
    let serializer = SceneSerializer::new();
    let text = serializer.serialize(&scene).unwrap();

    let mut group = c.benchmark_group("Scene serialization");

    group.bench_function("Serialize", |b| {
        b.iter(|| black_box(serializer.serialize(&scene).unwrap()));
    });

    group.bench_function("Deserialize", |b| {
        b.iter(|| black_box(serializer.load(&text).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_prefabs, bench_serialization);
criterion_main!(benches);
