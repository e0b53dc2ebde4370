//! Resolver and validator performance benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use forgesteel_foundry::{Catalog, LevelResolver, QualityValidator};
use serde_json::{Value, json};

/// Export with `tiers` feature levels and as many class abilities.
fn generate_export(tiers: usize) -> Value {
    let features: Vec<Value> = (1..=tiers).map(|level| json!({"level": level})).collect();
    let abilities: Vec<Value> = (1..=tiers)
        .map(|i| json!({"name": format!("Ability {}", i), "level": (i % 10) + 1}))
        .collect();

    json!({
        "name": "Benchmark Hero",
        "ancestry": {"name": "Human", "description": "Adaptable"},
        "class": {
            "name": "Tactician",
            "level": 10,
            "description": "Battlefield commander",
            "featuresByLevel": features,
            "abilities": abilities
        }
    })
}

/// Converted actor with `items` ability items, half of them linked.
fn generate_actor(items: usize) -> Value {
    let mut list = vec![json!({
        "name": "Tactician",
        "type": "class",
        "img": "systems/draw-steel/tactician.webp",
        "system": {"level": 10, "description": {"value": "<p>Battlefield commander</p>"}}
    })];
    for i in 0..items {
        let mut item = json!({
            "name": format!("Ability {}", i + 1),
            "type": "ability",
            "system": {"description": {"value": format!("<p>Effect {}</p>", i)}}
        });
        if i % 2 == 0 {
            item["_stats"] = json!({"compendiumSource": format!("Compendium.draw-steel.abilities.{}", i)});
        }
        list.push(item);
    }

    json!({
        "name": "Benchmark Hero",
        "type": "hero",
        "system": {"stamina": {}, "characteristics": {}, "combat": {}, "hero": {}},
        "items": list
    })
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = LevelResolver::new();
    let top_level = json!({"level": 5});
    let features_only = json!({"class": {"featuresByLevel": generate_export(20)["class"]["featuresByLevel"].clone()}});

    c.bench_function("resolve_top_level", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&top_level))))
    });
    c.bench_function("resolve_features_by_level", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&features_only))))
    });
    c.bench_function("check_consistency", |b| {
        let export = generate_export(20);
        b.iter(|| black_box(resolver.check_consistency(black_box(&export))))
    });
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_full_validation");
    let validator = QualityValidator::new();
    let catalog = Catalog::empty();

    for size in [10, 100, 1000].iter() {
        let original = generate_export(*size);
        let converted = generate_actor(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(validator.run_full_validation(&original, &converted, &catalog)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_validation);
criterion_main!(benches);
