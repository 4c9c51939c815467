// ABOUTME: Criterion benchmarks for the recipe write and read paths on SQLite
// ABOUTME: Measures transactional creates, lookups by id and slug, and listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for recipe storage.
//!
//! Every benchmark runs against an in-memory database with the schema
//! applied.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use cookbook_core::models::{IngredientLineInput, RecipeInput, Unit};
use cookbook_server::config::DatabaseConfig;
use cookbook_server::database::Database;
use cookbook_server::services::RecipeService;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::runtime::Runtime;

/// Counter for unique recipe titles across benchmark iterations
static RECIPE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Pantry the generated recipes draw ingredient names from
const PANTRY: [&str; 8] = [
    "tofu", "chili", "garlic", "ginger", "rice", "soy sauce", "scallion", "sesame oil",
];

/// Generate a recipe with a unique title and `lines` ingredient lines
fn generate_recipe(lines: usize) -> RecipeInput {
    let counter = RECIPE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let mut input = RecipeInput::titled(format!("Bench Recipe {counter}"));
    input.servings = Some(2);
    input.ingredients = (0..lines)
        .map(|i| IngredientLineInput::new(PANTRY[i % PANTRY.len()], 10.0, Unit::Gram))
        .collect();
    input
}

async fn create_test_service() -> RecipeService {
    let db = Database::connect(&DatabaseConfig::in_memory()).await.unwrap();
    RecipeService::new(db)
}

/// Benchmark the transactional create path
fn bench_recipe_create(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_create");
    let service = rt.block_on(create_test_service());

    for lines in [1_usize, 8, 64] {
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::new("lines", lines), &lines, |b, &lines| {
            b.iter(|| {
                let input = generate_recipe(lines);
                rt.block_on(async { service.create(black_box(&input)).await.unwrap() })
            });
        });
    }

    group.finish();
}

/// Benchmark single-recipe lookups
fn bench_recipe_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_get");
    let service = rt.block_on(create_test_service());
    let recipe = rt.block_on(service.create(&generate_recipe(8))).unwrap();
    let id = recipe.id.to_string();

    group.bench_function("by_id", |b| {
        b.iter(|| rt.block_on(async { service.get(black_box(&id)).await.unwrap() }));
    });
    group.bench_function("by_slug", |b| {
        b.iter(|| rt.block_on(async { service.get(black_box(&recipe.slug)).await.unwrap() }));
    });

    group.finish();
}

/// Benchmark listing as the catalog grows
fn bench_recipe_list(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_list");

    for count in [10_usize, 100] {
        let service = rt.block_on(create_test_service());
        rt.block_on(async {
            for _ in 0..count {
                service.create(&generate_recipe(4)).await.unwrap();
            }
        });

        group.bench_with_input(BenchmarkId::new("recipes", count), &service, |b, service| {
            b.iter(|| rt.block_on(async { service.get_all().await.unwrap() }));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_recipe_create,
    bench_recipe_get,
    bench_recipe_list,
);
criterion_main!(benches);
