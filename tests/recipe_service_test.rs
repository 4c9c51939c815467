// ABOUTME: Integration tests for the transactional recipe service
// ABOUTME: Covers create/update/delete flows, duplicate slugs, and rollback atomicity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{recipe_input, spicy_tofu};
use cookbook_core::constants::constraints;
use cookbook_core::models::Unit;
use cookbook_server::database::{DatabaseError, ExecutionScope};
use cookbook_server::services::RecipeService;
use uuid::Uuid;

async fn count(service: &RecipeService, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(service.database().pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_spicy_tofu() {
    let (_dir, service) = common::create_test_service().await;

    let recipe = service.create(&spicy_tofu()).await.unwrap();

    assert_ne!(recipe.id, Uuid::nil());
    assert_eq!(recipe.slug, "spicy-tofu");
    assert_eq!(recipe.ingredients.len(), 2);
    assert!(recipe.ingredients.iter().all(|line| !line.id.is_nil()));
    assert_eq!(recipe.ingredients[0].name, "tofu");
    assert_eq!(recipe.ingredients[0].unit, Unit::Gram);
    assert!((recipe.ingredients[0].quantity - 200.0).abs() < f64::EPSILON);
    assert_eq!(recipe.ingredients[1].name, "chili");
    assert_eq!(recipe.ingredients[1].unit, Unit::Countable);

    let loaded = service.get(&recipe.id.to_string()).await.unwrap();
    assert_eq!(loaded.ingredients, recipe.ingredients);
    let by_slug = service.get("spicy-tofu").await.unwrap();
    assert_eq!(by_slug.id, recipe.id);
}

#[tokio::test]
async fn test_recipes_share_ingredient_identities() {
    let (_dir, service) = common::create_test_service().await;

    let first = service.create(&spicy_tofu()).await.unwrap();
    let second = service
        .create(&recipe_input(
            "Tofu Stir Fry",
            &[("broccoli", 1.0, Unit::Cup), ("tofu", 300.0, Unit::Gram)],
        ))
        .await
        .unwrap();

    assert_eq!(first.ingredients[0].id, second.ingredients[1].id);
    assert_eq!(count(&service, "ingredients").await, 3);
}

#[tokio::test]
async fn test_repeated_ingredient_lines_share_identity() {
    let (_dir, service) = common::create_test_service().await;

    let recipe = service
        .create(&recipe_input(
            "Double Garlic Bread",
            &[
                ("garlic", 2.0, Unit::Countable),
                ("bread", 1.0, Unit::Countable),
                ("garlic", 1.0, Unit::Tablespoon),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].id, recipe.ingredients[2].id);
    assert_eq!(recipe.ingredients[2].unit, Unit::Tablespoon);
}

#[tokio::test]
async fn test_duplicate_title_rolls_back_whole_aggregate() {
    let (_dir, service) = common::create_test_service().await;
    let original = service.create(&spicy_tofu()).await.unwrap();

    let err = service
        .create(&recipe_input(
            "Spicy Tofu",
            &[("tofu", 100.0, Unit::Gram), ("basil", 5.0, Unit::Gram)],
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        DatabaseError::DuplicateKey { key } if key == constraints::RECIPES_SLUG_KEY
    ));
    assert_eq!(err.contexts(), vec!["store recipe"]);

    assert_eq!(count(&service, "recipes").await, 1);
    assert_eq!(count(&service, "recipe_ingredients").await, 2);

    // Pre-existing dictionary entries remain; names first seen by the failed write do not
    let tofu = service.find_ingredient("tofu").await.unwrap().unwrap();
    assert_eq!(tofu.id, original.ingredients[0].id);
    assert!(service.find_ingredient("basil").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_replaces_everything() {
    let (_dir, service) = common::create_test_service().await;
    let created = service.create(&spicy_tofu()).await.unwrap();

    let mut input = recipe_input(
        "Mild Tofu",
        &[("tofu", 250.0, Unit::Gram), ("soy sauce", 2.0, Unit::Tablespoon)],
    );
    input.headline = Some("Less heat".to_owned());
    let updated = service.update(created.id, &input).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.slug, "mild-tofu");
    assert_eq!(updated.headline.as_deref(), Some("Less heat"));
    assert_eq!(updated.servings, None);
    assert!(updated.tags.is_empty());

    let loaded = service.get("mild-tofu").await.unwrap();
    assert_eq!(loaded.ingredients, updated.ingredients);
    let names: Vec<&str> = loaded.ingredients.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["tofu", "soy sauce"]);
    assert!(service.get("spicy-tofu").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_update_unknown_recipe_is_not_found_and_writes_nothing() {
    let (_dir, service) = common::create_test_service().await;

    let err = service
        .update(
            Uuid::new_v4(),
            &recipe_input("Ghost Soup", &[("ectoplasm", 1.0, Unit::Liter)]),
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(count(&service, "recipes").await, 0);
    assert!(service.find_ingredient("ectoplasm").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_to_taken_slug_keeps_original() {
    let (_dir, service) = common::create_test_service().await;
    service.create(&spicy_tofu()).await.unwrap();
    let other = service
        .create(&recipe_input("Green Curry", &[("basil", 10.0, Unit::Gram)]))
        .await
        .unwrap();

    let err = service
        .update(other.id, &recipe_input("Spicy Tofu", &[]))
        .await
        .unwrap_err();

    assert_eq!(err.duplicate_key_name(), Some(constraints::RECIPES_SLUG_KEY));
    let loaded = service.get(&other.id.to_string()).await.unwrap();
    assert_eq!(loaded.title, "Green Curry");
    assert_eq!(loaded.ingredients, other.ingredients);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (_dir, service) = common::create_test_service().await;
    let created = service.create(&spicy_tofu()).await.unwrap();

    assert_eq!(service.delete(created.id).await.unwrap(), 1);
    assert_eq!(service.delete(created.id).await.unwrap(), 0);
    assert!(service
        .get(&created.id.to_string())
        .await
        .unwrap_err()
        .is_not_found());

    let listed = service.get_all().await.unwrap();
    assert!(listed.is_empty());
    assert_eq!(
        service
            .database()
            .ingredients()
            .count(ExecutionScope::Pool)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_concurrent_creates_share_new_ingredient() {
    let (_dir, service) = common::create_test_service().await;

    let a = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .create(&recipe_input("Saffron Rice", &[("saffron", 1.0, Unit::Gram)]))
                .await
                .unwrap()
        })
    };
    let b = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .create(&recipe_input("Paella", &[("saffron", 2.0, Unit::Gram)]))
                .await
                .unwrap()
        })
    };

    let a = a.await.unwrap();
    let b = b.await.unwrap();
    assert_eq!(a.ingredients[0].id, b.ingredients[0].id);
    assert_eq!(count(&service, "ingredients").await, 1);
}
