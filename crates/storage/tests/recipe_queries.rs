#![forbid(unsafe_code)]

use galley_storage::{RecipeStore, StoreError};
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_storage_dir(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic enough for tests")
        .as_nanos();
    path.push(format!(
        "galley-storage-{label}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&path).expect("temp storage dir must be creatable");
    path
}

/// Seed two recipes: one full tree (two steps, two step-ingredients, one
/// trigger group with two triggers, one utensil) and one bare recipe.
fn seed(dir: &std::path::Path) {
    let conn = Connection::open(dir.join("galley.db")).expect("open seeded db");
    conn.execute_batch(
        r#"
        INSERT INTO recipes(id, title, created_at_ms) VALUES
          (1, 'overnight oats', 1700000000000),
          (2, 'ice water', 1700000100000);

        INSERT INTO ingredients(id, name, created_at_ms) VALUES
          (1000, 'rolled oats', NULL),
          (1001, 'milk', NULL);

        INSERT INTO step_ingredients(id, recipe_id, ingredient_id, quantity, unit, created_at_ms) VALUES
          (100, 1, 1000, 0.5, 'cup', NULL),
          (101, 1, 1001, 1.0, 'cup', NULL);

        INSERT INTO steps(id, recipe_id, data, step_number, created_at_ms) VALUES
          (10, 1, 'combine and stir', 1, NULL),
          (11, 1, 'chill overnight', 2, NULL);

        INSERT INTO trigger_types(id, key, sensor_type, created_at_ms) VALUES
          (300, 'temp-below', 'temperature', NULL);

        INSERT INTO trigger_groups(id, step_id, action_params, action_key, service) VALUES
          (20, 10, NULL, 'fridge-alert', 'fridge');

        INSERT INTO triggers(id, trigger_group_id, trigger_type_id, action, action_params, trigger_params, service, created_at_ms) VALUES
          (200, 20, 300, 'notify', NULL, NULL, 'fridge', NULL),
          (201, 20, NULL, 'log', NULL, NULL, 'fridge', NULL);

        INSERT INTO utensils(id, name, created_at_ms) VALUES
          (5, 'mason jar', NULL);

        INSERT INTO step_utensils(step_id, utensil_id) VALUES
          (10, 5);
        "#,
    )
    .expect("seed fixtures");
}

#[test]
fn recipes_all_assembles_deduplicated_trees() {
    let dir = temp_storage_dir("all");
    let store = RecipeStore::open(&dir).expect("open store");
    seed(&dir);

    let recipes = store.recipes_all().expect("recipes_all");
    assert_eq!(recipes.len(), 2);

    let full = &recipes[0];
    assert_eq!(full.id, 1);
    assert_eq!(full.title.as_deref(), Some("overnight oats"));

    // The join multiplies step-ingredient rows by step rows; the tree must
    // still hold each child exactly once.
    let si_ids: Vec<i64> = full.step_ingredients.iter().map(|si| si.id).collect();
    assert_eq!(si_ids, vec![100, 101]);
    let step_ids: Vec<i64> = full.steps.iter().map(|s| s.id).collect();
    assert_eq!(step_ids, vec![10, 11]);

    let combine = &full.steps[0];
    assert_eq!(combine.trigger_groups.len(), 1);
    let group = &combine.trigger_groups[0];
    assert_eq!(group.id, 20);
    let mut trigger_ids: Vec<i64> = group.triggers.iter().map(|t| t.id).collect();
    trigger_ids.sort_unstable();
    assert_eq!(trigger_ids, vec![200, 201]);
    assert_eq!(combine.utensils.len(), 1);
    assert_eq!(combine.utensils[0].name.as_deref(), Some("mason jar"));

    let chill = &full.steps[1];
    assert!(chill.trigger_groups.is_empty());
    assert!(chill.utensils.is_empty());

    let bare = &recipes[1];
    assert_eq!(bare.id, 2);
    assert!(bare.step_ingredients.is_empty());
    assert!(bare.steps.is_empty());
}

#[test]
fn reference_snapshots_follow_their_own_ids() {
    let dir = temp_storage_dir("refs");
    let store = RecipeStore::open(&dir).expect("open store");
    seed(&dir);

    let recipe = store.recipe_by_id(1).expect("recipe 1");
    let group = &recipe.steps[0].trigger_groups[0];

    let notify = group
        .triggers
        .iter()
        .find(|t| t.id == 200)
        .expect("trigger 200");
    let trigger_type = notify.trigger_type.as_ref().expect("trigger type snapshot");
    assert_eq!(trigger_type.key.as_deref(), Some("temp-below"));

    let log = group
        .triggers
        .iter()
        .find(|t| t.id == 201)
        .expect("trigger 201");
    assert!(log.trigger_type.is_none());

    let oats = &recipe.step_ingredients[0];
    let ingredient = oats.ingredient.as_ref().expect("ingredient snapshot");
    assert_eq!(ingredient.name.as_deref(), Some("rolled oats"));
}

#[test]
fn recipe_by_id_requires_exactly_one() {
    let dir = temp_storage_dir("by-id");
    let store = RecipeStore::open(&dir).expect("open store");
    seed(&dir);

    let recipe = store.recipe_by_id(2).expect("recipe 2");
    assert_eq!(recipe.id, 2);
    assert!(recipe.steps.is_empty());

    let err = store.recipe_by_id(999).expect_err("missing recipe");
    assert!(matches!(err, StoreError::RecipeNotFound { id: 999 }));
}

#[test]
fn empty_store_yields_empty_sequence() {
    let dir = temp_storage_dir("empty");
    let store = RecipeStore::open(&dir).expect("open store");
    assert!(store.recipes_all().expect("recipes_all").is_empty());
}

#[test]
fn reopen_is_idempotent() {
    let dir = temp_storage_dir("reopen");
    {
        let store = RecipeStore::open(&dir).expect("first open");
        seed(&dir);
        assert_eq!(store.recipes_all().expect("first read").len(), 2);
    }
    let store = RecipeStore::open(&dir).expect("second open");
    assert_eq!(store.storage_dir(), dir.as_path());
    assert_eq!(store.recipes_all().expect("second read").len(), 2);
}

#[test]
fn malformed_row_aborts_the_whole_read() {
    let dir = temp_storage_dir("decode-abort");
    let store = RecipeStore::open(&dir).expect("open store");

    // REAL affinity cannot coerce this text, so SQLite stores it as TEXT and
    // the quantity column decode fails on the first row.
    let conn = Connection::open(dir.join("galley.db")).expect("open seeded db");
    conn.execute_batch(
        r#"
        INSERT INTO recipes(id, title, created_at_ms) VALUES
          (1, 'overnight oats', 1700000000000);
        INSERT INTO step_ingredients(id, recipe_id, ingredient_id, quantity, unit, created_at_ms) VALUES
          (100, 1, NULL, 'not-a-number', 'cup', NULL);
        "#,
    )
    .expect("seed malformed row");

    let err = store.recipes_all().expect_err("decode must abort");
    assert!(matches!(err, StoreError::RowDecode { row: 0, .. }));

    let err = store.recipe_by_id(1).expect_err("decode must abort by id too");
    assert!(matches!(err, StoreError::RowDecode { row: 0, .. }));
}

#[test]
fn serialized_tree_omits_empty_sequences() {
    let dir = temp_storage_dir("serialize");
    let store = RecipeStore::open(&dir).expect("open store");
    seed(&dir);

    let bare = store.recipe_by_id(2).expect("recipe 2");
    let value = serde_json::to_value(bare).expect("serialize");
    let object = value.as_object().expect("json object");
    assert!(!object.contains_key("steps"));
    assert!(!object.contains_key("step_ingredients"));
    assert_eq!(object["title"], "ice water");
}
