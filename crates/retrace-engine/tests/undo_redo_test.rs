//! Undo/redo reconstruction against the in-memory document tree.

use serde_json::json;

use retrace_core::errors::HistoryError;
use retrace_core::traits::IDocumentStore;
use retrace_engine::HistoryEngine;
use test_fixtures::{attributes, ChangeRecordBuilder, MemoryStore, SchemaRegistry, TypeSchema};

// ── Test Harness ─────────────────────────────────────────────────────────

fn schema() -> SchemaRegistry {
    SchemaRegistry::new()
        .register(
            "Post",
            TypeSchema::new()
                .tracks(&["title", "body", "rating", "tags"])
                .embeds_one("author", "Author")
                .embeds_many("comments", "Comment"),
        )
        .register("Comment", TypeSchema::new().tracks(&["text"]))
        .register("Author", TypeSchema::new().tracks(&["name"]))
        .register("User", TypeSchema::new().tracks(&["name"]))
}

fn seed_post(store: &MemoryStore, body: serde_json::Value) -> <MemoryStore as IDocumentStore>::Doc {
    store
        .create_root("Post", attributes(body))
        .expect("seeds root")
}

// ── Destroy + undo: re-create ────────────────────────────────────────────

#[test]
fn undoing_a_destroy_recreates_a_standalone_root_with_its_stored_id() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);

    let record = ChangeRecordBuilder::destroy()
        .root("User", 7)
        .original(json!({ "_id": 7, "name": "Bob" }))
        .build();

    engine.undo(&record, None).expect("undo re-creates");

    let restored = store
        .find_root("User", &json!(7))
        .expect("lookup succeeds")
        .expect("document exists");
    let attrs = store.attributes_of(&restored).expect("has attributes");
    assert_eq!(attrs["_id"], json!(7));
    assert_eq!(attrs["name"], json!("Bob"));
}

#[test]
fn undoing_a_destroy_without_a_stored_id_fails_fast() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);

    let record = ChangeRecordBuilder::destroy()
        .root("User", 7)
        .original(json!({ "name": "Bob" }))
        .build();

    let err = engine.undo(&record, None).expect_err("no id to restore");
    assert!(matches!(err, HistoryError::MalformedRecord { .. }));
    assert_eq!(store.root_count("User"), 0);
}

#[test]
fn undoing_a_nested_destroy_recreates_under_the_to_many_parent() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "post" }));

    let record = ChangeRecordBuilder::destroy()
        .root("Post", 1)
        .step_many("comments", "c9")
        .original(json!({ "_id": "c9", "text": "hello" }))
        .build();

    engine.undo(&record, None).expect("undo re-creates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let comment = store
        .embedded_many(&post, "comments", &json!("c9"))
        .expect("lookup succeeds")
        .expect("comment restored");
    let attrs = store.attributes_of(&comment).expect("has attributes");
    assert_eq!(attrs["text"], json!("hello"));
}

#[test]
fn undoing_a_nested_destroy_recreates_under_the_to_one_parent() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "post" }));

    let record = ChangeRecordBuilder::destroy()
        .root("Post", 1)
        .step_one("author")
        .original(json!({ "name": "Ada" }))
        .build();

    engine.undo(&record, None).expect("undo re-creates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let author = store
        .embedded_one(&post, "author")
        .expect("lookup succeeds")
        .expect("author restored");
    let attrs = store.attributes_of(&author).expect("has attributes");
    assert_eq!(attrs["name"], json!("Ada"));
}

// ── Create + undo: re-destroy ────────────────────────────────────────────

#[test]
fn undoing_a_create_destroys_the_target_without_mutating_it() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "fresh" }));

    let record = ChangeRecordBuilder::create()
        .root("Post", 1)
        .modified(json!({ "_id": 1, "title": "fresh" }))
        .build();

    engine.undo(&record, None).expect("undo destroys");
    assert_eq!(store.root_count("Post"), 0);
}

#[test]
fn undoing_a_nested_create_destroys_the_embedded_element() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(
        &store,
        json!({
            "_id": 1,
            "title": "post",
            "comments": [{ "_id": "c1", "text": "hi" }, { "_id": "c2", "text": "bye" }]
        }),
    );

    let record = ChangeRecordBuilder::create()
        .root("Post", 1)
        .step_many("comments", "c2")
        .modified(json!({ "_id": "c2", "text": "bye" }))
        .build();

    engine.undo(&record, None).expect("undo destroys");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    assert!(store
        .embedded_many(&post, "comments", &json!("c2"))
        .expect("lookup succeeds")
        .is_none());
    assert!(store
        .embedded_many(&post, "comments", &json!("c1"))
        .expect("lookup succeeds")
        .is_some());
}

// ── Create/destroy under redo ────────────────────────────────────────────

#[test]
fn redoing_a_create_recreates_after_an_undo() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "fresh" }));

    let record = ChangeRecordBuilder::create()
        .root("Post", 1)
        .original(json!({ "_id": 1, "title": "fresh" }))
        .modified(json!({ "_id": 1, "title": "fresh" }))
        .build();

    engine.undo(&record, None).expect("undo destroys");
    assert_eq!(store.root_count("Post"), 0);

    engine.redo(&record, None).expect("redo re-creates");
    assert_eq!(store.root_count("Post"), 1);
}

#[test]
fn redoing_a_destroy_destroys_again() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);

    let record = ChangeRecordBuilder::destroy()
        .root("User", 7)
        .original(json!({ "_id": 7, "name": "Bob" }))
        .build();

    engine.undo(&record, None).expect("undo re-creates");
    assert_eq!(store.root_count("User"), 1);

    engine.redo(&record, None).expect("redo re-destroys");
    assert_eq!(store.root_count("User"), 0);
}

// ── Update: attribute mutation ───────────────────────────────────────────

#[test]
fn undoing_an_update_restores_previous_values_and_clears_added_fields() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "new", "body": "b" }));

    let record = ChangeRecordBuilder::update()
        .root("Post", 1)
        .original(json!({ "title": "old" }))
        .modified(json!({ "title": "new", "body": "b" }))
        .build();

    engine
        .undo(&record, Some(&json!("alice")))
        .expect("undo mutates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let attrs = store.attributes_of(&post).expect("has attributes");
    assert_eq!(attrs["title"], json!("old"));
    // `body` had no prior value; undo clears it.
    assert!(!attrs.contains_key("body"));
    assert_eq!(attrs["modifier_id"], json!("alice"));
}

#[test]
fn redoing_an_update_reapplies_the_change() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "old" }));

    let record = ChangeRecordBuilder::update()
        .root("Post", 1)
        .original(json!({ "title": "old" }))
        .modified(json!({ "title": "new", "body": "b" }))
        .build();

    engine
        .redo(&record, Some(&json!("bob")))
        .expect("redo mutates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let attrs = store.attributes_of(&post).expect("has attributes");
    assert_eq!(attrs["title"], json!("new"));
    assert_eq!(attrs["body"], json!("b"));
    assert_eq!(attrs["modifier_id"], json!("bob"));
}

#[test]
fn undo_after_redo_round_trips_every_snapshot_field() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "old", "rating": 3 }));

    let record = ChangeRecordBuilder::update()
        .root("Post", 1)
        .original(json!({ "title": "old", "rating": 3 }))
        .modified(json!({ "title": "new", "body": "added" }))
        .build();

    engine.redo(&record, None).expect("redo mutates");
    engine.undo(&record, None).expect("undo mutates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let attrs = store.attributes_of(&post).expect("has attributes");
    assert_eq!(attrs["title"], json!("old"));
    assert_eq!(attrs["rating"], json!(3));
    assert!(!attrs.contains_key("body"));
}

#[test]
fn undoing_a_nested_update_mutates_the_embedded_element() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(
        &store,
        json!({
            "_id": 1,
            "title": "post",
            "comments": [{ "_id": "c1", "text": "edited" }]
        }),
    );

    let record = ChangeRecordBuilder::update()
        .root("Post", 1)
        .step_many("comments", "c1")
        .original(json!({ "text": "first" }))
        .modified(json!({ "text": "edited" }))
        .build();

    engine.undo(&record, None).expect("undo mutates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let comment = store
        .embedded_many(&post, "comments", &json!("c1"))
        .expect("lookup succeeds")
        .expect("comment exists");
    let attrs = store.attributes_of(&comment).expect("has attributes");
    assert_eq!(attrs["text"], json!("first"));
}

// ── Modifier identity ────────────────────────────────────────────────────

#[test]
fn the_modifier_field_uses_the_target_types_declared_name() {
    let registry = SchemaRegistry::new().register(
        "Post",
        TypeSchema::new()
            .tracks(&["title"])
            .modifier("updated_by"),
    );
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    store
        .create_root("Post", attributes(json!({ "_id": 1, "title": "new" })))
        .expect("seeds root");

    let record = ChangeRecordBuilder::update()
        .root("Post", 1)
        .original(json!({ "title": "old" }))
        .modified(json!({ "title": "new" }))
        .build();

    engine
        .undo(&record, Some(&json!("carol")))
        .expect("undo mutates");

    let post = store
        .find_root("Post", &json!(1))
        .expect("lookup succeeds")
        .expect("post exists");
    let attrs = store.attributes_of(&post).expect("has attributes");
    assert_eq!(attrs["updated_by"], json!("carol"));
}

// ── Error propagation ────────────────────────────────────────────────────

#[test]
fn a_missing_root_fails_resolution() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);

    let record = ChangeRecordBuilder::update()
        .root("Post", 404)
        .original(json!({ "title": "old" }))
        .modified(json!({ "title": "new" }))
        .build();

    let err = engine.undo(&record, None).expect_err("root is gone");
    assert!(matches!(err, HistoryError::RootNotFound { .. }));
}

#[test]
fn a_non_embedded_relation_is_a_contract_violation() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);
    seed_post(&store, json!({ "_id": 1, "title": "post" }));

    let record = ChangeRecordBuilder::update()
        .root("Post", 1)
        .step_one("reviewers")
        .original(json!({ "name": "x" }))
        .modified(json!({ "name": "y" }))
        .build();

    let err = engine.undo(&record, None).expect_err("unknown relation");
    assert!(matches!(err, HistoryError::ContractViolation { .. }));
}

#[test]
fn an_empty_chain_is_rejected_before_any_store_access() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);

    let record = ChangeRecordBuilder::update()
        .original(json!({ "title": "old" }))
        .modified(json!({ "title": "new" }))
        .build();

    let err = engine.undo(&record, None).expect_err("empty chain");
    assert!(matches!(err, HistoryError::MalformedRecord { .. }));
}

#[test]
fn destroying_an_already_missing_target_propagates_the_failure() {
    let registry = schema();
    let store = MemoryStore::new(registry.clone());
    let engine = HistoryEngine::new(&store, &registry);

    let record = ChangeRecordBuilder::create()
        .root("Post", 2)
        .modified(json!({ "_id": 2, "title": "gone" }))
        .build();

    let err = engine.undo(&record, None).expect_err("nothing to destroy");
    assert!(matches!(err, HistoryError::RootNotFound { .. }));
}
