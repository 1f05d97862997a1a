/// Tests for chunk bucketing

use std::sync::Arc;
use rustc_hash::FxHashMap;
use super::*;
use crate::batch::collector::collect_leaf_items;
use crate::scene::{LeafParams, LeafPrimitive, SceneInstance, SceneObject, Transform};

fn leafy_object(uuid: &str, leaves: Vec<LeafPrimitive>) -> Arc<SceneObject> {
    let mut object = SceneObject::new(uuid);
    for leaf in leaves {
        object = object.with_leaf(leaf);
    }
    Arc::new(object)
}

fn items_for(
    objects: &[Arc<SceneObject>],
    placements: &[(&str, &str, f32, f32)],
) -> Vec<LeafItem> {
    let map: FxHashMap<String, Arc<SceneObject>> =
        objects.iter().map(|o| (o.uuid.clone(), o.clone())).collect();
    let instances: Vec<Arc<SceneInstance>> = placements
        .iter()
        .map(|(uuid, object, x, z)| {
            Arc::new(SceneInstance::new(*uuid, *object, Transform::from_position(*x, 0.0, *z)))
        })
        .collect();
    collect_leaf_items(&map, &instances, None)
}

// ============================================================================
// Tests: Chunk grouping
// ============================================================================

#[test]
fn test_two_instances_in_same_chunk_share_bucket() {
    let tree = leafy_object("tree", vec![LeafPrimitive::new("l0", 0.5), LeafPrimitive::new("l1", 0.5)]);
    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0), ("b", "tree", 20.0, 5.0)]);

    let buckets = bucketize_by_chunks(items, 32.0, &MaterialLibrary::new());

    assert_eq!(buckets.len(), 1);
    let (key, bucket) = buckets.iter().next().unwrap();
    assert_eq!(key, "bb|16|16|texture|default-material|def|def|na");
    assert_eq!(bucket.items.len(), 4);
    assert!(bucket.material.is_default());
}

#[test]
fn test_leaf_offset_does_not_change_chunk() {
    let far_leaf = LeafPrimitive::new("far", 0.5)
        .with_transform(Transform::from_position(100.0, 0.0, 0.0));
    let tree = leafy_object("tree", vec![far_leaf]);
    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0)]);

    let buckets = bucketize_by_chunks(items, 32.0, &MaterialLibrary::new());

    let bucket = buckets.iter().next().unwrap().1;
    assert_eq!(bucket.key.cx, 16.0);
}

#[test]
fn test_instances_in_different_chunks_split() {
    let tree = leafy_object("tree", vec![LeafPrimitive::new("l0", 0.5)]);
    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0), ("b", "tree", 40.0, 1.0)]);

    let buckets = bucketize_by_chunks(items, 32.0, &MaterialLibrary::new());

    let keys: Vec<&str> = buckets.keys().collect();
    assert_eq!(keys, vec![
        "bb|16|16|texture|default-material|def|def|na",
        "bb|48|16|texture|default-material|def|def|na",
    ]);
}

#[test]
fn test_invalid_chunk_size_uses_default() {
    let tree = leafy_object("tree", vec![LeafPrimitive::new("l0", 0.5)]);
    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0)]);

    let buckets = bucketize_by_chunks(items, 0.0, &MaterialLibrary::new());
    assert_eq!(buckets.iter().next().unwrap().1.key.cx, 16.0);
}

// ============================================================================
// Tests: Draw-state splitting
// ============================================================================

#[test]
fn test_materials_split_buckets() {
    let tree = Arc::new(
        SceneObject::new("tree")
            .with_material(Material::new("bark", "#553311"))
            .with_leaf(LeafPrimitive::new("l0", 0.5).with_object_material("bark"))
            .with_leaf(LeafPrimitive::new("l1", 0.5).with_global_material("moss"))
            .with_leaf(LeafPrimitive::new("l2", 0.5)),
    );
    let mut library = MaterialLibrary::new();
    library.insert(Material::new("moss", "#00ff00"));

    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0)]);
    let buckets = bucketize_by_chunks(items, 32.0, &library);

    assert_eq!(buckets.len(), 3);
    let materials: Vec<&str> = buckets.iter().map(|(_, b)| b.material.uuid.as_str()).collect();
    assert_eq!(materials, vec!["bark", "moss", "default-material"]);
}

#[test]
fn test_sprite_and_paint_factor_split_buckets() {
    let params = LeafParams {
        texture_set_id: Some("set".to_string()),
        paint_factor: Some(0.25),
        paint_jitter: 0.0,
    };
    let tree = Arc::new(
        SceneObject::new("tree")
            .with_leaf_params(params)
            .with_leaf(LeafPrimitive::new("l0", 0.5).with_sprite("oak"))
            .with_leaf(LeafPrimitive::new("l1", 0.5).with_sprite("maple")),
    );

    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0)]);
    let buckets = bucketize_by_chunks(items, 32.0, &MaterialLibrary::new());

    assert_eq!(buckets.len(), 2);
    assert!(buckets.get("bb|16|16|texture|default-material|set|oak|pf:0.25").is_some());
    assert!(buckets.get("bb|16|16|texture|default-material|set|maple|pf:0.25").is_some());
}

#[test]
fn test_separator_in_names_keeps_variants_apart() {
    let with_set = |uuid: &str, set: &str, sprite: &str| {
        Arc::new(
            SceneObject::new(uuid)
                .with_leaf_params(LeafParams { texture_set_id: Some(set.to_string()), ..LeafParams::default() })
                .with_leaf(LeafPrimitive::new(format!("{}-l0", uuid), 0.5).with_sprite(sprite)),
        )
    };
    let a = with_set("a", "x|y", "z");
    let b = with_set("b", "x", "y|z");

    let items = items_for(&[a, b], &[("ia", "a", 1.0, 1.0), ("ib", "b", 1.0, 1.0)]);
    let buckets = bucketize_by_chunks(items, 32.0, &MaterialLibrary::new());

    assert_eq!(buckets.len(), 2);
    for (_, bucket) in buckets.iter() {
        assert_eq!(bucket.items.len(), 1);
        let item = &bucket.items[0];
        assert_eq!(bucket.key.texture_set_id, item.object().leaf_params.texture_set_id);
        assert_eq!(bucket.key.sprite, item.leaf().sprite);
    }
}

// ============================================================================
// Tests: Determinism
// ============================================================================

#[test]
fn test_item_order_is_preserved() {
    let tree = leafy_object("tree", vec![LeafPrimitive::new("l0", 0.5), LeafPrimitive::new("l1", 0.5)]);
    let items = items_for(&[tree], &[("a", "tree", 1.0, 1.0), ("b", "tree", 2.0, 2.0)]);

    let buckets = bucketize_by_chunks(items, 32.0, &MaterialLibrary::new());
    let bucket = buckets.iter().next().unwrap().1;

    let order: Vec<(String, usize)> = bucket
        .items
        .iter()
        .map(|i| (i.instance().uuid.clone(), i.leaf_index()))
        .collect();
    assert_eq!(order, vec![
        ("a".to_string(), 0),
        ("a".to_string(), 1),
        ("b".to_string(), 0),
        ("b".to_string(), 1),
    ]);
    assert_eq!(buckets.item_count(), 4);
}
