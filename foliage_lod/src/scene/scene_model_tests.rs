/// Tests for transforms, leaf primitives and material resolution

use super::*;
use glam::{Quat, Vec3};

// ============================================================================
// Tests: Transform
// ============================================================================

#[test]
fn test_transform_defaults() {
    let t = Transform::identity();
    assert_eq!(t.position(), Vec3::ZERO);
    assert_eq!(t.scale(), Vec3::ONE);
    assert!(t.rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    assert_eq!(t.uniform_scale(), 1.0);
}

#[test]
fn test_transform_non_finite_components_fall_back() {
    let t = Transform {
        position: Some([1.0, f32::NAN, 3.0]),
        rotation: None,
        scale: Some([f32::INFINITY, 2.0, 1.0]),
    };
    assert_eq!(t.position(), Vec3::new(1.0, 0.0, 3.0));
    assert_eq!(t.scale(), Vec3::new(1.0, 2.0, 1.0));
}

#[test]
fn test_transform_rotation_order_is_xyz() {
    let t = Transform::identity().with_rotation(0.3, 0.5, 0.7);
    let expected = Quat::from_rotation_x(0.3) * Quat::from_rotation_y(0.5) * Quat::from_rotation_z(0.7);
    assert!(t.rotation().abs_diff_eq(expected, 1e-6));
}

#[test]
fn test_uniform_scale_is_cube_root_of_volume() {
    let t = Transform::identity().with_scale(2.0, 4.0, 1.0);
    assert!((t.uniform_scale() - 2.0).abs() < 1e-5);

    let negative = Transform::identity().with_scale(-8.0, 1.0, 1.0);
    assert!((negative.uniform_scale() - 2.0).abs() < 1e-5);
}

#[test]
fn test_uniform_scale_degenerate_axis_collapses() {
    let t = Transform::identity().with_scale(0.0, 3.0, 3.0);
    assert_eq!(t.uniform_scale(), 0.0);
}

// ============================================================================
// Tests: LeafPrimitive
// ============================================================================

#[test]
fn test_stable_id_priority() {
    let with_uuid = LeafPrimitive::new("leaf-uuid", 0.5);
    assert_eq!(with_uuid.stable_id(), "leaf-uuid");

    let mut with_name = LeafPrimitive::new("", 0.5);
    with_name.name = Some("named".to_string());
    assert_eq!(with_name.stable_id(), "named");

    let anonymous = LeafPrimitive::new("", 0.5);
    assert_eq!(anonymous.stable_id(), "leaf");
}

#[test]
fn test_effective_radius_defaults() {
    assert_eq!(LeafPrimitive::new("a", 0.25).effective_radius(), 0.25);
    assert_eq!(LeafPrimitive::new("b", 0.0).effective_radius(), DEFAULT_LEAF_RADIUS);
    assert_eq!(LeafPrimitive::new("c", -1.0).effective_radius(), DEFAULT_LEAF_RADIUS);
    assert_eq!(LeafPrimitive::new("d", f32::NAN).effective_radius(), DEFAULT_LEAF_RADIUS);
}

#[test]
fn test_object_layer_default() {
    assert_eq!(SceneObject::new("o").layer_id(), DEFAULT_LAYER_ID);
    assert_eq!(SceneObject::new("o").with_layer("trees").layer_id(), "trees");
}

#[test]
fn test_leaf_shape_name() {
    assert_eq!(LeafShape::default().as_str(), "texture");
}

// ============================================================================
// Tests: Material resolution
// ============================================================================

fn object_with_materials() -> SceneObject {
    SceneObject::new("oak")
        .with_material(Material::new("bark", "#553311"))
        .with_material(Material::new("foliage", "#2e8b57"))
}

#[test]
fn test_direct_material_wins() {
    let object = object_with_materials();
    let leaf = LeafPrimitive::new("l", 0.5)
        .with_object_material("foliage")
        .with_direct_material(DirectMaterial {
            color: Some("#ff0000".to_string()),
            ..DirectMaterial::default()
        });

    let resolved = resolve_material(object.material_refs(&leaf), &MaterialLibrary::new());
    assert!(resolved.uuid.starts_with("direct-"));
    assert_eq!(resolved.color, "#ff0000");
}

#[test]
fn test_direct_material_id_is_deterministic() {
    let a = DirectMaterial { color: Some("#00ff00".to_string()), ..DirectMaterial::default() };
    let b = a.clone();
    let c = DirectMaterial { color: Some("#0000ff".to_string()), ..DirectMaterial::default() };
    assert_eq!(a.to_material().uuid, b.to_material().uuid);
    assert_ne!(a.to_material().uuid, c.to_material().uuid);
}

#[test]
fn test_object_material_before_global() {
    let object = object_with_materials();
    let mut library = MaterialLibrary::new();
    library.insert(Material::new("global-green", "#00aa00"));

    let leaf = LeafPrimitive::new("l", 0.5)
        .with_object_material("foliage")
        .with_global_material("global-green");

    let resolved = resolve_material(object.material_refs(&leaf), &library);
    assert_eq!(resolved.uuid, "foliage");
}

#[test]
fn test_missing_object_material_falls_through_to_global() {
    let object = object_with_materials();
    let mut library = MaterialLibrary::new();
    library.insert(Material::new("global-green", "#00aa00"));

    let leaf = LeafPrimitive::new("l", 0.5)
        .with_object_material("does-not-exist")
        .with_global_material("global-green");

    let resolved = resolve_material(object.material_refs(&leaf), &library);
    assert_eq!(resolved.uuid, "global-green");
}

#[test]
fn test_unresolved_reference_yields_sentinel() {
    let object = object_with_materials();
    let leaf = LeafPrimitive::new("l", 0.5).with_global_material("nowhere");

    let resolved = resolve_material(object.material_refs(&leaf), &MaterialLibrary::new());
    assert!(resolved.is_default());
    assert_eq!(resolved.uuid, DEFAULT_MATERIAL_UUID);
}

#[test]
fn test_empty_reference_is_skipped() {
    let object = object_with_materials();
    let leaf = LeafPrimitive::new("l", 0.5).with_object_material("");

    let resolved = resolve_material(object.material_refs(&leaf), &MaterialLibrary::new());
    assert!(resolved.is_default());
}
