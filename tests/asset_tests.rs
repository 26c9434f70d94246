//! Asset loading tests
//!
//! Tests for:
//! - IQE and JSON skeleton / mesh loading from disk
//! - Error reporting for missing and malformed files
//! - AssetCache directory search and deduplication

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use mio_viewer::assets::{AssetCache, load_mesh, load_skel};
use mio_viewer::errors::AssetLoadError;
use uuid::Uuid;

// ============================================================================
// Helpers
// ============================================================================

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn cache() -> AssetCache {
    let mut cache = AssetCache::new();
    cache.register_directory(data_dir());
    cache
}

/// Fresh scratch directory under the system temp dir.
fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mio-assets-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Skeletons
// ============================================================================

#[test]
fn iqe_skeleton_rest_pose() {
    let skel = load_skel(data_dir().join("biped.iqe")).unwrap();
    assert_eq!(skel.len(), 5);
    assert_eq!(skel.find_bone("hand.R"), Some(4));
    assert_eq!(skel.bone(4).unwrap().parent, Some(2));

    let model = skel.rest_model_pose();
    assert_eq!(model[3].w_axis.truncate(), Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(model[4].w_axis.truncate(), Vec3::new(-0.5, 0.0, 1.75));
}

#[test]
fn json_skeleton_with_scaled_bone() {
    let skel = load_skel(data_dir().join("rig.json")).unwrap();
    assert_eq!(skel.name, "rig");
    let model = skel.rest_model_pose();
    assert_eq!(model[2].w_axis.truncate(), Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn mesh_without_joints_is_not_a_skeleton() {
    let err = load_skel(data_dir().join("sword.iqe")).unwrap_err();
    assert!(matches!(err, AssetLoadError::Malformed { .. }));
}

#[test]
fn malformed_file_reports_line() {
    let err = load_skel(data_dir().join("broken.iqe")).unwrap_err();
    assert!(matches!(err, AssetLoadError::Parse { line: 3, .. }), "got {err}");
}

// ============================================================================
// Meshes
// ============================================================================

#[test]
fn iqe_mesh_parts_and_attributes() {
    let mesh = load_mesh(data_dir().join("sword.iqe")).unwrap();
    assert_eq!(mesh.vertex_count(), 7);
    assert_eq!(mesh.triangle_count(), 3);
    assert_eq!(mesh.normals.len(), 4);
    assert_eq!(mesh.texcoords.len(), 4);
    assert!(!mesh.is_skinned());

    let materials: Vec<&str> = mesh.parts.iter().map(|p| p.material.as_str()).collect();
    assert_eq!(materials, ["steel", "leather"]);
    assert_eq!(&mesh.indices[6..], &[4, 5, 6]);
}

#[test]
fn json_mesh_with_embedded_skeleton() {
    let mesh = load_mesh(data_dir().join("tail.json")).unwrap();
    assert_eq!(mesh.name, "tail");
    let skeleton = mesh.skeleton.as_ref().unwrap();
    assert_eq!(skeleton.name, "tail-rig");
    assert_eq!(skeleton.find_bone("tail"), Some(2));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = scratch_dir();
    let path = dir.join("model.obj");
    std::fs::write(&path, "v 0 0 0\n").unwrap();

    let err = load_mesh(&path).unwrap_err();
    assert!(matches!(err, AssetLoadError::UnsupportedFormat(_)));
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn bad_triangle_list_is_malformed() {
    let dir = scratch_dir();
    let path = dir.join("bad.json");
    std::fs::write(&path, r#"{ "positions": [[0,0,0]], "indices": [0, 0, 1] }"#).unwrap();

    let err = load_mesh(&path).unwrap_err();
    assert!(matches!(err, AssetLoadError::Malformed { .. }));
    std::fs::remove_dir_all(dir).ok();
}

// ============================================================================
// AssetCache
// ============================================================================

#[test]
fn cache_searches_registered_directories() {
    let cache = cache();
    assert!(cache.load_skel("biped.iqe").is_ok());
    assert!(cache.load_mesh("sword.iqe").is_ok());
}

#[test]
fn cache_reports_missing_files() {
    let cache = cache();
    let err = cache.load_mesh("nothing-here.iqe").unwrap_err();
    assert!(matches!(err, AssetLoadError::NotFound(ref name) if name == "nothing-here.iqe"));
}

#[test]
fn cache_shares_repeated_loads() {
    let cache = cache();
    let first = cache.load_skel("biped.iqe").unwrap();
    let second = cache.load_skel("biped.iqe").unwrap();
    let by_path = cache.load_skel(data_dir().join("biped.iqe").to_str().unwrap()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &by_path));
    assert_eq!(cache.skeletons.len(), 1);
}

#[test]
fn earlier_directory_wins() {
    let first = scratch_dir();
    let second = scratch_dir();
    std::fs::write(first.join("rig.json"), r#"{ "name": "first", "bones": [{ "name": "a" }] }"#).unwrap();
    std::fs::write(second.join("rig.json"), r#"{ "name": "second", "bones": [{ "name": "b" }] }"#).unwrap();

    let mut cache = AssetCache::new();
    cache.register_directory(&first);
    cache.register_directory(&second);
    assert_eq!(cache.load_skel("rig.json").unwrap().name, "first");

    std::fs::remove_dir_all(first).ok();
    std::fs::remove_dir_all(second).ok();
}

#[test]
fn failed_load_is_not_cached() {
    let cache = cache();
    assert!(cache.load_skel("broken.iqe").is_err());
    assert!(cache.skeletons.is_empty());
}
