//! JSON asset descriptions.
//!
//! Handy for hand-written test rigs and procedurally generated skeletons:
//!
//! ```json
//! {
//!   "name": "biped",
//!   "bones": [
//!     { "name": "root" },
//!     { "name": "spine", "parent": 0, "location": [0, 0, 1] }
//!   ]
//! }
//! ```
//!
//! Meshes use `positions` / `normals` / `texcoords` / `indices` arrays and may
//! embed a skeleton under `skeleton`.

use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use serde::Deserialize;

use super::index_count;
use crate::assets::mesh::{Mesh, MeshPart};
use crate::assets::skeleton::{Bone, Skeleton};
use crate::errors::AssetLoadError;
use crate::scene::transform::Transform;

#[derive(Debug, Deserialize)]
struct BoneDesc {
    name: String,
    #[serde(default)]
    parent: Option<usize>,
    #[serde(default)]
    location: [f32; 3],
    #[serde(default = "identity_quat")]
    rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    scale: [f32; 3],
}

fn identity_quat() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0; 3]
}

#[derive(Debug, Deserialize)]
struct SkeletonDesc {
    #[serde(default)]
    name: Option<String>,
    bones: Vec<BoneDesc>,
}

#[derive(Debug, Deserialize)]
struct MeshDesc {
    #[serde(default)]
    name: Option<String>,
    positions: Vec<[f32; 3]>,
    #[serde(default)]
    normals: Vec<[f32; 3]>,
    #[serde(default)]
    texcoords: Vec<[f32; 2]>,
    #[serde(default)]
    indices: Vec<u32>,
    #[serde(default)]
    material: String,
    #[serde(default)]
    skeleton: Option<SkeletonDesc>,
}

fn json_error(path: &str, source: serde_json::Error) -> AssetLoadError {
    AssetLoadError::Json {
        path: path.to_string(),
        source,
    }
}

fn build_skeleton(path: &str, desc: SkeletonDesc) -> Result<Skeleton, AssetLoadError> {
    if desc.bones.is_empty() {
        return Err(AssetLoadError::Malformed {
            path: path.to_string(),
            message: "skeleton has no bones".to_string(),
        });
    }
    let bones = desc
        .bones
        .into_iter()
        .map(|b| Bone {
            name: b.name,
            parent: b.parent,
            rest: Transform {
                location: Vec3::from_array(b.location),
                rotation: Quat::from_array(b.rotation).normalize(),
                scale: Vec3::from_array(b.scale),
            },
        })
        .collect();
    Skeleton::new(desc.name.unwrap_or_else(|| path.to_string()), bones)
}

pub fn load_skeleton(path: &str, text: &str) -> Result<Skeleton, AssetLoadError> {
    let desc: SkeletonDesc = serde_json::from_str(text).map_err(|e| json_error(path, e))?;
    build_skeleton(path, desc)
}

pub fn load_mesh(path: &str, text: &str) -> Result<Mesh, AssetLoadError> {
    let desc: MeshDesc = serde_json::from_str(text).map_err(|e| json_error(path, e))?;

    let vertex_count = index_count(path, desc.positions.len(), "vertices")?;
    if desc.indices.len() % 3 != 0 || desc.indices.iter().any(|&i| i >= vertex_count) {
        return Err(AssetLoadError::Malformed {
            path: path.to_string(),
            message: "index list is not a valid triangle list".to_string(),
        });
    }

    let mut mesh = Mesh::new(desc.name.unwrap_or_else(|| path.to_string()));
    mesh.positions = desc.positions.into_iter().map(Vec3::from_array).collect();
    mesh.normals = desc.normals.into_iter().map(Vec3::from_array).collect();
    mesh.texcoords = desc.texcoords.into_iter().map(Vec2::from_array).collect();
    let count = index_count(path, desc.indices.len(), "indices")?;
    mesh.parts.push(MeshPart {
        name: mesh.name.clone(),
        material: desc.material,
        first: 0,
        count,
    });
    mesh.indices = desc.indices;

    if let Some(skeleton) = desc.skeleton {
        mesh.skeleton = Some(Arc::new(build_skeleton(path, skeleton)?));
    }

    Ok(mesh)
}
