use std::sync::Arc;

use glam::{Vec2, Vec3};
use uuid::Uuid;

use super::skeleton::Skeleton;

/// Per-vertex bone influences for skinned meshes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoneWeights {
    pub indices: [u16; 4],
    pub weights: [f32; 4],
}

/// A contiguous index range drawn with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub name: String,
    pub material: String,
    pub first: u32,
    pub count: u32,
}

/// Immutable geometry shared by every object instance that draws it.
///
/// A mesh exported together with its armature carries that skeleton in
/// [`skeleton`](Self::skeleton); such meshes are skinned.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: Uuid,
    pub name: String,

    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub blend: Vec<BoneWeights>,
    pub indices: Vec<u32>,
    pub parts: Vec<MeshPart>,

    pub skeleton: Option<Arc<Skeleton>>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            positions: Vec::new(),
            normals: Vec::new(),
            texcoords: Vec::new(),
            blend: Vec::new(),
            indices: Vec::new(),
            parts: Vec::new(),
            skeleton: None,
        }
    }

    #[must_use]
    pub fn with_skeleton(mut self, skeleton: Arc<Skeleton>) -> Self {
        self.skeleton = Some(skeleton);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.skeleton.is_some()
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
