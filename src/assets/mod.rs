//! Shared, immutable assets: skeletons, meshes, and the cache that owns them.

pub mod loaders;
pub mod mesh;
pub mod server;
pub mod skeleton;
pub mod storage;

pub use mesh::{BoneWeights, Mesh, MeshPart};
pub use server::{AssetCache, MeshHandle, SkeletonHandle};
pub use skeleton::{Bone, Skeleton};
pub use storage::AssetStorage;

use std::sync::Arc;

use crate::errors::AssetLoadError;

/// Loads a skeleton file without going through an [`AssetCache`].
pub fn load_skel(path: impl AsRef<std::path::Path>) -> Result<Arc<Skeleton>, AssetLoadError> {
    loaders::load_skeleton_file(path.as_ref()).map(Arc::new)
}

/// Loads a mesh file without going through an [`AssetCache`].
pub fn load_mesh(path: impl AsRef<std::path::Path>) -> Result<Arc<Mesh>, AssetLoadError> {
    loaders::load_mesh_file(path.as_ref()).map(Arc::new)
}
