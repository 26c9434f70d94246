use std::path::{Path, PathBuf};
use std::sync::Arc;

use slotmap::new_key_type;
use uuid::Uuid;

use super::loaders;
use super::mesh::Mesh;
use super::skeleton::Skeleton;
use super::storage::AssetStorage;
use crate::errors::AssetLoadError;

new_key_type! {
    pub struct SkeletonHandle;
    pub struct MeshHandle;
}

/// Owner of every loaded skeleton and mesh.
///
/// Files are looked up as given first, then inside each registered directory
/// in registration order. A file is parsed once; later loads of the same
/// resolved path return the already shared asset.
#[derive(Default)]
pub struct AssetCache {
    directories: Vec<PathBuf>,
    pub skeletons: AssetStorage<SkeletonHandle, Skeleton>,
    pub meshes: AssetStorage<MeshHandle, Mesh>,
}

impl AssetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory to the search path.
    pub fn register_directory(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        log::debug!("Registered asset directory {}", dir.display());
        self.directories.push(dir);
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Finds the file `name` refers to.
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf, AssetLoadError> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }
        if direct.is_relative() {
            for dir in &self.directories {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }
        Err(AssetLoadError::NotFound(name.to_string()))
    }

    fn asset_uuid(path: &Path) -> Uuid {
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Uuid::new_v5(&Uuid::NAMESPACE_URL, canonical.to_string_lossy().as_bytes())
    }

    /// Loads (or reuses) the skeleton stored in `name`.
    pub fn load_skel(&self, name: &str) -> Result<Arc<Skeleton>, AssetLoadError> {
        let path = self.resolve_path(name)?;
        let handle = self.skeletons.get_or_try_insert(Self::asset_uuid(&path), || {
            log::info!("Loading skeleton {}", path.display());
            loaders::load_skeleton_file(&path)
        })?;
        self.skeletons
            .get(handle)
            .ok_or_else(|| AssetLoadError::NotFound(name.to_string()))
    }

    /// Loads (or reuses) the mesh stored in `name`.
    pub fn load_mesh(&self, name: &str) -> Result<Arc<Mesh>, AssetLoadError> {
        let path = self.resolve_path(name)?;
        let handle = self.meshes.get_or_try_insert(Self::asset_uuid(&path), || {
            log::info!("Loading mesh {}", path.display());
            loaders::load_mesh_file(&path)
        })?;
        self.meshes
            .get(handle)
            .ok_or_else(|| AssetLoadError::NotFound(name.to_string()))
    }
}
