use glam::Mat4;

use crate::scene::ArmatureKey;
use crate::scene::transform::Transform;

/// Binding of a node to a bone of a parent armature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The armature this node hangs from. Owned by the scene, not the child.
    pub parent: ArmatureKey,
    /// Bone of the parent skeleton the node is attached to.
    pub parent_tag: usize,
    /// For skinned meshes bound without a bone name: for each bone of the
    /// mesh's own skeleton, the matching bone of the parent skeleton.
    pub bone_map: Option<Vec<Option<usize>>>,
}

/// State shared by armatures, objects and lights.
///
/// # Dirty flag
///
/// `world_matrix` is only meaningful while `dirty` is false. Any change to
/// the local transform or the attachment sets `dirty`; [`Scene::resolve`]
/// clears it after recomputing.
///
/// [`Scene::resolve`]: crate::scene::Scene::resolve
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) world_matrix: Mat4,
    pub(crate) dirty: bool,
    pub(crate) attachment: Option<Attachment>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            transform: Transform::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            dirty: true,
            attachment: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Last resolved world transform. Stale while [`is_dirty`](Self::is_dirty).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    #[must_use]
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// World transform given the parent's bone base (`parent.world *
    /// parent.model_pose[tag]`), or the bare local pose when unattached.
    pub(crate) fn compose_world(&mut self, parent_base: Option<Mat4>) {
        let local = self.transform.local_matrix();
        self.world_matrix = match parent_base {
            Some(base) => base * local,
            None => local,
        };
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
