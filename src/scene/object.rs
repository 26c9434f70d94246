use std::sync::Arc;

use crate::assets::Mesh;
use crate::scene::node::Node;

/// An instance of a shared mesh placed in the scene.
#[derive(Debug, Clone)]
pub struct Object {
    pub(crate) node: Node,
    pub(crate) mesh: Arc<Mesh>,
    /// Hidden objects are resolved but not drawn.
    pub visible: bool,
}

impl Object {
    pub(crate) fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            node: Node::new(),
            mesh,
            visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.mesh.is_skinned()
    }

    /// Mesh-bone to parent-bone mapping built by a skinned attach.
    #[must_use]
    pub fn skin_bone_map(&self) -> Option<&[Option<usize>]> {
        self.node.attachment.as_ref()?.bone_map.as_deref()
    }
}
