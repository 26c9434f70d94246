use std::sync::Arc;

use glam::Mat4;

use crate::assets::Skeleton;
use crate::scene::node::Node;
use crate::scene::transform::absolute_pose;

/// A posed instance of a shared skeleton.
#[derive(Debug, Clone)]
pub struct Armature {
    pub(crate) node: Node,
    pub(crate) skeleton: Arc<Skeleton>,
    /// Per-bone pose relative to the parent bone.
    pub(crate) local_pose: Vec<Mat4>,
    /// Per-bone pose relative to the skeleton root. Valid while not dirty.
    pub(crate) model_pose: Vec<Mat4>,
}

impl Armature {
    pub(crate) fn new(skeleton: Arc<Skeleton>) -> Self {
        let count = skeleton.len();
        Self {
            node: Node::new(),
            skeleton,
            local_pose: vec![Mat4::IDENTITY; count],
            model_pose: vec![Mat4::IDENTITY; count],
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    #[inline]
    #[must_use]
    pub fn local_pose(&self) -> &[Mat4] {
        &self.local_pose
    }

    #[inline]
    #[must_use]
    pub fn model_pose(&self) -> &[Mat4] {
        &self.model_pose
    }

    /// Recomputes the bone poses and the world transform.
    ///
    /// Clip sampling is not wired in, so the local pose is always the
    /// skeleton's rest pose.
    pub(crate) fn recompute(&mut self, parent_base: Option<Mat4>) {
        self.skeleton.rest_pose(&mut self.local_pose);
        absolute_pose(self.skeleton.parents(), &self.local_pose, &mut self.model_pose);
        self.node.compose_world(parent_base);
    }
}
