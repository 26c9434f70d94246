//! Scene Graph
//!
//! Armatures, mesh objects and lights, with bone attachments and lazy world
//! transform resolution:
//! - [`Node`]: state every node kind shares (local pose, world pose, dirty flag)
//! - [`Transform`]: location / rotation / scale
//! - [`Scene`]: owner of all nodes and entry point for attach and resolve
//! - [`transform_system`]: the resolve passes

pub mod armature;
pub mod light;
pub mod node;
pub mod object;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use armature::Armature;
pub use light::{Light, LightKind};
pub use node::{Attachment, Node};
pub use object::Object;
pub use scene::{Scene, map_bones};
pub use transform::Transform;
pub use transform_system::ResolveStats;

use slotmap::new_key_type;

new_key_type! {
    pub struct ArmatureKey;
    pub struct ObjectKey;
    pub struct LightKey;
}

/// Handle to a node of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Armature(ArmatureKey),
    Object(ObjectKey),
    Light(LightKey),
}

impl NodeRef {
    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Self::Armature(_) => "armature",
            Self::Object(_) => "object",
            Self::Light(_) => "light",
        }
    }

    #[must_use]
    pub fn as_armature(self) -> Option<ArmatureKey> {
        match self {
            Self::Armature(k) => Some(k),
            _ => None,
        }
    }
}

impl From<ArmatureKey> for NodeRef {
    fn from(key: ArmatureKey) -> Self {
        Self::Armature(key)
    }
}

impl From<ObjectKey> for NodeRef {
    fn from(key: ObjectKey) -> Self {
        Self::Object(key)
    }
}

impl From<LightKey> for NodeRef {
    fn from(key: LightKey) -> Self {
        Self::Light(key)
    }
}
