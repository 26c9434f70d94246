//! Transform System
//!
//! Resolves world transforms for the whole scene graph. Kept apart from
//! [`Scene`](crate::scene::Scene) so each pass only borrows the node maps it
//! needs.
//!
//! # Passes
//!
//! 1. [`resolve_armatures`]: every armature, parent chain first. Dirtiness is
//!    inherited from the parent, and dirty armatures recompute their bone
//!    poses and world transform. Dirty flags stay set.
//! 2. [`resolve_dependents`]: objects and lights. Each inherits its parent
//!    armature's dirtiness (still visible thanks to pass 1 leaving it set),
//!    recomputes if dirty, and is marked clean.
//! 3. [`clear_armatures`]: armature dirty flags are cleared last, so every
//!    dependent in pass 2 saw the same state no matter the iteration order.

use glam::Mat4;
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::armature::Armature;
use crate::scene::node::{Attachment, Node};
use crate::scene::{ArmatureKey, LightKey, ObjectKey};
use crate::scene::light::Light;
use crate::scene::object::Object;

/// Work done by one [`Scene::resolve`](crate::scene::Scene::resolve) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub armatures: usize,
    pub objects: usize,
    pub lights: usize,
}

impl ResolveStats {
    #[must_use]
    pub fn total(&self) -> usize {
        self.armatures + self.objects + self.lights
    }
}

/// Per-pass visit state of an armature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    InProgress,
    Done,
}

/// `parent.world * parent.model_pose[tag]`, the frame a child is posed in.
fn bone_base(armatures: &SlotMap<ArmatureKey, Armature>, attachment: &Attachment) -> (bool, Mat4) {
    let Some(parent) = armatures.get(attachment.parent) else {
        panic!("node is attached to an armature that is no longer in the scene");
    };
    let Some(bone) = parent.model_pose.get(attachment.parent_tag) else {
        panic!(
            "attachment bone {} is out of range for skeleton '{}' ({} bones)",
            attachment.parent_tag,
            parent.skeleton.name,
            parent.model_pose.len()
        );
    };
    (parent.node.dirty, parent.node.world_matrix * *bone)
}

fn resolve_armature(
    armatures: &mut SlotMap<ArmatureKey, Armature>,
    visits: &mut SecondaryMap<ArmatureKey, Visit>,
    key: ArmatureKey,
    recomputed: &mut usize,
) {
    match visits.get(key) {
        Some(Visit::Done) => return,
        Some(Visit::InProgress) => panic!("armature attachment cycle detected"),
        None => {}
    }
    visits.insert(key, Visit::InProgress);

    let parent = armatures[key].node.attachment.as_ref().map(|a| a.parent);
    let parent_base = match parent {
        Some(parent) => {
            resolve_armature(armatures, visits, parent, recomputed);
            let attachment = armatures[key].node.attachment.as_ref();
            attachment.map(|a| bone_base(armatures, a))
        }
        None => None,
    };

    let armature = &mut armatures[key];
    if let Some((true, _)) = parent_base {
        armature.node.dirty = true;
    }
    if armature.node.dirty {
        armature.recompute(parent_base.map(|(_, base)| base));
        *recomputed += 1;
    }

    visits.insert(key, Visit::Done);
}

/// Pass 1: recompute every dirty armature, parents before children.
pub fn resolve_armatures(
    armatures: &mut SlotMap<ArmatureKey, Armature>,
    visits: &mut SecondaryMap<ArmatureKey, Visit>,
) -> usize {
    visits.clear();
    let keys: Vec<ArmatureKey> = armatures.keys().collect();
    let mut recomputed = 0;
    for key in keys {
        resolve_armature(armatures, visits, key, &mut recomputed);
    }
    recomputed
}

/// Shared rule for objects and lights. `follow_parent_only` selects the
/// skinned-mesh placeholder, which takes the parent's world transform as is.
fn resolve_dependent(armatures: &SlotMap<ArmatureKey, Armature>, node: &mut Node, follow_parent_only: bool) -> bool {
    let parent_base = match &node.attachment {
        Some(attachment) => {
            let (parent_dirty, base) = bone_base(armatures, attachment);
            if parent_dirty {
                node.dirty = true;
            }
            if follow_parent_only {
                Some(armatures[attachment.parent].node.world_matrix)
            } else {
                Some(base)
            }
        }
        None => None,
    };

    let recomputed = node.dirty;
    if recomputed {
        match (parent_base, follow_parent_only) {
            // TODO: replace with per-bone skinning matrices once vertex
            // skinning is implemented.
            (Some(parent_world), true) => node.world_matrix = parent_world,
            (base, _) => node.compose_world(base),
        }
    }
    node.dirty = false;
    recomputed
}

/// Pass 2: objects and lights.
pub fn resolve_dependents(
    armatures: &SlotMap<ArmatureKey, Armature>,
    objects: &mut SlotMap<ObjectKey, Object>,
    lights: &mut SlotMap<LightKey, Light>,
) -> (usize, usize) {
    let mut object_count = 0;
    for (_, object) in objects.iter_mut() {
        let skinned = object.mesh.is_skinned();
        if resolve_dependent(armatures, &mut object.node, skinned) {
            object_count += 1;
        }
    }

    let mut light_count = 0;
    for (_, light) in lights.iter_mut() {
        if resolve_dependent(armatures, &mut light.node, false) {
            light_count += 1;
        }
    }

    (object_count, light_count)
}

/// Pass 3: armatures become clean only after all dependents have looked at
/// them.
pub fn clear_armatures(armatures: &mut SlotMap<ArmatureKey, Armature>) {
    for (_, armature) in armatures.iter_mut() {
        armature.node.dirty = false;
    }
}
