use std::sync::Arc;

use glam::Mat4;
use slotmap::{SecondaryMap, SlotMap};

use crate::assets::{Mesh, Skeleton};
use crate::errors::AttachError;
use crate::render::Renderer;
use crate::scene::armature::Armature;
use crate::scene::light::Light;
use crate::scene::node::{Attachment, Node};
use crate::scene::object::Object;
use crate::scene::transform::Transform;
use crate::scene::transform_system::{self, ResolveStats, Visit};
use crate::scene::{ArmatureKey, LightKey, NodeRef, ObjectKey};

/// Scene graph of armatures, mesh objects and lights.
///
/// The scene owns every node. Attachments refer to their parent armature by
/// generation-checked key, so a removed parent can never be dereferenced by
/// accident. Dropping the scene drops every node exactly once; shared assets
/// live on as long as something else holds them.
#[derive(Default)]
pub struct Scene {
    armatures: SlotMap<ArmatureKey, Armature>,
    objects: SlotMap<ObjectKey, Object>,
    lights: SlotMap<LightKey, Light>,

    visits: SecondaryMap<ArmatureKey, Visit>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Creation & Removal
    // ========================================================================

    pub fn create_armature(&mut self, skeleton: Arc<Skeleton>) -> ArmatureKey {
        self.armatures.insert(Armature::new(skeleton))
    }

    pub fn create_object(&mut self, mesh: Arc<Mesh>) -> ObjectKey {
        self.objects.insert(Object::new(mesh))
    }

    pub fn create_light(&mut self) -> LightKey {
        self.lights.insert(Light::new())
    }

    /// Removes an armature. Every node attached to it is detached first, so
    /// no attachment is left pointing at the removed armature.
    pub fn remove_armature(&mut self, key: ArmatureKey) -> bool {
        if !self.armatures.contains_key(key) {
            return false;
        }

        let mut orphans = 0;
        let armature_nodes = self.armatures.values_mut().map(|a| &mut a.node);
        let object_nodes = self.objects.values_mut().map(|o| &mut o.node);
        let light_nodes = self.lights.values_mut().map(|l| &mut l.node);
        for node in armature_nodes.chain(object_nodes).chain(light_nodes) {
            if node.attachment.as_ref().is_some_and(|a| a.parent == key) {
                node.attachment = None;
                node.dirty = true;
                orphans += 1;
            }
        }
        if orphans > 0 {
            log::warn!("Removed armature had {orphans} attached node(s); they are now detached");
        }

        self.armatures.remove(key).is_some()
    }

    pub fn remove_object(&mut self, key: ObjectKey) -> bool {
        self.objects.remove(key).is_some()
    }

    pub fn remove_light(&mut self, key: LightKey) -> bool {
        self.lights.remove(key).is_some()
    }

    /// Removes any kind of node.
    pub fn remove(&mut self, node: impl Into<NodeRef>) -> bool {
        match node.into() {
            NodeRef::Armature(k) => self.remove_armature(k),
            NodeRef::Object(k) => self.remove_object(k),
            NodeRef::Light(k) => self.remove_light(k),
        }
    }

    // ========================================================================
    // Node Access
    // ========================================================================

    #[must_use]
    pub fn armature(&self, key: ArmatureKey) -> Option<&Armature> {
        self.armatures.get(key)
    }

    #[must_use]
    pub fn object(&self, key: ObjectKey) -> Option<&Object> {
        self.objects.get(key)
    }

    /// Mutable access to the object's instance settings. Does not touch the
    /// transform, so it does not mark the object dirty.
    pub fn object_mut(&mut self, key: ObjectKey) -> Option<&mut Object> {
        self.objects.get_mut(key)
    }

    #[must_use]
    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    /// Mutable access to the light attributes; they do not affect transforms.
    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }

    pub fn armatures(&self) -> impl Iterator<Item = (ArmatureKey, &Armature)> {
        self.armatures.iter()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &Object)> {
        self.objects.iter()
    }

    pub fn lights(&self) -> impl Iterator<Item = (LightKey, &Light)> {
        self.lights.iter()
    }

    /// Total number of nodes of every kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.armatures.len() + self.objects.len() + self.lights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, node: impl Into<NodeRef>) -> bool {
        self.node(node).is_some()
    }

    #[must_use]
    pub fn node(&self, node: impl Into<NodeRef>) -> Option<&Node> {
        match node.into() {
            NodeRef::Armature(k) => self.armatures.get(k).map(|a| &a.node),
            NodeRef::Object(k) => self.objects.get(k).map(|o| &o.node),
            NodeRef::Light(k) => self.lights.get(k).map(|l| &l.node),
        }
    }

    fn node_mut(&mut self, node: NodeRef) -> Option<&mut Node> {
        match node {
            NodeRef::Armature(k) => self.armatures.get_mut(k).map(|a| &mut a.node),
            NodeRef::Object(k) => self.objects.get_mut(k).map(|o| &mut o.node),
            NodeRef::Light(k) => self.lights.get_mut(k).map(|l| &mut l.node),
        }
    }

    /// Mutable access to a node's local pose. Marks the node dirty.
    pub fn transform_mut(&mut self, node: impl Into<NodeRef>) -> Option<&mut Transform> {
        let node = self.node_mut(node.into())?;
        node.dirty = true;
        Some(&mut node.transform)
    }

    /// Replaces a node's local pose. Marks the node dirty.
    pub fn set_transform(&mut self, node: impl Into<NodeRef>, transform: Transform) -> bool {
        self.transform_mut(node).map(|t| *t = transform).is_some()
    }

    /// Last resolved world transform of a node.
    #[must_use]
    pub fn world_transform(&self, node: impl Into<NodeRef>) -> Option<Mat4> {
        self.node(node).map(|n| n.world_matrix)
    }

    #[must_use]
    pub fn is_dirty(&self, node: impl Into<NodeRef>) -> Option<bool> {
        self.node(node).map(|n| n.dirty)
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub fn set_name(&mut self, node: impl Into<NodeRef>, name: impl Into<String>) -> bool {
        match self.node_mut(node.into()) {
            Some(n) => {
                n.name = name.into();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn name(&self, node: impl Into<NodeRef>) -> Option<&str> {
        self.node(node).map(Node::name)
    }

    /// First node carrying `name`, searching armatures, then objects, then
    /// lights.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeRef> {
        let armature = self.armatures.iter().find(|(_, a)| a.node.name == name).map(|(k, _)| NodeRef::Armature(k));
        armature
            .or_else(|| self.objects.iter().find(|(_, o)| o.node.name == name).map(|(k, _)| NodeRef::Object(k)))
            .or_else(|| self.lights.iter().find(|(_, l)| l.node.name == name).map(|(k, _)| NodeRef::Light(k)))
    }

    // ========================================================================
    // Hierarchy: Attach / Detach
    // ========================================================================

    /// Attaches `child` to a bone of `parent`.
    ///
    /// With a bone name the child follows that bone. Without one, the child
    /// must be an object whose mesh carries its own skeleton: each mesh bone
    /// is mapped by name onto the parent skeleton (unmatched bones stay
    /// unmapped) and the object binds at the parent's root bone.
    ///
    /// On error the scene is unchanged.
    pub fn attach(
        &mut self,
        child: impl Into<NodeRef>,
        parent: ArmatureKey,
        bone: Option<&str>,
    ) -> Result<(), AttachError> {
        let child = child.into();
        if !self.contains(child) {
            return Err(AttachError::NoSuchNode);
        }
        let parent_skeleton = match self.armatures.get(parent) {
            Some(armature) => Arc::clone(&armature.skeleton),
            None => return Err(AttachError::NoSuchNode),
        };
        if let NodeRef::Armature(child_key) = child
            && self.is_ancestor_or_self(child_key, parent)
        {
            return Err(AttachError::Cycle);
        }

        let attachment = match bone {
            Some(name) => {
                let tag = parent_skeleton.find_bone(name).ok_or_else(|| AttachError::UnknownBone {
                    bone: name.to_string(),
                    skeleton: parent_skeleton.name.clone(),
                })?;
                Attachment {
                    parent,
                    parent_tag: tag,
                    bone_map: None,
                }
            }
            None => {
                let mesh_skeleton = match child {
                    NodeRef::Object(k) => self.objects[k].mesh.skeleton.clone(),
                    _ => None,
                };
                let Some(mesh_skeleton) = mesh_skeleton else {
                    return Err(AttachError::Unsupported);
                };
                if parent_skeleton.is_empty() {
                    return Err(AttachError::Unsupported);
                }
                let bone_map = map_bones(&mesh_skeleton, &parent_skeleton);
                let unmatched = bone_map.iter().filter(|b| b.is_none()).count();
                if unmatched > 0 {
                    log::debug!(
                        "{unmatched} of {} bones of '{}' have no match in '{}'",
                        bone_map.len(),
                        mesh_skeleton.name,
                        parent_skeleton.name
                    );
                }
                Attachment {
                    parent,
                    parent_tag: 0,
                    bone_map: Some(bone_map),
                }
            }
        };

        if let Some(node) = self.node_mut(child) {
            node.attachment = Some(attachment);
            node.dirty = true;
        }
        Ok(())
    }

    /// Clears a node's attachment and marks it dirty, even if it was not
    /// attached. Returns `false` only for a node that is not in the scene.
    pub fn detach(&mut self, child: impl Into<NodeRef>) -> bool {
        match self.node_mut(child.into()) {
            Some(node) => {
                node.attachment = None;
                node.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Whether `candidate` is `node` or one of the armatures `node` hangs
    /// from.
    fn is_ancestor_or_self(&self, candidate: ArmatureKey, node: ArmatureKey) -> bool {
        let mut current = Some(node);
        let mut steps = 0;
        while let Some(key) = current {
            if key == candidate {
                return true;
            }
            steps += 1;
            if steps > self.armatures.len() {
                // Already cyclic; treat as related so no further link is added.
                return true;
            }
            current = self
                .armatures
                .get(key)
                .and_then(|a| a.node.attachment.as_ref())
                .map(|a| a.parent);
        }
        false
    }

    // ========================================================================
    // Resolution & Drawing
    // ========================================================================

    /// Brings every world transform up to date. Call once per frame before
    /// reading world transforms or drawing.
    pub fn resolve(&mut self) -> ResolveStats {
        let armatures = transform_system::resolve_armatures(&mut self.armatures, &mut self.visits);
        let (objects, lights) =
            transform_system::resolve_dependents(&self.armatures, &mut self.objects, &mut self.lights);
        transform_system::clear_armatures(&mut self.armatures);

        let stats = ResolveStats {
            armatures,
            objects,
            lights,
        };
        if stats.total() > 0 {
            log::trace!("Resolved {stats:?}");
        }
        stats
    }

    /// Resolves the scene, then hands every visible object to `renderer`
    /// with its model-view matrix. Returns the number of draw calls.
    pub fn draw<R: Renderer + ?Sized>(&mut self, projection: &Mat4, view: &Mat4, renderer: &mut R) -> usize {
        self.resolve();

        let mut draws = 0;
        for (_, object) in &self.objects {
            if !object.visible {
                continue;
            }
            let model_view = *view * object.node.world_matrix;
            renderer.draw_model(&object.mesh, projection, &model_view);
            draws += 1;
        }
        draws
    }
}

/// For each bone of `mesh`, the index of the same-named bone of `parent`.
#[must_use]
pub fn map_bones(mesh: &Skeleton, parent: &Skeleton) -> Vec<Option<usize>> {
    mesh.bones().iter().map(|b| parent.find_bone(&b.name)).collect()
}
