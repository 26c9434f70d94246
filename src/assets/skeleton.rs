use glam::Mat4;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::errors::AssetLoadError;
use crate::scene::transform::{Transform, absolute_pose};

/// One joint of a skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for roots. Always smaller than the
    /// bone's own index.
    pub parent: Option<usize>,
    /// Rest pose relative to the parent bone.
    pub rest: Transform,
}

/// Immutable named-bone hierarchy shared by every armature built from it.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,
    bones: Vec<Bone>,
    parents: Vec<Option<usize>>,
    lookup: FxHashMap<String, usize>,
}

impl Skeleton {
    /// Builds a skeleton, checking that bone names are unique and that the
    /// parent indices form a forest in which parents precede children.
    pub fn new(name: impl Into<String>, bones: Vec<Bone>) -> Result<Self, AssetLoadError> {
        let name = name.into();
        let mut lookup = FxHashMap::default();

        for (i, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent
                && parent >= i
            {
                return Err(AssetLoadError::Malformed {
                    path: name,
                    message: format!("bone '{}' ({i}) has parent index {parent}", bone.name),
                });
            }
            if lookup.insert(bone.name.clone(), i).is_some() {
                return Err(AssetLoadError::Malformed {
                    path: name,
                    message: format!("duplicate bone name '{}'", bone.name),
                });
            }
        }

        let parents = bones.iter().map(|b| b.parent).collect();

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            bones,
            parents,
            lookup,
        })
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Parent index of every bone, in bone order.
    #[inline]
    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Index of the bone called `name`, if there is one.
    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Writes the rest pose of every bone, relative to its parent.
    pub fn rest_pose(&self, out: &mut Vec<Mat4>) {
        out.clear();
        out.extend(self.bones.iter().map(|b| b.rest.local_matrix()));
    }

    /// Absolute rest pose of every bone, relative to the skeleton root.
    #[must_use]
    pub fn rest_model_pose(&self) -> Vec<Mat4> {
        let mut local = Vec::with_capacity(self.bones.len());
        self.rest_pose(&mut local);
        let mut model = Vec::with_capacity(self.bones.len());
        absolute_pose(&self.parents, &local, &mut model);
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn bone(name: &str, parent: Option<usize>) -> Bone {
        Bone {
            name: name.to_string(),
            parent,
            rest: Transform::from_location(Vec3::Y),
        }
    }

    #[test]
    fn find_bone_by_name() {
        let skel = Skeleton::new("test", vec![bone("root", None), bone("spine", Some(0))]).unwrap();
        assert_eq!(skel.find_bone("spine"), Some(1));
        assert_eq!(skel.find_bone("head"), None);
    }

    #[test]
    fn rejects_parent_after_child() {
        let err = Skeleton::new("bad", vec![bone("a", Some(1)), bone("b", None)]).unwrap_err();
        assert!(matches!(err, AssetLoadError::Malformed { .. }));
    }

    #[test]
    fn rejects_self_parent() {
        assert!(Skeleton::new("bad", vec![bone("a", Some(0))]).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        assert!(Skeleton::new("bad", vec![bone("a", None), bone("a", Some(0))]).is_err());
    }

    #[test]
    fn rest_model_pose_accumulates() {
        let skel = Skeleton::new("chain", vec![bone("root", None), bone("spine", Some(0))]).unwrap();
        let model = skel.rest_model_pose();
        assert_eq!(model[1].w_axis.truncate(), Vec3::new(0.0, 2.0, 0.0));
    }
}
