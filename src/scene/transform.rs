use glam::{EulerRot, Mat4, Quat, Vec3};

/// Composes a location / rotation / scale triple into a 4x4 matrix.
///
/// The result applies scale first, then rotation, then translation, which is
/// the order every node and bone pose in the scene graph uses.
#[inline]
#[must_use]
pub fn pose_matrix(location: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, location)
}

/// Walks a bone-parent forest and turns local bone matrices into absolute
/// (skeleton-root-relative) ones.
///
/// `parents[i]` must be `None` or an index smaller than `i`, so a single
/// forward pass sees every parent before its children.
pub fn absolute_pose(parents: &[Option<usize>], local: &[Mat4], out: &mut Vec<Mat4>) {
    debug_assert_eq!(parents.len(), local.len());
    out.clear();
    out.reserve(local.len());
    for (i, (&parent, &matrix)) in parents.iter().zip(local).enumerate() {
        let absolute = match parent {
            Some(p) => {
                assert!(p < i, "bone {i} has parent {p} that does not precede it");
                out[p] * matrix
            }
            None => matrix,
        };
        out.push(absolute);
    }
}

/// Local pose of a scene node relative to its attachment point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        location: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub fn from_location(location: Vec3) -> Self {
        Self {
            location,
            ..Self::IDENTITY
        }
    }

    /// Sets the rotation from XYZ euler angles given in degrees.
    pub fn set_rotation_euler_degrees(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x.to_radians(), y.to_radians(), z.to_radians());
    }

    /// Current rotation as XYZ euler angles in degrees.
    #[must_use]
    pub fn rotation_euler_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        pose_matrix(self.location, self.rotation, self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
