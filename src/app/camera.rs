use bitflags::bitflags;
use glam::{Mat4, Vec3};

bitflags! {
    /// Mouse buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

pub const MIN_PITCH: f32 = -85.0;
pub const MAX_PITCH: f32 = 85.0;
pub const MIN_DISTANCE: f32 = 0.1;
pub const MAX_DISTANCE: f32 = 100.0;

/// Z-up orbit camera around the world origin.
///
/// Left drag turns (yaw) and tilts (pitch); middle or right drag moves the
/// camera closer or further away. Angles are in degrees.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,

    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    buttons: MouseButtons,
    last_cursor: (f32, f32),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(5.0, 0.0, -20.0)
    }
}

impl OrbitCamera {
    #[must_use]
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            distance,
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            buttons: MouseButtons::empty(),
            last_cursor: (0.0, 0.0),
        }
    }

    #[must_use]
    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Records a button press or release at the cursor position.
    pub fn mouse_button(&mut self, button: MouseButtons, pressed: bool, x: f32, y: f32) {
        self.buttons.set(button, pressed);
        self.last_cursor = (x, y);
    }

    /// Applies a cursor move while buttons are held.
    pub fn mouse_motion(&mut self, x: f32, y: f32) {
        let dx = x - self.last_cursor.0;
        let dy = y - self.last_cursor.1;
        self.last_cursor = (x, y);

        if self.buttons.contains(MouseButtons::LEFT) {
            self.rotate(dx, dy);
        }
        if self.buttons.intersects(MouseButtons::MIDDLE | MouseButtons::RIGHT) {
            self.zoom(dy);
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.3;
        self.pitch = (self.pitch - dy * 0.2).clamp(MIN_PITCH, MAX_PITCH);
        if self.yaw < 0.0 {
            self.yaw += 360.0;
        }
        if self.yaw > 360.0 {
            self.yaw -= 360.0;
        }
    }

    /// Zoom speed scales with the current distance.
    pub fn zoom(&mut self, dy: f32) {
        self.distance = (self.distance + dy * 0.01 * self.distance).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x((-90.0f32).to_radians())
            * Mat4::from_translation(Vec3::new(0.0, self.distance, -self.distance / 5.0))
            * Mat4::from_rotation_x((-self.pitch).to_radians())
            * Mat4::from_rotation_z((-self.yaw).to_radians())
    }

    #[must_use]
    pub fn projection_matrix(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped_and_yaw_wraps() {
        let mut cam = OrbitCamera::new(5.0, 10.0, 0.0);
        cam.rotate(100.0, -1000.0);
        assert_eq!(cam.pitch, MAX_PITCH);
        assert!((cam.yaw - 340.0).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1.0e6);
        assert_eq!(cam.distance, MAX_DISTANCE);
        cam.zoom(-1.0e6);
        assert_eq!(cam.distance, MIN_DISTANCE);
    }

    #[test]
    fn drag_needs_a_held_button() {
        let mut cam = OrbitCamera::default();
        cam.mouse_motion(50.0, 50.0);
        assert_eq!(cam.yaw, 0.0);

        cam.mouse_button(MouseButtons::RIGHT, true, 0.0, 0.0);
        cam.mouse_motion(0.0, 10.0);
        assert!((cam.distance - 5.5).abs() < 1e-4);
    }

    #[test]
    fn origin_is_in_front_of_the_camera() {
        let cam = OrbitCamera::new(5.0, 0.0, 0.0);
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, -1.0, -5.0)).length() < 1e-4);
    }
}
