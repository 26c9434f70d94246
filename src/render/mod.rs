//! Rendering Seam
//!
//! The scene graph does not talk to a GPU. [`Scene::draw`] hands each visible
//! object to a [`Renderer`] together with the matrices it should be drawn
//! with; the backend behind the trait owns shaders, buffers and textures.
//!
//! [`DrawRecorder`] is the in-crate backend. It keeps a list of the draw
//! calls of the last frame, which is what the command-line viewer logs and
//! what the tests inspect.
//!
//! [`Scene::draw`]: crate::scene::Scene::draw

use glam::Mat4;
use uuid::Uuid;

use crate::assets::Mesh;

/// Backend that turns resolved objects into pixels.
pub trait Renderer {
    /// Called once per frame before any draw call.
    fn begin_frame(&mut self, _clear_color: [f32; 4]) {}

    /// Draws one mesh instance.
    fn draw_model(&mut self, mesh: &Mesh, projection: &Mat4, model_view: &Mat4);

    /// Called once per frame after the last draw call.
    fn end_frame(&mut self) {}
}

/// One recorded [`Renderer::draw_model`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub mesh_id: Uuid,
    pub mesh_name: String,
    pub triangles: usize,
    pub projection: Mat4,
    pub model_view: Mat4,
}

impl DrawCall {
    /// Position of the mesh origin in view space.
    #[must_use]
    pub fn view_origin(&self) -> glam::Vec3 {
        self.model_view.w_axis.truncate()
    }
}

/// Renderer that records draw calls instead of issuing them.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    calls: Vec<DrawCall>,
    clear_color: [f32; 4],
    frames: u64,
}

impl DrawRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the current (or last completed) frame.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    #[must_use]
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Number of frames begun so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Renderer for DrawRecorder {
    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.calls.clear();
        self.clear_color = clear_color;
        self.frames += 1;
    }

    fn draw_model(&mut self, mesh: &Mesh, projection: &Mat4, model_view: &Mat4) {
        self.calls.push(DrawCall {
            mesh_id: mesh.id,
            mesh_name: mesh.name.clone(),
            triangles: mesh.triangle_count(),
            projection: *projection,
            model_view: *model_view,
        });
    }
}
