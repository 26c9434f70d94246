//! Viewer Application
//!
//! Everything between a window backend and the scene graph: settings, the
//! orbit camera, key routing between console and viewer, and the frame
//! loop body.

pub mod camera;
pub mod settings;
pub mod viewer;

pub use camera::{MouseButtons, OrbitCamera};
pub use settings::ViewerSettings;
pub use viewer::{Key, Viewer, ViewerAction};
