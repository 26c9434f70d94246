#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Skeletal scene viewer core.
//!
//! A [`Scene`] holds armatures (posed skeletons), objects (mesh instances)
//! and lights. Any node can be attached to a bone of an armature and then
//! follows it. World transforms are resolved lazily: edits mark nodes dirty
//! and [`Scene::resolve`] recomputes only what changed.
//!
//! ```rust,ignore
//! use mio_viewer::{AssetCache, Scene};
//!
//! let mut assets = AssetCache::new();
//! assets.register_directory("data/");
//!
//! let mut scene = Scene::new();
//! let hero = scene.create_armature(assets.load_skel("hero.iqe")?);
//! let sword = scene.create_object(assets.load_mesh("sword.iqe")?);
//! scene.attach(sword, hero, Some("hand.R"))?;
//! scene.resolve();
//! ```

pub mod app;
pub mod assets;
pub mod console;
pub mod errors;
pub mod render;
pub mod scene;
pub mod utils;

pub use app::{Viewer, ViewerSettings};
pub use assets::{AssetCache, Mesh, Skeleton, load_mesh, load_skel};
pub use console::Console;
pub use errors::{AssetLoadError, AttachError, MioError, Result};
pub use render::{DrawRecorder, Renderer};
pub use scene::{ArmatureKey, LightKey, NodeRef, ObjectKey, Scene, Transform};

/// Creates an empty scene.
#[must_use]
pub fn create_scene() -> Scene {
    Scene::new()
}
