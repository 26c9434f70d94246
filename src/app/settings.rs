//! Viewer Settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a file
//! only needs to name what it changes:
//!
//! ```json
//! { "width": 1280, "height": 720, "asset_dirs": ["assets/"] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],

    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    pub camera_distance: f32,
    pub camera_yaw: f32,
    pub camera_pitch: f32,

    /// Asset search path, in lookup order.
    pub asset_dirs: Vec<PathBuf>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            title: "Mio".to_string(),
            width: 800,
            height: 600,
            clear_color: [0.05, 0.05, 0.05, 1.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            camera_yaw: 0.0,
            camera_pitch: -20.0,
            asset_dirs: vec![PathBuf::from("data/"), PathBuf::from("data/textures/")],
        }
    }
}

impl ViewerSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
