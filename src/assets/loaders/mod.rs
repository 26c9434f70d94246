pub mod iqe;
pub mod json;

use std::path::Path;

use crate::assets::mesh::Mesh;
use crate::assets::skeleton::Skeleton;
use crate::errors::AssetLoadError;

/// On-disk formats the loaders understand, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    Iqe,
    Json,
}

impl AssetFormat {
    pub fn from_path(path: &Path) -> Result<Self, AssetLoadError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("iqe") => Ok(Self::Iqe),
            Some("json") => Ok(Self::Json),
            _ => Err(AssetLoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Converts a buffer length into a `u32` index, failing with
/// [`AssetLoadError::Malformed`] when it does not fit.
pub(crate) fn index_count(path: &str, len: usize, what: &str) -> Result<u32, AssetLoadError> {
    u32::try_from(len).map_err(|_| AssetLoadError::Malformed {
        path: path.to_string(),
        message: format!("too many {what} ({len})"),
    })
}

fn read_text(path: &Path) -> Result<String, AssetLoadError> {
    std::fs::read_to_string(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a skeleton file.
pub fn load_skeleton_file(path: &Path) -> Result<Skeleton, AssetLoadError> {
    let format = AssetFormat::from_path(path)?;
    let text = read_text(path)?;
    let label = path.display().to_string();
    match format {
        AssetFormat::Iqe => iqe::load_skeleton(&label, &text),
        AssetFormat::Json => json::load_skeleton(&label, &text),
    }
}

/// Reads and parses a mesh file.
pub fn load_mesh_file(path: &Path) -> Result<Mesh, AssetLoadError> {
    let format = AssetFormat::from_path(path)?;
    let text = read_text(path)?;
    let label = path.display().to_string();
    match format {
        AssetFormat::Iqe => iqe::load_mesh(&label, &text),
        AssetFormat::Json => json::load_mesh(&label, &text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_count_fits_u32() {
        assert_eq!(index_count("a.iqe", 7, "vertices").unwrap(), 7);
        assert_eq!(index_count("a.iqe", u32::MAX as usize, "vertices").unwrap(), u32::MAX);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn index_count_rejects_lengths_past_u32() {
        let err = index_count("a.iqe", u32::MAX as usize + 1, "indices").unwrap_err();
        match err {
            AssetLoadError::Malformed { path, message } => {
                assert_eq!(path, "a.iqe");
                assert!(message.contains("indices"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
