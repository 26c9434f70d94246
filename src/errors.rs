//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! - [`AssetLoadError`]: a skeleton or mesh file is missing or malformed.
//!   Fatal for whoever is building a scene from it.
//! - [`AttachError`]: an attach request was rejected. Recoverable; the scene
//!   graph is left exactly as it was.
//! - [`CommandError`]: a console command failed. Shown to the user as text.
//! - [`ConfigError`]: the viewer settings file could not be read.
//! - [`MioError`]: umbrella type with `From` conversions for all of the above.
//!
//! Internal invariant violations (a node attached to an armature that no
//! longer exists, a bone index past the end of the parent's skeleton) are not
//! represented here: they are programmer errors and panic during resolution.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Asset Loading Errors
// ============================================================================

/// Failure to produce a [`Skeleton`](crate::assets::Skeleton) or
/// [`Mesh`](crate::assets::Mesh) from a file.
#[derive(Error, Debug)]
pub enum AssetLoadError {
    /// No file with this name exists in any registered directory.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record in a text asset could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    /// A JSON asset description did not match the expected schema.
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed, but the data violates an asset invariant.
    #[error("Malformed asset {path}: {message}")]
    Malformed { path: String, message: String },

    /// The file extension does not name a supported format.
    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Scene Graph Errors
// ============================================================================

/// Reasons an [`attach`](crate::scene::Scene::attach) request is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    /// The named bone does not exist in the parent armature's skeleton.
    #[error("Unknown bone '{bone}' in skeleton '{skeleton}'")]
    UnknownBone { bone: String, skeleton: String },

    /// No bone name was given and the child has no mesh skeleton to map.
    #[error("Cannot attach without a bone name unless the child is a skinned mesh")]
    Unsupported,

    /// The child or parent handle does not refer to a live node of this scene.
    #[error("No such node in scene")]
    NoSuchNode,

    /// The parent argument is not an armature.
    #[error("Only armatures can be attachment parents")]
    InvalidParent,

    /// The attachment would make an armature its own ancestor.
    #[error("Attachment would create a cycle")]
    Cycle,
}

// ============================================================================
// Console Command Errors
// ============================================================================

/// A console command could not be carried out. Printed back to the console.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("No node named '{0}'")]
    UnknownNode(String),

    #[error("'{0}' is not an armature")]
    NotAnArmature(String),

    #[error("A node named '{0}' already exists")]
    NameTaken(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Unknown light kind '{0}' (point, spot, sun)")]
    InvalidLightKind(String),

    #[error(transparent)]
    AssetLoad(#[from] AssetLoadError),

    #[error(transparent)]
    Attach(#[from] AttachError),
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// Umbrella
// ============================================================================

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum MioError {
    #[error(transparent)]
    AssetLoad(#[from] AssetLoadError),

    #[error(transparent)]
    Attach(#[from] AttachError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Alias for `Result<T, MioError>`.
pub type Result<T> = std::result::Result<T, MioError>;
