//! Error types
//!
//! Gameplay never fails: life loss and arena completion are state
//! transitions. Errors only come from ill-formed layouts and from loading
//! data files.

use glam::IVec2;
use thiserror::Error;

/// An arena description that cannot be simulated
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("campaign contains no arenas")]
    NoArenas,
    #[error("arena '{arena}': world size {width}x{height} must be positive")]
    InvalidWorld {
        arena: String,
        width: i32,
        height: i32,
    },
    #[error("arena '{arena}': {what} #{index} has non-positive size {size}")]
    EmptyRect {
        arena: String,
        what: &'static str,
        index: usize,
        size: IVec2,
    },
    #[error("arena '{arena}': {what} #{index} at {pos} extends outside the world")]
    OutOfBounds {
        arena: String,
        what: &'static str,
        index: usize,
        pos: IVec2,
    },
    #[error("arena '{arena}': obstacle #{index} has an invalid {pattern} pattern: {reason}")]
    InvalidPattern {
        arena: String,
        index: usize,
        pattern: &'static str,
        reason: String,
    },
    #[error("arena '{arena}': player start {pos} overlaps a wall")]
    StartInWall { arena: String, pos: IVec2 },
    #[error("arena index {index} out of range (campaign has {len} arenas)")]
    NoSuchArena { index: usize, len: usize },
}

/// Failure loading settings, layouts or input scripts from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
