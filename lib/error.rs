//! Error types for the renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing a render or writing its output.
///
/// Geometric degeneracy is never reported here; a ray that cannot hit a
/// surface is simply a miss.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A texture bitmap could not be opened or decoded.
    #[error("failed to load texture {}: {source}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Render settings that cannot produce an image.
    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    /// The worker pool for a frame could not be started.
    #[error("failed to start render workers: {0}")]
    Workers(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;
