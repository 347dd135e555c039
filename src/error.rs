//! Crate-wide error type.
//!
//! Only asset loading and image I/O produce a `RenderError`. The hot
//! rendering path (ray/triangle tests, octree traversal, shading) never
//! returns `Result` — numerical degeneracies are treated as non-hits, not
//! failures.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse mesh {path}: {reason}")]
    MeshParse { path: PathBuf, reason: String },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("no sink accepted the rendered image")]
    NoSink,
}

pub type RenderResult<T> = Result<T, RenderError>;
