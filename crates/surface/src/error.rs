//! Surface error types

use thiserror::Error;

use crate::SessionId;

/// Surface operation result type
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Surface controller errors
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Unknown session: {0:?}")]
    UnknownSession(SessionId),

    #[error("Invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Empty URL")]
    EmptyUrl,

    #[error(transparent)]
    Viewport(#[from] vitrine_viewport::ViewportError),

    #[error("Config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
