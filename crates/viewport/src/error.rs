//! Viewport error types

use thiserror::Error;

/// Viewport operation result type
pub type ViewportResult<T> = Result<T, ViewportError>;

/// Viewport errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewportError {
    #[error("Malformed size report: {0:?}")]
    MalformedReport(String),

    #[error("Invalid viewport target: {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
}
