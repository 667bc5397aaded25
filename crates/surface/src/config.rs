//! Surface configuration
//!
//! Settings for a hosting surface, loaded from a JSON file with full
//! defaults when the file (or any field) is absent.

use std::path::Path;

use serde::{Deserialize, Serialize};

use vitrine_viewport::{ViewportTarget, ViewportResult};

use crate::bookmarks::Bookmark;
use crate::error::SurfaceResult;

/// Configuration for a hosting surface and its sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Real viewport width of the surface in CSS pixels
    pub natural_width: u32,
    /// Real viewport height of the surface in CSS pixels
    pub natural_height: u32,
    /// Whether new sessions start with the navigation lock engaged
    pub lock_navigation: bool,
    /// Virtual viewport to force on every page, if any
    pub forced_viewport: Option<ForcedViewport>,
    /// Extra launcher bookmark entries, appended after the built-in list
    pub bookmarks: Vec<Bookmark>,
}

/// Forced virtual viewport settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForcedViewport {
    /// Target width in CSS pixels
    pub width: u32,
    /// Target height in CSS pixels
    pub height: u32,
    /// Whether pinch-zoom stays enabled
    pub allow_user_scale: bool,
}

impl ForcedViewport {
    /// Validate into a viewport target
    pub fn to_target(self) -> ViewportResult<ViewportTarget> {
        ViewportTarget::new(self.width, self.height, self.allow_user_scale)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            natural_width: 1080,
            natural_height: 1920,
            lock_navigation: true,
            forced_viewport: None,
            bookmarks: Vec::new(),
        }
    }
}

impl SurfaceConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> SurfaceResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from a file if given, otherwise the defaults
    pub fn load_or_default(path: Option<&Path>) -> SurfaceResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SurfaceConfig::default();
        assert_eq!(config.natural_width, 1080);
        assert_eq!(config.natural_height, 1920);
        assert!(config.lock_navigation);
        assert!(config.forced_viewport.is_none());
        assert!(config.bookmarks.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SurfaceConfig =
            serde_json::from_str(r#"{ "natural_width": 720 }"#).unwrap();
        assert_eq!(config.natural_width, 720);
        assert_eq!(config.natural_height, 1920);
        assert!(config.lock_navigation);
    }

    #[test]
    fn test_forced_viewport_parses_and_validates() {
        let config: SurfaceConfig = serde_json::from_str(
            r#"{ "forced_viewport": { "width": 3840, "height": 2160, "allow_user_scale": false } }"#,
        )
        .unwrap();
        let target = config.forced_viewport.unwrap().to_target().unwrap();
        assert_eq!(target.width(), 3840);
        assert_eq!(target.height(), 2160);
        assert!(!target.allow_user_scale());
    }

    #[test]
    fn test_zero_forced_viewport_is_rejected() {
        let forced = ForcedViewport {
            width: 0,
            height: 2160,
            allow_user_scale: false,
        };
        assert!(forced.to_target().is_err());
    }

    #[test]
    fn test_bookmarks_from_json() {
        let config: SurfaceConfig = serde_json::from_str(
            r#"{ "bookmarks": [ { "name": "Home", "url": "https://home.example/" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.bookmarks.len(), 1);
        assert_eq!(config.bookmarks[0].name, "Home");
    }
}
