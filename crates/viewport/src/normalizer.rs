//! Viewport normalization
//!
//! Turns a target virtual viewport into the set of instructions a host
//! applies to a loaded page: a viewport-meta override, a content-box
//! resize, and a compensating scale. The plan is plain data; rendering it
//! as a script payload is a separate step so the plan stays comparable
//! and testable.

use crate::error::{ViewportError, ViewportResult};

/// The virtual viewport a page should be forced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportTarget {
    width: u32,
    height: u32,
    allow_user_scale: bool,
}

impl ViewportTarget {
    /// Create a target; dimensions must be positive
    pub fn new(width: u32, height: u32, allow_user_scale: bool) -> ViewportResult<Self> {
        if width == 0 || height == 0 {
            return Err(ViewportError::InvalidTarget { width, height });
        }
        Ok(Self {
            width,
            height,
            allow_user_scale,
        })
    }

    /// Target width in CSS pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height in CSS pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the page keeps pinch-zoom
    pub fn allow_user_scale(&self) -> bool {
        self.allow_user_scale
    }
}

/// Override for the page's `meta[name="viewport"]` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaOverride {
    /// Declared viewport width
    pub width: u32,
    /// Declared viewport height
    pub height: u32,
    /// False locks initial/maximum scale and disables pinch-zoom
    pub user_scalable: bool,
}

impl MetaOverride {
    /// Render as the tag's `content` attribute value
    pub fn content_value(&self) -> String {
        if self.user_scalable {
            format!("width={}, height={}, initial-scale=1.0", self.width, self.height)
        } else {
            format!(
                "width={}, height={}, initial-scale=1.0, maximum-scale=1.0, user-scalable=no",
                self.width, self.height
            )
        }
    }
}

/// Resize instruction for the page's content box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentResize {
    /// Body width in CSS pixels
    pub width: u32,
    /// Body height in CSS pixels
    pub height: u32,
}

/// Everything a host applies to normalize a page's viewport
///
/// Applied at most once per page load; the guard lives with the caller
/// and resets when a new load starts.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectionPlan {
    /// Viewport-meta override
    pub meta: MetaOverride,
    /// Content-box resize
    pub resize: ContentResize,
    /// Zoom factor compensating the forced resize
    /// (natural width / target width)
    pub scale: f64,
}

/// Compute the injection plan for a target viewport.
///
/// Pure: equal inputs always yield equal plans. `natural_width` is the
/// surface's real viewport width in CSS pixels, used to scale the
/// oversized content back down so it fits the screen.
pub fn compute_injection(target: &ViewportTarget, natural_width: u32) -> InjectionPlan {
    InjectionPlan {
        meta: MetaOverride {
            width: target.width(),
            height: target.height(),
            user_scalable: target.allow_user_scale(),
        },
        resize: ContentResize {
            width: target.width(),
            height: target.height(),
        },
        scale: f64::from(natural_width) / f64::from(target.width()),
    }
}

impl InjectionPlan {
    /// Render the plan as a script payload for the host engine.
    ///
    /// The script rewrites (or creates) the viewport meta tag, resizes
    /// the body, applies the compensating zoom, and returns the page's
    /// reported size as `"<width>x<height>"`.
    pub fn to_script(&self) -> String {
        format!(
            r#"(function() {{
    var meta = document.querySelector('meta[name="viewport"]');
    if (!meta) {{
        meta = document.createElement('meta');
        meta.name = "viewport";
        document.head.appendChild(meta);
    }}
    meta.content = "{content}";

    document.body.style.width = '{width}px';
    document.body.style.height = '{height}px';
    document.body.style.margin = '0';
    document.body.style.padding = '0';
    document.body.style.zoom = '{zoom}%';

    return document.documentElement.clientWidth + 'x' + document.documentElement.clientHeight;
}})();"#,
            content = self.meta.content_value(),
            width = self.resize.width,
            height = self.resize.height,
            zoom = self.scale * 100.0,
        )
    }
}

/// Script payload that only reads the page's reported size.
///
/// Used when no target viewport is configured and the host just wants to
/// display the natural resolution.
pub fn probe_script() -> &'static str {
    "(function() { return window.innerWidth + 'x' + window.innerHeight; })();"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(w: u32, h: u32) -> ViewportTarget {
        ViewportTarget::new(w, h, false).unwrap()
    }

    #[test]
    fn test_target_rejects_zero_dimensions() {
        assert_eq!(
            ViewportTarget::new(0, 2160, false),
            Err(ViewportError::InvalidTarget { width: 0, height: 2160 })
        );
        assert_eq!(
            ViewportTarget::new(3840, 0, false),
            Err(ViewportError::InvalidTarget { width: 3840, height: 0 })
        );
    }

    #[test]
    fn test_compute_injection_is_pure() {
        let t = target(3840, 2160);
        assert_eq!(compute_injection(&t, 1080), compute_injection(&t, 1080));
    }

    #[test]
    fn test_scale_compensates_forced_resize() {
        let plan = compute_injection(&target(3840, 2160), 1080);
        assert_eq!(plan.scale, 0.28125);
        assert_eq!(plan.resize.width, 3840);
        assert_eq!(plan.resize.height, 2160);
    }

    #[test]
    fn test_meta_content_without_user_scaling() {
        let plan = compute_injection(&target(3840, 2160), 1080);
        assert_eq!(
            plan.meta.content_value(),
            "width=3840, height=2160, initial-scale=1.0, maximum-scale=1.0, user-scalable=no"
        );
    }

    #[test]
    fn test_meta_content_with_user_scaling() {
        let t = ViewportTarget::new(1920, 1080, true).unwrap();
        let plan = compute_injection(&t, 1080);
        assert_eq!(
            plan.meta.content_value(),
            "width=1920, height=1080, initial-scale=1.0"
        );
    }

    #[test]
    fn test_script_carries_plan_values() {
        let plan = compute_injection(&target(3840, 2160), 1080);
        let script = plan.to_script();
        assert!(script.contains("width=3840, height=2160"));
        assert!(script.contains("document.body.style.width = '3840px'"));
        assert!(script.contains("document.body.style.height = '2160px'"));
        assert!(script.contains("zoom = '28.125%'"));
        assert!(script.contains("clientWidth + 'x' + document.documentElement.clientHeight"));
    }

    #[test]
    fn test_probe_script_reports_inner_size() {
        assert!(probe_script().contains("window.innerWidth + 'x' + window.innerHeight"));
    }
}
