//! Vitrine Viewport Normalization
//!
//! Computes the injection a host applies to a loaded page to force a
//! target virtual viewport, and parses the size the page reports back.

mod error;
mod normalizer;
mod report;

pub use error::{ViewportError, ViewportResult};
pub use normalizer::{
    compute_injection, probe_script, ContentResize, InjectionPlan, MetaOverride, ViewportTarget,
};
pub use report::{parse_reported_size, ViewportReport};
