//! Vitrine Browsing Sessions
//!
//! Per-surface session records: page-lifecycle state machine,
//! load-generation counter, and back/forward history.

mod history;
mod lifecycle;
mod session;

pub use history::SessionHistory;
pub use lifecycle::{LifecycleState, LoadGeneration, PageLifecycleTracker};
pub use session::BrowsingSession;
