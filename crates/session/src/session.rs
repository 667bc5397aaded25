//! Browsing session record
//!
//! One record per active browser surface, owned by the hosting surface's
//! controller and destroyed with it.

use url::Url;

use crate::lifecycle::{LifecycleState, LoadGeneration, PageLifecycleTracker};

/// State for one embedded browser surface
#[derive(Debug, Clone)]
pub struct BrowsingSession {
    /// URL the session was opened with; never changes
    initial_url: Url,
    /// Whether the navigation lock is engaged
    navigation_locked: bool,
    /// Lifecycle state machine for the surface's page loads
    tracker: PageLifecycleTracker,
    /// Latched once the initial URL finishes its first load
    initial_load_completed: bool,
}

impl BrowsingSession {
    /// Create a session for the given initial URL
    pub fn new(initial_url: Url, navigation_locked: bool) -> Self {
        Self {
            initial_url,
            navigation_locked,
            tracker: PageLifecycleTracker::new(),
            initial_load_completed: false,
        }
    }

    /// The URL the session was opened with
    pub fn initial_url(&self) -> &Url {
        &self.initial_url
    }

    /// Whether the navigation lock is engaged
    pub fn navigation_locked(&self) -> bool {
        self.navigation_locked
    }

    /// Engage or release the navigation lock
    pub fn set_navigation_locked(&mut self, locked: bool) {
        self.navigation_locked = locked;
    }

    /// True once the initial URL has finished loading for the first time.
    ///
    /// Latches permanently; later loads never reset it.
    pub fn initial_load_completed(&self) -> bool {
        self.initial_load_completed
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> LifecycleState {
        self.tracker.state()
    }

    /// Generation of the current (or most recent) load
    pub fn generation(&self) -> LoadGeneration {
        self.tracker.generation()
    }

    /// True while a load is in progress
    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    /// Record the start of a page load and return its generation
    pub fn start_load(&mut self) -> LoadGeneration {
        self.tracker.start_load()
    }

    /// Record the end of the in-flight load.
    ///
    /// If this is the first completed load and the finishing URL equals
    /// the session's initial URL, the initial-load latch is set. `None`
    /// (the engine reported no usable URL) finishes the load without
    /// touching the latch.
    ///
    /// Returns true if the tracker actually moved `Loading -> Loaded`;
    /// a finish with no load in flight is ignored and returns false.
    pub fn finish_load(&mut self, finished_url: Option<&Url>) -> bool {
        if !self.tracker.finish_load() {
            return false;
        }
        if !self.initial_load_completed && finished_url == Some(&self.initial_url) {
            log::info!("initial load completed: {}", self.initial_url);
            self.initial_load_completed = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn session(initial: &str) -> BrowsingSession {
        BrowsingSession::new(url(initial), true)
    }

    #[test]
    fn test_latch_set_on_first_finish_of_initial_url() {
        let mut s = session("https://example.com/");
        assert!(!s.initial_load_completed());

        s.start_load();
        s.finish_load(Some(&url("https://example.com/")));

        assert!(s.initial_load_completed());
        assert_eq!(s.lifecycle(), LifecycleState::Loaded);
    }

    #[test]
    fn test_latch_not_set_for_other_url() {
        let mut s = session("https://example.com/");
        s.start_load();
        s.finish_load(Some(&url("https://other.example/")));
        assert!(!s.initial_load_completed());
    }

    #[test]
    fn test_latch_survives_later_loads() {
        let mut s = session("https://example.com/");

        s.start_load();
        s.finish_load(Some(&url("https://example.com/")));
        assert!(s.initial_load_completed());

        // Second cycle finishes on a different URL; latch stays set
        s.start_load();
        s.finish_load(Some(&url("https://other.example/")));
        assert!(s.initial_load_completed());
    }

    #[test]
    fn test_latch_requires_loaded_state() {
        let mut s = session("https://example.com/");
        // Finish without a start never reaches Loaded, so no latch
        assert!(!s.finish_load(Some(&url("https://example.com/"))));
        assert!(!s.initial_load_completed());
        assert_eq!(s.lifecycle(), LifecycleState::Idle);
    }

    #[test]
    fn test_late_initial_url_finish_still_latches() {
        let mut s = session("https://example.com/");

        // First cycle lands somewhere else (e.g. a redirect)
        s.start_load();
        s.finish_load(Some(&url("https://other.example/")));
        assert!(!s.initial_load_completed());

        // A later cycle finishing on the initial URL sets the latch
        s.start_load();
        s.finish_load(Some(&url("https://example.com/")));
        assert!(s.initial_load_completed());
    }

    #[test]
    fn test_finish_without_url_never_latches() {
        let mut s = session("https://example.com/");
        s.start_load();
        s.finish_load(None);
        assert!(!s.initial_load_completed());
        assert_eq!(s.lifecycle(), LifecycleState::Loaded);
    }

    #[test]
    fn test_lock_toggle() {
        let mut s = session("https://example.com/");
        assert!(s.navigation_locked());
        s.set_navigation_locked(false);
        assert!(!s.navigation_locked());
    }
}
