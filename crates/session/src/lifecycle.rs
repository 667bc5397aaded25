//! Page lifecycle tracking
//!
//! A small state machine over the load status of one browser surface,
//! plus the load-generation counter used to detect stale asynchronous
//! script results.

/// Load status of a browser surface's current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// No page has started loading yet
    #[default]
    Idle,
    /// A page load is in progress
    Loading,
    /// The most recent load has finished
    Loaded,
}

/// Monotonic counter identifying one page load
///
/// Incremented each time a load starts. Asynchronous results tagged with
/// an older generation than the tracker's current one are stale and must
/// be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadGeneration(pub u64);

/// Lifecycle state machine for one browser surface
///
/// Legal transitions: Idle -> Loading (start), Loading -> Loaded
/// (finish), Loaded -> Loading (subsequent start). A finish without a
/// preceding start is ignored; a page never moves Idle -> Loaded.
#[derive(Debug, Clone)]
pub struct PageLifecycleTracker {
    state: LifecycleState,
    generation: LoadGeneration,
}

impl PageLifecycleTracker {
    /// Create a tracker in the `Idle` state, generation zero
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Idle,
            generation: LoadGeneration(0),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Generation of the current (or most recent) load
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    /// True while a load is in progress (drives the progress indicator)
    pub fn is_loading(&self) -> bool {
        self.state == LifecycleState::Loading
    }

    /// Record the start of a page load and return its generation.
    ///
    /// A start while already `Loading` is treated as a fresh load (the
    /// previous one was abandoned by the engine); it still bumps the
    /// generation so results from the abandoned load become stale.
    pub fn start_load(&mut self) -> LoadGeneration {
        if self.state == LifecycleState::Loading {
            log::debug!(
                "load restarted while generation {} was still in flight",
                self.generation.0
            );
        }
        self.state = LifecycleState::Loading;
        self.generation = LoadGeneration(self.generation.0 + 1);
        self.generation
    }

    /// Record the end of the in-flight page load.
    ///
    /// Returns true if the tracker moved `Loading -> Loaded`. A finish
    /// delivered in any other state is ignored and logged.
    pub fn finish_load(&mut self) -> bool {
        match self.state {
            LifecycleState::Loading => {
                self.state = LifecycleState::Loaded;
                true
            }
            other => {
                log::warn!("finish_load ignored in state {:?}", other);
                false
            }
        }
    }
}

impl Default for PageLifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let tracker = PageLifecycleTracker::new();
        assert_eq!(tracker.state(), LifecycleState::Idle);
        assert_eq!(tracker.generation(), LoadGeneration(0));
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_start_finish_cycle() {
        let mut tracker = PageLifecycleTracker::new();

        let gen = tracker.start_load();
        assert_eq!(gen, LoadGeneration(1));
        assert_eq!(tracker.state(), LifecycleState::Loading);
        assert!(tracker.is_loading());

        assert!(tracker.finish_load());
        assert_eq!(tracker.state(), LifecycleState::Loaded);
        assert!(!tracker.is_loading());
    }

    #[test]
    fn test_finish_without_start_is_ignored() {
        let mut tracker = PageLifecycleTracker::new();
        assert!(!tracker.finish_load());
        // Never Idle -> Loaded directly
        assert_eq!(tracker.state(), LifecycleState::Idle);
    }

    #[test]
    fn test_double_finish_is_ignored() {
        let mut tracker = PageLifecycleTracker::new();
        tracker.start_load();
        assert!(tracker.finish_load());
        assert!(!tracker.finish_load());
        assert_eq!(tracker.state(), LifecycleState::Loaded);
    }

    #[test]
    fn test_reload_reenters_loading() {
        let mut tracker = PageLifecycleTracker::new();
        tracker.start_load();
        tracker.finish_load();

        let gen = tracker.start_load();
        assert_eq!(gen, LoadGeneration(2));
        assert_eq!(tracker.state(), LifecycleState::Loading);
    }

    #[test]
    fn test_restart_while_loading_bumps_generation() {
        let mut tracker = PageLifecycleTracker::new();
        let first = tracker.start_load();
        let second = tracker.start_load();
        assert!(second > first);
        assert_eq!(tracker.state(), LifecycleState::Loading);
    }

    #[test]
    fn test_generations_are_monotonic() {
        let mut tracker = PageLifecycleTracker::new();
        let mut last = tracker.generation();
        for _ in 0..5 {
            let gen = tracker.start_load();
            assert!(gen > last);
            last = gen;
            tracker.finish_load();
        }
    }
}
