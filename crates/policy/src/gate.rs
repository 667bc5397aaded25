//! Navigation gate
//!
//! A pure decision function over the session's lock flag, its
//! initial-load latch, and the requested destination. The gate must be
//! consulted for every single attempt (link click, redirect, programmatic
//! location change) and never cached across attempts.

/// Outcome of a navigation-gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Follow the navigation
    Allow,
    /// Suppress the navigation, keep the current page
    Deny,
}

impl Decision {
    /// True if the navigation should be followed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// One outbound navigation attempt
///
/// Ephemeral: produced per attempt, decided on, and dropped. The
/// destination is carried as an opaque string; the gate itself does not
/// inspect it, but callers log it and hosts need it to follow the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Where the page is trying to go
    pub destination: String,
}

impl NavigationRequest {
    /// Create a request for the given destination
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

/// Decide whether an in-page navigation attempt may proceed.
///
/// Lock semantics are deny-after-first-load: while `locked` is set, the
/// gate denies attempts only once the session's initial page has finished
/// loading. Before that point everything is allowed, so the first load of
/// a locked session is never blocked by its own lock. Unlocked sessions
/// allow every destination.
pub fn decide(
    locked: bool,
    initial_load_completed: bool,
    request: &NavigationRequest,
) -> Decision {
    let decision = if locked && initial_load_completed {
        Decision::Deny
    } else {
        Decision::Allow
    };

    log::trace!(
        "gate: locked={} initial_load_completed={} destination={} -> {:?}",
        locked,
        initial_load_completed,
        request.destination,
        decision
    );

    decision
}
