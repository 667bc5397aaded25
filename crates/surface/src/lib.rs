//! Vitrine Surface Controller
//!
//! The host-facing side of the policy stack. A hosting surface (the
//! platform component that owns the embedded browser engine) reports
//! lifecycle, navigation, and script-result callbacks into the
//! controller; the controller drives the navigation gate, the viewport
//! injection, and the host's indicator/display updates in return.

mod bookmarks;
mod config;
mod error;

pub use bookmarks::{Bookmark, Bookmarks};
pub use config::{ForcedViewport, SurfaceConfig};
pub use error::{SurfaceError, SurfaceResult};

use rustc_hash::FxHashMap;
use url::Url;

use vitrine_policy::{decide, Decision, NavigationRequest};
use vitrine_session::{BrowsingSession, LoadGeneration, SessionHistory};
use vitrine_viewport::{
    compute_injection, parse_reported_size, probe_script, ViewportReport, ViewportTarget,
};

/// Identifier for one embedded browser surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Outbound calls into the hosting surface
///
/// The controller owns no engine of its own; everything that touches the
/// page goes through this trait. Script evaluation is asynchronous: the
/// host is expected to call back `on_script_result` with the same
/// generation tag once the engine replies.
pub trait HostSurface {
    /// Evaluate a script payload in the session's page
    fn evaluate_script(&mut self, session: SessionId, generation: LoadGeneration, script: &str);
    /// Show or hide the session's loading indicator
    fn update_loading_indicator(&mut self, session: SessionId, loading: bool);
    /// Replace the session's resolution display text
    fn update_resolution_display(&mut self, session: SessionId, text: &str);
}

/// Per-session state kept alongside the session record
struct SessionEntry {
    session: BrowsingSession,
    history: SessionHistory,
    /// Generation the injection plan was applied for, if any
    injected_for: Option<LoadGeneration>,
    /// Last known-good viewport report
    last_report: Option<ViewportReport>,
}

/// Controller for all sessions of one hosting surface
pub struct SurfaceController<H: HostSurface> {
    config: SurfaceConfig,
    /// Validated forced viewport from the config, if configured
    forced_target: Option<ViewportTarget>,
    bookmarks: Bookmarks,
    host: H,
    sessions: FxHashMap<SessionId, SessionEntry>,
    next_session: u64,
}

impl<H: HostSurface> SurfaceController<H> {
    /// Create a controller; validates the configured forced viewport
    pub fn new(config: SurfaceConfig, host: H) -> SurfaceResult<Self> {
        let forced_target = match config.forced_viewport {
            Some(forced) => Some(forced.to_target()?),
            None => None,
        };
        let mut bookmarks = Bookmarks::builtin();
        for bookmark in &config.bookmarks {
            bookmarks.add(bookmark.clone());
        }
        Ok(Self {
            config,
            forced_target,
            bookmarks,
            host,
            sessions: FxHashMap::default(),
            next_session: 0,
        })
    }

    /// Launcher bookmarks for this surface
    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    /// Borrow the host (mainly for tests and the demo driver)
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Open a session for a user-committed URL.
    ///
    /// The text is normalized first (`https://` is assumed when no scheme
    /// is present). The host should then load `current_url` into the
    /// surface and start reporting lifecycle events.
    pub fn open_session(&mut self, url_text: &str) -> SurfaceResult<SessionId> {
        let url = normalize_url(url_text)?;
        let id = SessionId(self.next_session);
        self.next_session += 1;

        log::info!("session {:?} opened for {}", id, url);

        let mut history = SessionHistory::new();
        history.push(url.clone());

        self.sessions.insert(
            id,
            SessionEntry {
                session: BrowsingSession::new(url, self.config.lock_navigation),
                history,
                injected_for: None,
                last_report: None,
            },
        );
        Ok(id)
    }

    /// Dismiss a session and drop its state
    pub fn close_session(&mut self, id: SessionId) -> SurfaceResult<()> {
        self.sessions
            .remove(&id)
            .map(|_| log::info!("session {:?} closed", id))
            .ok_or(SurfaceError::UnknownSession(id))
    }

    /// The URL the session's history cursor is on
    pub fn current_url(&self, id: SessionId) -> SurfaceResult<&Url> {
        let entry = self.sessions.get(&id).ok_or(SurfaceError::UnknownSession(id))?;
        // A session always has at least its initial URL committed
        entry
            .history
            .current()
            .ok_or(SurfaceError::UnknownSession(id))
    }

    /// Borrow a session record (lock state, lifecycle, latch)
    pub fn session(&self, id: SessionId) -> SurfaceResult<&BrowsingSession> {
        self.sessions
            .get(&id)
            .map(|e| &e.session)
            .ok_or(SurfaceError::UnknownSession(id))
    }

    /// Last accepted viewport report for a session
    pub fn last_report(&self, id: SessionId) -> SurfaceResult<Option<ViewportReport>> {
        self.sessions
            .get(&id)
            .map(|e| e.last_report)
            .ok_or(SurfaceError::UnknownSession(id))
    }

    /// Engage or release a session's navigation lock
    pub fn set_navigation_locked(&mut self, id: SessionId, locked: bool) -> SurfaceResult<()> {
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;
        entry.session.set_navigation_locked(locked);
        log::info!(
            "session {:?}: navigation {}",
            id,
            if locked { "disabled" } else { "enabled" }
        );
        Ok(())
    }

    /// Commit a user navigation; returns the URL the host should load
    pub fn navigate(&mut self, id: SessionId, url_text: &str) -> SurfaceResult<Url> {
        let url = normalize_url(url_text)?;
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;
        entry.history.push(url.clone());
        log::info!("session {:?}: navigating to {}", id, url);
        Ok(url)
    }

    /// Move back in history; returns the URL to reload, if any
    pub fn go_back(&mut self, id: SessionId) -> SurfaceResult<Option<Url>> {
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;
        Ok(entry.history.back().cloned())
    }

    /// Move forward in history; returns the URL to reload, if any
    pub fn go_forward(&mut self, id: SessionId) -> SurfaceResult<Option<Url>> {
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;
        Ok(entry.history.forward().cloned())
    }

    /// The engine started loading a page
    pub fn on_load_start(&mut self, id: SessionId) -> SurfaceResult<()> {
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;
        let generation = entry.session.start_load();
        log::debug!("session {:?}: load start, generation {}", id, generation.0);
        self.host.update_loading_indicator(id, true);
        Ok(())
    }

    /// The engine loaded a sub-resource of the current page.
    ///
    /// When a forced viewport is configured, this is where the injection
    /// plan is applied: once per load generation, never re-applied for
    /// later resources of the same page.
    pub fn on_resource_loaded(&mut self, id: SessionId) -> SurfaceResult<()> {
        let natural_width = self.config.natural_width;
        let Some(target) = self.forced_target else {
            // Nothing to inject, but the session must still exist
            if self.sessions.contains_key(&id) {
                return Ok(());
            }
            return Err(SurfaceError::UnknownSession(id));
        };

        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;
        let generation = entry.session.generation();
        if entry.injected_for == Some(generation) {
            return Ok(());
        }
        entry.injected_for = Some(generation);

        let plan = compute_injection(&target, natural_width);
        log::debug!(
            "session {:?}: injecting viewport plan for generation {} (scale {})",
            id,
            generation.0,
            plan.scale
        );
        self.host.evaluate_script(id, generation, &plan.to_script());
        Ok(())
    }

    /// The engine finished loading a page.
    ///
    /// Latches the initial-load flag when the finishing URL matches the
    /// session's initial URL, hides the loading indicator, and probes the
    /// page size when no forced viewport is configured (the injection
    /// script already reports it otherwise).
    pub fn on_load_finished(&mut self, id: SessionId, finished_url: &str) -> SurfaceResult<()> {
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;

        let parsed = match Url::parse(finished_url) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("session {:?}: unparseable finish URL {:?}: {}", id, finished_url, e);
                None
            }
        };
        if !entry.session.finish_load(parsed.as_ref()) {
            // No load was in flight; nothing for the host to update
            return Ok(());
        }
        let generation = entry.session.generation();

        self.host.update_loading_indicator(id, false);
        if self.forced_target.is_none() {
            self.host.evaluate_script(id, generation, probe_script());
        }
        Ok(())
    }

    /// The page attempts an outbound navigation; returns the verdict
    pub fn on_navigation_requested(
        &mut self,
        id: SessionId,
        destination: &str,
    ) -> SurfaceResult<Decision> {
        let entry = self.sessions.get(&id).ok_or(SurfaceError::UnknownSession(id))?;
        let request = NavigationRequest::new(destination);
        let decision = decide(
            entry.session.navigation_locked(),
            entry.session.initial_load_completed(),
            &request,
        );
        log::info!("session {:?}: {:?} navigation to {}", id, decision, destination);
        Ok(decision)
    }

    /// An asynchronous script evaluation came back.
    ///
    /// Results tagged with a generation other than the session's current
    /// one are stale and silently discarded; malformed reports keep the
    /// last known-good display value.
    pub fn on_script_result(
        &mut self,
        id: SessionId,
        generation: LoadGeneration,
        raw: &str,
    ) -> SurfaceResult<()> {
        let entry = self.sessions.get_mut(&id).ok_or(SurfaceError::UnknownSession(id))?;

        let current = entry.session.generation();
        if generation != current {
            log::debug!(
                "session {:?}: discarding stale script result (generation {} != {})",
                id,
                generation.0,
                current.0
            );
            return Ok(());
        }

        match parse_reported_size(raw) {
            Ok(report) => {
                entry.last_report = Some(report);
                let text = format!("Resolution: {}x{}", report.width, report.height);
                self.host.update_resolution_display(id, &text);
            }
            Err(e) => {
                log::warn!("session {:?}: {}", id, e);
            }
        }
        Ok(())
    }
}

/// Normalize user-entered URL text.
///
/// Text without a scheme gets `https://` prefixed; empty input is
/// rejected.
pub fn normalize_url(text: &str) -> SurfaceResult<Url> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SurfaceError::EmptyUrl);
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    Url::parse(&candidate).map_err(|e| SurfaceError::InvalidUrl {
        input: text.to_string(),
        reason: e.to_string(),
    })
}
