//! Simulated host surface and engine
//!
//! Stands in for the platform browser engine in demo runs: outbound host
//! calls print to the terminal, and script evaluations are answered on a
//! channel after a short delay, out of band with lifecycle events, the
//! way a real engine's evaluate callback behaves.

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use vitrine_session::LoadGeneration;
use vitrine_surface::{HostSurface, SessionId};

/// A script the controller asked the engine to evaluate
#[derive(Debug)]
pub struct ScriptRequest {
    pub session: SessionId,
    pub generation: LoadGeneration,
    pub script: String,
}

/// The engine's asynchronous answer
#[derive(Debug)]
pub struct ScriptReply {
    pub session: SessionId,
    pub generation: LoadGeneration,
    pub raw: String,
}

/// Host surface that prints UI updates and forwards scripts to the engine
pub struct SimulatedHost {
    script_tx: mpsc::UnboundedSender<ScriptRequest>,
}

impl SimulatedHost {
    pub fn new(script_tx: mpsc::UnboundedSender<ScriptRequest>) -> Self {
        Self { script_tx }
    }
}

impl HostSurface for SimulatedHost {
    fn evaluate_script(&mut self, session: SessionId, generation: LoadGeneration, script: &str) {
        let request = ScriptRequest {
            session,
            generation,
            script: script.to_string(),
        };
        // The engine task may already be gone during shutdown
        let _ = self.script_tx.send(request);
    }

    fn update_loading_indicator(&mut self, session: SessionId, loading: bool) {
        println!(
            "[surface {}] loading indicator {}",
            session.0,
            if loading { "on" } else { "off" }
        );
    }

    fn update_resolution_display(&mut self, session: SessionId, text: &str) {
        println!("[surface {}] {}", session.0, text);
    }
}

/// Fake engine answering size scripts with canned dimensions
pub struct SimulatedEngine {
    /// What the page reports without any injection
    pub natural_width: u32,
    pub natural_height: u32,
    /// What the page reports once the viewport override is applied
    pub forced: Option<(u32, u32)>,
}

impl SimulatedEngine {
    /// Spawn the engine task: answers each request after a short delay
    pub fn spawn(
        self,
        mut requests: mpsc::UnboundedReceiver<ScriptRequest>,
        replies: mpsc::UnboundedSender<ScriptReply>,
    ) {
        tokio::spawn(async move {
            while let Some(request) = requests.recv().await {
                sleep(Duration::from_millis(25)).await;

                // The injection payload rewrites the viewport meta tag;
                // the plain probe does not. Crude, but enough for a demo.
                let (width, height) = if request.script.contains("meta.content") {
                    self.forced.unwrap_or((self.natural_width, self.natural_height))
                } else {
                    (self.natural_width, self.natural_height)
                };

                let reply = ScriptReply {
                    session: request.session,
                    generation: request.generation,
                    raw: format!("\"{}x{}\"", width, height),
                };
                if replies.send(reply).is_err() {
                    break;
                }
            }
        });
    }
}
