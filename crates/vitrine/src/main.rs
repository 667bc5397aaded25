//! Vitrine - navigation & viewport policy shell for embedded browser surfaces
//!
//! Usage: vitrine [OPTIONS] <URL>

mod sim;

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use vitrine_policy::Decision;
use vitrine_surface::{Bookmarks, ForcedViewport, SurfaceConfig, SurfaceController};
use vitrine_viewport::{compute_injection, ViewportTarget};

use crate::sim::{ScriptReply, SimulatedEngine, SimulatedHost};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let command = args[1].as_str();

    match command {
        "--help" | "-h" => {
            print_usage(&args[0]);
            ExitCode::SUCCESS
        }
        "--version" | "-V" => {
            println!("Vitrine {}", VERSION);
            ExitCode::SUCCESS
        }
        "--demo" => {
            // Kiosk demo: forced 4K viewport on a bookmark
            if let Err(e) = run_demo().await {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        "--config" => {
            if args.len() < 4 {
                eprintln!("Usage: {} --config <PATH> <URL>", args[0]);
                return ExitCode::FAILURE;
            }
            let config = match SurfaceConfig::load(Path::new(&args[2])) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = run_session(config, &args[3]).await {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        url_str => {
            // Simulated session with default settings
            if let Err(e) = run_session(SurfaceConfig::default(), url_str).await {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Vitrine {} - navigation & viewport policy shell for embedded browser surfaces

USAGE:
    {} [OPTIONS] <URL>

OPTIONS:
    -h, --help               Print this help message
    -V, --version            Print version information
    --demo                   Run the kiosk demo (forced 3840x2160 viewport)
    --config <PATH> <URL>    Load surface settings from a JSON file

EXAMPLES:
    {} https://example.com
    {} example.com
    {} --demo
    {} --config surface.json https://example.com

"#,
        VERSION, program, program, program, program, program
    );
}

/// Run the kiosk demo: forced 4K viewport on the "Example" bookmark
async fn run_demo() -> Result<(), String> {
    let config = SurfaceConfig {
        forced_viewport: Some(ForcedViewport {
            width: 3840,
            height: 2160,
            allow_user_scale: false,
        }),
        ..SurfaceConfig::default()
    };

    // Show what the forced viewport does to this surface
    let target = ViewportTarget::new(3840, 2160, false).map_err(|e| e.to_string())?;
    let plan = compute_injection(&target, config.natural_width);
    println!(
        "Forcing {}x{} (compensating zoom {}%)",
        target.width(),
        target.height(),
        plan.scale * 100.0
    );

    let url = Bookmarks::builtin()
        .resolve("Example")
        .ok_or("no such bookmark: Example")?
        .to_string();
    run_session(config, &url).await
}

/// Drive one simulated session through a full lifecycle
async fn run_session(config: SurfaceConfig, url_text: &str) -> Result<(), String> {
    let (script_tx, script_rx) = mpsc::unbounded_channel();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();

    let engine = SimulatedEngine {
        natural_width: config.natural_width,
        natural_height: config.natural_height,
        forced: config.forced_viewport.map(|f| (f.width, f.height)),
    };
    engine.spawn(script_rx, reply_tx);

    let mut controller = SurfaceController::new(config, SimulatedHost::new(script_tx))
        .map_err(|e| e.to_string())?;

    let id = controller.open_session(url_text).map_err(|e| e.to_string())?;
    let initial = controller
        .current_url(id)
        .map_err(|e| e.to_string())?
        .clone();
    log::info!("driving simulated session {:?} for {}", id, initial);
    println!("Opening {}", initial);

    // Initial load cycle, as the engine would report it
    controller.on_load_start(id).map_err(|e| e.to_string())?;
    controller.on_resource_loaded(id).map_err(|e| e.to_string())?;
    controller.on_resource_loaded(id).map_err(|e| e.to_string())?;
    controller
        .on_load_finished(id, initial.as_str())
        .map_err(|e| e.to_string())?;

    pump_replies(&mut controller, &mut reply_rx).await?;

    // The page tries to leave; the lock decides
    for destination in ["https://example.org/elsewhere", "https://example.com/deeper"] {
        let decision = controller
            .on_navigation_requested(id, destination)
            .map_err(|e| e.to_string())?;
        let verdict = match decision {
            Decision::Allow => "followed",
            Decision::Deny => "blocked",
        };
        println!("Navigation to {} {}", destination, verdict);
    }

    // Release the lock and try again
    controller
        .set_navigation_locked(id, false)
        .map_err(|e| e.to_string())?;
    let decision = controller
        .on_navigation_requested(id, "https://example.org/elsewhere")
        .map_err(|e| e.to_string())?;
    println!(
        "After unlocking, navigation is {}",
        if decision.is_allowed() { "followed" } else { "blocked" }
    );

    controller.close_session(id).map_err(|e| e.to_string())?;
    Ok(())
}

/// Feed asynchronous script replies back into the controller until quiet
async fn pump_replies(
    controller: &mut SurfaceController<SimulatedHost>,
    replies: &mut mpsc::UnboundedReceiver<ScriptReply>,
) -> Result<(), String> {
    while let Ok(Some(reply)) = timeout(Duration::from_millis(200), replies.recv()).await {
        controller
            .on_script_result(reply.session, reply.generation, &reply.raw)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}
