//! PickScan client application entry point.
//!
//! Wires together the configuration, the HTTP product lookup, the scan
//! session, and the view controller, then runs the Tokio async dispatch
//! loop over terminal commands.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML from the platform config dir
//!  └─ HttpLookupClient::new()  -- deadline-bounded product lookups
//!  └─ ViewController::new()    -- owns the view state and the ScanSession
//!  └─ command dispatch loop
//!       ├─ stdin line   -> scan / frame / digits / retry / hide / show
//!       ├─ scan event   -> lookup, then result or error view
//!       └─ Ctrl-C       -> shutdown
//! ```
//!
//! # Commands (for beginners)
//!
//! The dispatch loop reads one line at a time and treats it as a command:
//!
//! - `scan` – start a camera activation; it ends with a decode, a timeout
//!   after the configured deadline, or `hide`.
//! - `frame <text>` – pretend the decode engine read `<text>` off a frame.
//! - `<digits>` – manual entry: validated live, then submitted for lookup.
//! - `retry` – leave a result or error view and return to the scanner.
//! - `hide` / `show` – simulate the app losing and regaining visibility.
//! - `quit` – exit.
//!
//! # The camera in this build
//!
//! The `MockCamera` used here stands in for a platform camera plus decode
//! engine binding; `frame` injects what the engine would have reported.
//! Everything downstream of it is the real flow: validation, lookup against
//! the configured product service, timeouts, error classification, and view
//! transitions.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pickscan_client::application::scan_session::{CameraDevice, ScanEvent, ScanSession};
use pickscan_client::application::view_controller::{ProductLookup, ViewController, ViewSurface};
use pickscan_client::infrastructure::{
    camera::mock::MockCamera,
    lookup::HttpLookupClient,
    storage::config::{config_file_path, load_config, save_config},
    ui_bridge::TerminalSurface,
};

/// One iteration of the dispatch loop.
enum Step {
    Input(Option<String>),
    Scan(Option<ScanEvent>),
    Shutdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading configuration")?;

    // Initialise structured logging; RUST_LOG overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.general.log_level.clone())),
        )
        .init();

    info!("PickScan client starting");

    // First run: no config file yet, so `config` holds the defaults. Write
    // them back so the user has a file to edit; a failure here is not fatal.
    if let Ok(path) = config_file_path() {
        if !path.exists() {
            match save_config(&config) {
                Ok(()) => info!(path = %path.display(), "wrote default configuration"),
                Err(error) => warn!(%error, "could not write default configuration"),
            }
        }
    }

    let lookup_config = config.lookup.to_lookup_config();
    let scanner_config = config
        .scanner
        .to_scanner_config()
        .context("scanner configuration")?;

    let lookup = Arc::new(
        HttpLookupClient::new(lookup_config.clone()).context("building the lookup client")?,
    );
    info!(base_url = %lookup_config.base_url, "product service configured");

    // ── Camera ────────────────────────────────────────────────────────────────
    // In production: replace MockCamera with the platform camera + decode
    // engine binding. The `frame` command injects what the engine would
    // have reported.
    let camera = Arc::new(MockCamera::new());
    let session = ScanSession::new(Arc::clone(&camera) as Arc<dyn CameraDevice>, scanner_config);

    let surface = Arc::new(TerminalSurface::new());
    let mut controller = ViewController::new(
        session,
        Arc::clone(&lookup) as Arc<dyn ProductLookup>,
        Arc::clone(&surface) as Arc<dyn ViewSurface>,
    );

    surface.show_scanner();
    println!("Commands: scan | frame <text> | <digits> | retry | hide | show | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // ── Command dispatch loop ─────────────────────────────────────────────────
    loop {
        // The scan branch is only armed while an activation is live;
        // otherwise next_scan_event would resolve to None immediately and
        // spin the loop.
        let scanning = controller.is_scanning();
        let step = tokio::select! {
            line = lines.next_line() => Step::Input(line?),
            event = controller.next_scan_event(), if scanning => Step::Scan(event),
            _ = tokio::signal::ctrl_c() => Step::Shutdown,
        };

        match step {
            Step::Shutdown | Step::Input(None) => break,
            Step::Scan(Some(event)) => controller.handle_scan_event(event).await,
            Step::Scan(None) => {}
            Step::Input(Some(line)) => {
                let line = line.trim();
                match line {
                    "" => {}
                    "quit" | "exit" => break,
                    "scan" => controller.start_scanning().await,
                    "retry" => controller.retry(),
                    "hide" => controller.handle_visibility_change(true).await,
                    "show" => controller.handle_visibility_change(false).await,
                    _ => {
                        if let Some(text) = line.strip_prefix("frame ") {
                            camera.inject_decode(text);
                        } else {
                            // Anything else is manual entry.
                            controller.set_manual_entry(line);
                            controller.submit_manual_entry().await;
                        }
                    }
                }
            }
        }
    }

    // Leave the camera released on the way out.
    controller.handle_visibility_change(true).await;
    info!("PickScan client stopped");
    Ok(())
}
