//! Console shell over the translation and playback core.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use morse_console::config::Config;
use morse_console::playback::{
    ClipLibrary, CpalSink, PlaybackEngine, SessionError, SessionHandle, SessionStatus,
    WavDirSource,
};
use morse_console::{telemetry, translate};

/// Clip names resolved at startup when preload is enabled.
const PRELOAD_CLIPS: &[&str] = &["short-tone", "long-tone", "short-pause", "word-pause"];

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;
    println!("✓ Config loaded from ~/.morse-console.toml");

    // Initialize telemetry
    telemetry::init(config.telemetry.enabled, &config.telemetry.log_path)?;
    tracing::info!("morse-console starting");

    // Build the clip library over the configured assets directory
    let assets_dir = Config::expand_path(&config.audio.assets_dir)?;
    let source = WavDirSource::new(assets_dir, config.audio.extension.clone());
    let library = Arc::new(ClipLibrary::new(Box::new(source)));
    if config.audio.preload {
        let resolved = library.preload(PRELOAD_CLIPS);
        println!("✓ Clips preloaded: {resolved}/{}", PRELOAD_CLIPS.len());
    }

    let engine = PlaybackEngine::new(library, Arc::new(CpalSink::new()));
    println!("✓ Playback engine ready");

    println!("\nCommands: encode <text> | decode <code> | play <code> | say <text> | stop | quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session: Option<SessionHandle> = None;

    loop {
        // Report completion of a finished session
        if let Some(handle) = session.as_mut() {
            if let Some(status) = handle.try_status() {
                report_status(status);
                session = None;
            }
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // EOF
                };
                if !handle_command(line.trim(), &engine, &mut session) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                println!("\nShutting down...");
                break;
            }
            _ = tokio::time::sleep(tokio::time::Duration::from_millis(50)) => {
                // Poll interval so completions are reported promptly
            }
        }
    }

    // Cancel any in-flight session before exiting
    if let Some(handle) = session.take() {
        handle.cancel();
        report_status(handle.wait().await);
    }

    Ok(())
}

/// Dispatch one command line. Returns `false` to exit the loop.
fn handle_command(
    line: &str,
    engine: &PlaybackEngine,
    session: &mut Option<SessionHandle>,
) -> bool {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command {
        "" => {}
        "encode" => println!("{}", translate::text_to_code(rest)),
        "decode" => println!("{}", translate::code_to_text(rest)),
        "play" => start_session(engine, rest, session),
        "say" => start_session(engine, &translate::text_to_code(rest), session),
        "stop" => match session {
            Some(handle) => {
                handle.cancel();
                println!("stopping...");
            }
            None => println!("no active session"),
        },
        "quit" | "exit" => return false,
        other => println!("unknown command: {other}"),
    }

    true
}

fn start_session(engine: &PlaybackEngine, code: &str, session: &mut Option<SessionHandle>) {
    match engine.start(code) {
        Ok(handle) => *session = Some(handle),
        Err(SessionError::Busy) => {
            println!("playback busy, stop the current session first");
        }
    }
}

fn report_status(status: SessionStatus) {
    match status {
        SessionStatus::Finished => println!("playback finished"),
        SessionStatus::Cancelled => println!("playback cancelled"),
        SessionStatus::Error => println!("playback error"),
    }
}
