//! Application entry point — TONUS console demo.
//!
//! Drives the full emotion pipeline from a terminal: microphone loudness is
//! fed from cpal (when a device is available) and the transcript is typed in
//! as a stand-in for a speech recognizer.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime.
//! 4. Build the emotion oracle from config — the Anthropic-backed
//!    [`ApiClassifier`] wrapped in [`NeutralFallback`] when an API key is
//!    configured, the offline [`KeywordClassifier`] otherwise.
//! 5. Create the pipeline channel and spawn the orchestrator.
//! 6. Start cpal audio capture feeding loudness samples (degrades gracefully
//!    without a microphone).
//! 7. Run the stdin command loop on the main thread until `/quit`.
//!
//! # Commands
//!
//! ```text
//! /start /pause /resume /stop /save /discard /discard! /status /quit
//! ```
//!
//! Any other line is treated as a finalized utterance; prefix with `~` to
//! send it as an interim (in-progress) result instead.

use std::io::{BufRead, Write as _};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use tonus::{
    audio::{AudioCapture, AudioChunk, LoudnessMonitor, SpectrumFrame},
    config::AppConfig,
    oracle::{ApiClassifier, EmotionClassifier, KeywordClassifier, NeutralFallback},
    pipeline::{new_shared_state, PipelineEvent, PipelineOrchestrator, SessionCommand, SharedState},
    speech::SpeechEvent,
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("TONUS starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Emotion oracle
    let oracle: Arc<dyn EmotionClassifier> = if config.oracle.api_key.is_some() {
        log::info!("Using API classifier (model {})", config.oracle.model);
        Arc::new(NeutralFallback::new(ApiClassifier::from_config(
            &config.oracle,
        )))
    } else {
        log::info!("No API key configured; using offline keyword classifier");
        Arc::new(KeywordClassifier::new())
    };

    // 5. Pipeline channel + orchestrator
    let state = new_shared_state(config.clone());
    let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>(64);

    let orchestrator = PipelineOrchestrator::new(Arc::clone(&state), oracle, event_tx.clone());
    rt.spawn(orchestrator.run(event_rx));

    // 6. cpal audio capture → loudness samples. One loudness event per chunk.
    let _stream_handle = start_loudness_feed(&config, event_tx.clone());

    // 7. stdin command loop (blocks the main thread)
    run_console(state, &event_tx)?;

    let _ = event_tx.blocking_send(PipelineEvent::Shutdown);
    rt.shutdown_background();
    Ok(())
}

// ---------------------------------------------------------------------------
// Loudness feed
// ---------------------------------------------------------------------------

/// Start audio capture and bridge cpal chunks into [`PipelineEvent::Loudness`]
/// samples. Returns `None` (and logs) when no capture device is available —
/// the demo still works, escalation just never trips.
fn start_loudness_feed(
    config: &AppConfig,
    event_tx: mpsc::Sender<PipelineEvent>,
) -> Option<tonus::audio::StreamHandle> {
    let capture = match AudioCapture::new() {
        Ok(capture) => capture,
        Err(e) => {
            log::warn!("Audio capture unavailable: {e}");
            return None;
        }
    };

    let monitor = LoudnessMonitor::new(config.audio.sensitivity);
    let num_bins = config.audio.spectrum_bins;
    let (chunk_tx, chunk_rx) = std::sync::mpsc::channel::<AudioChunk>();

    std::thread::Builder::new()
        .name("loudness-feed".into())
        .spawn(move || {
            while let Ok(chunk) = chunk_rx.recv() {
                let frame = SpectrumFrame::compute(&chunk.samples, num_bins);
                let volume = monitor.measure(&frame);
                if event_tx.blocking_send(PipelineEvent::Loudness(volume)).is_err() {
                    break;
                }
            }
        })
        .ok()?;

    match capture.start(chunk_tx) {
        Ok(handle) => {
            log::info!(
                "Audio capture started ({} Hz, {} ch)",
                capture.sample_rate(),
                capture.channels()
            );
            Some(handle)
        }
        Err(e) => {
            log::warn!("Failed to start audio stream: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Console loop
// ---------------------------------------------------------------------------

fn run_console(state: SharedState, event_tx: &mpsc::Sender<PipelineEvent>) -> anyhow::Result<()> {
    println!("TONUS — type /start to begin, /quit to exit, text to journal.");

    let stdin = std::io::stdin();
    let mut sequence: u64 = 0;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let event = match trimmed {
            "/quit" => break,
            "/start" => PipelineEvent::Command(SessionCommand::Start),
            "/pause" => PipelineEvent::Command(SessionCommand::Pause),
            "/resume" => PipelineEvent::Command(SessionCommand::Resume),
            "/stop" => PipelineEvent::Command(SessionCommand::Stop),
            "/save" => PipelineEvent::Command(SessionCommand::Save),
            "/discard" => PipelineEvent::Command(SessionCommand::Discard { confirmed: false }),
            "/discard!" => PipelineEvent::Command(SessionCommand::Discard { confirmed: true }),
            "/status" => {
                print_status(&state);
                continue;
            }
            text if text.starts_with('/') => {
                println!("unknown command: {text}");
                continue;
            }
            text => {
                sequence += 1;
                let event = if let Some(partial) = text.strip_prefix('~') {
                    SpeechEvent::interim(partial.trim_start(), sequence)
                } else {
                    SpeechEvent::final_text(text, sequence)
                };
                PipelineEvent::Speech(vec![event])
            }
        };

        event_tx
            .blocking_send(event)
            .context("pipeline channel closed")?;

        // Give the orchestrator (and any immediate classification) a moment
        // before reprinting the prompt line.
        std::thread::sleep(std::time::Duration::from_millis(50));
        print_status(&state);
    }

    Ok(())
}

fn print_status(state: &SharedState) {
    let st = state.lock().unwrap();

    let mut status = std::io::stdout().lock();
    let _ = writeln!(
        status,
        "[{}] emotion {} | volume {:.2}{} | points {}",
        st.recording.label(),
        st.current_emotion,
        st.volume,
        if st.escalated { " | ESCALATED" } else { "" },
        st.rewards.points(),
    );
    if !st.committed.is_empty() || !st.interim.is_empty() {
        let _ = writeln!(status, "  transcript: {} ⟨{}⟩", st.committed, st.interim);
    }
    if let Some(notice) = &st.notice {
        let _ = writeln!(status, "  notice: {notice}");
    }
}
