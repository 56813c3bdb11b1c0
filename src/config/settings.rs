//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

/// Microphone sensitivity preset for the loudness monitor.
///
/// Each preset selects the normalization divisor applied to the mean
/// spectrum magnitude. A lower divisor makes the monitor more sensitive:
/// a quiet room reaches full volume sooner.
///
/// | Preset | Divisor |
/// |--------|---------|
/// | Quiet  | 60      |
/// | Normal | 100     |
/// | Loud   | 160     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    /// For quiet environments / soft speakers.
    Quiet,
    /// Default preset.
    Normal,
    /// For loud environments; hardest to reach full volume.
    Loud,
}

impl Sensitivity {
    /// The loudness normalization divisor for this preset.
    pub fn divisor(&self) -> f32 {
        match self {
            Sensitivity::Quiet => 60.0,
            Sensitivity::Normal => 100.0,
            Sensitivity::Loud => 160.0,
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::Normal
    }
}

// ---------------------------------------------------------------------------
// OracleConfig
// ---------------------------------------------------------------------------

/// Settings for the remote emotion-classification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Base URL of the messages endpoint.
    pub base_url: String,
    /// API key — `None` selects the offline keyword classifier instead.
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Maximum tokens requested per classification response.
    pub max_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".into(),
            api_key: None,
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 150,
        }
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Settings for audio capture and loudness monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Microphone sensitivity preset.
    pub sensitivity: Sensitivity,
    /// Number of magnitude bins per spectrum frame.
    ///
    /// 128 matches a 256-point analyser's frequency bin count.
    pub spectrum_bins: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::default(),
            spectrum_bins: 128,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings handed to the external speech recognizer.
///
/// The recognizer itself lives outside this crate; it produces
/// [`crate::speech::SpeechEvent`]s for the pipeline. These settings describe
/// how it should be configured: continuous, interim-enabled, single-language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Recognition language tag (e.g. `"en-US"`).
    pub language: String,
    /// Whether interim (provisional) results are requested.
    pub interim_results: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en-US".into(),
            interim_results: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use tonus::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Emotion oracle settings.
    pub oracle: OracleConfig,
    /// Audio capture / loudness settings.
    pub audio: AudioConfig,
    /// External speech recognizer settings.
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
