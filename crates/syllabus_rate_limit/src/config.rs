//! TOML configuration for the pipeline and its adapters.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (include_str! from syllabus.toml)
//! 2. `~/.config/syllabus/syllabus.toml`
//! 3. `./syllabus.toml`
//!
//! Secrets never live here; adapters read them from the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use syllabus_error::{ConfigError, SyllabusError, SyllabusResult};
use tracing::{debug, instrument};

use config::{Config, File, FileFormat};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../syllabus.toml");

/// Text model settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model identifier
    pub name: String,
    /// REST base URL
    pub endpoint: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Requests per minute, `None` for unlimited
    #[serde(default)]
    pub rpm: Option<u32>,
    /// Maximum in-flight requests, `None` for unlimited
    #[serde(default)]
    pub max_concurrent: Option<u32>,
}

impl ModelConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry policy for transient model failures.
///
/// ```toml
/// [retry]
/// max_retries = 3      # total attempts
/// base_delay_ms = 3000 # flat delay between attempts
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_retries: usize,
    /// Delay between attempts in milliseconds
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 3000,
        }
    }
}

/// Image generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Generation endpoint
    pub endpoint: String,
    /// Image model name
    pub model: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Aspect ratio hint
    pub aspect_ratio: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

/// Video discovery and verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoConfig {
    /// Search API endpoint
    pub search_endpoint: String,
    /// Prefix of probe URLs; the video id is appended
    pub embed_base: String,
    /// Word appended to every search query
    pub qualifier: String,
    /// Results requested per search
    pub max_results: u32,
    /// Probe timeout
    pub probe_timeout_secs: u64,
}

impl VideoConfig {
    /// Probe timeout as a duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Fallbacks for layout fields neither the model nor the brief supplies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Difficulty level
    pub level: String,
    /// Category
    pub category: String,
    /// Banner prompt
    pub banner_prompt: String,
}

/// Top-level Syllabus configuration.
///
/// # Example
///
/// ```no_run
/// use syllabus_rate_limit::SyllabusConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SyllabusConfig::load()?;
/// println!("Model: {}", config.model.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyllabusConfig {
    /// Text model
    pub model: ModelConfig,
    /// Retry policy
    #[serde(default)]
    pub retry: RetryConfig,
    /// Image generation
    pub image: ImageConfig,
    /// Video discovery and verification
    pub video: VideoConfig,
    /// Layout fallbacks
    pub defaults: DefaultsConfig,
}

impl SyllabusConfig {
    /// The bundled defaults alone, ignoring user files.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is malformed.
    #[instrument]
    pub fn bundled() -> SyllabusResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(|e| config_error("Failed to build configuration", e))?;
        Self::finish(config)
    }

    /// Load bundled defaults overlaid with a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SyllabusResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                config_error(
                    &format!(
                        "Failed to read configuration from {}",
                        path.as_ref().display()
                    ),
                    e,
                )
            })?;
        Self::finish(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// result fails validation.
    #[instrument]
    pub fn load() -> SyllabusResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/syllabus/syllabus.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("syllabus").required(false));

        let config = builder
            .build()
            .map_err(|e| config_error("Failed to build configuration", e))?;
        Self::finish(config)
    }

    fn finish(config: Config) -> SyllabusResult<Self> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| config_error("Failed to parse configuration", e))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending key.
    pub fn validate(&self) -> SyllabusResult<()> {
        if self.retry.max_retries == 0 {
            return Err(ConfigError::new("retry.max_retries must be at least 1").into());
        }
        if self.video.probe_timeout_secs == 0 {
            return Err(ConfigError::new("video.probe_timeout_secs must be positive").into());
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(ConfigError::new("image.width and image.height must be positive").into());
        }
        Ok(())
    }
}

fn config_error(context: &str, err: config::ConfigError) -> SyllabusError {
    SyllabusError::from(ConfigError::new(format!("{context}: {err}")))
}
