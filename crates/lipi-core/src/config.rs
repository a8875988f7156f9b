//! Configuration for the harness: target URL, timing constants, selectors.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// URL of the transliteration service under verification
    pub url: String,
    /// Timing constants
    pub timeouts: TimeoutConfig,
    /// Selector and label strings identifying the input and output surfaces
    pub selectors: SelectorConfig,
}

/// Timing constants, all in milliseconds.
///
/// The settle windows are tuned empirically to exceed the service's maximum
/// observed debounce/recompute latency; they are configuration, not logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Settle wait after the page reports idle on session open
    pub page_load_ms: u64,
    /// Fixed settle wait after clearing the input surface
    pub after_clear_ms: u64,
    /// Quiescence window between appearance and the final read
    pub settle_ms: u64,
    /// Cool-down between consecutive cases
    pub between_cases_ms: u64,
    /// Bound on the appearance poll
    pub appearance_timeout_ms: u64,
    /// Interval between appearance-poll iterations
    pub poll_interval_ms: u64,
    /// Delay between simulated keystrokes
    pub keystroke_delay_ms: u64,
    /// Settle wait after the partial prefix in the typing path
    pub partial_settle_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            page_load_ms: 2000,
            after_clear_ms: 1000,
            settle_ms: 3000,
            between_cases_ms: 2000,
            appearance_timeout_ms: 10_000,
            poll_interval_ms: 250,
            keystroke_delay_ms: 50,
            partial_settle_ms: 1000,
        }
    }
}

impl TimeoutConfig {
    /// Settle wait after the page reports idle.
    pub fn page_load(&self) -> Duration {
        Duration::from_millis(self.page_load_ms)
    }

    /// Settle wait after clearing the input surface.
    pub fn after_clear(&self) -> Duration {
        Duration::from_millis(self.after_clear_ms)
    }

    /// Quiescence window between appearance and the final read.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Cool-down between consecutive cases.
    pub fn between_cases(&self) -> Duration {
        Duration::from_millis(self.between_cases_ms)
    }

    /// Bound on the appearance poll.
    pub fn appearance_timeout(&self) -> Duration {
        Duration::from_millis(self.appearance_timeout_ms)
    }

    /// Interval between appearance-poll iterations.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Delay between simulated keystrokes.
    pub fn keystroke_delay(&self) -> Duration {
        Duration::from_millis(self.keystroke_delay_ms)
    }

    /// Settle wait after the partial prefix in the typing path.
    pub fn partial_settle(&self) -> Duration {
        Duration::from_millis(self.partial_settle_ms)
    }
}

/// Selector and label strings for the two surfaces.
///
/// The output container class structurally aliases the input's container,
/// so candidate selection must filter by a negative predicate (not
/// editable, no input role) rather than by a narrower selector string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Accessible name of the input textbox
    pub input_label: String,
    /// CSS selector shared by the input and output containers
    pub output_container: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            input_label: "Input Your Singlish Text Here.".to_owned(),
            output_container: ".w-full.h-80.p-3.rounded-lg.ring-1.ring-slate-300.whitespace-pre-wrap"
                .to_owned(),
        }
    }
}

/// Default URL of the service under verification.
const DEFAULT_URL: &str = "https://www.swifttranslator.com/";

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::new_default()
    }
}

impl HarnessConfig {
    /// Get the default config directory path (`~/.lipi`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))?;
        Ok(home.join(".lipi"))
    }

    /// Get the default config file path (`~/.lipi/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location (`~/.lipi/config.toml`)
    /// If the config doesn't exist, creates it with default values
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or created
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            let config = Self::new_default();
            config.save_to_file(&config_path)?;
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read config: {error}")))?;
        let config: Self = toml::from_str(&contents)?;

        tracing::debug!(
            "Loaded config from {:?}: url={}, appearance_timeout={}ms",
            path,
            config.url,
            config.timeouts.appearance_timeout_ms
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                Error::Config(format!("Failed to create config directory: {error}"))
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|error| Error::Config(format!("Failed to serialize config: {error}")))?;

        let header = "# Lipi Harness Configuration File\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to customize your settings\n\n";

        fs::write(path, format!("{header}{contents}"))
            .map_err(|error| Error::Config(format!("Failed to write config: {error}")))?;

        Ok(())
    }

    /// Create a config populated with the built-in defaults.
    pub fn new_default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            timeouts: TimeoutConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }

    /// Target URL, with the `LIPI_TARGET_URL` environment variable taking
    /// precedence over the configured value.
    pub fn target_url(&self) -> String {
        env::var("LIPI_TARGET_URL").unwrap_or_else(|_| self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::new_default();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeouts.appearance_timeout_ms, 10_000);
        assert_eq!(config.timeouts.settle_ms, 3000);
        assert_eq!(config.timeouts.poll_interval_ms, 250);
        assert_eq!(
            config.selectors.input_label,
            "Input Your Singlish Text Here."
        );
    }

    #[test]
    fn test_duration_helpers() {
        let timeouts = TimeoutConfig::default();
        assert_eq!(timeouts.settle(), Duration::from_secs(3));
        assert_eq!(timeouts.after_clear(), Duration::from_secs(1));
        assert_eq!(timeouts.keystroke_delay(), Duration::from_millis(50));
        assert_eq!(timeouts.appearance_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_roundtrip() {
        use tempfile::TempDir;

        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");

        let mut config = HarnessConfig::new_default();
        config.timeouts.settle_ms = 4500;
        config.save_to_file(&path).expect("Failed to save config");

        let loaded = HarnessConfig::load_from_file(&path).expect("Failed to load config");
        assert_eq!(loaded.timeouts.settle_ms, 4500);
        assert_eq!(loaded.url, config.url);
        assert_eq!(
            loaded.selectors.output_container,
            config.selectors.output_container
        );
    }

    #[test]
    fn test_load_from_partial_toml_fails() {
        use std::io::Write as _;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"url = \"http://localhost\"")
            .expect("Failed to write to temp file");

        // timeouts/selectors sections are required
        let result = HarnessConfig::load_from_file(temp_file.path());
        assert!(result.is_err(), "partial config should fail to parse");
    }
}
