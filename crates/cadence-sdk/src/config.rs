// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Host configuration.
//!
//! Loaded from a JSON file; every field has a default, so a partial file (or
//! none at all) is valid.

use cadence_runtime::TickFailurePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Module name used when the configuration does not name one.
pub const DEFAULT_MODULE: &str = "main";

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The contents are not a valid configuration.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The values parse but cannot be used.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which frame host drives the run-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameBackend {
    /// Fixed-rate frames on the main thread, no display.
    #[default]
    Paced,
    /// Frames follow a window's redraw cycle.
    Window,
}

/// Window settings, used by [`FrameBackend::Window`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial inner width, in logical pixels.
    pub width: u32,
    /// Initial inner height, in logical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cadence".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// Everything a host session needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Registered name of the compute module to run.
    pub module: String,
    /// Frame host to use.
    pub backend: FrameBackend,
    /// Display refresh rate in Hz.
    pub refresh_rate_hz: u32,
    /// Host-side teardown after this many frames. `None` runs unbounded.
    pub max_frames: Option<u64>,
    /// What the run-loop does after a failing tick.
    pub tick_failure: TickFailurePolicy,
    /// Window settings.
    pub window: WindowConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_string(),
            backend: FrameBackend::default(),
            refresh_rate_hz: 60,
            max_frames: None,
            tick_failure: TickFailurePolicy::default(),
            window: WindowConfig::default(),
        }
    }
}

impl HostConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Like [`from_path`](Self::from_path), but a missing file yields the
    /// defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        Self::load_or(path, Self::default())
    }

    /// Like [`from_path`](Self::from_path), but a missing file yields
    /// `fallback`.
    pub fn load_or(path: &Path, fallback: Self) -> Result<Self, ConfigError> {
        match Self::from_path(path) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::warn!(
                    "Config '{}' not found, using defaults (module '{}').",
                    path.display(),
                    fallback.module
                );
                Ok(fallback)
            }
            other => other,
        }
    }

    /// Checks values that parse but cannot drive a host.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module.trim().is_empty() {
            return Err(ConfigError::Invalid("module name is empty".to_string()));
        }
        if self.refresh_rate_hz == 0 {
            return Err(ConfigError::Invalid(
                "refresh_rate_hz must be at least 1".to_string(),
            ));
        }
        if self.max_frames == Some(0) {
            return Err(ConfigError::Invalid(
                "max_frames must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.module, DEFAULT_MODULE);
        assert_eq!(config.backend, FrameBackend::Paced);
        assert_eq!(config.refresh_rate_hz, 60);
        assert_eq!(config.max_frames, None);
        assert_eq!(config.tick_failure, TickFailurePolicy::Halt);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = HostConfig::from_json(
            r#"{ "module": "life", "tick_failure": "skip_and_continue", "window": { "title": "Life" } }"#,
        )
        .unwrap();

        assert_eq!(config.module, "life");
        assert_eq!(config.tick_failure, TickFailurePolicy::SkipAndContinue);
        assert_eq!(config.window.title, "Life");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.refresh_rate_hz, 60);
    }

    #[test]
    fn test_backend_names() {
        let config = HostConfig::from_json(r#"{ "backend": "window", "max_frames": 120 }"#).unwrap();
        assert_eq!(config.backend, FrameBackend::Window);
        assert_eq!(config.max_frames, Some(120));

        let json = serde_json::to_string(&HostConfig::default()).unwrap();
        assert!(json.contains(r#""backend":"paced""#));
        assert!(json.contains(r#""tick_failure":"halt""#));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            HostConfig::from_json(r#"{ "refresh_rate_hz": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HostConfig::from_json(r#"{ "module": "  " }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HostConfig::from_json(r#"{ "max_frames": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HostConfig::from_json(r#"{ "backend": "vulkan" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "module": "from-file", "refresh_rate_hz": 144 }}"#).unwrap();

        let config = HostConfig::from_path(file.path()).unwrap();
        assert_eq!(config.module, "from-file");
        assert_eq!(config.refresh_rate_hz, 144);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostConfig::load_or_default(&dir.path().join("cadence.json")).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_missing_file_uses_given_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = HostConfig {
            module: "life".to_string(),
            ..HostConfig::default()
        };

        let config = HostConfig::load_or(&dir.path().join("cadence.json"), fallback.clone()).unwrap();
        assert_eq!(config, fallback);
    }

    #[test]
    fn test_broken_file_is_not_masked() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            HostConfig::load_or_default(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
