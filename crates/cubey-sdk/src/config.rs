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


//! Engine configuration, loadable from JSON.

use crate::error::EngineError;
use cubey_core::TimeState;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for window bootstrap, frame pacing and the built-in subsystems.
///
/// Every field has a default, so a partial JSON document (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title.
    pub title: String,
    /// Initial logical window width.
    pub width: u32,
    /// Initial logical window height.
    pub height: u32,
    /// Frame rate the loop is paced to. `None` (JSON `null`) runs uncapped.
    pub target_fps: Option<f64>,
    /// Synchronizes presentation with the display refresh.
    pub vsync: bool,
    /// RGBA clear color.
    pub clear_color: [f64; 4],
    /// Seconds between two frame statistics reports.
    pub stats_interval_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "cubey!".to_string(),
            width: 1280,
            height: 720,
            target_fps: Some(60.0),
            vsync: false,
            clear_color: [0.01, 0.02, 0.03, 1.0],
            stats_interval_secs: 1.0,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(EngineError::ConfigParse)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded engine configuration from '{}'.", path.display());
        Ok(config)
    }

    /// The time record a fresh engine starts from, carrying the frame budget.
    pub fn initial_time(&self) -> TimeState {
        TimeState::with_target_fps(self.target_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.title, "cubey!");
        assert_eq!((config.width, config.height), (1280, 720));
        assert!((config.initial_time().target_delta_time - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let config =
            EngineConfig::from_json_str(r#"{ "title": "demo", "target_fps": 30.0, "vsync": true }"#)
                .unwrap();
        assert_eq!(config.title, "demo");
        assert_eq!(config.target_fps, Some(30.0));
        assert!((config.initial_time().target_delta_time - 1.0 / 30.0).abs() < 1e-12);
        assert!(config.vsync);
        assert_eq!(config.width, 1280);
    }

    #[test]
    fn null_target_fps_runs_uncapped() {
        let config = EngineConfig::from_json_str(r#"{ "target_fps": null }"#).unwrap();
        assert_eq!(config.target_fps, None);
        assert_eq!(config.initial_time().target_delta_time, 0.0);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ width: }").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, EngineError::ConfigIo { .. }));
    }
}
