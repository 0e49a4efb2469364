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


//! Fatal errors surfaced by the engine facade.

use cubey_core::error::GraphicsError;
use cubey_infra::PlatformError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent the engine from starting.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The window or its event loop could not be created.
    #[error("platform initialization failed: {0}")]
    Platform(#[from] PlatformError),

    /// The graphics context could not be created.
    #[error("graphics initialization failed: {0}")]
    Graphics(#[from] GraphicsError),

    /// The configuration file could not be read.
    #[error("failed to read configuration {path:?}: {source}")]
    ConfigIo {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON for [`EngineConfig`](crate::EngineConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[source] serde_json::Error),
}
