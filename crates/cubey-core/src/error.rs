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

//! Error types shared by graphics backends.

use thiserror::Error;

/// An error raised by a [`GraphicsContext`](crate::platform::GraphicsContext) backend.
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// The presentation surface could not be created for the window.
    #[error("failed to create rendering surface: {0}")]
    SurfaceCreation(String),
    /// No adapter compatible with the surface was found.
    #[error("no compatible graphics adapter: {0}")]
    AdapterUnavailable(String),
    /// The logical device could not be created.
    #[error("failed to create graphics device: {0}")]
    DeviceCreation(String),
    /// The next frame could not be acquired from the swap chain.
    #[error("failed to acquire frame: {0}")]
    FrameAcquisition(String),
}
