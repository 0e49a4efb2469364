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

//! Event payloads broadcast by the frame driver and the platform dispatch layer.
//!
//! Payloads are plain data, created at dispatch time and handed to listeners
//! by reference. Listeners that need a payload beyond the call must clone it.

use super::bus::Event;
use crate::platform::input::{Action, Modifiers, MouseButton};
use std::path::PathBuf;

// --- Lifecycle ---

/// Broadcast once when the driver starts running, before the start time is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitEvent;

/// Broadcast once, last, right before the window is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminateEvent;

/// Broadcast once, right before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartUpEvent;

/// Broadcast once after the last frame, before [`TerminateEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseDownEvent;

/// First step of the update phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EarlyUpdateEvent {
    /// Duration of the previous frame, in seconds.
    pub delta_time: f32,
}

/// Main step of the update phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateEvent {
    /// Duration of the previous frame, in seconds.
    pub delta_time: f32,
}

/// Last step of the update phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LateUpdateEvent {
    /// Duration of the previous frame, in seconds.
    pub delta_time: f32,
}

/// Broadcast once per frame after the color and depth buffers were cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderEvent;

/// Broadcast once per frame after [`RenderEvent`], for overlay UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UIRenderEvent;

// --- Window ---

/// The window's logical size changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeEvent {
    /// New width.
    pub width: u32,
    /// New height.
    pub height: u32,
}

/// The drawable surface size, in pixels, changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBufferSizeEvent {
    /// New width.
    pub width: u32,
    /// New height.
    pub height: u32,
}

/// A set of files was dropped onto the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Number of dropped paths; always equal to `paths.len()`.
    pub count: usize,
    /// Owned copies of the dropped paths.
    pub paths: Vec<PathBuf>,
}

impl DropEvent {
    /// Builds the payload from an owned list of paths.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            count: paths.len(),
            paths,
        }
    }
}

// --- Input ---

/// A mouse button was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    /// The button that changed state.
    pub button: MouseButton,
    /// Press or release.
    pub action: Action,
    /// Modifiers held at the time.
    pub mods: Modifiers,
}

/// Cursor position in physical pixels, relative to the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MousePosEvent {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

/// Scroll offsets, in lines for wheels and in pixels for touchpads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelEvent {
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
}

/// A physical key changed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Layout-independent key name, e.g. `"KeyW"` or `"Escape"`.
    pub key: String,
    /// Platform scancode, `0` when the platform does not report one.
    pub scancode: u32,
    /// Press, release or repeat.
    pub action: Action,
    /// Modifiers held at the time.
    pub mods: Modifiers,
}

/// A character was produced by text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEvent {
    /// The produced character.
    pub codepoint: char,
}

impl Event for InitEvent {}
impl Event for TerminateEvent {}
impl Event for StartUpEvent {}
impl Event for CloseDownEvent {}
impl Event for EarlyUpdateEvent {}
impl Event for UpdateEvent {}
impl Event for LateUpdateEvent {}
impl Event for RenderEvent {}
impl Event for UIRenderEvent {}
impl Event for WindowSizeEvent {}
impl Event for FrameBufferSizeEvent {}
impl Event for DropEvent {}
impl Event for MouseButtonEvent {}
impl Event for MousePosEvent {}
impl Event for MouseWheelEvent {}
impl Event for KeyEvent {}
impl Event for CharEvent {}
