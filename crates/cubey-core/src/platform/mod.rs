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

//! Provides abstractions over the windowing backend and the graphics API.
//!
//! The frame driver only talks to these traits, so any backend (winit, SDL2,
//! GLFW, a headless test double) can drive it.

pub mod input;

use crate::error::GraphicsError;
use input::{Action, Modifiers, MouseButton};
use std::path::PathBuf;

/// A raw window/input notification, as reported by the windowing backend
/// before it is turned into a typed broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The window's logical size changed.
    WindowResized {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// The drawable surface size changed, in pixels.
    FramebufferResized {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
    },
    /// A mouse button was pressed or released.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// Press or release.
        action: Action,
        /// Modifiers held at the time.
        mods: Modifiers,
    },
    /// The cursor moved inside the window.
    CursorMoved {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// The mouse wheel or touchpad scrolled.
    Scroll {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// A physical key changed state.
    Key {
        /// Layout-independent key name.
        key: String,
        /// Platform scancode, `0` when unknown.
        scancode: u32,
        /// Press, release or repeat.
        action: Action,
        /// Modifiers held at the time.
        mods: Modifiers,
    },
    /// Text input produced a character.
    Char {
        /// The character.
        codepoint: char,
    },
    /// Files were dropped onto the window.
    FilesDropped {
        /// Owned copies of the dropped paths.
        paths: Vec<PathBuf>,
    },
    /// The backend reported a runtime error. Logged, never broadcast.
    Error {
        /// Backend-specific error code, `0` when there is none.
        code: i32,
        /// Human readable description.
        description: String,
    },
}

/// A rectangle of the framebuffer that rendering is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge, in pixels.
    pub x: i32,
    /// Top edge, in pixels.
    pub y: i32,
    /// Width, in pixels.
    pub width: u32,
    /// Height, in pixels.
    pub height: u32,
}

/// A trait that abstracts the behavior of the application window.
///
/// The window is owned by the frame driver for its whole lifetime and is
/// only touched from the thread running the frame loop.
pub trait PlatformWindow {
    /// Processes pending OS events without blocking, appending their
    /// translation to `events` in arrival order.
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>);

    /// Returns `true` once the user or the OS asked the window to close.
    fn should_close(&self) -> bool;

    /// Requests a new logical inner size.
    fn set_size(&mut self, width: u32, height: u32);

    /// Returns the current logical inner size.
    fn size(&self) -> (u32, u32);

    /// Destroys the window. Called exactly once, at termination.
    fn destroy(&mut self);
}

/// The slice of the graphics API the frame driver needs.
pub trait GraphicsContext {
    /// Restricts subsequent clears and draws to `viewport`. Called whenever
    /// the framebuffer is resized.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Clears the color and depth buffers of the frame being built.
    fn clear(&mut self) -> Result<(), GraphicsError>;

    /// Presents the frame built since the last call (the buffer swap).
    fn present(&mut self);
}
