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


//! A pump-driven `winit` window implementing the [`PlatformWindow`] trait.
//!
//! `winit` normally owns the main loop. The frame driver owns it instead, so
//! the event loop is pumped with a zero timeout once per frame and whatever
//! arrived in the meantime is translated into [`PlatformEvent`]s.

use crate::platform::input::InputTranslator;
use cubey_core::platform::{PlatformEvent, PlatformWindow};
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

/// Upper bound on the pumps spent waiting for the OS to hand out a window.
const MAX_INIT_PUMPS: usize = 100;
const INIT_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Errors raised while bootstrapping the windowing backend.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS event loop could not be created.
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] EventLoopError),
    /// The OS refused to create the window.
    #[error("failed to create the window: {0}")]
    WindowCreation(#[from] OsError),
    /// The event loop exited before the window came up.
    #[error("event loop exited with code {0} during initialization")]
    ExitedDuringInit(i32),
    /// The window did not appear within the allotted pumps.
    #[error("no window was created after {0} event loop pumps")]
    WindowNotCreated(usize),
}

/// A wrapper around a `winit::window::Window`.
///
/// It uses an `Arc` internally so the graphics surface can share ownership.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// Clones the shared handle, e.g. to create a rendering surface.
    pub fn inner_arc(&self) -> Arc<Window> {
        self.inner.clone()
    }

    /// The `winit` identifier of the window.
    pub fn id(&self) -> WindowId {
        self.inner.id()
    }

    /// The display's scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    /// Inner size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    /// Inner size in logical units.
    pub fn logical_size(&self) -> (u32, u32) {
        let size: LogicalSize<u32> = self.inner.inner_size().to_logical(self.scale_factor());
        (size.width, size.height)
    }

    /// Asks the OS for a new logical inner size. The OS may refuse or adjust it.
    pub fn request_size(&self, width: u32, height: u32) {
        let granted: Option<PhysicalSize<u32>> =
            self.inner.request_inner_size(LogicalSize::new(width, height));
        if let Some(size) = granted {
            log::debug!("Window resized immediately to {}x{} px.", size.width, size.height);
        }
    }
}

/// A builder for creating `WinitWindow` instances.
#[derive(Debug, Clone)]
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
}

impl WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            title: "cubey!".to_string(),
            width: 1280,
            height: 720,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builds the `WinitWindow` using the provided `winit` event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{}",
            self.title,
            self.width,
            self.height
        );

        let window_attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_visible(true);

        let window = event_loop.create_window(window_attributes)?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// (Internal) The `winit` application handler fed by every pump.
struct PumpState {
    builder: Option<WinitWindowBuilder>,
    window: Option<WinitWindow>,
    creation_error: Option<OsError>,
    translator: InputTranslator,
    pending: Vec<PlatformEvent>,
    close_requested: bool,
}

impl PumpState {
    fn new(builder: WinitWindowBuilder) -> Self {
        Self {
            builder: Some(builder),
            window: None,
            creation_error: None,
            translator: InputTranslator::new(),
            pending: Vec::new(),
            close_requested: false,
        }
    }
}

impl ApplicationHandler for PumpState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(builder) = self.builder.take() {
            match builder.build(event_loop) {
                Ok(window) => self.window = Some(window),
                Err(e) => self.creation_error = Some(e),
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = &self.window else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Window close requested.");
                self.close_requested = true;
            }
            event => {
                let scale_factor = window.scale_factor();
                self.translator.translate(&event, scale_factor, &mut self.pending);
            }
        }
    }
}

/// The desktop platform: a `winit` event loop and its single window.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    state: PumpState,
    window: WinitWindow,
    exited: bool,
    destroyed: bool,
}

impl WinitPlatform {
    /// Creates the event loop and pumps it until the window is up.
    ///
    /// # Errors
    /// Fails when the event loop or the window cannot be created.
    pub fn create(builder: WinitWindowBuilder) -> Result<Self, PlatformError> {
        let mut event_loop = EventLoop::new()?;
        let mut state = PumpState::new(builder);

        for _ in 0..MAX_INIT_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(INIT_PUMP_TIMEOUT), &mut state)
            {
                return Err(PlatformError::ExitedDuringInit(code));
            }
            if let Some(e) = state.creation_error.take() {
                return Err(e.into());
            }
            if state.window.is_some() {
                break;
            }
        }

        let window = state
            .window
            .clone()
            .ok_or(PlatformError::WindowNotCreated(MAX_INIT_PUMPS))?;

        Ok(Self {
            event_loop,
            state,
            window,
            exited: false,
            destroyed: false,
        })
    }

    /// The window, e.g. to create a graphics surface for it.
    pub fn window(&self) -> &WinitWindow {
        &self.window
    }
}

impl PlatformWindow for WinitPlatform {
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        if self.destroyed || self.exited {
            return;
        }
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state)
        {
            self.exited = true;
            if code != 0 {
                self.state.pending.push(PlatformEvent::Error {
                    code,
                    description: "event loop exited unexpectedly".to_string(),
                });
            }
        }
        events.append(&mut self.state.pending);
    }

    fn should_close(&self) -> bool {
        self.exited || self.state.close_requested
    }

    fn set_size(&mut self, width: u32, height: u32) {
        // Re-requesting the current size would echo another resize event.
        if self.destroyed || self.window.logical_size() == (width, height) {
            return;
        }
        self.window.request_size(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.window.logical_size()
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.window.inner.set_visible(false);
        self.state.window = None;
        log::info!("Window destroyed.");
    }
}
