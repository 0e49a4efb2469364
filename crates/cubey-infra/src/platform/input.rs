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

//! Provides translation from a concrete windowing backend (`winit`) to the
//! engine's [`PlatformEvent`]s.
//!
//! This module acts as an adapter layer, decoupling the rest of the engine from
//! the specific event format of the `winit` crate.

use cubey_core::platform::input::{Action, Modifiers, MouseButton};
use cubey_core::platform::PlatformEvent;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::platform::scancode::PhysicalKeyExtScancode;

/// Stateful translator from `winit` window events to [`PlatformEvent`]s.
///
/// `winit` reports modifier changes as separate events, so the translator
/// remembers the latest modifier state and stamps it onto key and mouse
/// button events.
#[derive(Debug, Default)]
pub struct InputTranslator {
    modifiers: Modifiers,
}

impl InputTranslator {
    /// Creates a translator with no modifier held.
    pub fn new() -> Self {
        Self::default()
    }

    /// The modifier state seen so far.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Appends the translation of `event` to `out`.
    ///
    /// Some events produce several platform events (a resize yields a window
    /// size and a framebuffer size, typed text one event per character), and
    /// many produce none. Consecutive dropped files are coalesced into a
    /// single [`PlatformEvent::FilesDropped`].
    pub fn translate(&mut self, event: &WindowEvent, scale_factor: f64, out: &mut Vec<PlatformEvent>) {
        match event {
            WindowEvent::Resized(size) => {
                let logical: LogicalSize<u32> = size.to_logical(scale_factor);
                out.push(PlatformEvent::WindowResized {
                    width: logical.width,
                    height: logical.height,
                });
                out.push(PlatformEvent::FramebufferResized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
            }
            WindowEvent::MouseInput { state, button, .. } => {
                out.push(PlatformEvent::MouseButton {
                    button: map_mouse_button(*button),
                    action: map_element_state(*state),
                    mods: self.modifiers,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                out.push(PlatformEvent::CursorMoved {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (f64::from(*x), f64::from(*y)),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
                };
                if dx != 0.0 || dy != 0.0 {
                    out.push(PlatformEvent::Scroll { dx, dy });
                }
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let PhysicalKey::Code(keycode) = key_event.physical_key {
                    let action = match (key_event.state, key_event.repeat) {
                        (ElementState::Pressed, true) => Action::Repeat,
                        (ElementState::Pressed, false) => Action::Press,
                        (ElementState::Released, _) => Action::Release,
                    };
                    out.push(PlatformEvent::Key {
                        key: map_keycode_to_string(keycode),
                        scancode: key_event.physical_key.to_scancode().unwrap_or(0),
                        action,
                        mods: self.modifiers,
                    });
                }
                if key_event.state == ElementState::Pressed {
                    if let Some(text) = &key_event.text {
                        out.extend(
                            text.chars()
                                .filter(|c| !c.is_control())
                                .map(|codepoint| PlatformEvent::Char { codepoint }),
                        );
                    }
                }
            }
            WindowEvent::DroppedFile(path) => match out.last_mut() {
                Some(PlatformEvent::FilesDropped { paths }) => paths.push(path.clone()),
                _ => out.push(PlatformEvent::FilesDropped {
                    paths: vec![path.clone()],
                }),
            },
            _ => {}
        }
    }
}

// --- Private Helper Functions ---

/// (Internal) Maps a `winit::keyboard::KeyCode` to a string representation.
fn map_keycode_to_string(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

/// (Internal) Maps a `winit::event::MouseButton` to the engine's `MouseButton` enum.
fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

fn map_element_state(state: ElementState) -> Action {
    match state {
        ElementState::Pressed => Action::Press,
        ElementState::Released => Action::Release,
    }
}

fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        control: state.control_key(),
        alt: state.alt_key(),
        super_key: state.super_key(),
    }
}
