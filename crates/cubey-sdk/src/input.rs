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


//! The built-in input subsystem.
//!
//! It listens to the raw input broadcasts and folds them into an
//! [`InputState`] that gameplay code can query at any time through an
//! [`InputHandle`].

use cubey_core::event::{
    CharEvent, KeyEvent, LateUpdateEvent, MouseButtonEvent, MousePosEvent, MouseWheelEvent,
};
use cubey_core::platform::input::{Action, MouseButton};
use cubey_core::{EngineContext, Listener, Subscriptions, Subsystem};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Everything known about the keyboard and mouse.
///
/// Held keys and buttons persist across frames. The "this frame"
/// accumulators (wheel, typed text, fresh presses) are cleared on every
/// [`LateUpdateEvent`], after the early and main update listeners had a
/// chance to read them.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held_keys: HashSet<String>,
    pressed_keys: HashSet<String>,
    held_buttons: HashSet<MouseButton>,
    cursor: (f64, f64),
    wheel: (f64, f64),
    text: String,
}

impl InputState {
    /// `true` while `key` (e.g. `"KeyW"`) is held down.
    pub fn is_key_down(&self, key: &str) -> bool {
        self.held_keys.contains(key)
    }

    /// `true` if `key` went down since the last late update.
    pub fn was_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// `true` while `button` is held down.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// Last known cursor position.
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    /// Scroll accumulated since the last late update.
    pub fn wheel_delta(&self) -> (f64, f64) {
        self.wheel
    }

    /// Text typed since the last late update.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.wheel = (0.0, 0.0);
        self.text.clear();
    }

    fn apply_key(&mut self, event: &KeyEvent) {
        match event.action {
            Action::Press => {
                self.pressed_keys.insert(event.key.clone());
                self.held_keys.insert(event.key.clone());
            }
            Action::Repeat => {
                self.held_keys.insert(event.key.clone());
            }
            Action::Release => {
                self.held_keys.remove(&event.key);
            }
        }
    }

    fn apply_button(&mut self, event: &MouseButtonEvent) {
        match event.action {
            Action::Press | Action::Repeat => self.held_buttons.insert(event.button),
            Action::Release => self.held_buttons.remove(&event.button),
        };
    }
}

/// Shared owner of the [`InputState`], registered on the bus as a listener.
#[derive(Debug, Default)]
struct InputTracker {
    state: RefCell<InputState>,
}

impl Listener<KeyEvent> for InputTracker {
    fn on_event(&self, event: &KeyEvent) {
        self.state.borrow_mut().apply_key(event);
    }
}

impl Listener<MouseButtonEvent> for InputTracker {
    fn on_event(&self, event: &MouseButtonEvent) {
        self.state.borrow_mut().apply_button(event);
    }
}

impl Listener<MousePosEvent> for InputTracker {
    fn on_event(&self, event: &MousePosEvent) {
        self.state.borrow_mut().cursor = (event.x, event.y);
    }
}

impl Listener<MouseWheelEvent> for InputTracker {
    fn on_event(&self, event: &MouseWheelEvent) {
        let mut state = self.state.borrow_mut();
        state.wheel.0 += event.dx;
        state.wheel.1 += event.dy;
    }
}

impl Listener<CharEvent> for InputTracker {
    fn on_event(&self, event: &CharEvent) {
        self.state.borrow_mut().text.push(event.codepoint);
    }
}

impl Listener<LateUpdateEvent> for InputTracker {
    fn on_event(&self, _event: &LateUpdateEvent) {
        self.state.borrow_mut().end_frame();
    }
}

/// Read access to the state kept by an [`Input`] subsystem.
#[derive(Debug, Clone)]
pub struct InputHandle {
    tracker: Rc<InputTracker>,
}

impl InputHandle {
    /// Runs `read` against the current state.
    pub fn with<R>(&self, read: impl FnOnce(&InputState) -> R) -> R {
        read(&*self.tracker.state.borrow())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> InputState {
        self.tracker.state.borrow().clone()
    }

    /// See [`InputState::is_key_down`].
    pub fn is_key_down(&self, key: &str) -> bool {
        self.with(|s| s.is_key_down(key))
    }

    /// See [`InputState::is_button_down`].
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.with(|s| s.is_button_down(button))
    }

    /// See [`InputState::cursor_position`].
    pub fn cursor_position(&self) -> (f64, f64) {
        self.with(InputState::cursor_position)
    }
}

/// Subsystem tracking keyboard and mouse state.
#[derive(Debug, Default)]
pub struct Input {
    tracker: Rc<InputTracker>,
    subscriptions: Subscriptions,
}

impl Input {
    /// Creates an input subsystem. It stays idle until initialized.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that outlives moving the subsystem into the engine.
    pub fn handle(&self) -> InputHandle {
        InputHandle {
            tracker: Rc::clone(&self.tracker),
        }
    }
}

impl Subsystem for Input {
    fn name(&self) -> &'static str {
        "input"
    }

    fn system_init(&mut self, ctx: &EngineContext) {
        let bus = ctx.bus();
        self.subscriptions.release_all();
        self.subscriptions
            .push(bus.subscribe_listener::<KeyEvent, _>(&self.tracker));
        self.subscriptions
            .push(bus.subscribe_listener::<MouseButtonEvent, _>(&self.tracker));
        self.subscriptions
            .push(bus.subscribe_listener::<MousePosEvent, _>(&self.tracker));
        self.subscriptions
            .push(bus.subscribe_listener::<MouseWheelEvent, _>(&self.tracker));
        self.subscriptions
            .push(bus.subscribe_listener::<CharEvent, _>(&self.tracker));
        self.subscriptions
            .push(bus.subscribe_listener::<LateUpdateEvent, _>(&self.tracker));
        log::debug!("Input subsystem listening on {} channels.", self.subscriptions.len());
    }
}
