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


//! Scripted stand-ins for the window and the graphics context, sharing one
//! journal so tests can assert on the interleaving of driver steps.

#![allow(dead_code)]

use cubey_core::error::GraphicsError;
use cubey_core::platform::{GraphicsContext, PlatformEvent, PlatformWindow, Viewport};
use cubey_core::{Clock, EngineContext, Event, EventBus, Subscription, Subsystem, TimeState};
use cubey_sdk::FrameDriver;
use std::cell::RefCell;
use std::rc::Rc;

pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

pub fn count(journal: &Journal, entry: &str) -> usize {
    journal.borrow().iter().filter(|e| *e == entry).count()
}

/// Appends `label` to the journal on every broadcast of `E`.
pub fn record<E: Event>(bus: &EventBus, journal: &Journal, label: &'static str) -> Subscription {
    let journal = journal.clone();
    bus.subscribe(move |_: &E| journal.borrow_mut().push(label.to_string()))
}

/// A window that reports a close request after a fixed number of polls and
/// emits pre-scripted events on given polls.
pub struct ScriptedWindow {
    journal: Journal,
    script: Vec<Vec<PlatformEvent>>,
    close_after: usize,
    polls: usize,
    size: (u32, u32),
}

impl ScriptedWindow {
    pub fn new(journal: &Journal, close_after: usize) -> Self {
        Self {
            journal: journal.clone(),
            script: Vec::new(),
            close_after,
            polls: 0,
            size: (1280, 720),
        }
    }

    /// `script[i]` is delivered by the `i`-th poll (zero based).
    pub fn with_script(mut self, script: Vec<Vec<PlatformEvent>>) -> Self {
        self.script = script;
        self
    }
}

impl PlatformWindow for ScriptedWindow {
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>) {
        self.journal.borrow_mut().push("poll".to_string());
        if let Some(batch) = self.script.get_mut(self.polls) {
            events.append(batch);
        }
        self.polls += 1;
    }

    fn should_close(&self) -> bool {
        self.polls >= self.close_after
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.journal
            .borrow_mut()
            .push(format!("set_size {width}x{height}"));
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn destroy(&mut self) {
        self.journal.borrow_mut().push("destroy".to_string());
    }
}

pub struct RecordingGraphics {
    journal: Journal,
    fail_clears: bool,
}

impl RecordingGraphics {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail_clears: false,
        }
    }

    pub fn failing(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail_clears: true,
        }
    }
}

impl GraphicsContext for RecordingGraphics {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.journal.borrow_mut().push(format!(
            "viewport {},{} {}x{}",
            viewport.x, viewport.y, viewport.width, viewport.height
        ));
    }

    fn clear(&mut self) -> Result<(), GraphicsError> {
        self.journal.borrow_mut().push("clear".to_string());
        if self.fail_clears {
            Err(GraphicsError::FrameAcquisition("surface lost".to_string()))
        } else {
            Ok(())
        }
    }

    fn present(&mut self) {
        self.journal.borrow_mut().push("present".to_string());
    }
}

pub fn context(target_fps: Option<f64>) -> EngineContext {
    EngineContext::new(EventBus::new(), TimeState::with_target_fps(target_fps), 42)
}

pub fn driver(
    ctx: &EngineContext,
    window: ScriptedWindow,
    graphics: RecordingGraphics,
    clock: Rc<dyn Clock>,
    subsystems: Vec<Box<dyn Subsystem>>,
) -> FrameDriver {
    FrameDriver::new(
        ctx.clone(),
        Box::new(window),
        Box::new(graphics),
        clock,
        subsystems,
    )
}
