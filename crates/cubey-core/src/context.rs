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

//! Core engine context providing access to the process-wide state.

use crate::event::EventBus;
use crate::time::TimeState;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Engine context shared by the frame driver and every subsystem.
///
/// Cloning is cheap; all clones observe the same bus, time record and exit
/// flag.
#[derive(Debug, Clone)]
pub struct EngineContext {
    bus: EventBus,
    time: Rc<Cell<TimeState>>,
    exit_requested: Rc<Cell<bool>>,
    seed: u64,
}

impl EngineContext {
    /// Creates a context around `bus`, starting from `time`.
    pub fn new(bus: EventBus, time: TimeState, seed: u64) -> Self {
        Self {
            bus,
            time: Rc::new(Cell::new(time)),
            exit_requested: Rc::new(Cell::new(false)),
            seed,
        }
    }

    /// The event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// A snapshot of the current time record.
    pub fn time(&self) -> TimeState {
        self.time.get()
    }

    /// Rewrites the time record. Only the frame driver is expected to call this.
    pub fn update_time(&self, update: impl FnOnce(&mut TimeState)) {
        let mut time = self.time.get();
        update(&mut time);
        self.time.set(time);
    }

    /// Asks the frame loop to stop after the current frame.
    pub fn request_exit(&self) {
        if !self.exit_requested.replace(true) {
            log::info!("Exit requested by the application.");
        }
    }

    /// Returns `true` once [`request_exit`](Self::request_exit) was called.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.get()
    }

    /// The seed chosen for the process' pseudo-random generators.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Derives a random seed from the wall clock.
pub fn seed_from_system_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
