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


//! The frame driver: owns the window and graphics context and sequences the
//! update, render and UI phases of every frame.

use crate::dispatch::dispatch_platform_event;
use cubey_core::event::{
    CloseDownEvent, EarlyUpdateEvent, InitEvent, LateUpdateEvent, RenderEvent, StartUpEvent,
    TerminateEvent, UIRenderEvent, UpdateEvent,
};
use cubey_core::platform::{GraphicsContext, PlatformEvent, PlatformWindow};
use cubey_core::time::{fps_from_delta, pacing_delay};
use cubey_core::{Clock, EngineContext, ScopedTimer, Subsystem, TimeState};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of frames executed.
    pub frames: u64,
    /// The time record as it stood when the loop ended.
    pub time: TimeState,
    /// Logical window size right before the window was destroyed.
    pub window_size: (u32, u32),
}

/// Drives the main loop of an initialized engine.
///
/// A driver is created initialized; [`run`](Self::run) consumes it, so a
/// terminated engine cannot be driven again.
pub struct FrameDriver {
    ctx: EngineContext,
    window: Box<dyn PlatformWindow>,
    graphics: Box<dyn GraphicsContext>,
    clock: Rc<dyn Clock>,
    subsystems: Vec<Box<dyn Subsystem>>,
    events: Vec<PlatformEvent>,
}

impl FrameDriver {
    /// Wires the driver together and initializes every subsystem once, in
    /// the order given.
    pub fn new(
        ctx: EngineContext,
        window: Box<dyn PlatformWindow>,
        graphics: Box<dyn GraphicsContext>,
        clock: Rc<dyn Clock>,
        mut subsystems: Vec<Box<dyn Subsystem>>,
    ) -> Self {
        for subsystem in subsystems.iter_mut() {
            log::info!("Initializing subsystem '{}'.", subsystem.name());
            subsystem.system_init(&ctx);
        }

        Self {
            ctx,
            window,
            graphics,
            clock,
            subsystems,
            events: Vec::new(),
        }
    }

    /// The context shared with the subsystems.
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Runs frames until the window is closed or an exit is requested, then
    /// terminates the engine.
    pub fn run(mut self) -> RunSummary {
        let ctx = self.ctx.clone();
        let clock = Rc::clone(&self.clock);

        log::info!(
            "Starting main loop with {} subsystem(s).",
            self.subsystems.len()
        );
        guarded("init", || ctx.bus().broadcast(&InitEvent));
        let start = clock.now();
        ctx.update_time(|t| t.time_since_start = start);
        guarded("start-up", || ctx.bus().broadcast(&StartUpEvent));

        let mut frames: u64 = 0;
        while !(self.window.should_close() || ctx.exit_requested()) {
            let delta_time = self.pace(clock.as_ref());

            {
                // Measured here, consumed by the pacing of the next frame.
                let _frame = ScopedTimer::new(clock.as_ref(), |secs| {
                    ctx.update_time(|t| t.frame_time = secs)
                });

                self.update_phase(clock.as_ref(), delta_time);
                self.render_phase(clock.as_ref());
                self.ui_phase(clock.as_ref());

                self.graphics.present();
                self.poll_and_dispatch();
            }

            frames += 1;
            log::trace!("Frame {frames} done (dt = {delta_time:.4}s).");
        }

        self.terminate(frames)
    }

    /// Computes this frame's delta time, sleeping first if the previous frame
    /// finished under budget.
    fn pace(&self, clock: &dyn Clock) -> f64 {
        let time = self.ctx.time();
        let mut delta_time = time.frame_time;
        let raw_fps = fps_from_delta(delta_time);
        let mut regulated_fps = raw_fps;

        if let Some(delay) = pacing_delay(time.target_delta_time, time.frame_time) {
            clock.sleep(delay);
            delta_time = clock.now() - time.time_since_start;
            regulated_fps = fps_from_delta(delta_time);
        }

        let now = clock.now();
        self.ctx.update_time(|t| {
            t.delta_time = delta_time;
            t.raw_fps = raw_fps;
            t.regulated_fps = regulated_fps;
            t.time_since_start = now;
        });
        delta_time
    }

    fn update_phase(&self, clock: &dyn Clock, delta_time: f64) {
        let ctx = &self.ctx;
        let _timer = ScopedTimer::new(clock, |secs| ctx.update_time(|t| t.logic_time = secs));
        let delta_time = delta_time as f32;

        guarded("early update", || {
            ctx.bus().broadcast(&EarlyUpdateEvent { delta_time })
        });
        guarded("update", || ctx.bus().broadcast(&UpdateEvent { delta_time }));
        guarded("late update", || {
            ctx.bus().broadcast(&LateUpdateEvent { delta_time })
        });
    }

    fn render_phase(&mut self, clock: &dyn Clock) {
        let ctx = &self.ctx;
        let _timer = ScopedTimer::new(clock, |secs| ctx.update_time(|t| t.render_time = secs));

        if let Err(e) = self.graphics.clear() {
            log::error!("Failed to clear the frame: {e}");
        }
        guarded("render", || ctx.bus().broadcast(&RenderEvent));
    }

    fn ui_phase(&self, clock: &dyn Clock) {
        let ctx = &self.ctx;
        let _timer = ScopedTimer::new(clock, |secs| ctx.update_time(|t| t.ui_time = secs));

        guarded("UI render", || ctx.bus().broadcast(&UIRenderEvent));
    }

    fn poll_and_dispatch(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        self.window.poll_events(&mut events);

        for event in events.drain(..) {
            let bus = self.ctx.bus();
            let window = self.window.as_mut();
            let graphics = self.graphics.as_mut();
            guarded("event dispatch", || {
                dispatch_platform_event(event, bus, window, graphics)
            });
        }
        self.events = events;
    }

    fn terminate(mut self, frames: u64) -> RunSummary {
        log::info!("Main loop ended after {frames} frame(s). Shutting down.");
        let bus = self.ctx.bus().clone();
        guarded("close-down", || bus.broadcast(&CloseDownEvent));
        guarded("terminate", || bus.broadcast(&TerminateEvent));

        let window_size = self.window.size();
        log::debug!("Destroying window at {}x{}.", window_size.0, window_size.1);
        self.window.destroy();

        RunSummary {
            frames,
            time: self.ctx.time(),
            window_size,
        }
    }
}

/// Runs one phase, logging a panicking listener instead of unwinding
/// through the frame loop.
fn guarded(phase: &str, body: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(body)) {
        log::error!(
            "A listener panicked during the {phase} phase: {}",
            panic_message(payload.as_ref())
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}
