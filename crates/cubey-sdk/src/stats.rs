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


//! Periodic frame statistics, logged at `info` level.

use cubey_core::event::UpdateEvent;
use cubey_core::{EngineContext, Subscription, Subsystem};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Averages computed over one report interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsReport {
    /// Frames counted in the interval.
    pub frames: u32,
    /// `frames` divided by the interval's accumulated delta time.
    pub average_fps: f64,
    /// Unregulated rate of the last frame.
    pub raw_fps: f64,
    /// Regulated rate of the last frame.
    pub regulated_fps: f64,
    /// Update phase duration of the last frame, in milliseconds.
    pub logic_ms: f64,
    /// Render phase duration of the last frame, in milliseconds.
    pub render_ms: f64,
    /// UI phase duration of the last frame, in milliseconds.
    pub ui_ms: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    frames: u32,
    elapsed: f64,
}

/// Subsystem reporting frame rate and phase timings every `interval` seconds.
#[derive(Debug)]
pub struct FrameStats {
    interval: f64,
    last_report: Rc<Cell<Option<StatsReport>>>,
    subscription: Option<Subscription>,
}

impl FrameStats {
    /// Creates a reporter. A non-positive interval reports every frame.
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval: interval_secs.max(0.0),
            last_report: Rc::new(Cell::new(None)),
            subscription: None,
        }
    }

    /// The most recent report, if one interval has elapsed.
    pub fn last_report(&self) -> Option<StatsReport> {
        self.last_report.get()
    }
}

impl Subsystem for FrameStats {
    fn name(&self) -> &'static str {
        "frame-stats"
    }

    fn system_init(&mut self, ctx: &EngineContext) {
        let interval = self.interval;
        let last_report = Rc::clone(&self.last_report);
        let acc = RefCell::new(Accumulator::default());
        let time_source = ctx.clone();

        self.subscription = Some(ctx.bus().subscribe(move |event: &UpdateEvent| {
            let mut acc = acc.borrow_mut();
            acc.frames += 1;
            acc.elapsed += f64::from(event.delta_time);
            if acc.elapsed < interval {
                return;
            }

            let time = time_source.time();
            let report = StatsReport {
                frames: acc.frames,
                average_fps: if acc.elapsed > 0.0 {
                    f64::from(acc.frames) / acc.elapsed
                } else {
                    0.0
                },
                raw_fps: time.raw_fps,
                regulated_fps: time.regulated_fps,
                logic_ms: time.logic_time * 1000.0,
                render_ms: time.render_time * 1000.0,
                ui_ms: time.ui_time * 1000.0,
            };
            log::info!(
                "{:.1} FPS (raw {:.1}, regulated {:.1}) | logic {:.3} ms, render {:.3} ms, UI {:.3} ms",
                report.average_fps,
                report.raw_fps,
                report.regulated_fps,
                report.logic_ms,
                report.render_ms,
                report.ui_ms
            );
            last_report.set(Some(report));
            *acc = Accumulator::default();
        }));
    }
}
