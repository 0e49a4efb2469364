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


mod common;

use common::{driver, journal, RecordingGraphics, ScriptedWindow};
use cubey_core::event::{EarlyUpdateEvent, RenderEvent};
use cubey_core::ManualClock;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Runs `frames` frames at `target_fps`, each spending `phase_secs` in the
/// render phase. Returns the frame start times and the recorded sleeps.
fn run_paced(target_fps: Option<f64>, phase_secs: f64, frames: usize) -> (Vec<f64>, Vec<Duration>) {
    let journal = journal();
    let ctx = common::context(target_fps);
    let clock = Rc::new(ManualClock::new());

    let busy = clock.clone();
    let _work = ctx
        .bus()
        .subscribe(move |_: &RenderEvent| busy.advance(phase_secs));

    let starts = Rc::new(RefCell::new(Vec::new()));
    let sink = starts.clone();
    let time = ctx.clone();
    let _starts = ctx
        .bus()
        .subscribe(move |_: &EarlyUpdateEvent| sink.borrow_mut().push(time.time().time_since_start));

    driver(
        &ctx,
        ScriptedWindow::new(&journal, frames),
        RecordingGraphics::new(&journal),
        clock.clone(),
        Vec::new(),
    )
    .run();

    let starts = starts.borrow().clone();
    (starts, clock.sleeps())
}

#[test]
fn fast_frames_are_slowed_down_to_the_target() {
    let (starts, sleeps) = run_paced(Some(30.0), 0.010, 6);

    assert_eq!(starts.len(), 6);
    for pair in starts.windows(2) {
        let period = pair[1] - pair[0];
        assert!(period >= 0.0329, "frame period {period} is under the 1/30 s budget");
    }
    // First frame has no measurement and sleeps the whole budget.
    assert_eq!(sleeps[0], Duration::from_millis(33));
    assert!(sleeps[1..].iter().all(|s| *s == Duration::from_millis(23)));
}

#[test]
fn slow_frames_do_not_sleep() {
    let (starts, sleeps) = run_paced(Some(30.0), 0.050, 5);

    assert_eq!(sleeps.len(), 1, "Only the unmeasured first frame sleeps");
    for pair in starts[1..].windows(2) {
        assert!((pair[1] - pair[0] - 0.050).abs() < 1e-9);
    }
}

#[test]
fn uncapped_loop_never_sleeps() {
    let (_, sleeps) = run_paced(None, 0.001, 10);
    assert!(sleeps.is_empty());
}

#[test]
fn time_record_reflects_the_last_frame() {
    let journal = journal();
    let ctx = common::context(Some(30.0));
    let clock = Rc::new(ManualClock::new());
    let busy = clock.clone();
    let _work = ctx
        .bus()
        .subscribe(move |_: &RenderEvent| busy.advance(0.050));

    let summary = driver(
        &ctx,
        ScriptedWindow::new(&journal, 3),
        RecordingGraphics::new(&journal),
        clock,
        Vec::new(),
    )
    .run();

    let time = summary.time;
    assert!((time.frame_time - 0.050).abs() < 1e-9);
    assert!((time.render_time - 0.050).abs() < 1e-9);
    assert!(time.logic_time.abs() < 1e-9);
    assert!((time.delta_time - 0.050).abs() < 1e-9);
    assert!((time.raw_fps - 20.0).abs() < 1e-6);
    assert_eq!(time.raw_fps, time.regulated_fps);
}
