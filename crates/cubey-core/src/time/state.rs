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

use std::time::Duration;

/// Process-wide timing record, rewritten once per frame by the frame driver.
///
/// All durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeState {
    /// Duration of the previous frame, including the pacing sleep when one happened.
    pub delta_time: f64,
    /// Frame rate derived from the unregulated frame time.
    pub raw_fps: f64,
    /// Frame rate derived from the regulated delta time.
    pub regulated_fps: f64,
    /// Time spent in the body of the previous iteration (phases, present, poll).
    pub frame_time: f64,
    /// Desired frame duration; `0` disables pacing.
    pub target_delta_time: f64,
    /// Time spent in the update phase of the last frame.
    pub logic_time: f64,
    /// Time spent in the render phase of the last frame.
    pub render_time: f64,
    /// Time spent in the UI phase of the last frame.
    pub ui_time: f64,
    /// Clock reading taken at the start of the current frame.
    pub time_since_start: f64,
}

impl TimeState {
    /// Creates a fresh record pacing to `target_fps`, or uncapped for `None`.
    pub fn with_target_fps(target_fps: Option<f64>) -> Self {
        let target_delta_time = match target_fps {
            Some(fps) if fps > 0.0 => 1.0 / fps,
            _ => 0.0,
        };
        Self {
            target_delta_time,
            ..Self::default()
        }
    }
}

/// Converts a frame duration into a rate, `0` for a non-positive duration.
#[inline]
pub fn fps_from_delta(delta_time: f64) -> f64 {
    if delta_time > 0.0 {
        1.0 / delta_time
    } else {
        0.0
    }
}

/// How long to sleep before the next frame.
///
/// Returns `None` when the last frame used up its budget. Otherwise the
/// deficit is truncated to whole milliseconds, so the cap is soft: it can
/// only slow early frames down, never speed late ones up.
pub fn pacing_delay(target_delta_time: f64, frame_time: f64) -> Option<Duration> {
    let deficit = target_delta_time - frame_time;
    if deficit > 0.0 {
        Some(Duration::from_millis((deficit * 1000.0) as u64))
    } else {
        None
    }
}
