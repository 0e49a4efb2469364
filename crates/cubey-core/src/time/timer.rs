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

//! Provides RAII-based timers measured against a [`Clock`].

use super::clock::Clock;
use std::time::Duration;

/// Measures elapsed time from the moment it was started.
#[derive(Clone, Copy)]
pub struct Stopwatch<'a> {
    clock: &'a dyn Clock,
    started_at: f64,
}

impl<'a> Stopwatch<'a> {
    /// Starts a new stopwatch on `clock`.
    #[inline]
    pub fn start(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            started_at: clock.now(),
        }
    }

    /// Returns the elapsed time in seconds.
    #[inline]
    pub fn elapsed_secs_f64(&self) -> f64 {
        (self.clock.now() - self.started_at).max(0.0)
    }

    /// Returns the elapsed time as a [`Duration`].
    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_secs_f64())
    }

    /// Returns the elapsed time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}

/// A utility for timing the duration of a scope and handing the result, in
/// seconds, to a sink when it is dropped.
///
/// The measurement is delivered on every exit path, including early returns
/// and unwinding.
pub struct ScopedTimer<'a> {
    stopwatch: Stopwatch<'a>,
    sink: Option<Box<dyn FnOnce(f64) + 'a>>,
}

impl<'a> ScopedTimer<'a> {
    /// Creates a timer and starts it immediately.
    pub fn new(clock: &'a dyn Clock, sink: impl FnOnce(f64) + 'a) -> Self {
        Self {
            stopwatch: Stopwatch::start(clock),
            sink: Some(Box::new(sink)),
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink(self.stopwatch.elapsed_secs_f64());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::clock::{ManualClock, SystemClock};
    use std::cell::Cell;
    use std::thread;

    const SLEEP_DURATION_MS: u64 = 50;
    const SLEEP_MARGIN_MS: u64 = 200;

    #[test]
    fn stopwatch_elapsed_time_after_delay() {
        let clock = SystemClock::new();
        let watch = Stopwatch::start(&clock);

        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));

        let elapsed_ms = watch.elapsed_ms();
        assert!(
            elapsed_ms >= SLEEP_DURATION_MS,
            "Elapsed ms ({elapsed_ms}) should be >= sleep duration ms ({SLEEP_DURATION_MS})"
        );
        assert!(
            elapsed_ms < SLEEP_DURATION_MS + SLEEP_MARGIN_MS,
            "Elapsed ms ({elapsed_ms}) should be < sleep duration ms + margin"
        );
    }

    #[test]
    fn stopwatch_follows_manual_clock() {
        let clock = ManualClock::new();
        let watch = Stopwatch::start(&clock);
        clock.advance(0.125);
        assert!((watch.elapsed_secs_f64() - 0.125).abs() < 1e-9);
        assert_eq!(watch.elapsed_ms(), 125);
    }

    #[test]
    fn scoped_timer_reports_on_drop() {
        let clock = ManualClock::new();
        let recorded = Cell::new(-1.0);
        {
            let _timer = ScopedTimer::new(&clock, |secs| recorded.set(secs));
            clock.advance(0.010);
            assert_eq!(recorded.get(), -1.0, "Nothing is reported before drop");
        }
        assert!((recorded.get() - 0.010).abs() < 1e-9);
    }

    #[test]
    fn scoped_timer_reports_during_unwind() {
        let clock = ManualClock::new();
        let recorded = Cell::new(-1.0);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _timer = ScopedTimer::new(&clock, |secs| recorded.set(secs));
            clock.advance(0.004);
            panic!("phase failed");
        }));

        assert!(outcome.is_err());
        assert!((recorded.get() - 0.004).abs() < 1e-9);
    }
}
