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

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// A monotonic time source the frame driver can also block on.
pub trait Clock {
    /// Seconds elapsed since the clock's origin.
    fn now(&self) -> f64;

    /// Blocks the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The wall clock: [`Instant`] for reading, [`std::thread::sleep`] for waiting.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A virtual clock that only moves when told to.
///
/// Sleeping advances the clock by exactly the requested duration and is
/// recorded, which makes frame pacing observable in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `secs` seconds.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLEEP_DURATION_MS: u64 = 30;
    const SLEEP_MARGIN_MS: u64 = 200;

    #[test]
    fn system_clock_is_monotonic_and_sleeps() {
        let clock = SystemClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(SLEEP_DURATION_MS));
        let slept = clock.now() - before;

        assert!(
            slept >= SLEEP_DURATION_MS as f64 / 1000.0,
            "Clock advanced by {slept}s, expected at least the sleep duration"
        );
        assert!(slept < (SLEEP_DURATION_MS + SLEEP_MARGIN_MS) as f64 / 1000.0);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced_or_slept() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);

        clock.advance(0.5);
        clock.sleep(Duration::from_millis(250));

        assert!((clock.now() - 0.75).abs() < 1e-9);
        assert_eq!(clock.sleeps(), vec![Duration::from_millis(250)]);
    }
}
