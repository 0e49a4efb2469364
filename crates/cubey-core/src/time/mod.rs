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

//! Time keeping for the frame loop.
//!
//! * [`clock`]: the [`Clock`] abstraction over "now" and "sleep", with a real
//!   and a manually driven implementation.
//! * [`timer`]: [`Stopwatch`] and the RAII [`ScopedTimer`].
//! * [`state`]: the per-frame [`TimeState`] record and the pacing rule.

pub mod clock;
pub mod state;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use state::{fps_from_delta, pacing_delay, TimeState};
pub use timer::{ScopedTimer, Stopwatch};
