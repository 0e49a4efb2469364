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

//! # Cubey Core
//!
//! Foundational crate containing the event bus, the per-frame time state,
//! the platform and graphics contracts, and the engine context shared by
//! every subsystem.

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod event;
pub mod platform;
pub mod subsystem;
pub mod time;

pub use context::EngineContext;
pub use error::GraphicsError;
pub use event::{Event, EventBus, Listener, ListenerId, Subscription, Subscriptions};
pub use platform::{GraphicsContext, PlatformEvent, PlatformWindow, Viewport};
pub use subsystem::Subsystem;
pub use time::{Clock, ManualClock, ScopedTimer, Stopwatch, SystemClock, TimeState};
