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

//! Provides the synchronous, type-indexed event broadcast used across the engine.
//!
//! The [`EventBus`] keeps one ordered channel of listeners per payload type.
//! Producers (the frame driver, the platform dispatch layer) broadcast typed
//! payloads; consumers (input, camera, UI, gameplay) subscribe to the payload
//! types they care about and keep the returned [`Subscription`] alive for as
//! long as they want to receive them.
//!
//! The payloads emitted by the engine itself live in [`payloads`].

mod bus;
pub mod payloads;

pub use self::bus::{Event, EventBus, Listener, ListenerId, Subscription, Subscriptions};
pub use self::payloads::*;
