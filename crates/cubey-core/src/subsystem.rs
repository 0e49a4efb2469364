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

//! The contract between the engine and its collaborating subsystems.

use crate::context::EngineContext;

/// A collaborator (input, camera, UI, ...) initialized by the engine.
///
/// The engine knows nothing about a subsystem beyond this trait: it calls
/// [`system_init`](Subsystem::system_init) exactly once, during engine
/// initialization, and never inspects the outcome. Subsystems report their
/// own failures and talk to the rest of the engine through the event bus.
pub trait Subsystem {
    /// A short name used in logs.
    fn name(&self) -> &'static str;

    /// Subscribes to the bus and prepares internal state.
    fn system_init(&mut self, ctx: &EngineContext);
}
