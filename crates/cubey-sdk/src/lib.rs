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


//! The public-facing entry point of the engine.
//!
//! [`Engine::init`] opens the window, creates the graphics context and
//! initializes the subsystems; the returned [`FrameDriver`] runs the loop.
//!
//! ```no_run
//! use cubey_sdk::prelude::*;
//!
//! let subsystems: Vec<Box<dyn Subsystem>> = vec![Box::new(Input::new())];
//! let driver = Engine::init(EngineConfig::default(), subsystems)?;
//! let summary = driver.run();
//! println!("ran {} frames", summary.frames);
//! # Ok::<(), cubey_sdk::EngineError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod input;
pub mod stats;

pub use config::EngineConfig;
pub use driver::{FrameDriver, RunSummary};
pub use error::EngineError;
pub use input::{Input, InputHandle, InputState};
pub use stats::{FrameStats, StatsReport};

/// Everything an application needs to write subsystems and listeners.
pub mod prelude {
    pub use cubey_core::event::*;
    pub use cubey_core::platform::input::{Action, Modifiers, MouseButton};
    pub use cubey_core::{EngineContext, Listener, Subscription, Subscriptions, Subsystem};

    pub use crate::{Engine, EngineConfig, FrameStats, Input, InputHandle};
}

use cubey_core::context::seed_from_system_time;
use cubey_core::{EngineContext, EventBus, Subsystem, SystemClock};
use cubey_infra::{GraphicsSettings, WgpuGraphics, WinitPlatform, WinitWindowBuilder};
use std::rc::Rc;

/// Bootstraps the desktop backends.
pub struct Engine;

impl Engine {
    /// Creates the window and graphics context described by `config`, then
    /// initializes `subsystems` in order.
    ///
    /// # Errors
    /// Any failure to create the event loop, the window or the graphics
    /// context is fatal and returned as an [`EngineError`].
    pub fn init(
        config: EngineConfig,
        subsystems: Vec<Box<dyn Subsystem>>,
    ) -> Result<FrameDriver, EngineError> {
        log::info!("Initializing cubey engine...");

        let builder = WinitWindowBuilder::new()
            .with_title(config.title.clone())
            .with_dimensions(config.width, config.height);
        let platform = WinitPlatform::create(builder)?;

        let graphics = WgpuGraphics::new(
            platform.window(),
            GraphicsSettings {
                clear_color: config.clear_color,
                vsync: config.vsync,
            },
        )?;

        let seed = seed_from_system_time();
        log::debug!("Process random seed: {seed}");

        let ctx = EngineContext::new(EventBus::new(), config.initial_time(), seed);

        log::info!("Engine initialized.");
        Ok(FrameDriver::new(
            ctx,
            Box::new(platform),
            Box::new(graphics),
            Rc::new(SystemClock::new()),
            subsystems,
        ))
    }
}
