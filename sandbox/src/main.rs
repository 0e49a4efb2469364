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


// Cubey Sandbox
// Opens the default window, tracks input and logs frame statistics.
// Usage: sandbox [config.json]

use anyhow::{Context, Result};
use cubey_sdk::prelude::*;

/// Demo collaborator: quits on Escape and reports window notifications.
#[derive(Default)]
struct SandboxApp {
    subscriptions: Subscriptions,
}

impl Subsystem for SandboxApp {
    fn name(&self) -> &'static str {
        "sandbox"
    }

    fn system_init(&mut self, ctx: &EngineContext) {
        let bus = ctx.bus();

        let exit = ctx.clone();
        self.subscriptions.push(bus.subscribe(move |e: &KeyEvent| {
            if e.key == "Escape" && e.action == Action::Press {
                exit.request_exit();
            }
        }));
        self.subscriptions.push(bus.subscribe(|e: &WindowSizeEvent| {
            log::info!("Window is now {}x{}.", e.width, e.height);
        }));
        self.subscriptions.push(bus.subscribe(|e: &DropEvent| {
            for path in &e.paths {
                log::info!("Dropped: {}", path.display());
            }
        }));
        self.subscriptions.push(bus.subscribe(|_: &TerminateEvent| {
            log::info!("Sandbox terminating.");
        }));
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_json_file(&path)
            .with_context(|| format!("could not load configuration from '{path}'"))?,
        None => EngineConfig::default(),
    };

    let subsystems: Vec<Box<dyn Subsystem>> = vec![
        Box::new(Input::new()),
        Box::new(FrameStats::new(config.stats_interval_secs)),
        Box::new(SandboxApp::default()),
    ];

    let driver = Engine::init(config, subsystems).context("engine initialization failed")?;
    let summary = driver.run();
    log::info!(
        "Ran {} frame(s); last frame took {:.3} ms.",
        summary.frames,
        summary.time.frame_time * 1000.0
    );
    Ok(())
}

fn main() {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
