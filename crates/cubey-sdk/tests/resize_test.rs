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

use common::{count, driver, journal, RecordingGraphics, ScriptedWindow};
use cubey_core::event::{DropEvent, FrameBufferSizeEvent, KeyEvent, WindowSizeEvent};
use cubey_core::platform::input::{Action, Modifiers};
use cubey_core::platform::PlatformEvent;
use cubey_core::{ManualClock, Subsystem};
use cubey_sdk::Input;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[test]
fn resize_is_broadcast_once_and_applied() {
    // --- ARRANGE ---
    let journal = journal();
    let ctx = common::context(None);

    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = sizes.clone();
    let _window_sizes = ctx
        .bus()
        .subscribe(move |e: &WindowSizeEvent| sink.borrow_mut().push((e.width, e.height)));
    let framebuffers = Rc::new(RefCell::new(Vec::new()));
    let sink = framebuffers.clone();
    let _framebuffer_sizes = ctx
        .bus()
        .subscribe(move |e: &FrameBufferSizeEvent| sink.borrow_mut().push((e.width, e.height)));

    let window = ScriptedWindow::new(&journal, 3).with_script(vec![
        vec![],
        vec![
            PlatformEvent::WindowResized {
                width: 800,
                height: 600,
            },
            PlatformEvent::FramebufferResized {
                width: 800,
                height: 600,
            },
        ],
    ]);

    // --- ACT ---
    let summary = driver(
        &ctx,
        window,
        RecordingGraphics::new(&journal),
        Rc::new(ManualClock::new()),
        Vec::new(),
    )
    .run();

    // --- ASSERT ---
    assert_eq!(summary.window_size, (800, 600), "Final size is read before destroy");
    assert_eq!(*sizes.borrow(), vec![(800, 600)]);
    assert_eq!(*framebuffers.borrow(), vec![(800, 600)]);
    assert_eq!(count(&journal, "set_size 800x600"), 1);
    assert_eq!(count(&journal, "viewport 0,0 800x600"), 1);
}

#[test]
fn dropped_files_reach_listeners_as_owned_paths() {
    let journal = journal();
    let ctx = common::context(None);
    let drops = Rc::new(RefCell::new(Vec::new()));
    let sink = drops.clone();
    let _drops = ctx
        .bus()
        .subscribe(move |e: &DropEvent| sink.borrow_mut().push(e.clone()));

    let window = ScriptedWindow::new(&journal, 1).with_script(vec![vec![
        PlatformEvent::FilesDropped {
            paths: vec![PathBuf::from("level.json"), PathBuf::from("cube.obj")],
        },
    ]]);

    driver(
        &ctx,
        window,
        RecordingGraphics::new(&journal),
        Rc::new(ManualClock::new()),
        Vec::new(),
    )
    .run();

    let drops = drops.borrow();
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].count, 2);
    assert_eq!(drops[0].paths[0], PathBuf::from("level.json"));
}

#[test]
fn platform_errors_are_not_broadcast() {
    let journal = journal();
    let ctx = common::context(None);
    let keys = Rc::new(std::cell::Cell::new(0));
    let sink = keys.clone();
    let _keys = ctx
        .bus()
        .subscribe(move |_: &KeyEvent| sink.set(sink.get() + 1));

    let window = ScriptedWindow::new(&journal, 2).with_script(vec![vec![PlatformEvent::Error {
        code: 1,
        description: "display connection lost".to_string(),
    }]]);

    let summary = driver(
        &ctx,
        window,
        RecordingGraphics::new(&journal),
        Rc::new(ManualClock::new()),
        Vec::new(),
    )
    .run();

    assert_eq!(summary.frames, 2, "Runtime platform errors are not fatal");
    assert_eq!(keys.get(), 0);
}

#[test]
fn input_subsystem_sees_polled_keys() {
    let journal = journal();
    let ctx = common::context(None);
    let input = Input::new();
    let handle = input.handle();
    let subsystems: Vec<Box<dyn Subsystem>> = vec![Box::new(input)];

    let window = ScriptedWindow::new(&journal, 2).with_script(vec![vec![
        PlatformEvent::Key {
            key: "KeyA".to_string(),
            scancode: 30,
            action: Action::Press,
            mods: Modifiers::default(),
        },
        PlatformEvent::CursorMoved { x: 64.0, y: 32.0 },
    ]]);

    driver(
        &ctx,
        window,
        RecordingGraphics::new(&journal),
        Rc::new(ManualClock::new()),
        subsystems,
    )
    .run();

    assert!(handle.is_key_down("KeyA"));
    assert_eq!(handle.cursor_position(), (64.0, 32.0));
}
