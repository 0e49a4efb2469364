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


//! Translation of raw platform notifications into typed broadcasts.

use cubey_core::event::{
    CharEvent, DropEvent, EventBus, FrameBufferSizeEvent, KeyEvent, MouseButtonEvent,
    MousePosEvent, MouseWheelEvent, WindowSizeEvent,
};
use cubey_core::platform::{GraphicsContext, PlatformEvent, PlatformWindow, Viewport};

/// Applies the side effect of `event`, if any, then broadcasts its payload.
///
/// Window resizes are re-applied to the window and framebuffer resizes
/// reset the viewport to the whole surface. Platform errors are logged and
/// never broadcast.
pub fn dispatch_platform_event(
    event: PlatformEvent,
    bus: &EventBus,
    window: &mut dyn PlatformWindow,
    graphics: &mut dyn GraphicsContext,
) {
    match event {
        PlatformEvent::WindowResized { width, height } => {
            log::debug!("Window resized to {width}x{height}.");
            window.set_size(width, height);
            bus.broadcast(&WindowSizeEvent { width, height });
        }
        PlatformEvent::FramebufferResized { width, height } => {
            log::debug!("Framebuffer resized to {width}x{height}.");
            graphics.set_viewport(Viewport {
                x: 0,
                y: 0,
                width,
                height,
            });
            bus.broadcast(&FrameBufferSizeEvent { width, height });
        }
        PlatformEvent::MouseButton {
            button,
            action,
            mods,
        } => bus.broadcast(&MouseButtonEvent {
            button,
            action,
            mods,
        }),
        PlatformEvent::CursorMoved { x, y } => bus.broadcast(&MousePosEvent { x, y }),
        PlatformEvent::Scroll { dx, dy } => bus.broadcast(&MouseWheelEvent { dx, dy }),
        PlatformEvent::Key {
            key,
            scancode,
            action,
            mods,
        } => bus.broadcast(&KeyEvent {
            key,
            scancode,
            action,
            mods,
        }),
        PlatformEvent::Char { codepoint } => bus.broadcast(&CharEvent { codepoint }),
        PlatformEvent::FilesDropped { paths } => {
            log::debug!("{} file(s) dropped onto the window.", paths.len());
            bus.broadcast(&DropEvent::new(paths));
        }
        PlatformEvent::Error { code, description } => {
            log::error!("Platform error {code}: {description}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubey_core::error::GraphicsError;
    use cubey_core::platform::input::{Action, Modifiers};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingWindow {
        sizes: Vec<(u32, u32)>,
    }

    impl PlatformWindow for RecordingWindow {
        fn poll_events(&mut self, _events: &mut Vec<PlatformEvent>) {}
        fn should_close(&self) -> bool {
            false
        }
        fn set_size(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }
        fn size(&self) -> (u32, u32) {
            self.sizes.last().copied().unwrap_or_default()
        }
        fn destroy(&mut self) {}
    }

    #[derive(Default)]
    struct RecordingGraphics {
        viewports: Vec<Viewport>,
    }

    impl GraphicsContext for RecordingGraphics {
        fn set_viewport(&mut self, viewport: Viewport) {
            self.viewports.push(viewport);
        }
        fn clear(&mut self) -> Result<(), GraphicsError> {
            Ok(())
        }
        fn present(&mut self) {}
    }

    fn dispatch(event: PlatformEvent, bus: &EventBus) -> (RecordingWindow, RecordingGraphics) {
        let mut window = RecordingWindow::default();
        let mut graphics = RecordingGraphics::default();
        dispatch_platform_event(event, bus, &mut window, &mut graphics);
        (window, graphics)
    }

    #[test]
    fn window_resize_reapplies_size_and_broadcasts() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = bus.subscribe(move |e: &WindowSizeEvent| sink.borrow_mut().push(*e));

        let (window, graphics) = dispatch(
            PlatformEvent::WindowResized {
                width: 800,
                height: 600,
            },
            &bus,
        );

        assert_eq!(window.sizes, vec![(800, 600)]);
        assert!(graphics.viewports.is_empty());
        assert_eq!(
            *seen.borrow(),
            vec![WindowSizeEvent {
                width: 800,
                height: 600
            }]
        );
    }

    #[test]
    fn framebuffer_resize_sets_full_viewport() {
        let bus = EventBus::new();
        let (window, graphics) = dispatch(
            PlatformEvent::FramebufferResized {
                width: 1600,
                height: 1200,
            },
            &bus,
        );

        assert!(window.sizes.is_empty());
        assert_eq!(
            graphics.viewports,
            vec![Viewport {
                x: 0,
                y: 0,
                width: 1600,
                height: 1200
            }]
        );
    }

    #[test]
    fn dropped_files_are_owned_by_the_payload() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let _sub = bus.subscribe(move |e: &DropEvent| *sink.borrow_mut() = Some(e.clone()));

        dispatch(
            PlatformEvent::FilesDropped {
                paths: vec![PathBuf::from("mesh.obj"), PathBuf::from("tex.png")],
            },
            &bus,
        );

        let drop = seen.borrow_mut().take().expect("drop event broadcast");
        assert_eq!(drop.count, 2);
        assert_eq!(drop.paths[1], PathBuf::from("tex.png"));
    }

    #[test]
    fn key_event_keeps_all_fields() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = bus.subscribe(move |e: &KeyEvent| sink.borrow_mut().push(e.clone()));

        let mods = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        dispatch(
            PlatformEvent::Key {
                key: "KeyW".to_string(),
                scancode: 17,
                action: Action::Repeat,
                mods,
            },
            &bus,
        );

        assert_eq!(
            *seen.borrow(),
            vec![KeyEvent {
                key: "KeyW".to_string(),
                scancode: 17,
                action: Action::Repeat,
                mods,
            }]
        );
    }

    #[test]
    fn platform_error_is_not_broadcast() {
        let bus = EventBus::new();
        let (window, graphics) = dispatch(
            PlatformEvent::Error {
                code: 65544,
                description: "driver hiccup".to_string(),
            },
            &bus,
        );
        assert!(window.sizes.is_empty());
        assert!(graphics.viewports.is_empty());
    }
}
