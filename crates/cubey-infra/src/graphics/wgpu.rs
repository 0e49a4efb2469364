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


//! A `wgpu` implementation of the [`GraphicsContext`] trait.
//!
//! Each frame the driver clears the color and depth targets and later presents
//! the result. The acquired surface texture is held between the two calls.

use crate::platform::window::WinitWindow;
use cubey_core::error::GraphicsError;
use cubey_core::platform::{GraphicsContext, Viewport};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Settings applied when the graphics context is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsSettings {
    /// RGBA color the framebuffer is cleared to every frame.
    pub clear_color: [f64; 4],
    /// Waits for the display's vertical blank when presenting.
    pub vsync: bool,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            clear_color: [0.01, 0.02, 0.03, 1.0],
            vsync: false,
        }
    }
}

/// Holds the WGPU state needed to clear and present frames on a window surface.
#[derive(Debug)]
pub struct WgpuGraphics {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    viewport: Viewport,
    clear_color: wgpu::Color,
    frame: Option<wgpu::SurfaceTexture>,
}

impl WgpuGraphics {
    /// Creates the surface, picks an adapter and configures the swapchain for `window`.
    ///
    /// # Errors
    /// Returns a [`GraphicsError`] when no surface, adapter or device is available.
    pub fn new(window: &WinitWindow, settings: GraphicsSettings) -> Result<Self, GraphicsError> {
        log::info!("Initializing WGPU graphics context...");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());

        let surface = instance
            .create_surface(window.inner_arc())
            .map_err(|e| GraphicsError::SurfaceCreation(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| GraphicsError::AdapterUnavailable(e.to_string()))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Cubey Logical Device"),
            ..Default::default()
        }))
        .map_err(|e| GraphicsError::DeviceCreation(e.to_string()))?;

        device.on_uncaptured_error(std::sync::Arc::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| {
                GraphicsError::SurfaceCreation("surface reports no supported format".to_string())
            })?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let (width, height) = window.physical_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if settings.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        let depth_view = create_depth_view(&device, &surface_config);

        let [r, g, b, a] = settings.clear_color;
        log::info!(
            "Surface configured: {}x{} {:?}, vsync {}.",
            surface_config.width,
            surface_config.height,
            format,
            if settings.vsync { "on" } else { "off" }
        );

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            depth_view,
            viewport: Viewport {
                x: 0,
                y: 0,
                width,
                height,
            },
            clear_color: wgpu::Color { r, g, b, a },
            frame: None,
        })
    }

    /// The viewport currently applied to clears.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Reconfigures the swapchain and depth target when the size changes.
    fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring resize request to zero dimensions: {width}x{height}");
            return;
        }
        if width == self.surface_config.width && height == self.surface_config.height {
            return;
        }
        log::debug!("Resizing surface configuration to {width}x{height}");
        // An outstanding frame belongs to the old swapchain.
        self.frame = None;
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }
}

impl GraphicsContext for WgpuGraphics {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.resize_surface(viewport.width, viewport.height);
    }

    fn clear(&mut self) -> Result<(), GraphicsError> {
        let frame = match self.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame)
            | wgpu::CurrentSurfaceTexture::Suboptimal(frame) => frame,
            e @ (wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated) => {
                log::warn!("Swapchain surface lost or outdated ({e:?}). Reconfiguring.");
                self.surface.configure(&self.device, &self.surface_config);
                return Err(GraphicsError::FrameAcquisition(format!("{e:?}")));
            }
            e => return Err(GraphicsError::FrameAcquisition(format!("{e:?}"))),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Cubey Clear Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cubey Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            let vp = clamp_viewport(self.viewport, &self.surface_config);
            if vp.width > 0 && vp.height > 0 {
                pass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    0.0,
                    1.0,
                );
            }
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        self.frame = Some(frame);
        Ok(())
    }

    fn present(&mut self) {
        match self.frame.take() {
            Some(frame) => frame.present(),
            None => log::trace!("No frame acquired this iteration; nothing to present."),
        }
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Cubey Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Keeps the viewport inside the render target, as a render pass requires.
fn clamp_viewport(viewport: Viewport, config: &wgpu::SurfaceConfiguration) -> Viewport {
    let x = viewport.x.clamp(0, config.width as i32);
    let y = viewport.y.clamp(0, config.height as i32);
    Viewport {
        x,
        y,
        width: viewport.width.min(config.width - x as u32),
        height: viewport.height.min(config.height - y as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn default_settings_match_engine_defaults() {
        let settings = GraphicsSettings::default();
        assert_eq!(settings.clear_color, [0.01, 0.02, 0.03, 1.0]);
        assert!(!settings.vsync);
    }

    #[test]
    fn viewport_is_clamped_to_the_surface() {
        let vp = clamp_viewport(
            Viewport {
                x: 100,
                y: -20,
                width: 2000,
                height: 300,
            },
            &config(800, 600),
        );
        assert_eq!(
            vp,
            Viewport {
                x: 100,
                y: 0,
                width: 700,
                height: 300
            }
        );
    }

    #[test]
    fn viewport_inside_the_surface_is_untouched() {
        let inner = Viewport {
            x: 0,
            y: 0,
            width: 1280,
            height: 720,
        };
        assert_eq!(clamp_viewport(inner, &config(1280, 720)), inner);
    }
}
