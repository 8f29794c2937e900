use std::path::Path;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::{Color, Rect, Viewport};
use crate::core::{AppControl, Gfx};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::error::AssetError;

use super::{GpuTexture, RenderCtx, SpriteRenderer};

/// wgpu-backed 2D canvas for the game window.
///
/// Owns the GPU context and the sprite renderer. Dropping the canvas releases
/// the device and surface before the window handle it shares.
pub struct Canvas {
    gpu: Gpu,
    sprites: SpriteRenderer,
    clear: Color,
    window: Arc<Window>,
}

impl Canvas {
    pub(crate) fn new(window: Arc<Window>, gpu: Gpu) -> Self {
        Self {
            gpu,
            sprites: SpriteRenderer::new(),
            clear: Color::black(),
            window,
        }
    }

    pub(crate) fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    /// Logical window size; sprite coordinates live in this space.
    fn viewport(&self) -> Viewport {
        let logical = self
            .gpu
            .size()
            .to_logical::<f32>(self.window.scale_factor());
        Viewport::new(logical.width, logical.height)
    }
}

impl Gfx for Canvas {
    type Texture = GpuTexture;

    fn load_texture(&mut self, path: &Path) -> Result<GpuTexture, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        log::info!("loaded texture {}", path.display());
        Ok(self.create_texture(&image))
    }

    fn create_texture(&mut self, image: &image::RgbaImage) -> GpuTexture {
        self.sprites
            .create_texture(self.gpu.device(), self.gpu.queue(), image)
    }

    fn clear(&mut self, color: Color) {
        self.clear = color;
        self.sprites.begin();
    }

    fn draw_texture(&mut self, texture: &GpuTexture, dst: Rect) {
        let vp = self.viewport();
        if Rect::new(0.0, 0.0, vp.width, vp.height).intersect(dst).is_none() {
            log::trace!("culled off-screen sprite at {dst:?}");
            return;
        }
        self.sprites.queue(texture, dst);
    }

    fn present(&mut self) -> AppControl {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            // Minimized; nothing to draw into.
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("surface error: {err}");
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        // The clear pass must end before the sprite pass borrows the encoder.
        {
            let c = self.clear;
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("spacewars clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: c.r as f64,
                            g: c.g as f64,
                            b: c.b as f64,
                            a: c.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::from_gpu(&self.gpu, viewport);
        self.sprites.render(&rctx, &mut frame.encoder, &frame.view);

        log::trace!("presenting {} sprites", self.sprites.queued_len());

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
