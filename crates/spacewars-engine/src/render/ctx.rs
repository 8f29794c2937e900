use crate::coords::Viewport;
use crate::device::Gpu;

/// Borrowed GPU state the sprite renderer needs for one flush.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,

    /// Pipelines are rebuilt when this changes.
    pub surface_format: wgpu::TextureFormat,

    /// Logical size sprite coordinates are mapped against.
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn from_gpu(gpu: &'a Gpu, viewport: Viewport) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport,
        }
    }
}
