use crate::coords::Extent;
use crate::core::Texture;

/// A texture uploaded to the GPU, ready to be drawn by the sprite renderer.
///
/// Owns its wgpu texture and bind group; dropping it releases both.
pub struct GpuTexture {
    pub(super) id: u64,
    pub(super) extent: Extent,
    pub(super) bind_group: wgpu::BindGroup,
    pub(super) _texture: wgpu::Texture,
}

impl Texture for GpuTexture {
    fn extent(&self) -> Extent {
        self.extent
    }
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuTexture")
            .field("id", &self.id)
            .field("extent", &self.extent)
            .finish()
    }
}
