//! GPU rendering subsystem.
//!
//! The [`Canvas`] is the wgpu implementation of [`crate::core::Gfx`]: scenes
//! queue textured quads during `render`, and the canvas records a clear pass
//! plus one sprite pass when the frame is presented.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod canvas;
mod common;
mod ctx;
mod sprite;
mod texture;

pub use canvas::Canvas;
pub use ctx::RenderCtx;
pub use sprite::SpriteRenderer;
pub use texture::GpuTexture;
