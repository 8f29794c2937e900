//! Coordinate and geometry types shared by the renderer and scenes.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The sprite shader converts to NDC using a viewport uniform.

mod color;
mod extent;
mod rect;
mod vec2;
mod viewport;

pub use color::Color;
pub use extent::Extent;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
