//! Text rasterization.
//!
//! Text is baked into an RGBA image once and uploaded as an ordinary texture.

mod font;

pub use font::Font;
