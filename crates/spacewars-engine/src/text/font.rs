use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::{Rgba, RgbaImage};

use crate::coords::Color;
use crate::error::AssetError;

/// A parsed TrueType/OpenType font.
pub struct Font {
    inner: fontdue::Font,
}

impl Font {
    /// Reads and parses a font file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes).map_err(|message| AssetError::Font {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())?;
        Ok(Self { inner })
    }

    /// Renders `text` as a single block of `px`-sized glyphs.
    ///
    /// The image is sized to the laid-out glyph bounds. Coverage becomes the
    /// alpha channel; color channels are straight (not premultiplied).
    /// Empty or whitespace-only text yields a 0x0 image.
    pub fn rasterize(&self, text: &str, px: f32, color: Color) -> RgbaImage {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.inner], &TextStyle::new(text, px, 0));

        let glyphs = layout.glyphs();
        let (w, h) = glyphs
            .iter()
            .filter(|g| g.width > 0 && g.height > 0)
            .fold((0.0f32, 0.0f32), |(w, h), g| {
                (w.max(g.x + g.width as f32), h.max(g.y + g.height as f32))
            });

        let (width, height) = (w.ceil() as u32, h.ceil() as u32);
        let mut image = RgbaImage::new(width, height);
        if width == 0 || height == 0 {
            return image;
        }

        let [r, g, b, a] = color.to_rgba8();
        for glyph in glyphs {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let (_, coverage) = self.inner.rasterize_config(glyph.key);
            let (ox, oy) = (glyph.x.round() as i64, glyph.y.round() as i64);

            for (i, c) in coverage.iter().enumerate() {
                if *c == 0 {
                    continue;
                }
                let x = ox + (i % glyph.width) as i64;
                let y = oy + (i / glyph.width) as i64;
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    continue;
                }

                let alpha = (u16::from(*c) * u16::from(a) / 255) as u8;
                let px = image.get_pixel_mut(x as u32, y as u32);
                // Overlapping glyph edges keep the stronger coverage.
                if alpha > px[3] {
                    *px = Rgba([r, g, b, alpha]);
                }
            }
        }

        image
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("glyphs", &self.inner.glyph_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file_reports_path() {
        let err = Font::load(Path::new("no/such/font.ttf")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("font.ttf"));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(Font::from_bytes(b"definitely not a font").is_err());
    }
}
