//! Fixed-grid texture atlases: block tiles and font glyphs.

use serde::Deserialize;

use crate::types::TileId;

/// Sub-rectangle of a texture in normalized coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// Maps face-local `(u, v)` in `[0, 1]` into the rectangle.
    #[inline]
    pub fn lerp(&self, u: f32, v: f32) -> (f32, f32) {
        (self.u0 + (self.u1 - self.u0) * u, self.v0 + (self.v1 - self.v0) * v)
    }

    /// Shrinks the rectangle by `du`/`dv` on every side.
    #[inline]
    pub fn shrink(self, du: f32, dv: f32) -> UvRect {
        UvRect {
            u0: self.u0 + du,
            v0: self.v0 + dv,
            u1: self.u1 - du,
            v1: self.v1 - dv,
        }
    }
}

/// Block texture atlas: `columns`×`rows` square tiles, tile 0 at the origin,
/// indices running along u first. `v` grows with the tile row.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AtlasLayout {
    pub columns: u16,
    pub rows: u16,
    /// Inset applied to cube faces so filtering never samples a neighbouring tile.
    pub inset: f32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 16,
            inset: 1.0 / 2048.0,
        }
    }
}

impl AtlasLayout {
    #[inline]
    pub fn tile_width(&self) -> f32 {
        1.0 / f32::from(self.columns.max(1))
    }

    #[inline]
    pub fn tile_height(&self) -> f32 {
        1.0 / f32::from(self.rows.max(1))
    }

    /// Full rectangle of `tile`, without inset.
    pub fn tile_rect(&self, tile: TileId) -> UvRect {
        let cols = self.columns.max(1);
        let (w, h) = (self.tile_width(), self.tile_height());
        let u0 = f32::from(tile % cols) * w;
        let v0 = f32::from(tile / cols) * h;
        UvRect {
            u0,
            v0,
            u1: u0 + w,
            v1: v0 + h,
        }
    }

    /// Rectangle of `tile` shrunk by the configured inset.
    #[inline]
    pub fn tile_rect_inset(&self, tile: TileId) -> UvRect {
        self.tile_rect(tile).shrink(self.inset, self.inset)
    }
}

/// Font atlas: `columns`×`rows` cells holding the printable codes
/// `first_code..=last_code` in order, first row at the top of the texture.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphAtlas {
    pub columns: u16,
    pub rows: u16,
    pub first_code: u8,
    pub last_code: u8,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 8,
            first_code: b' ',
            last_code: b'~',
        }
    }
}

impl GlyphAtlas {
    /// Glyphs in `first_code..=last_code`; zero when the range is inverted.
    #[inline]
    pub fn glyph_count(&self) -> u32 {
        (u32::from(self.last_code) + 1).saturating_sub(u32::from(self.first_code))
    }

    /// Cell index for `c`. Characters outside the atlas fall back to `?`,
    /// or to cell 0 when the atlas has no `?` either.
    pub fn glyph_index(&self, c: char) -> u16 {
        let (first, last) = (u32::from(self.first_code), u32::from(self.last_code));
        let range = first..=last;
        let code = [u32::from(c), u32::from(b'?')]
            .into_iter()
            .find(|code| range.contains(code))
            .unwrap_or(first);
        (code - first) as u16
    }

    /// Rectangle of cell `index`; `v0` is the bottom edge of the cell.
    pub fn cell_rect(&self, index: u16) -> UvRect {
        let cols = self.columns.max(1);
        let w = 1.0 / f32::from(cols);
        let h = 1.0 / f32::from(self.rows.max(1));
        let u0 = f32::from(index % cols) * w;
        let v0 = 1.0 - f32::from(index / cols + 1) * h;
        UvRect {
            u0,
            v0,
            u1: u0 + w,
            v1: v0 + h,
        }
    }

    #[inline]
    pub fn glyph_rect(&self, c: char) -> UvRect {
        self.cell_rect(self.glyph_index(c))
    }
}
