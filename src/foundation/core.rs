use std::{fmt, str::FromStr};

use crate::foundation::error::{MosaicError, MosaicResult};

/// Fixed pixel dimensions of one mosaic tile.
///
/// Deserializing goes through [`TileSize::new`], so a zero dimension in a settings file is
/// rejected at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TileSizeRepr")]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub const DEFAULT_WIDTH: u32 = 16;
    pub const DEFAULT_HEIGHT: u32 = 16;

    pub fn new(width: u32, height: u32) -> MosaicResult<Self> {
        if width == 0 || height == 0 {
            return Err(MosaicError::validation(format!(
                "tile size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

#[derive(serde::Deserialize)]
struct TileSizeRepr {
    width: u32,
    height: u32,
}

impl TryFrom<TileSizeRepr> for TileSize {
    type Error = MosaicError;

    fn try_from(repr: TileSizeRepr) -> MosaicResult<Self> {
        Self::new(repr.width, repr.height)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

impl FromStr for TileSize {
    type Err = MosaicError;

    /// Parses `WxH`, e.g. `64x64`.
    fn from_str(s: &str) -> MosaicResult<Self> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| MosaicError::validation(format!("tile size '{s}' must be WxH")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| MosaicError::validation(format!("tile size '{s}': {e}")))
        };
        Self::new(parse(w)?, parse(h)?)
    }
}

/// Averaged 24-bit RGB color of one tile.
///
/// Displays as six lowercase hex digits with no leading `#` (`3f7ae0`), which is
/// also the key the asset store is addressed by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TileColor {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }

    pub fn from_hex(hex: &str) -> MosaicResult<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MosaicError::validation(format!(
                "tile color '{hex}' must be 6 hex digits"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| MosaicError::validation(format!("tile color '{hex}': {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Axis-aligned pixel rectangle on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u16::from(self.a);
        let unpremul = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }
}

fn premul(c: u8, a: u8) -> u8 {
    ((u16::from(c) * u16::from(a) + 127) / 255) as u8
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let p = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
        px.copy_from_slice(&[p.r, p.g, p.b, p.a]);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let straight = Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
        .to_straight_rgba();
        px.copy_from_slice(&straight);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
