use serde::{Deserialize, Serialize};
use svgscribe_core::Color;

/// A 32-bit color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const BLACK: Argb = Argb::rgb(0, 0, 0);
    pub const WHITE: Argb = Argb::rgb(255, 255, 255);
    pub const GRAY: Argb = Argb::rgb(0x80, 0x80, 0x80);
    pub const TRANSPARENT: Argb = Argb::new(0, 255, 255, 255);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Unpacks `0xAARRGGBB`.
    pub const fn from_u32(v: u32) -> Self {
        Self::new((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Alpha as an opacity in `0..=1`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// The color part; alpha is written separately as an opacity property.
    pub fn to_color(self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }
}

impl From<Color> for Argb {
    fn from(c: Color) -> Self {
        Argb::rgb(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_unpacks() {
        let c = Argb::from_u32(0x80FF_1020);
        assert_eq!(c, Argb::new(0x80, 0xFF, 0x10, 0x20));
        assert_eq!(c.to_u32(), 0x80FF_1020);
        assert_eq!(c.to_color().to_string(), "#ff1020");
        assert!(!c.is_opaque());
    }
}
