//! 8x8 hatch tiles.
//!
//! Each style is a fixed bitmap, one byte per row with the most significant bit on the left. The
//! tile is drawn as a background rectangle plus one rectangle per horizontal run of set bits;
//! dense styles swap roles and punch the clear runs as holes into a foreground-colored tile.

use crate::api::HatchStyle;

pub const TILE_SIZE: u32 = 8;

/// Foreground bitmap for `style`.
pub fn hatch_bits(style: HatchStyle) -> [u8; 8] {
    use HatchStyle::*;
    match style {
        Horizontal => [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        Vertical => [0x80; 8],
        ForwardDiagonal => [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01],
        BackwardDiagonal => [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80],
        Cross => [0xFF, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80],
        DiagonalCross => [0x81, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x81],
        Percent05 => [0x80, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00],
        Percent10 => [0x80, 0x00, 0x08, 0x00, 0x80, 0x00, 0x08, 0x00],
        Percent20 => [0xAA, 0x00, 0x44, 0x00, 0xAA, 0x00, 0x44, 0x00],
        Percent25 => [0x88, 0x22, 0x88, 0x22, 0x88, 0x22, 0x88, 0x22],
        Percent30 => [0xAA, 0x44, 0xAA, 0x00, 0xAA, 0x44, 0xAA, 0x00],
        Percent40 => [0xAA, 0x55, 0xAA, 0x11, 0xAA, 0x44, 0xAA, 0x11],
        Percent50 => [0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55],
        Percent60 => [0xEE, 0x55, 0xBB, 0x55, 0xEE, 0x55, 0xBB, 0x55],
        Percent70 => [0xEE, 0xBB, 0xEE, 0x55, 0xEE, 0xBB, 0xEE, 0x55],
        Percent75 => [0xEE, 0xBB, 0xEE, 0xBB, 0xEE, 0xBB, 0xEE, 0xBB],
        Percent80 => [0x77, 0xDD, 0x77, 0xFF, 0x77, 0xDD, 0x77, 0xFF],
        Percent90 => [0xF7, 0xFF, 0x7F, 0xFF, 0xF7, 0xFF, 0x7D, 0xFF],
        LightDownwardDiagonal => [0x88, 0x44, 0x22, 0x11, 0x88, 0x44, 0x22, 0x11],
        LightUpwardDiagonal => [0x11, 0x22, 0x44, 0x88, 0x11, 0x22, 0x44, 0x88],
        DarkDownwardDiagonal => [0xCC, 0x66, 0x33, 0x99, 0xCC, 0x66, 0x33, 0x99],
        DarkUpwardDiagonal => [0x33, 0x66, 0xCC, 0x99, 0x33, 0x66, 0xCC, 0x99],
        WideDownwardDiagonal => [0xE0, 0x70, 0x38, 0x1C, 0x0E, 0x07, 0x83, 0xC1],
        WideUpwardDiagonal => [0x07, 0x0E, 0x1C, 0x38, 0x70, 0xE0, 0xC1, 0x83],
        LightVertical => [0x88; 8],
        LightHorizontal => [0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00],
        NarrowVertical => [0xAA; 8],
        NarrowHorizontal => [0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00],
        DarkVertical => [0xCC; 8],
        DarkHorizontal => [0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00],
        DashedDownwardDiagonal => [0x00, 0x00, 0x88, 0x44, 0x22, 0x11, 0x00, 0x00],
        DashedUpwardDiagonal => [0x00, 0x00, 0x11, 0x22, 0x44, 0x88, 0x00, 0x00],
        DashedHorizontal => [0xF0, 0x00, 0x00, 0x00, 0x0F, 0x00, 0x00, 0x00],
        DashedVertical => [0x80, 0x80, 0x80, 0x80, 0x08, 0x08, 0x08, 0x08],
        SmallConfetti => [0x80, 0x08, 0x40, 0x02, 0x10, 0x01, 0x20, 0x04],
        LargeConfetti => [0xB1, 0x30, 0x03, 0x1B, 0xD8, 0xC0, 0x0C, 0x8D],
        ZigZag => [0x81, 0x42, 0x24, 0x18, 0x81, 0x42, 0x24, 0x18],
        Wave => [0x00, 0x18, 0xA4, 0x03, 0x00, 0x18, 0xA4, 0x03],
        DiagonalBrick => [0x01, 0x02, 0x04, 0x08, 0x18, 0x24, 0x42, 0x81],
        HorizontalBrick => [0xFF, 0x80, 0x80, 0x80, 0xFF, 0x08, 0x08, 0x08],
        Weave => [0x88, 0x54, 0x22, 0x45, 0x88, 0x14, 0x22, 0x51],
        Plaid => [0xAA, 0x55, 0xAA, 0x55, 0xF0, 0xF0, 0xF0, 0xF0],
        Divot => [0x00, 0x10, 0x08, 0x10, 0x00, 0x01, 0x80, 0x01],
        DottedGrid => [0xAA, 0x00, 0x80, 0x00, 0x80, 0x00, 0x80, 0x00],
        DottedDiamond => [0x80, 0x00, 0x22, 0x00, 0x08, 0x00, 0x22, 0x00],
        Shingle => [0x03, 0x84, 0x48, 0x30, 0x0C, 0x02, 0x01, 0x01],
        Trellis => [0xFF, 0x66, 0xFF, 0x99, 0xFF, 0x66, 0xFF, 0x99],
        Sphere => [0x77, 0x98, 0xF8, 0xF8, 0x77, 0x89, 0x8F, 0x8F],
        SmallGrid => [0xFF, 0x88, 0x88, 0x88, 0xFF, 0x88, 0x88, 0x88],
        SmallCheckerBoard => [0x99, 0x66, 0x66, 0x99, 0x99, 0x66, 0x66, 0x99],
        LargeCheckerBoard => [0xF0, 0xF0, 0xF0, 0xF0, 0x0F, 0x0F, 0x0F, 0x0F],
        OutlinedDiamond => [0x82, 0x44, 0x28, 0x10, 0x28, 0x44, 0x82, 0x01],
        SolidDiamond => [0x10, 0x38, 0x7C, 0xFE, 0x7C, 0x38, 0x10, 0x00],
    }
}

/// One rectangle of a tile, in tile pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatchPrimitive {
    /// Painted with the foreground color.
    Rect { x: u32, y: u32, w: u32, h: u32 },
    /// Painted with the background color over a foreground tile.
    Hole { x: u32, y: u32, w: u32, h: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HatchTile {
    /// `true` when the tile is filled with the foreground color and carries holes.
    pub inverted: bool,
    pub primitives: Vec<HatchPrimitive>,
}

/// Horizontal runs of bits equal to `set` in `row`, as `(x, len)`.
fn runs(row: u8, set: bool) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    let mut start = None;
    for x in 0..TILE_SIZE {
        let on = (row >> (7 - x)) & 1 == 1;
        match (on == set, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                out.push((s, x - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, TILE_SIZE - s));
    }
    out
}

/// Builds the drawing recipe for `style`, merging identical runs on consecutive rows.
pub fn hatch_tile(style: HatchStyle) -> HatchTile {
    let bits = hatch_bits(style);
    let set: u32 = bits.iter().map(|b| b.count_ones()).sum();
    let inverted = set > TILE_SIZE * TILE_SIZE / 2;

    let mut rects: Vec<(u32, u32, u32, u32)> = Vec::new();
    for (y, row) in (0u32..).zip(bits) {
        for (x, w) in runs(row, !inverted) {
            // Grow a rectangle from the row above when it spans the same columns.
            match rects
                .iter_mut()
                .find(|(rx, ry, rw, rh)| *rx == x && *rw == w && ry + rh == y)
            {
                Some(r) => r.3 += 1,
                None => rects.push((x, y, w, 1)),
            }
        }
    }

    let primitives = rects
        .into_iter()
        .map(|(x, y, w, h)| {
            if inverted {
                HatchPrimitive::Hole { x, y, w, h }
            } else {
                HatchPrimitive::Rect { x, y, w, h }
            }
        })
        .collect();
    HatchTile {
        inverted,
        primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(tile: &HatchTile) -> u32 {
        tile.primitives
            .iter()
            .map(|p| match *p {
                HatchPrimitive::Rect { w, h, .. } | HatchPrimitive::Hole { w, h, .. } => w * h,
            })
            .sum()
    }

    #[test]
    fn every_style_has_a_recipe_covering_its_bits() {
        for style in HatchStyle::ALL {
            let tile = hatch_tile(style);
            let set: u32 = hatch_bits(style).iter().map(|b| b.count_ones()).sum();
            let expected = if tile.inverted { 64 - set } else { set };
            assert_eq!(area(&tile), expected, "{style:?}");
        }
    }

    #[test]
    fn lines_become_single_rectangles() {
        assert_eq!(
            hatch_tile(HatchStyle::Horizontal).primitives,
            vec![HatchPrimitive::Rect { x: 0, y: 0, w: 8, h: 1 }]
        );
        assert_eq!(
            hatch_tile(HatchStyle::Vertical).primitives,
            vec![HatchPrimitive::Rect { x: 0, y: 0, w: 1, h: 8 }]
        );
    }

    #[test]
    fn dense_styles_use_holes() {
        let tile = hatch_tile(HatchStyle::Percent90);
        assert!(tile.inverted);
        assert_eq!(area(&tile), 5);
        assert!(!hatch_tile(HatchStyle::Percent50).inverted);
    }

    #[test]
    fn percentages_increase() {
        let density = |s| hatch_bits(s).iter().map(|b| b.count_ones()).sum::<u32>();
        let ladder = [
            HatchStyle::Percent05,
            HatchStyle::Percent10,
            HatchStyle::Percent20,
            HatchStyle::Percent25,
            HatchStyle::Percent30,
            HatchStyle::Percent40,
            HatchStyle::Percent50,
            HatchStyle::Percent60,
            HatchStyle::Percent70,
            HatchStyle::Percent75,
            HatchStyle::Percent80,
            HatchStyle::Percent90,
        ];
        for pair in ladder.windows(2) {
            assert!(density(pair[0]) < density(pair[1]), "{pair:?}");
        }
    }
}
