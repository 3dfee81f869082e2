use image::{Rgba, RgbaImage};

/// A horizontal run of identical pixels on one scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRun {
    pub x: u32,
    pub y: u32,
    pub len: u32,
    pub color: Rgba<u8>,
}

/// Pixel rectangle `(x, y, width, height)` inside an image.
pub type PixelRect = (u32, u32, u32, u32);

/// Clamps `src` to the image bounds; `None` covers the whole image.
pub fn clamp_source(image: &RgbaImage, src: Option<PixelRect>) -> PixelRect {
    let (w, h) = image.dimensions();
    match src {
        None => (0, 0, w, h),
        Some((x, y, sw, sh)) => {
            let x = x.min(w);
            let y = y.min(h);
            (x, y, sw.min(w - x), sh.min(h - y))
        }
    }
}

/// Splits the `src` area of `image` into runs of equal RGBA per scanline.
///
/// Coordinates are relative to the area's top-left corner. Fully transparent pixels produce no
/// run.
pub fn pixel_runs(image: &RgbaImage, src: Option<PixelRect>) -> Vec<PixelRun> {
    let (sx, sy, w, h) = clamp_source(image, src);
    let mut out = Vec::new();
    for row in 0..h {
        let mut current: Option<PixelRun> = None;
        for col in 0..w {
            let color = *image.get_pixel(sx + col, sy + row);
            match current.as_mut() {
                Some(run) if run.color == color => {
                    run.len += 1;
                    continue;
                }
                _ => {}
            }
            if let Some(run) = current.take() {
                if run.color[3] != 0 {
                    out.push(run);
                }
            }
            current = Some(PixelRun {
                x: col,
                y: row,
                len: 1,
                color,
            });
        }
        if let Some(run) = current.filter(|r| r.color[3] != 0) {
            out.push(run);
        }
    }
    out
}
