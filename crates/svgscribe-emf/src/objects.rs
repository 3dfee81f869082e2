use crate::records::*;
use svgscribe_core::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct LogPen {
    pub style: u32,
    pub width: f64,
    pub color: Color,
}

impl LogPen {
    pub fn is_null(&self) -> bool {
        self.style & PS_STYLE_MASK == PS_NULL
    }
}

impl Default for LogPen {
    fn default() -> Self {
        Self {
            style: PS_SOLID,
            width: 1.0,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogBrush {
    pub style: u32,
    pub color: Color,
    pub hatch: u32,
}

impl LogBrush {
    pub fn solid(color: Color) -> Self {
        Self {
            style: BS_SOLID,
            color,
            hatch: 0,
        }
    }

    pub fn is_hollow(&self) -> bool {
        self.style == BS_NULL
    }
}

impl Default for LogBrush {
    fn default() -> Self {
        LogBrush::solid(Color::WHITE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GdiObject {
    Pen(LogPen),
    Brush(LogBrush),
}

/// `COLORREF` is `0x00BBGGRR`.
pub fn color_from_colorref(v: u32) -> Color {
    Color::rgb((v & 0xFF) as u8, ((v >> 8) & 0xFF) as u8, ((v >> 16) & 0xFF) as u8)
}

pub fn colorref(color: &Color) -> u32 {
    let (r, g, b) = color.channels();
    u32::from(r) | (u32::from(g) << 8) | (u32::from(b) << 16)
}

/// Resolves a stock object handle (bit 31 set). `None` for unknown indices.
pub fn stock(handle: u32) -> Option<GdiObject> {
    let gray = |v: u8| GdiObject::Brush(LogBrush::solid(Color::rgb(v, v, v)));
    let obj = match handle & !STOCK_OBJECT_FLAG {
        WHITE_BRUSH => gray(0xFF),
        LTGRAY_BRUSH => gray(0xC0),
        GRAY_BRUSH => gray(0x80),
        DKGRAY_BRUSH => gray(0x40),
        BLACK_BRUSH => gray(0x00),
        NULL_BRUSH => GdiObject::Brush(LogBrush {
            style: BS_NULL,
            color: Color::BLACK,
            hatch: 0,
        }),
        WHITE_PEN => GdiObject::Pen(LogPen {
            color: Color::WHITE,
            ..LogPen::default()
        }),
        BLACK_PEN => GdiObject::Pen(LogPen::default()),
        NULL_PEN => GdiObject::Pen(LogPen {
            style: PS_NULL,
            ..LogPen::default()
        }),
        _ => return None,
    };
    Some(obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorref_is_little_endian_rgb() {
        let c = color_from_colorref(0x00_33_22_11);
        assert_eq!(c.channels(), (0x11, 0x22, 0x33));
        assert_eq!(colorref(&c), 0x00_33_22_11);
    }

    #[test]
    fn stock_objects_resolve_by_index() {
        assert_eq!(
            stock(stock_object(LTGRAY_BRUSH)),
            Some(GdiObject::Brush(LogBrush::solid(Color::rgb(0xC0, 0xC0, 0xC0))))
        );
        match stock(stock_object(NULL_BRUSH)) {
            Some(GdiObject::Brush(b)) => assert!(b.is_hollow()),
            other => panic!("unexpected {other:?}"),
        }
        match stock(stock_object(NULL_PEN)) {
            Some(GdiObject::Pen(p)) => assert!(p.is_null()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(stock(stock_object(42)), None);
    }
}
