use crate::error::FormatError;
use std::str::FromStr;

/// An sRGB color that remembers the text it was parsed from.
///
/// Parsing normalizes every accepted syntax to an `(r, g, b)` triple, but [`Color::to_string`]
/// writes the original text back verbatim, so `red`, `#f00` and `rgb(100%,0%,0%)` each survive a
/// parse/serialize cycle unchanged. Colors built from a triple serialize as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    original: Option<String>,
    placeholder: bool,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            original: None,
            placeholder: false,
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let trimmed = text.trim();
        let (r, g, b, placeholder) = if is_placeholder(trimmed) {
            (0, 0, 0, true)
        } else if let Some(hex) = trimmed.strip_prefix('#') {
            let (r, g, b) = parse_hex(hex).ok_or_else(|| FormatError::color(text))?;
            (r, g, b, false)
        } else if let Some(args) = strip_rgb_function(trimmed) {
            let (r, g, b) = parse_rgb_args(args).ok_or_else(|| FormatError::color(text))?;
            (r, g, b, false)
        } else {
            let (r, g, b) = named_color(trimmed).ok_or_else(|| FormatError::color(text))?;
            (r, g, b, false)
        };

        Ok(Self {
            r,
            g,
            b,
            original: Some(text.to_string()),
            placeholder,
        })
    }

    pub fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// The text this color was parsed from, if any.
    pub fn original_text(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// `true` for `%{name}` placeholder colors, which resolve to black but keep their text.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.original {
            Some(text) => f.write_str(text),
            None => f.write_str(&self.to_hex()),
        }
    }
}

fn is_placeholder(text: &str) -> bool {
    text.len() > 3 && text.starts_with("%{") && text.ends_with('}')
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex
        .bytes()
        .map(hex_digit)
        .collect::<Option<Vec<u8>>>()?;
    match digits.as_slice() {
        [r, g, b] => Some((r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some((r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        _ => None,
    }
}

fn strip_rgb_function(text: &str) -> Option<&str> {
    let head = text.get(..4)?;
    if !head.eq_ignore_ascii_case("rgb(") {
        return None;
    }
    text[4..].strip_suffix(')')
}

fn parse_rgb_args(args: &str) -> Option<(u8, u8, u8)> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return None;
    };
    let percent = r.ends_with('%');
    if g.ends_with('%') != percent || b.ends_with('%') != percent {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        if percent {
            let p = s.strip_suffix('%')?.trim().parse::<f64>().ok()?;
            // Percentage of 255, then truncate: 75% -> 191.25 -> 191.
            Some((255.0 * p / 100.0).clamp(0.0, 255.0) as u8)
        } else {
            let v = s.parse::<i64>().ok()?;
            Some(v.clamp(0, 255) as u8)
        }
    };
    Some((channel(r)?, channel(g)?, channel(b)?))
}

fn named_color(text: &str) -> Option<(u8, u8, u8)> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if text.eq_ignore_ascii_case("none") || text.eq_ignore_ascii_case("currentcolor") {
        return None;
    }
    let c = svgtypes::Color::from_str(&text.to_ascii_lowercase()).ok()?;
    Some((c.red, c.green, c.blue))
}
