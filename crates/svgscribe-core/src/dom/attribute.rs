use super::ElementKind;
use crate::error::FormatError;
use crate::types::{Color, Length, Number, NumberList, Path, PointList, Style, TransformList};

/// A typed attribute slot. Setters replace the whole value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Length(Length),
    Number(Number),
    Numbers(NumberList),
    Color(Color),
    Path(Path),
    Points(PointList),
    Transform(TransformList),
    Style(Style),
}

const LENGTH_ATTRIBUTES: &[&str] = &[
    "x", "y", "width", "height", "rx", "ry", "cx", "cy", "r", "x1", "y1", "x2", "y2", "fx", "fy",
    "refX", "refY", "markerWidth", "markerHeight",
];

const NUMBER_ATTRIBUTES: &[&str] = &[
    "opacity",
    "fill-opacity",
    "stroke-opacity",
    "stop-opacity",
    "flood-opacity",
    "stroke-miterlimit",
];

const COLOR_ATTRIBUTES: &[&str] = &["stop-color", "flood-color", "lighting-color"];

const TRANSFORM_ATTRIBUTES: &[&str] = &["transform", "gradientTransform", "patternTransform"];

impl AttributeValue {
    /// Parses `text` with the grammar registered for attribute `name` on an element of `kind`.
    ///
    /// Text positioning attributes (`x`/`y` on `<text>` and `<tspan>`) may hold lists and stay
    /// textual.
    pub fn parse_for(kind: &ElementKind, name: &str, text: &str) -> Result<Self, FormatError> {
        let value = match name {
            "d" => AttributeValue::Path(Path::parse(text)?),
            "points" => AttributeValue::Points(PointList::parse(text)?),
            "style" => AttributeValue::Style(Style::parse(text)?),
            n if TRANSFORM_ATTRIBUTES.contains(&n) => {
                AttributeValue::Transform(TransformList::parse(text)?)
            }
            n if COLOR_ATTRIBUTES.contains(&n) => AttributeValue::Color(Color::parse(text)?),
            n if NUMBER_ATTRIBUTES.contains(&n) => AttributeValue::Number(Number::parse(text)?),
            n if LENGTH_ATTRIBUTES.contains(&n) && !kind.is_text_content() => {
                AttributeValue::Length(Length::parse(text)?)
            }
            _ => AttributeValue::Text(text.to_string()),
        };
        Ok(value)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_length(&self) -> Option<Length> {
        match self {
            AttributeValue::Length(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            AttributeValue::Path(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&PointList> {
        match self {
            AttributeValue::Points(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_transform(&self) -> Option<&TransformList> {
        match self {
            AttributeValue::Transform(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_style(&self) -> Option<&Style> {
        match self {
            AttributeValue::Style(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            AttributeValue::Color(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Text(v) => f.write_str(v),
            AttributeValue::Length(v) => v.fmt(f),
            AttributeValue::Number(v) => v.fmt(f),
            AttributeValue::Numbers(v) => v.fmt(f),
            AttributeValue::Color(v) => v.fmt(f),
            AttributeValue::Path(v) => v.fmt(f),
            AttributeValue::Points(v) => v.fmt(f),
            AttributeValue::Transform(v) => v.fmt(f),
            AttributeValue::Style(v) => v.fmt(f),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<Length> for AttributeValue {
    fn from(v: Length) -> Self {
        AttributeValue::Length(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Length(Length::number(v))
    }
}

impl From<Number> for AttributeValue {
    fn from(v: Number) -> Self {
        AttributeValue::Number(v)
    }
}

impl From<NumberList> for AttributeValue {
    fn from(v: NumberList) -> Self {
        AttributeValue::Numbers(v)
    }
}

impl From<Color> for AttributeValue {
    fn from(v: Color) -> Self {
        AttributeValue::Color(v)
    }
}

impl From<Path> for AttributeValue {
    fn from(v: Path) -> Self {
        AttributeValue::Path(v)
    }
}

impl From<PointList> for AttributeValue {
    fn from(v: PointList) -> Self {
        AttributeValue::Points(v)
    }
}

impl From<TransformList> for AttributeValue {
    fn from(v: TransformList) -> Self {
        AttributeValue::Transform(v)
    }
}

impl From<Style> for AttributeValue {
    fn from(v: Style) -> Self {
        AttributeValue::Style(v)
    }
}
