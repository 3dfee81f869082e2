use super::{Color, Length, NumberList, TransformList};
use super::number::FmtNumber;
use crate::error::FormatError;
use indexmap::IndexMap;
use std::ops::Add;
use std::str::FromStr;

/// One property value inside a `style` attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Length(Length),
    Color(Color),
    Numbers(NumberList),
    Transform(TransformList),
    Text(String),
}

impl StyleValue {
    pub fn is_empty_text(&self) -> bool {
        matches!(self, StyleValue::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for StyleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleValue::Number(v) => FmtNumber(*v).fmt(f),
            StyleValue::Length(v) => v.fmt(f),
            StyleValue::Color(v) => v.fmt(f),
            StyleValue::Numbers(v) => v.fmt(f),
            StyleValue::Transform(v) => v.fmt(f),
            StyleValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

impl From<Length> for StyleValue {
    fn from(v: Length) -> Self {
        StyleValue::Length(v)
    }
}

impl From<Color> for StyleValue {
    fn from(v: Color) -> Self {
        StyleValue::Color(v)
    }
}

impl From<NumberList> for StyleValue {
    fn from(v: NumberList) -> Self {
        StyleValue::Numbers(v)
    }
}

impl From<TransformList> for StyleValue {
    fn from(v: TransformList) -> Self {
        StyleValue::Transform(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}

/// Ordered CSS-like property map, written as `k:v;k:v`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    props: IndexMap<String, StyleValue>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `k:v;k:v`. Values stay as text; entries without a `:` are ignored.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut style = Style::new();
        for decl in text.split(';') {
            let Some((key, value)) = decl.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            style.set(key, value.trim());
        }
        Ok(style)
    }

    /// Sets `key`, replacing any previous value. An empty text value removes the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if value.is_empty_text() {
            self.props.shift_remove(&key);
        } else {
            self.props.insert(key, value);
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.props.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.props.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copies every property of `other` over `self`.
    pub fn merge(&mut self, other: &Style) {
        for (k, v) in &other.props {
            self.props.insert(k.clone(), v.clone());
        }
    }
}

impl Add<&Style> for &Style {
    type Output = Style;

    fn add(self, rhs: &Style) -> Style {
        let mut out = self.clone();
        out.merge(rhs);
        out
    }
}

impl Add for Style {
    type Output = Style;

    fn add(mut self, rhs: Style) -> Style {
        self.merge(&rhs);
        self
    }
}

impl FromStr for Style {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (k, v)) in self.props.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{k}:{v}")?;
        }
        Ok(())
    }
}
