use super::number::FmtNumber;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Unspecified,
    Percent,
    Em,
    Ex,
    Px,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Unspecified => "",
            LengthUnit::Percent => "%",
            LengthUnit::Em => "em",
            LengthUnit::Ex => "ex",
            LengthUnit::Px => "px",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
            LengthUnit::In => "in",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
        }
    }
}

impl From<svgtypes::LengthUnit> for LengthUnit {
    fn from(unit: svgtypes::LengthUnit) -> Self {
        match unit {
            svgtypes::LengthUnit::None => LengthUnit::Unspecified,
            svgtypes::LengthUnit::Percent => LengthUnit::Percent,
            svgtypes::LengthUnit::Em => LengthUnit::Em,
            svgtypes::LengthUnit::Ex => LengthUnit::Ex,
            svgtypes::LengthUnit::Px => LengthUnit::Px,
            svgtypes::LengthUnit::Cm => LengthUnit::Cm,
            svgtypes::LengthUnit::Mm => LengthUnit::Mm,
            svgtypes::LengthUnit::In => LengthUnit::In,
            svgtypes::LengthUnit::Pt => LengthUnit::Pt,
            svgtypes::LengthUnit::Pc => LengthUnit::Pc,
        }
    }
}

/// Unit suffixes are matched case-insensitively.
fn normalized(text: &str) -> String {
    text.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub const fn number(value: f64) -> Self {
        Self::new(value, LengthUnit::Unspecified)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, LengthUnit::Percent)
    }

    pub const fn inches(value: f64) -> Self {
        Self::new(value, LengthUnit::In)
    }

    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let raw = svgtypes::Length::from_str(&normalized(text))
            .map_err(|_| FormatError::length(text))?;
        Ok(Self {
            value: raw.number,
            unit: raw.unit.into(),
        })
    }

    /// Converts absolute units to user units (px at 96 dpi). Relative units return `None`.
    pub fn to_user_units(&self) -> Option<f64> {
        let factor = match self.unit {
            LengthUnit::Unspecified | LengthUnit::Px => 1.0,
            LengthUnit::In => 96.0,
            LengthUnit::Cm => 96.0 / 2.54,
            LengthUnit::Mm => 96.0 / 25.4,
            LengthUnit::Pt => 96.0 / 72.0,
            LengthUnit::Pc => 16.0,
            LengthUnit::Percent | LengthUnit::Em | LengthUnit::Ex => return None,
        };
        Some(self.value * factor)
    }
}

impl FromStr for Length {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", FmtNumber(self.value), self.unit.suffix())
    }
}

impl From<f64> for Length {
    fn from(v: f64) -> Self {
        Length::number(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Read as degrees.
    #[default]
    Unspecified,
    Deg,
    Rad,
    Grad,
}

impl AngleUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            AngleUnit::Unspecified => "",
            AngleUnit::Deg => "deg",
            AngleUnit::Rad => "rad",
            AngleUnit::Grad => "grad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub const fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    pub const fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Deg)
    }

    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let text_lower = normalized(text);
        let raw = svgtypes::Angle::from_str(&text_lower).map_err(|_| FormatError::length(text))?;
        let unit = match raw.unit {
            svgtypes::AngleUnit::Degrees if text_lower.ends_with("deg") => AngleUnit::Deg,
            svgtypes::AngleUnit::Degrees => AngleUnit::Unspecified,
            svgtypes::AngleUnit::Radians => AngleUnit::Rad,
            svgtypes::AngleUnit::Gradians => AngleUnit::Grad,
            svgtypes::AngleUnit::Turns => return Err(FormatError::length(text)),
        };
        Ok(Self {
            value: raw.number,
            unit,
        })
    }

    pub fn to_degrees(&self) -> f64 {
        match self.unit {
            AngleUnit::Unspecified | AngleUnit::Deg => self.value,
            AngleUnit::Rad => self.value.to_degrees(),
            AngleUnit::Grad => self.value * 360.0 / 400.0,
        }
    }

    pub fn to_radians(&self) -> f64 {
        self.to_degrees().to_radians()
    }
}

impl FromStr for Angle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", FmtNumber(self.value), self.unit.suffix())
    }
}
