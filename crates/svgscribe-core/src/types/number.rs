use crate::error::FormatError;
use std::fmt::Write as _;
use std::str::FromStr;

/// Maximum number of fractional digits written for any attribute number.
pub const FRACTION_DIGITS: usize = 6;

pub fn fmt_number(v: f64) -> String {
    let mut out = String::new();
    fmt_number_into(&mut out, v);
    out
}

/// Writes `v` in fixed-point notation (never exponential, never locale dependent).
///
/// At most [`FRACTION_DIGITS`] fractional digits are kept and trailing zeros are trimmed, so
/// `1.0` becomes `1` and `0.1 + 0.2` becomes `0.3`. `-0` and non-finite values are written as `0`.
pub fn fmt_number_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let start = out.len();
    let _ = write!(out, "{:.*}", FRACTION_DIGITS, v);
    trim_trailing_zeros_and_dot(out, start);
    if &out[start..] == "-0" {
        out.truncate(start);
        out.push('0');
    }
}

fn trim_trailing_zeros_and_dot(out: &mut String, start: usize) {
    if !out.as_bytes()[start..].contains(&b'.') {
        return;
    }
    while out.len() > start && out.as_bytes()[out.len() - 1] == b'0' {
        out.pop();
    }
    if out.len() > start && out.as_bytes()[out.len() - 1] == b'.' {
        out.pop();
    }
}

/// Display adapter over [`fmt_number_into`].
#[derive(Debug, Clone, Copy)]
pub struct FmtNumber(pub f64);

impl std::fmt::Display for FmtNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        fmt_number_into(&mut out, self.0);
        f.write_str(&out)
    }
}

/// Splits `text` into numbers separated by whitespace and/or single commas.
pub(crate) fn parse_numbers(text: &str) -> Result<Vec<f64>, FormatError> {
    svgtypes::NumberListParser::from(text.trim())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| FormatError::number_list(text))
}

/// A bare number attribute (`opacity`, `offset`, `stroke-miterlimit`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Number(pub f64);

impl Number {
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        svgtypes::Number::from_str(text.trim())
            .map(|n| Number(n.0))
            .map_err(|_| FormatError::number_list(text))
    }
}

impl FromStr for Number {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        FmtNumber(self.0).fmt(f)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number(v)
    }
}

/// Comma separated numbers, e.g. `stroke-dasharray`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberList(pub Vec<f64>);

impl NumberList {
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        parse_numbers(text).map(NumberList)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for NumberList {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for NumberList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            FmtNumber(*v).fmt(f)?;
        }
        Ok(())
    }
}

impl From<Vec<f64>> for NumberList {
    fn from(v: Vec<f64>) -> Self {
        NumberList(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_number_is_fixed_point_and_trimmed() {
        assert_eq!(fmt_number(0.0), "0");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(f64::NAN), "0");
        assert_eq!(fmt_number(5.0), "5");
        assert_eq!(fmt_number(-1.25), "-1.25");
        assert_eq!(fmt_number(0.1 + 0.2), "0.3");
        assert_eq!(fmt_number(1e21), "1000000000000000000000");
        assert_eq!(fmt_number(1.5e-7), "0");
        assert_eq!(fmt_number(-0.0000004), "0");
        assert_eq!(fmt_number(100.0), "100");
    }

    #[test]
    fn exponent_does_not_swallow_unit_letters() {
        assert_eq!(Number::parse("1e3").unwrap(), Number(1000.0));
        assert!(Number::parse("2em").is_err());
        assert_eq!(NumberList::parse("").unwrap(), NumberList::default());
    }

    #[test]
    fn number_list_accepts_mixed_separators() {
        let list = NumberList::parse(" 1, 2 3 ,4.5 ").unwrap();
        assert_eq!(list.0, vec![1.0, 2.0, 3.0, 4.5]);
        assert_eq!(list.to_string(), "1,2,3,4.5");
        assert!(NumberList::parse("1,,2").is_err());
        assert!(NumberList::parse("1 x").is_err());
    }

    #[test]
    fn number_rejects_trailing_garbage() {
        assert_eq!(Number::parse(" 0.5 ").unwrap(), Number(0.5));
        assert!(Number::parse("0.5px").is_err());
        assert!(Number::parse("").is_err());
    }
}
