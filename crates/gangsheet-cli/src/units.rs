//! Dimension strings with unit suffixes, parsed to millimeters.

use anyhow::{Result, anyhow};

/// Conversions from common units to millimeters. A bare number is
/// millimeters.
const UNITS: &[(&str, f64)] = &[
    ("", 1.0),
    ("mm", 1.0),
    ("millimeter", 1.0),
    ("millimeters", 1.0),
    ("cm", 10.0),
    ("centimeter", 10.0),
    ("centimeters", 10.0),
    ("m", 1000.0),
    ("meter", 1000.0),
    ("meters", 1000.0),
    ("\"", 25.4),
    ("in", 25.4),
    ("inch", 25.4),
    ("inches", 25.4),
    ("'", 304.8),
    ("ft", 304.8),
    ("foot", 304.8),
    ("feet", 304.8),
];

/// Parse a dimension specification string like `"3in"`, `"1.5 cm"` or
/// `"210"` into millimeters.
pub fn parse_dimension(dimension: &str) -> Result<f64> {
    let s = dimension.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let value: f64 = number
        .parse()
        .map_err(|_| anyhow!("invalid dimension {dimension:?}"))?;
    let unit = unit.trim_start().to_ascii_lowercase();
    let factor = UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| factor)
        .ok_or_else(|| anyhow!("unknown unit in dimension {dimension:?}"))?;
    Ok(value * factor)
}
