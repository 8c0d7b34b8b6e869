//! Land area quantities.

use std::{cmp::Ordering, fmt, str::FromStr};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Units an area may be expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum AreaUnit {
    /// Square metres
    #[default]
    #[serde(rename = "m2")]
    SquareMeter,
    /// Ares (100 m²)
    #[serde(rename = "a")]
    Are,
    /// Hectares (10 000 m²)
    #[serde(rename = "ha")]
    Hectare,
}

impl AreaUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m2",
            AreaUnit::Are => "a",
            AreaUnit::Hectare => "ha",
        }
    }

    /// Size of one unit in square metres.
    pub fn square_meters(&self) -> f64 {
        match self {
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::Are => 100.0,
            AreaUnit::Hectare => 10_000.0,
        }
    }
}

impl FromStr for AreaUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m2" | "sqm" => Ok(AreaUnit::SquareMeter),
            "a" | "are" => Ok(AreaUnit::Are),
            "ha" | "hectare" => Ok(AreaUnit::Hectare),
            _ => Err(format!("Invalid area unit: {s}")),
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An area value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Area {
    pub value: f64,
    #[serde(default)]
    pub unit: AreaUnit,
}

impl Area {
    pub fn new(value: f64, unit: AreaUnit) -> Self {
        Self { value, unit }
    }

    /// The area in square metres, the common unit for comparisons.
    pub fn square_meters(&self) -> f64 {
        self.value * self.unit.square_meters()
    }

    /// The same area expressed in `unit`.
    #[must_use]
    pub fn to_unit(&self, unit: AreaUnit) -> Self {
        if unit == self.unit {
            return *self;
        }
        Self {
            value: self.square_meters() / unit.square_meters(),
            unit,
        }
    }

    /// Compares two areas after normalizing both to square metres.
    ///
    /// Returns `None` when either value is NaN.
    pub fn compare(&self, other: &Area) -> Option<Ordering> {
        self.square_meters().partial_cmp(&other.square_meters())
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}
