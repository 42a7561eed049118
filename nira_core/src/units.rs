//! Unit tables for the measurement families.
//!
//! Each family is an enum implementing [`MeasureUnit`]: it knows its symbols,
//! its canonical unit, the factor to get there and the value range accepted
//! in any of its units. Measurements are generic over the family, so adding
//! a unit means adding a variant here and nothing else.

use crate::bounds::ValueRange;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const POUNDS_TO_KG: f64 = 0.453592;
pub const GRAMS_PER_KG: f64 = 1000.0;

pub const CM_PER_M: f64 = 100.0;
pub const CM_PER_INCH: f64 = 2.54;
pub const CM_PER_FOOT: f64 = 30.48;

/// A family of interchangeable units with one canonical member.
pub trait MeasureUnit:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = Error> + Serialize + Send + Sync + 'static
{
    /// Lowercase family name used in error messages ("weight")
    const QUANTITY: &'static str;
    /// Capitalized family name used in validation messages ("Weight")
    const LABEL: &'static str;
    const CANONICAL: Self;
    const ALL: &'static [Self];
    /// Accepted values, checked in whatever unit the value was given in
    const VALUE_RANGE: ValueRange;

    fn symbol(self) -> &'static str;

    /// Convert `value` expressed in `self` into the canonical unit.
    fn to_canonical(self, value: f64) -> f64;

    fn is_canonical(self) -> bool {
        self == Self::CANONICAL
    }
}

fn parse_symbol<U: MeasureUnit>(s: &str) -> Result<U> {
    U::ALL
        .iter()
        .copied()
        .find(|unit| unit.symbol() == s)
        .ok_or_else(|| Error::UnsupportedUnit {
            quantity: U::QUANTITY,
            unit: s.to_string(),
        })
}

/// Comma separated list of the symbols of a family, e.g. `kg, lb, g`.
pub fn symbols<U: MeasureUnit>() -> String {
    U::ALL
        .iter()
        .map(|unit| unit.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a raw value given with a unit symbol into the family's canonical unit.
///
/// Fails with [`Error::UnsupportedUnit`] if `symbol` is not one of the family's units.
pub fn to_canonical<U: MeasureUnit>(value: f64, symbol: &str) -> Result<f64> {
    let unit: U = symbol.parse()?;
    Ok(unit.to_canonical(value))
}

// ============================================================================
// Weight
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "g")]
    Gram,
}

impl MeasureUnit for WeightUnit {
    const QUANTITY: &'static str = "weight";
    const LABEL: &'static str = "Weight";
    const CANONICAL: Self = WeightUnit::Kilogram;
    const ALL: &'static [Self] = &[WeightUnit::Kilogram, WeightUnit::Pound, WeightUnit::Gram];
    const VALUE_RANGE: ValueRange = ValueRange::left_open(0.5, 150.0);

    fn symbol(self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lb",
            WeightUnit::Gram => "g",
        }
    }

    fn to_canonical(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kilogram => value,
            WeightUnit::Pound => value * POUNDS_TO_KG,
            WeightUnit::Gram => value / GRAMS_PER_KG,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_symbol(s)
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Length
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft")]
    Foot,
}

impl MeasureUnit for LengthUnit {
    const QUANTITY: &'static str = "length";
    const LABEL: &'static str = "Length";
    const CANONICAL: Self = LengthUnit::Centimeter;
    const ALL: &'static [Self] = &[
        LengthUnit::Centimeter,
        LengthUnit::Meter,
        LengthUnit::Inch,
        LengthUnit::Foot,
    ];
    const VALUE_RANGE: ValueRange = ValueRange::closed(30.0, 300.0);

    fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }

    fn to_canonical(self, value: f64) -> f64 {
        match self {
            LengthUnit::Centimeter => value,
            LengthUnit::Meter => value * CM_PER_M,
            LengthUnit::Inch => value * CM_PER_INCH,
            LengthUnit::Foot => value * CM_PER_FOOT,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_symbol(s)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Any family
// ============================================================================

/// A unit from any supported family, for callers that only have a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnyUnit {
    Weight(WeightUnit),
    Length(LengthUnit),
}

impl AnyUnit {
    pub fn to_canonical(self, value: f64) -> f64 {
        match self {
            AnyUnit::Weight(unit) => unit.to_canonical(value),
            AnyUnit::Length(unit) => unit.to_canonical(value),
        }
    }

    /// Symbol of the canonical unit of this unit's family
    pub fn canonical_symbol(self) -> &'static str {
        match self {
            AnyUnit::Weight(_) => WeightUnit::CANONICAL.symbol(),
            AnyUnit::Length(_) => LengthUnit::CANONICAL.symbol(),
        }
    }

    pub fn quantity(self) -> &'static str {
        match self {
            AnyUnit::Weight(_) => WeightUnit::QUANTITY,
            AnyUnit::Length(_) => LengthUnit::QUANTITY,
        }
    }
}

impl FromStr for AnyUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(unit) = s.parse::<WeightUnit>() {
            return Ok(AnyUnit::Weight(unit));
        }
        if let Ok(unit) = s.parse::<LengthUnit>() {
            return Ok(AnyUnit::Length(unit));
        }
        Err(Error::UnsupportedUnit {
            quantity: "measurement",
            unit: s.to_string(),
        })
    }
}
