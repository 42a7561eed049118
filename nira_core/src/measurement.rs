//! Timestamped scalar measurements.
//!
//! [`BaseMeasurement`] is the untyped contract: a date, a time of day, a
//! non-negative value and a free-form unit. [`Measurement`] layers a unit
//! family on top of it, which restricts the unit and adds the family's value
//! range. [`WeightMeasurement`] and [`LengthMeasurement`] are the two families
//! in use.
//!
//! All constructors validate eagerly, and deserialization goes through the same
//! constructors, so a value of any of these types is always valid.

use crate::units::{symbols, LengthUnit, MeasureUnit, WeightUnit};
use crate::{Error, Result, ValidationError};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

/// Wire form of a measurement, before validation
#[derive(Clone, Debug, Deserialize)]
pub struct MeasurementRecord {
    pub measurement_date: NaiveDate,
    pub measurement_time: NaiveTime,
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Shared value rule for every measurement: finite and not negative.
fn validate_value(value: f64) -> std::result::Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(
            "value",
            "Measurement value must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(ValidationError::new(
            "value",
            "Measurement value must be non-negative",
        ));
    }
    Ok(())
}

fn seconds_since_midnight(time: NaiveTime) -> chrono::Duration {
    chrono::Duration::seconds(i64::from(time.num_seconds_from_midnight()))
}

// ============================================================================
// Base measurement
// ============================================================================

/// A measurement with an unrestricted unit
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaseMeasurement {
    measurement_date: NaiveDate,
    measurement_time: NaiveTime,
    value: f64,
    unit: String,
}

impl BaseMeasurement {
    pub fn new(
        measurement_date: NaiveDate,
        measurement_time: NaiveTime,
        value: f64,
        unit: impl Into<String>,
    ) -> Result<Self> {
        validate_value(value)?;
        Ok(Self {
            measurement_date,
            measurement_time,
            value,
            unit: unit.into(),
        })
    }

    pub fn measurement_date(&self) -> NaiveDate {
        self.measurement_date
    }

    pub fn measurement_time(&self) -> NaiveTime {
        self.measurement_time
    }

    /// Time of the measurement as an offset from midnight
    pub fn time_since_midnight(&self) -> chrono::Duration {
        seconds_since_midnight(self.measurement_time)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl TryFrom<MeasurementRecord> for BaseMeasurement {
    type Error = Error;

    fn try_from(record: MeasurementRecord) -> Result<Self> {
        let unit = record
            .unit
            .ok_or_else(|| ValidationError::new("unit", "Field required"))?;
        Self::new(
            record.measurement_date,
            record.measurement_time,
            record.value,
            unit,
        )
    }
}

impl<'de> Deserialize<'de> for BaseMeasurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = MeasurementRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Typed measurements
// ============================================================================

/// A measurement whose unit belongs to the family `U`.
///
/// On top of the base rules the value must lie in `U::VALUE_RANGE`, checked in
/// the unit it was given in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement<U> {
    measurement_date: NaiveDate,
    measurement_time: NaiveTime,
    value: f64,
    unit: U,
}

pub type WeightMeasurement = Measurement<WeightUnit>;
pub type LengthMeasurement = Measurement<LengthUnit>;

impl<U: MeasureUnit> Measurement<U> {
    pub fn new(
        measurement_date: NaiveDate,
        measurement_time: NaiveTime,
        value: f64,
        unit: U,
    ) -> Result<Self> {
        validate_value(value)?;
        if !U::VALUE_RANGE.contains(value) {
            return Err(ValidationError::new(
                "value",
                format!(
                    "{} value must be {}",
                    U::LABEL,
                    U::VALUE_RANGE.describe("")
                ),
            )
            .into());
        }

        Ok(Self {
            measurement_date,
            measurement_time,
            value,
            unit,
        })
    }

    /// Construct with the family's canonical unit (kg, cm)
    pub fn with_default_unit(
        measurement_date: NaiveDate,
        measurement_time: NaiveTime,
        value: f64,
    ) -> Result<Self> {
        Self::new(measurement_date, measurement_time, value, U::CANONICAL)
    }

    /// Construct from a unit symbol. An unknown symbol is a validation failure
    /// on the `unit` field.
    pub fn parse(
        measurement_date: NaiveDate,
        measurement_time: NaiveTime,
        value: f64,
        unit: &str,
    ) -> Result<Self> {
        let unit = unit.parse::<U>().map_err(|_| {
            ValidationError::new(
                "unit",
                format!(
                    "Unit must be one of: {} (got '{}')",
                    symbols::<U>(),
                    unit
                ),
            )
        })?;
        Self::new(measurement_date, measurement_time, value, unit)
    }

    pub fn measurement_date(&self) -> NaiveDate {
        self.measurement_date
    }

    pub fn measurement_time(&self) -> NaiveTime {
        self.measurement_time
    }

    /// Time of the measurement as an offset from midnight
    pub fn time_since_midnight(&self) -> chrono::Duration {
        seconds_since_midnight(self.measurement_time)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> U {
        self.unit
    }

    /// Value expressed in the canonical unit. Does not modify `self`.
    pub fn to_canonical(&self) -> f64 {
        self.unit.to_canonical(self.value)
    }

    /// Copy of this measurement expressed in the canonical unit.
    ///
    /// The family's value range is not re-checked: it applies to values as
    /// entered, not to converted ones.
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        copy.normalize();
        copy
    }

    /// Convert value and unit to the canonical unit in place. Idempotent.
    pub fn normalize(&mut self) {
        if self.unit.is_canonical() {
            return;
        }
        let converted = self.to_canonical();
        tracing::debug!(
            "Normalized {} measurement {} {} -> {} {}",
            U::QUANTITY,
            self.value,
            self.unit,
            converted,
            U::CANONICAL
        );
        self.value = converted;
        self.unit = U::CANONICAL;
    }

    /// Untyped view of this measurement
    pub fn to_base(&self) -> BaseMeasurement {
        BaseMeasurement {
            measurement_date: self.measurement_date,
            measurement_time: self.measurement_time,
            value: self.value,
            unit: self.unit.symbol().to_string(),
        }
    }
}

impl Measurement<WeightUnit> {
    pub fn convert_to_kg(&self) -> f64 {
        self.to_canonical()
    }

    pub fn normalize_to_kg(&mut self) {
        self.normalize()
    }
}

impl Measurement<LengthUnit> {
    pub fn convert_to_cm(&self) -> f64 {
        self.to_canonical()
    }

    pub fn normalize_to_cm(&mut self) {
        self.normalize()
    }
}

impl<U: MeasureUnit> TryFrom<MeasurementRecord> for Measurement<U> {
    type Error = Error;

    fn try_from(record: MeasurementRecord) -> Result<Self> {
        match record.unit {
            Some(unit) => Self::parse(
                record.measurement_date,
                record.measurement_time,
                record.value,
                &unit,
            ),
            None => Self::with_default_unit(
                record.measurement_date,
                record.measurement_time,
                record.value,
            ),
        }
    }
}

impl<'de, U: MeasureUnit> Deserialize<'de> for Measurement<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = MeasurementRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(serde::de::Error::custom)
    }
}
