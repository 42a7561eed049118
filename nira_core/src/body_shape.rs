//! Body-shape circumferences.
//!
//! [`BodyShapeMeasurements`] bundles up to five optional length measurements.
//! Construction normalizes every present measurement to centimeters and then
//! checks it against the anatomical range for that body part. Absent
//! measurements are left alone. Construction either succeeds as a whole or
//! returns the first violation; no partially normalized value escapes.
//!
//! Inputs are taken by value, so normalization never touches a measurement the
//! caller still holds.

use crate::bounds::ValueRange;
use crate::measurement::LengthMeasurement;
use crate::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Body part a circumference was taken around
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Circumference {
    Neck,
    Waist,
    Hip,
    Wrist,
    Forearm,
}

impl Circumference {
    pub const ALL: [Circumference; 5] = [
        Circumference::Neck,
        Circumference::Waist,
        Circumference::Hip,
        Circumference::Wrist,
        Circumference::Forearm,
    ];

    /// Field name in the wire format
    pub fn field(self) -> &'static str {
        match self {
            Circumference::Neck => "neck_circumference",
            Circumference::Waist => "waist_circumference",
            Circumference::Hip => "hip_circumference",
            Circumference::Wrist => "wrist_circumference",
            Circumference::Forearm => "forearm_circumference",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Circumference::Neck => "Neck circumference",
            Circumference::Waist => "Waist circumference",
            Circumference::Hip => "Hip circumference",
            Circumference::Wrist => "Wrist circumference",
            Circumference::Forearm => "Forearm circumference",
        }
    }

    /// Plausible range in centimeters, if this body part has one.
    ///
    /// The lower ends for waist, hip and wrist sit below the 30 cm minimum of
    /// a length measurement and cannot currently be hit.
    pub fn anatomical_range(self) -> Option<ValueRange> {
        match self {
            Circumference::Neck => Some(ValueRange::closed(8.0, 60.0)),
            Circumference::Waist => Some(ValueRange::closed(20.0, 150.0)),
            Circumference::Hip => Some(ValueRange::closed(20.0, 200.0)),
            Circumference::Wrist => Some(ValueRange::closed(5.0, 40.0)),
            Circumference::Forearm => None,
        }
    }
}

/// Unvalidated set of circumferences, as supplied by a caller or read off the wire
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BodyShapeInput {
    #[serde(default)]
    pub neck_circumference: Option<LengthMeasurement>,
    #[serde(default)]
    pub waist_circumference: Option<LengthMeasurement>,
    #[serde(default)]
    pub hip_circumference: Option<LengthMeasurement>,
    #[serde(default)]
    pub wrist_circumference: Option<LengthMeasurement>,
    #[serde(default)]
    pub forearm_circumference: Option<LengthMeasurement>,
}

/// Validated circumferences, every present one in centimeters
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BodyShapeInput")]
pub struct BodyShapeMeasurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    neck_circumference: Option<LengthMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    waist_circumference: Option<LengthMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hip_circumference: Option<LengthMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wrist_circumference: Option<LengthMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forearm_circumference: Option<LengthMeasurement>,
}

fn normalize_and_check(
    part: Circumference,
    measurement: Option<LengthMeasurement>,
) -> Result<Option<LengthMeasurement>> {
    let mut measurement = match measurement {
        Some(m) => m,
        None => return Ok(None),
    };

    measurement.normalize_to_cm();

    if let Some(range) = part.anatomical_range() {
        let cm = measurement.convert_to_cm();
        if !range.contains(cm) {
            tracing::debug!("{} of {} cm outside {}", part.label(), cm, range);
            return Err(ValidationError::new(
                part.field(),
                format!("{} must be {}", part.label(), range.describe("cm")),
            )
            .into());
        }
    }

    Ok(Some(measurement))
}

impl BodyShapeMeasurements {
    pub fn new(input: BodyShapeInput) -> Result<Self> {
        Ok(Self {
            neck_circumference: normalize_and_check(
                Circumference::Neck,
                input.neck_circumference,
            )?,
            waist_circumference: normalize_and_check(
                Circumference::Waist,
                input.waist_circumference,
            )?,
            hip_circumference: normalize_and_check(Circumference::Hip, input.hip_circumference)?,
            wrist_circumference: normalize_and_check(
                Circumference::Wrist,
                input.wrist_circumference,
            )?,
            forearm_circumference: normalize_and_check(
                Circumference::Forearm,
                input.forearm_circumference,
            )?,
        })
    }

    pub fn neck_circumference(&self) -> Option<&LengthMeasurement> {
        self.neck_circumference.as_ref()
    }

    pub fn waist_circumference(&self) -> Option<&LengthMeasurement> {
        self.waist_circumference.as_ref()
    }

    pub fn hip_circumference(&self) -> Option<&LengthMeasurement> {
        self.hip_circumference.as_ref()
    }

    pub fn wrist_circumference(&self) -> Option<&LengthMeasurement> {
        self.wrist_circumference.as_ref()
    }

    pub fn forearm_circumference(&self) -> Option<&LengthMeasurement> {
        self.forearm_circumference.as_ref()
    }

    pub fn get(&self, part: Circumference) -> Option<&LengthMeasurement> {
        match part {
            Circumference::Neck => self.neck_circumference(),
            Circumference::Waist => self.waist_circumference(),
            Circumference::Hip => self.hip_circumference(),
            Circumference::Wrist => self.wrist_circumference(),
            Circumference::Forearm => self.forearm_circumference(),
        }
    }

    /// Present measurements in field order
    pub fn iter(&self) -> impl Iterator<Item = (Circumference, &LengthMeasurement)> + '_ {
        Circumference::ALL
            .into_iter()
            .filter_map(move |part| self.get(part).map(|m| (part, m)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl TryFrom<BodyShapeInput> for BodyShapeMeasurements {
    type Error = Error;

    fn try_from(input: BodyShapeInput) -> Result<Self> {
        Self::new(input)
    }
}
