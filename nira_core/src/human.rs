//! The `Human` record: identity, body size and the metrics derived from them.

use crate::bounds::ValueRange;
use crate::{Error, Result, ValidationError};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Oldest accepted date of birth, in days before today (150 years of 365.25 days)
pub const MAX_AGE_DAYS: i64 = 54_787;

pub const WEIGHT_RANGE_KG: ValueRange = ValueRange::left_open(0.5, 500.0);
pub const HEIGHT_RANGE_CM: ValueRange = ValueRange::closed(30.0, 300.0);

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// Gender
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Undisclosed,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Undisclosed => "undisclosed",
        }
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "undisclosed" => Ok(Gender::Undisclosed),
            _ => Err(ValidationError::new(
                "gender",
                "Gender must be one of: male, female, undisclosed",
            )
            .into()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// BMI
// ============================================================================

/// WHO adult BMI classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Field validation
// ============================================================================

fn validate_name(name: &str) -> std::result::Result<String, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new(
            "name",
            "String should have at least 1 character",
        ));
    }
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            "name",
            "Name cannot be empty or just whitespace",
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_date_of_birth(
    date_of_birth: NaiveDate,
    today: NaiveDate,
) -> std::result::Result<(), ValidationError> {
    if date_of_birth > today {
        return Err(ValidationError::new(
            "date_of_birth",
            "Date of birth cannot be later than today",
        ));
    }
    if let Some(earliest) = today.checked_sub_signed(Duration::days(MAX_AGE_DAYS)) {
        if date_of_birth < earliest {
            return Err(ValidationError::new(
                "date_of_birth",
                "Date of birth cannot be more than 150 years ago",
            ));
        }
    }
    Ok(())
}

fn validate_weight(weight: f64) -> std::result::Result<(), ValidationError> {
    if !WEIGHT_RANGE_KG.contains(weight) {
        return Err(ValidationError::new(
            "weight",
            format!("Weight must be {}", WEIGHT_RANGE_KG.describe("kg")),
        ));
    }
    Ok(())
}

fn validate_height(height: f64) -> std::result::Result<(), ValidationError> {
    if !HEIGHT_RANGE_CM.contains(height) {
        return Err(ValidationError::new(
            "height",
            format!("Height must be {}", HEIGHT_RANGE_CM.describe("cm")),
        ));
    }
    Ok(())
}

// ============================================================================
// Human
// ============================================================================

/// Wire form of a human, before validation.
///
/// `date_of_birth` is accepted as `dd-mm-yyyy` or ISO `yyyy-mm-dd`.
#[derive(Clone, Debug, Deserialize)]
pub struct HumanRecord {
    pub name: String,
    pub gender: String,
    #[serde(deserialize_with = "dmy_date::deserialize")]
    pub date_of_birth: NaiveDate,
    pub weight: f64,
    pub height: f64,
}

/// A validated person record. Weight is in kilograms, height in centimeters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HumanRecord")]
pub struct Human {
    name: String,
    gender: Gender,
    #[serde(serialize_with = "dmy_date::serialize")]
    date_of_birth: NaiveDate,
    weight: f64,
    height: f64,
}

impl Human {
    /// Validate and build a record, judging the date of birth against today.
    pub fn new(
        name: &str,
        gender: Gender,
        date_of_birth: NaiveDate,
        weight: f64,
        height: f64,
    ) -> Result<Self> {
        Self::new_as_of(name, gender, date_of_birth, weight, height, today())
    }

    /// Same as [`Human::new`] with an explicit reference date for "today".
    pub fn new_as_of(
        name: &str,
        gender: Gender,
        date_of_birth: NaiveDate,
        weight: f64,
        height: f64,
        today: NaiveDate,
    ) -> Result<Self> {
        let name = validate_name(name)?;
        validate_date_of_birth(date_of_birth, today)?;
        validate_weight(weight)?;
        validate_height(height)?;

        Ok(Self {
            name,
            gender,
            date_of_birth,
            weight,
            height,
        })
    }

    /// Build from an unvalidated record, parsing the gender string.
    pub fn from_record(record: HumanRecord, today: NaiveDate) -> Result<Self> {
        let name = validate_name(&record.name)?;
        let gender: Gender = record.gender.parse()?;
        Self::new_as_of(
            &name,
            gender,
            record.date_of_birth,
            record.weight,
            record.height,
            today,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Replace the weight. On failure the record keeps its old value.
    pub fn set_weight(&mut self, weight: f64) -> Result<()> {
        validate_weight(weight)?;
        self.weight = weight;
        Ok(())
    }

    /// Replace the height. On failure the record keeps its old value.
    pub fn set_height(&mut self, height: f64) -> Result<()> {
        validate_height(height)?;
        self.height = height;
        Ok(())
    }

    /// Age in completed years as of today
    pub fn age(&self) -> u32 {
        self.age_on(today())
    }

    /// Age in completed years as of `date`
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        let birth = self.date_of_birth;
        let mut years = date.year() - birth.year();
        if (date.month(), date.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }

    /// Body mass index rounded to two decimals
    pub fn bmi(&self) -> f64 {
        let height_m = self.height / 100.0;
        round_to_hundredths(self.weight / (height_m * height_m))
    }

    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }
}

impl TryFrom<HumanRecord> for Human {
    type Error = Error;

    fn try_from(record: HumanRecord) -> Result<Self> {
        Self::from_record(record, today())
    }
}

/// `dd-mm-yyyy` date format used for dates of birth on the wire
mod dmy_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d-%m-%Y";
    const ISO_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(&raw, ISO_FORMAT))
            .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", raw, e)))
    }
}
