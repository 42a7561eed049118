#![forbid(unsafe_code)]

//! Body attribute and measurement schemas for the Nira backend.
//!
//! This crate provides:
//! - The `Human` record with age and BMI
//! - Weight and length measurements with unit conversion
//! - Body-shape circumferences with anatomical range checks
//! - Config and logging setup for the command-line tools

pub mod error;
pub mod bounds;
pub mod units;
pub mod measurement;
pub mod body_shape;
pub mod human;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use bounds::ValueRange;
pub use units::{AnyUnit, LengthUnit, MeasureUnit, WeightUnit};
pub use measurement::{BaseMeasurement, LengthMeasurement, Measurement, WeightMeasurement};
pub use body_shape::{BodyShapeInput, BodyShapeMeasurements, Circumference};
pub use human::{BmiCategory, Gender, Human};
pub use config::{Config, OutputFormat};
