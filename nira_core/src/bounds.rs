//! Numeric ranges used by field validation.

use std::fmt;

/// A numeric interval with an inclusive upper bound and an inclusive or
/// exclusive lower bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub min_exclusive: bool,
}

impl ValueRange {
    /// `[min, max]`
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: false,
        }
    }

    /// `(min, max]`
    pub const fn left_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
        }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        above_min && value <= self.max
    }

    /// Human-readable form of the range with `unit` appended to both ends,
    /// e.g. `between 8 cm and 60 cm`.
    pub fn describe(&self, unit: &str) -> String {
        let suffix = if unit.is_empty() {
            String::new()
        } else {
            format!(" {}", unit)
        };
        if self.min_exclusive {
            format!(
                "greater than {}{} and at most {}{}",
                self.min, suffix, self.max, suffix
            )
        } else {
            format!("between {}{} and {}{}", self.min, suffix, self.max, suffix)
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min_exclusive { '(' } else { '[' };
        write!(f, "{}{}, {}]", open, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_range_includes_both_ends() {
        let range = ValueRange::closed(8.0, 60.0);
        assert!(range.contains(8.0));
        assert!(range.contains(60.0));
        assert!(!range.contains(7.99));
        assert!(!range.contains(60.01));
    }

    #[test]
    fn test_left_open_range_excludes_min() {
        let range = ValueRange::left_open(0.5, 150.0);
        assert!(!range.contains(0.5));
        assert!(range.contains(0.51));
        assert!(range.contains(150.0));
        assert!(!range.contains(150.5));
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(!ValueRange::closed(0.0, 1.0).contains(f64::NAN));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            ValueRange::closed(8.0, 60.0).describe("cm"),
            "between 8 cm and 60 cm"
        );
        assert_eq!(
            ValueRange::left_open(0.5, 150.0).describe(""),
            "greater than 0.5 and at most 150"
        );
        assert_eq!(ValueRange::left_open(0.5, 500.0).to_string(), "(0.5, 500]");
    }
}
