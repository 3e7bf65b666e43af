//! Air-quality grading of concentration readings.
//!
//! Thresholds are inclusive upper bounds in mg/m³; a value above the last
//! threshold grades as `severe`. Readings are widened to `f64` before the
//! comparison, so a scaled raw 300 (0.3f32 rounds up) grades `good`.
//! Humidity and temperature are not graded.

use serde::Serialize;

use super::stats::round_milli;
use crate::quantity::{Quantity, Readings};
use crate::{ReadingSummary, ReadingValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    Moderate,
    Poor,
    Severe,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Moderate => "moderate",
            Grade::Poor => "poor",
            Grade::Severe => "severe",
        }
    }
}

const TVOC_THRESHOLDS: [f64; 4] = [0.3, 0.6, 1.0, 3.0];
const CH2O_THRESHOLDS: [f64; 4] = [0.08, 0.10, 0.12, 0.15];
const CO2_THRESHOLDS: [f64; 4] = [0.7, 1.0, 1.8, 2.7];

const GRADES: [Grade; 4] = [Grade::Excellent, Grade::Good, Grade::Moderate, Grade::Poor];

pub fn grade(quantity: Quantity, value: f32) -> Option<Grade> {
    let thresholds = match quantity {
        Quantity::Tvoc => TVOC_THRESHOLDS,
        Quantity::Ch2o => CH2O_THRESHOLDS,
        Quantity::Co2 => CO2_THRESHOLDS,
        Quantity::Humidity | Quantity::Temperature => return None,
    };
    let value = f64::from(value);
    let grade = thresholds
        .iter()
        .zip(GRADES)
        .find(|(threshold, _)| value <= **threshold)
        .map(|(_, grade)| grade)
        .unwrap_or(Grade::Severe);
    Some(grade)
}

pub(crate) fn build_reading_summary<R: Readings + ?Sized>(
    record: &R,
    timestamp_ms: Option<u64>,
) -> ReadingSummary {
    ReadingSummary {
        timestamp_ms,
        values: record
            .readings()
            .into_iter()
            .map(|(quantity, value)| ReadingValue {
                quantity: quantity.as_str().to_string(),
                unit: quantity.unit().to_string(),
                value: round_milli(f64::from(value)),
                grade: grade(quantity, value).map(|grade| grade.as_str().to_string()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Grade, build_reading_summary, grade};
    use crate::protocols::frame::layout::MILLI_SCALE;
    use crate::protocols::line::LineRecord;
    use crate::quantity::Quantity;

    #[test]
    fn tvoc_grades_use_inclusive_thresholds() {
        assert_eq!(grade(Quantity::Tvoc, 0.29), Some(Grade::Excellent));
        assert_eq!(grade(Quantity::Tvoc, 0.31), Some(Grade::Good));
        assert_eq!(grade(Quantity::Tvoc, 1.0), Some(Grade::Moderate));
        assert_eq!(grade(Quantity::Tvoc, 2.5), Some(Grade::Poor));
        assert_eq!(grade(Quantity::Tvoc, 3.5), Some(Grade::Severe));
    }

    #[test]
    fn scaled_boundary_readings_compare_in_double_precision() {
        let scaled = |raw: u16| f32::from(raw) / MILLI_SCALE;
        assert_eq!(grade(Quantity::Tvoc, scaled(300)), Some(Grade::Good));
        assert_eq!(grade(Quantity::Ch2o, scaled(100)), Some(Grade::Moderate));
        assert_eq!(grade(Quantity::Co2, scaled(2700)), Some(Grade::Severe));
    }

    #[test]
    fn formaldehyde_and_co2_grades() {
        assert_eq!(grade(Quantity::Ch2o, 0.05), Some(Grade::Excellent));
        assert_eq!(grade(Quantity::Ch2o, 0.14), Some(Grade::Poor));
        assert_eq!(grade(Quantity::Ch2o, 0.2), Some(Grade::Severe));
        assert_eq!(grade(Quantity::Co2, 1.5), Some(Grade::Moderate));
        assert_eq!(grade(Quantity::Co2, 3.0), Some(Grade::Severe));
    }

    #[test]
    fn climate_quantities_are_not_graded() {
        assert_eq!(grade(Quantity::Humidity, 50.0), None);
        let summary = build_reading_summary(
            &LineRecord {
                humidity_percent: 70.0,
                temperature_celsius: 32.4,
            },
            None,
        );
        assert_eq!(summary.values.len(), 2);
        assert_eq!(summary.values[1].value, 32.4);
        assert!(summary.values.iter().all(|value| value.grade.is_none()));
    }
}
