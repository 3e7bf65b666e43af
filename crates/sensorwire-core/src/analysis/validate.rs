use thiserror::Error;

use crate::config::RangeLimits;
use crate::quantity::{Quantity, Readings};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("{quantity} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        quantity: Quantity,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Rejects physically impossible readings.
///
/// A record passes only if every value lies inside its inclusive bounds; the
/// first offending value rejects the whole record.
#[derive(Debug, Clone, Default)]
pub struct RangeValidator {
    limits: RangeLimits,
}

impl RangeValidator {
    pub fn new(limits: RangeLimits) -> Self {
        Self { limits }
    }

    pub fn check(&self, quantity: Quantity, value: f32) -> Result<(), RangeError> {
        let bounds = self.limits.bounds(quantity);
        if bounds.contains(value) {
            Ok(())
        } else {
            Err(RangeError::OutOfRange {
                quantity,
                value,
                min: bounds.min,
                max: bounds.max,
            })
        }
    }

    pub fn validate<R: Readings + ?Sized>(&self, record: &R) -> Result<(), RangeError> {
        record
            .readings()
            .into_iter()
            .try_for_each(|(quantity, value)| self.check(quantity, value))
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeError, RangeValidator};
    use crate::protocols::frame::FrameRecord;
    use crate::protocols::line::LineRecord;
    use crate::quantity::Quantity;

    fn frame_record(tvoc: f32, ch2o: f32, co2: f32) -> FrameRecord {
        FrameRecord {
            tvoc_mg_m3: tvoc,
            ch2o_mg_m3: ch2o,
            co2_mg_m3: co2,
            valid: true,
            timestamp: 0,
            checksum_mismatch: None,
        }
    }

    #[test]
    fn tvoc_upper_bound_is_inclusive() {
        let validator = RangeValidator::default();
        assert!(validator.validate(&frame_record(10.0, 0.0, 0.0)).is_ok());
        let err = validator
            .validate(&frame_record(10.001, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            RangeError::OutOfRange {
                quantity: Quantity::Tvoc,
                ..
            }
        ));
    }

    #[test]
    fn formaldehyde_and_co2_limits() {
        let validator = RangeValidator::default();
        assert!(validator.validate(&frame_record(0.0, 2.0, 10.0)).is_ok());
        assert!(validator.validate(&frame_record(0.0, 2.001, 0.0)).is_err());
        assert!(validator.validate(&frame_record(0.0, 0.0, 10.5)).is_err());
        assert!(validator.validate(&frame_record(-0.1, 0.0, 0.0)).is_err());
    }

    #[test]
    fn first_offending_field_is_reported() {
        let validator = RangeValidator::default();
        let err = validator
            .validate(&frame_record(0.5, 3.0, 11.0))
            .unwrap_err();
        let RangeError::OutOfRange {
            quantity, value, ..
        } = err;
        assert_eq!(quantity, Quantity::Ch2o);
        assert_eq!(value, 3.0);
    }

    #[test]
    fn nan_is_rejected() {
        let validator = RangeValidator::default();
        assert!(validator.check(Quantity::Co2, f32::NAN).is_err());
    }

    #[test]
    fn line_records_use_humidity_and_temperature_limits() {
        let validator = RangeValidator::default();
        let ok = LineRecord {
            humidity_percent: 100.0,
            temperature_celsius: -40.0,
        };
        assert!(validator.validate(&ok).is_ok());
        let wet = LineRecord {
            humidity_percent: 100.5,
            temperature_celsius: 20.0,
        };
        assert!(validator.validate(&wet).is_err());
    }
}
