use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical quantity measured by one of the supported sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Relative humidity (line protocol).
    Humidity,
    /// Air temperature (line protocol).
    Temperature,
    /// Total volatile organic compounds (frame protocol).
    Tvoc,
    /// Formaldehyde, CH₂O (frame protocol).
    Ch2o,
    /// Carbon dioxide (frame protocol).
    Co2,
}

impl Quantity {
    pub const LINE: [Quantity; 2] = [Quantity::Humidity, Quantity::Temperature];
    pub const FRAME: [Quantity; 3] = [Quantity::Tvoc, Quantity::Ch2o, Quantity::Co2];

    /// Stable identifier used in reports and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Quantity::Humidity => "humidity",
            Quantity::Temperature => "temperature",
            Quantity::Tvoc => "tvoc",
            Quantity::Ch2o => "ch2o",
            Quantity::Co2 => "co2",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Humidity => "%RH",
            Quantity::Temperature => "°C",
            Quantity::Tvoc | Quantity::Ch2o | Quantity::Co2 => "mg/m³",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded record exposing its measured values in a fixed order.
///
/// Validation, aggregation and publishing all walk these pairs, so both
/// protocols share one downstream path.
pub trait Readings {
    fn readings(&self) -> Vec<(Quantity, f32)>;
}

#[cfg(test)]
mod tests {
    use super::Quantity;

    #[test]
    fn names_are_snake_case_and_stable() {
        assert_eq!(Quantity::Ch2o.as_str(), "ch2o");
        assert_eq!(Quantity::Tvoc.to_string(), "tvoc");
        let json = serde_json::to_string(&Quantity::Co2).unwrap();
        assert_eq!(json, "\"co2\"");
    }

    #[test]
    fn concentration_units_match() {
        for quantity in Quantity::FRAME {
            assert_eq!(quantity.unit(), "mg/m³");
        }
        assert_eq!(Quantity::Humidity.unit(), "%RH");
    }
}
