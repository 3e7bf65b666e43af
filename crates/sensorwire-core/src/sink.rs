//! Telemetry sinks receiving accepted readings.

use crate::quantity::Quantity;

/// Receives every value of every accepted record, in record order.
pub trait TelemetrySink {
    fn publish(&mut self, quantity: Quantity, value: f32);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn publish(&mut self, _quantity: Quantity, _value: f32) {}
}

impl TelemetrySink for Vec<(Quantity, f32)> {
    fn publish(&mut self, quantity: Quantity, value: f32) {
        self.push((quantity, value));
    }
}

impl<F> TelemetrySink for F
where
    F: FnMut(Quantity, f32),
{
    fn publish(&mut self, quantity: Quantity, value: f32) {
        self(quantity, value);
    }
}
