use std::collections::BTreeMap;

use serde::Serialize;

use super::error::ErrorKind;
use crate::quantity::{Quantity, Readings};
use crate::{DecodeSummary, ErrorCount, QuantitySummary};

/// Initial `min`, above any plausible reading.
pub const MIN_SENTINEL: f64 = 99999.0;
/// Initial `max`, below any plausible reading (temperatures can be negative).
pub const MAX_SENTINEL: f64 = -99999.0;

/// Online min/max/sum/count for one quantity, without sample history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunningStats {
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub valid_count: u32,
    pub total_count: u32,
    pub error_count: u32,
}

impl RunningStats {
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            min: MIN_SENTINEL,
            max: MAX_SENTINEL,
            valid_count: 0,
            total_count: 0,
            error_count: 0,
        }
    }

    pub fn accept(&mut self, value: f32) {
        let value = f64::from(value);
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.valid_count += 1;
    }

    pub fn record_attempt(&mut self) {
        self.total_count += 1;
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// `None` until a value has been accepted.
    pub fn mean(&self) -> Option<f64> {
        if self.valid_count == 0 {
            return None;
        }
        Some(self.sum / f64::from(self.valid_count))
    }

    pub fn observed_min(&self) -> Option<f64> {
        (self.valid_count > 0).then_some(self.min)
    }

    pub fn observed_max(&self) -> Option<f64> {
        (self.valid_count > 0).then_some(self.max)
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for one protocol: per-quantity running stats plus record
/// counters. Append-only until [`StatsAggregator::reset`].
#[derive(Debug, Clone)]
pub struct StatsAggregator {
    quantities: Vec<(Quantity, RunningStats)>,
    attempts: u32,
    valid: u32,
    errors: u32,
    errors_by_kind: BTreeMap<ErrorKind, u32>,
    checksum_mismatches: u32,
}

impl StatsAggregator {
    pub fn new(quantities: &[Quantity]) -> Self {
        Self {
            quantities: quantities
                .iter()
                .map(|quantity| (*quantity, RunningStats::new()))
                .collect(),
            attempts: 0,
            valid: 0,
            errors: 0,
            errors_by_kind: BTreeMap::new(),
            checksum_mismatches: 0,
        }
    }

    /// One decode attempt, whatever its outcome.
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
        for (_, stats) in &mut self.quantities {
            stats.record_attempt();
        }
    }

    pub fn record_error(&mut self, kind: ErrorKind) {
        self.errors += 1;
        *self.errors_by_kind.entry(kind).or_default() += 1;
        for (_, stats) in &mut self.quantities {
            stats.record_error();
        }
    }

    /// Warning-only checksum mismatch on an otherwise accepted frame.
    pub fn record_checksum_mismatch(&mut self) {
        self.checksum_mismatches += 1;
    }

    pub fn accept(&mut self, quantity: Quantity, value: f32) {
        match self.quantities.iter_mut().find(|(q, _)| *q == quantity) {
            Some((_, stats)) => stats.accept(value),
            None => {
                let mut stats = RunningStats::new();
                stats.accept(value);
                self.quantities.push((quantity, stats));
            }
        }
    }

    /// Count an accepted record and fold each of its values in.
    pub fn accept_record<R: Readings + ?Sized>(&mut self, record: &R) {
        self.valid += 1;
        for (quantity, value) in record.readings() {
            self.accept(quantity, value);
        }
    }

    pub fn get(&self, quantity: Quantity) -> Option<&RunningStats> {
        self.quantities
            .iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, stats)| stats)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn valid(&self) -> u32 {
        self.valid
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn errors_of(&self, kind: ErrorKind) -> u32 {
        self.errors_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn checksum_mismatches(&self) -> u32 {
        self.checksum_mismatches
    }

    /// Fraction of attempts that produced an accepted record.
    pub fn success_rate(&self) -> Option<f64> {
        if self.attempts == 0 {
            return None;
        }
        Some(f64::from(self.valid) / f64::from(self.attempts))
    }

    pub fn reset(&mut self) {
        let quantities: Vec<Quantity> = self.quantities.iter().map(|(q, _)| *q).collect();
        *self = Self::new(&quantities);
    }

    pub fn decode_summary(
        &self,
        discarded_lines: Option<u64>,
        dropped_bytes: Option<u64>,
    ) -> DecodeSummary {
        DecodeSummary {
            attempts: u64::from(self.attempts),
            valid: u64::from(self.valid),
            errors: u64::from(self.errors),
            success_rate: self.success_rate(),
            checksum_mismatches: u64::from(self.checksum_mismatches),
            discarded_lines,
            dropped_bytes,
            errors_by_kind: self
                .errors_by_kind
                .iter()
                .map(|(kind, count)| ErrorCount {
                    kind: kind.as_str().to_string(),
                    count: u64::from(*count),
                })
                .collect(),
        }
    }

    /// Summaries in the order quantities were registered.
    pub fn quantity_summaries(&self) -> Vec<QuantitySummary> {
        self.quantities
            .iter()
            .map(|(quantity, stats)| QuantitySummary {
                quantity: quantity.as_str().to_string(),
                unit: quantity.unit().to_string(),
                valid_count: u64::from(stats.valid_count),
                total_count: u64::from(stats.total_count),
                error_count: u64::from(stats.error_count),
                min: stats.observed_min().map(round_milli),
                max: stats.observed_max().map(round_milli),
                mean: stats.mean().map(round_micro),
            })
            .collect()
    }
}

pub(crate) fn round_milli(value: f64) -> f64 {
    (value * 1e3).round() / 1e3
}

fn round_micro(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::{MAX_SENTINEL, MIN_SENTINEL, RunningStats, StatsAggregator};
    use crate::analysis::error::ErrorKind;
    use crate::quantity::Quantity;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn running_stats_over_sequence() {
        let mut stats = RunningStats::new();
        for value in [0.1, 0.5, 0.3] {
            stats.accept(value);
        }
        assert_eq!(stats.valid_count, 3);
        assert!(approx(stats.min, 0.1));
        assert!(approx(stats.max, 0.5));
        assert!(approx(stats.mean().unwrap(), 0.3));
    }

    #[test]
    fn empty_stats_have_no_mean() {
        let stats = RunningStats::new();
        assert_eq!(stats.min, MIN_SENTINEL);
        assert_eq!(stats.max, MAX_SENTINEL);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.observed_min(), None);
        assert_eq!(stats.observed_max(), None);
    }

    #[test]
    fn negative_values_update_max() {
        let mut stats = RunningStats::new();
        stats.accept(-12.5);
        stats.accept(-3.0);
        assert_eq!(stats.observed_max(), Some(-3.0));
        assert_eq!(stats.observed_min(), Some(-12.5));
    }

    #[test]
    fn aggregator_accept_by_quantity() {
        let mut agg = StatsAggregator::new(&Quantity::FRAME);
        for value in [0.1, 0.5, 0.3] {
            agg.record_attempt();
            agg.accept(Quantity::Tvoc, value);
        }
        let tvoc = agg.get(Quantity::Tvoc).unwrap();
        assert_eq!(tvoc.valid_count, 3);
        assert_eq!(tvoc.total_count, 3);
        assert!(approx(tvoc.mean().unwrap(), 0.3));
        assert_eq!(agg.get(Quantity::Co2).unwrap().valid_count, 0);
    }

    #[test]
    fn counters_and_success_rate() {
        let mut agg = StatsAggregator::new(&Quantity::LINE);
        assert_eq!(agg.success_rate(), None);

        agg.record_attempt();
        agg.record_error(ErrorKind::UnrecognizedFormat);
        agg.record_attempt();
        agg.record_error(ErrorKind::MalformedNumber);
        agg.record_attempt();
        agg.accept(Quantity::Humidity, 50.0);
        agg.accept(Quantity::Temperature, 20.0);
        agg.record_attempt();
        agg.record_error(ErrorKind::UnrecognizedFormat);

        assert_eq!(agg.attempts(), 4);
        assert_eq!(agg.errors(), 3);
        assert_eq!(agg.errors_of(ErrorKind::UnrecognizedFormat), 2);
        let humidity = agg.get(Quantity::Humidity).unwrap();
        assert_eq!(humidity.error_count, 3);
        assert_eq!(humidity.total_count, 4);
    }

    #[test]
    fn reset_clears_everything_but_keeps_quantities() {
        let mut agg = StatsAggregator::new(&Quantity::FRAME);
        agg.record_attempt();
        agg.accept(Quantity::Co2, 1.0);
        agg.record_checksum_mismatch();
        agg.reset();
        assert_eq!(agg.attempts(), 0);
        assert_eq!(agg.checksum_mismatches(), 0);
        assert_eq!(agg.get(Quantity::Co2).unwrap().valid_count, 0);
        assert_eq!(agg.quantity_summaries().len(), 3);
    }

    #[test]
    fn summaries_omit_empty_extremes() {
        let mut agg = StatsAggregator::new(&Quantity::FRAME);
        agg.record_attempt();
        agg.accept(Quantity::Tvoc, 0.25);
        let summaries = agg.quantity_summaries();
        assert_eq!(summaries[0].quantity, "tvoc");
        assert_eq!(summaries[0].min, Some(0.25));
        assert_eq!(summaries[1].quantity, "ch2o");
        assert_eq!(summaries[1].min, None);
        assert_eq!(summaries[1].mean, None);
    }

    #[test]
    fn decode_summary_lists_kinds_in_stable_order() {
        let mut agg = StatsAggregator::new(&Quantity::FRAME);
        agg.record_attempt();
        agg.record_error(ErrorKind::Timeout);
        agg.record_attempt();
        agg.record_error(ErrorKind::FrameNotFound);
        let summary = agg.decode_summary(None, Some(4));
        let kinds: Vec<&str> = summary
            .errors_by_kind
            .iter()
            .map(|entry| entry.kind.as_str())
            .collect();
        assert_eq!(kinds, vec!["frame_not_found", "timeout"]);
        assert_eq!(summary.success_rate, Some(0.0));
        assert_eq!(summary.dropped_bytes, Some(4));
    }
}
