//! Forecast confidence
//!
//! Confidence starts from the least certain variable income source and decays
//! linearly with distance from the current month, down to a floor. It is
//! metadata for display and never feeds back into the dollar projection.

use crate::config::ConfidenceSettings;
use crate::models::{IncomeKind, IncomeSource};

use super::round_half_up;

#[derive(Debug, Clone)]
pub struct ConfidenceModel {
    decay_per_month: f64,
    floor: f64,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self::new(&ConfidenceSettings::default())
    }
}

impl ConfidenceModel {
    pub fn new(settings: &ConfidenceSettings) -> Self {
        Self {
            decay_per_month: settings.decay_per_month,
            floor: settings.floor,
        }
    }

    /// Lowest confidence among variable income sources, capped at 100
    ///
    /// 100 when there is no variable income. Variable sources without a usable
    /// confidence contribute nothing to the projection and are ignored here.
    pub fn income_confidence(income_sources: &[IncomeSource]) -> f64 {
        income_sources
            .iter()
            .filter(|s| s.kind == IncomeKind::Variable)
            .filter_map(|s| s.confidence)
            .filter(|c| c.is_finite())
            .fold(100.0, f64::min)
    }

    /// Percentage retained `month_index` months out
    pub fn decay(&self, month_index: usize) -> f64 {
        (100.0 - month_index as f64 * self.decay_per_month).max(self.floor)
    }

    /// Confidence for a month given a precomputed income confidence
    pub fn confidence_for(&self, income_confidence: f64, month_index: usize) -> u8 {
        let raw = round_half_up(income_confidence * self.decay(month_index) / 100.0);
        raw.clamp(0, 100) as u8
    }

    /// Confidence (0-100) for month `month_index` of the horizon
    pub fn month_confidence(&self, income_sources: &[IncomeSource], month_index: usize) -> u8 {
        self.confidence_for(Self::income_confidence(income_sources), month_index)
    }
}
