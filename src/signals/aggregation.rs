//! Per-category signal counts.

use serde::Serialize;

use crate::models::signal::{SignalCategory, SignalValue};
use crate::signals::normalization::classify;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalTally {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

impl SignalTally {
    pub fn record(&mut self, category: SignalCategory) {
        match category {
            SignalCategory::Buy => self.buy += 1,
            SignalCategory::Sell => self.sell += 1,
            SignalCategory::Hold => self.hold += 1,
        }
    }

    pub fn count(&self, category: SignalCategory) -> usize {
        match category {
            SignalCategory::Buy => self.buy,
            SignalCategory::Sell => self.sell,
            SignalCategory::Hold => self.hold,
        }
    }

    pub fn total(&self) -> usize {
        self.buy + self.sell + self.hold
    }

    /// Largest single-category count.
    pub fn max(&self) -> usize {
        self.buy.max(self.sell).max(self.hold)
    }

    /// Category with the largest count; BUY, then SELL, then HOLD on ties.
    pub fn leader(&self) -> SignalCategory {
        SignalCategory::ALL
            .into_iter()
            .find(|c| self.count(*c) == self.max())
            .unwrap_or_default()
    }
}

/// Classify every present signal and count the categories. Absent signals are skipped.
pub fn tally_signals<'a>(signals: impl IntoIterator<Item = &'a SignalValue>) -> SignalTally {
    let mut tally = SignalTally::default();
    for signal in signals.into_iter().filter(|s| s.is_present()) {
        tally.record(classify(signal));
    }
    tally
}
