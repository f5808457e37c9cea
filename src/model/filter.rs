use serde::{Deserialize, Serialize};

pub const DEFAULT_PRICE_THRESHOLD: f64 = 0.01;

/// User-selected filter toggles for the token list.
///
/// Persisted as JSON under the `token_filter_state` key. Decoding is
/// tolerant of partial shapes: a persisted record missing fields is merged
/// over the defaults rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Show only tokens flagged as newly created.
    pub is_new: bool,
    /// Show only tokens flagged as pro/verified.
    pub is_pro: bool,
    /// Enable the minimum-price predicate.
    pub price_above_threshold: bool,
    /// Minimum price in USD, only consulted when the toggle is on.
    pub price_threshold: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            is_new: false,
            is_pro: false,
            price_above_threshold: false,
            price_threshold: DEFAULT_PRICE_THRESHOLD,
        }
    }
}

/// The three boolean toggles, addressable for UI dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanFilter {
    IsNew,
    IsPro,
    PriceAboveThreshold,
}

impl FilterState {
    pub fn toggle(&mut self, filter: BooleanFilter) {
        match filter {
            BooleanFilter::IsNew => self.is_new = !self.is_new,
            BooleanFilter::IsPro => self.is_pro = !self.is_pro,
            BooleanFilter::PriceAboveThreshold => {
                self.price_above_threshold = !self.price_above_threshold
            }
        }
    }

    pub fn set_price_threshold(&mut self, threshold: f64) {
        self.price_threshold = threshold.max(0.0);
    }
}
