use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{SimulationConfig, TimeDecayFactors};
use crate::model::{TimeSeriesData, Token};

/// Client-side random-walk price simulation.
///
/// Each tick perturbs a random subset of tokens: price moves by a uniform
/// fractional delta, market cap is re-derived from supply where possible,
/// change percentages decay-blend the delta across horizons, and volumes get
/// independent near-1 multipliers (wider for short horizons). Tokens without
/// a price are never touched.
pub struct PriceSimulator {
    config: SimulationConfig,
    rng: StdRng,
}

impl PriceSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run one tick over `tokens`. Returns `None` when nothing changed
    /// (empty list or a zero-sized draw), so callers can skip a redundant
    /// update downstream.
    pub fn tick(&mut self, tokens: &[Token]) -> Option<Vec<Token>> {
        if tokens.is_empty() {
            return None;
        }

        let min = self.config.min_tokens_per_tick.min(tokens.len());
        let max = self.config.max_tokens_per_tick.min(tokens.len());
        let count = if min >= max {
            max
        } else {
            self.rng.gen_range(min..=max)
        };
        if count == 0 {
            return None;
        }

        let chosen = rand::seq::index::sample(&mut self.rng, tokens.len(), count);
        let mut updated = tokens.to_vec();
        for index in chosen {
            let token = &mut updated[index];
            if token.price_usd.is_none() {
                continue;
            }
            self.perturb(token);
        }
        Some(updated)
    }

    fn perturb(&mut self, token: &mut Token) {
        let price = match token.price_usd {
            Some(p) => p,
            None => return,
        };

        let m = self.config.max_price_change;
        let delta = self.rng.gen_range(-m..=m);
        let new_price = price * (1.0 + delta);

        token.price_usd = Some(new_price);
        token.market_cap_usd = match token.total_supply {
            Some(supply) => Some(new_price * supply),
            None => token.market_cap_usd,
        };
        token.price_change_percent = token
            .price_change_percent
            .map(|current| blend_price_change(&current, delta, &self.config.decay));
        token.volume_usd = token
            .volume_usd
            .map(|current| self.perturb_volume(&current));
    }

    fn perturb_volume(&mut self, current: &TimeSeriesData) -> TimeSeriesData {
        let (lo, hi) = (
            self.config.volume_multiplier_min,
            self.config.volume_multiplier_max,
        );
        TimeSeriesData {
            m5: Some(current.m5.unwrap_or(0.0) * self.draw(lo, hi)),
            m30: Some(current.m30.unwrap_or(0.0) * self.draw(0.9, 1.1)),
            h1: Some(current.h1.unwrap_or(0.0) * self.draw(0.95, 1.05)),
            h4: Some(current.h4.unwrap_or(0.0) * self.draw(0.98, 1.02)),
            h8: Some(current.h8.unwrap_or(0.0) * self.draw(0.99, 1.01)),
            h24: Some(current.h24.unwrap_or(0.0) * self.draw(0.995, 1.005)),
        }
    }

    fn draw(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            lo
        } else {
            self.rng.gen_range(lo..hi)
        }
    }
}

/// Decay-blend the tick's delta into the change horizons. The 5m horizon is
/// fully replaced by the new delta; longer horizons keep more of their
/// history and take a smaller immediate contribution.
fn blend_price_change(
    current: &TimeSeriesData,
    delta: f64,
    decay: &TimeDecayFactors,
) -> TimeSeriesData {
    TimeSeriesData {
        m5: Some(delta * 100.0),
        m30: Some(current.m30.unwrap_or(0.0) * decay.m30 + delta * 10.0),
        h1: Some(current.h1.unwrap_or(0.0) * decay.h1 + delta * 5.0),
        h4: Some(current.h4.unwrap_or(0.0) * decay.h4 + delta * 2.0),
        h8: Some(current.h8.unwrap_or(0.0) * decay.h8 + delta * 1.0),
        h24: Some(current.h24.unwrap_or(0.0) * decay.h24 + delta * 0.5),
    }
}
