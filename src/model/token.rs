use serde::{Deserialize, Serialize};

/// Metric values over the six tracked time horizons.
///
/// Individual horizons may be absent in API payloads; consumers treat an
/// absent horizon as 0.0 when blending and as sort-last when ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeriesData {
    pub m5: Option<f64>,
    pub m30: Option<f64>,
    pub h1: Option<f64>,
    pub h4: Option<f64>,
    pub h8: Option<f64>,
    pub h24: Option<f64>,
}

/// One tradable token as delivered by the screener API.
///
/// `token_address` is the stable identity key across refetches and simulated
/// updates. Numeric market fields are optional throughout; a token with an
/// absent `price_usd` is never shown and never mutated by the simulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_address: String,
    #[serde(default)]
    pub token_symbol: String,
    #[serde(default)]
    pub token_icon: Option<String>,
    #[serde(default)]
    pub token_created: Option<i64>,
    #[serde(default)]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub market_cap_usd: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub price_change_percent: Option<TimeSeriesData>,
    #[serde(default)]
    pub volume_usd: Option<TimeSeriesData>,
    #[serde(default)]
    pub liquidity_usd: Option<f64>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_pump: bool,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default)]
    pub is_bonk: bool,
    #[serde(default)]
    pub is_believe: bool,
    #[serde(default)]
    pub is_xstocks: Option<bool>,
    #[serde(default)]
    pub is_ray: bool,
    #[serde(default)]
    pub antirug_score: Option<f64>,
    #[serde(default)]
    pub launchpad: Option<String>,
}

impl Token {
    /// 24h trading volume, the horizon the volume sort keys on.
    pub fn volume_h24(&self) -> Option<f64> {
        self.volume_usd.and_then(|v| v.h24)
    }

    /// Symbol for ordering purposes: empty counts as absent.
    pub fn sortable_symbol(&self) -> Option<&str> {
        let s = self.token_symbol.trim();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }
}

pub type TokenList = Vec<Token>;
