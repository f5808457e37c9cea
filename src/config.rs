use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub retry: RetryConfig,
    pub refresh: RefreshConfig,
    pub simulation: SimulationConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub token_list_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dev-screener-api.assetdash.com".to_string(),
            token_list_path: "/moby_screener/leaderboard/degen_list".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub refetch_interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            refetch_interval_ms: 10_000,
        }
    }
}

impl RefreshConfig {
    pub fn refetch_interval(&self) -> Duration {
        Duration::from_millis(self.refetch_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub interval_ms: u64,
    pub min_tokens_per_tick: usize,
    pub max_tokens_per_tick: usize,
    /// Max fractional price move per tick (0.15 = +/-15%).
    pub max_price_change: f64,
    pub volume_multiplier_min: f64,
    pub volume_multiplier_max: f64,
    pub decay: TimeDecayFactors,
}

/// Per-horizon weight applied to the previous price-change value before the
/// tick's contribution is blended in. The 5m horizon has no memory (full
/// replacement), so it carries no factor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeDecayFactors {
    pub m30: f64,
    pub h1: f64,
    pub h4: f64,
    pub h8: f64,
    pub h24: f64,
}

impl Default for TimeDecayFactors {
    fn default() -> Self {
        Self {
            m30: 0.9,
            h1: 0.8,
            h4: 0.7,
            h8: 0.6,
            h24: 0.5,
        }
    }
}

impl TimeDecayFactors {
    fn all(&self) -> [f64; 5] {
        [self.m30, self.h1, self.h4, self.h8, self.h24]
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval_ms: 10_000,
            min_tokens_per_tick: 3,
            max_tokens_per_tick: 8,
            max_price_change: 0.15,
            volume_multiplier_min: 1.0,
            volume_multiplier_max: 1.3,
            decay: TimeDecayFactors::default(),
        }
    }
}

impl SimulationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
    /// Cosmetic delay before a load-more completes, so a spinner can render.
    pub load_more_delay_ms: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            load_more_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        if self.retry.base_delay_ms == 0 || self.retry.base_delay_ms > self.retry.max_delay_ms {
            bail!(
                "retry delays invalid: base {}ms, max {}ms",
                self.retry.base_delay_ms,
                self.retry.max_delay_ms
            );
        }
        if self.simulation.min_tokens_per_tick > self.simulation.max_tokens_per_tick {
            bail!(
                "simulation.min_tokens_per_tick ({}) exceeds max_tokens_per_tick ({})",
                self.simulation.min_tokens_per_tick,
                self.simulation.max_tokens_per_tick
            );
        }
        if !(0.0..=1.0).contains(&self.simulation.max_price_change) {
            bail!(
                "simulation.max_price_change must be within [0, 1], got {}",
                self.simulation.max_price_change
            );
        }
        if self.simulation.volume_multiplier_min > self.simulation.volume_multiplier_max
            || self.simulation.volume_multiplier_min < 0.0
        {
            bail!(
                "simulation volume multiplier range invalid: [{}, {}]",
                self.simulation.volume_multiplier_min,
                self.simulation.volume_multiplier_max
            );
        }
        if self
            .simulation
            .decay
            .all()
            .iter()
            .any(|f| !(0.0..=1.0).contains(f))
        {
            bail!("simulation.decay factors must each be within [0, 1]");
        }
        if self.pagination.page_size == 0 {
            bail!("pagination.page_size must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retry.attempts, 3);
        assert_eq!(config.refresh.refetch_interval_ms, 10_000);
        assert_eq!(config.simulation.min_tokens_per_tick, 3);
        assert_eq!(config.simulation.max_tokens_per_tick, 8);
        assert!((config.simulation.max_price_change - 0.15).abs() < f64::EPSILON);
        assert_eq!(config.pagination.page_size, 50);
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let toml_str = r#"
[api]
base_url = "https://screener.example.com"

[simulation]
min_tokens_per_tick = 150
max_tokens_per_tick = 200
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://screener.example.com");
        assert_eq!(
            config.api.token_list_path,
            "/moby_screener/leaderboard/degen_list"
        );
        assert_eq!(config.simulation.min_tokens_per_tick, 150);
        assert_eq!(config.simulation.max_tokens_per_tick, 200);
        assert_eq!(config.pagination.page_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_ranges() {
        let mut config = Config::default();
        config.simulation.min_tokens_per_tick = 10;
        config.simulation.max_tokens_per_tick = 5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.retry.base_delay_ms = 60_000;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.max_price_change = 1.5;
        assert!(config.validate().is_err());
    }
}
