use std::env;

/// Longest history fed to the indicator engine. CoinGecko serves hourly
/// samples up to this many days and daily samples beyond it.
pub const MAX_HISTORY_DAYS: u32 = 90;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CoinGecko asset id to analyze.
    pub asset_id: String,
    /// Days of hourly history fed to the indicator engine.
    pub history_days: u32,
    /// Fetch market data from CoinGecko instead of generating demo data.
    pub live_data: bool,
    /// CoinGecko API key (optional, for pro tier).
    pub coingecko_api_key: Option<String>,
    /// Seed for demo data, demo sentiment and analysis fallbacks.
    pub demo_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            asset_id: "bitcoin".to_string(),
            history_days: 30,
            live_data: false,
            coingecko_api_key: None,
            demo_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            asset_id: lookup("ASSET_ID")
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.asset_id),
            history_days: lookup("HISTORY_DAYS")
                .and_then(|d| d.parse().ok())
                .filter(|d| *d > 0)
                .map(|d: u32| d.min(MAX_HISTORY_DAYS))
                .unwrap_or(defaults.history_days),
            live_data: lookup("LIVE_DATA")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.live_data),
            coingecko_api_key: lookup("COINGECKO_API_KEY").filter(|k| !k.is_empty()),
            demo_seed: lookup("DEMO_SEED").and_then(|s| s.parse().ok()),
        }
    }

    /// Address to bind the HTTP server to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
