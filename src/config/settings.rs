use crate::dex::clients::jupiter::{JUPITER_QUOTE_URLS, JUPITER_SWAP_URLS};
use crate::dex::clients::raydium::RAYDIUM_COMPUTE_URLS;
use crate::dex::quote::ExecutorId;
use crate::error::RouterError;
use crate::utils::{USDC_MINT, USDT_MINT};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub jupiter_quote_urls: Vec<String>,
    pub jupiter_swap_urls: Vec<String>,
    pub raydium_api_urls: Vec<String>,
    pub orca_quote_urls: Vec<String>,
    pub order_book_quote_urls: Vec<String>,
    pub quote_timeout_ms: u64,
    pub build_timeout_ms: u64,
    pub quote_cache_ttl_secs: u64,
    pub quote_cache_max_entries: usize,
    pub small_trade_threshold: u64,
    pub fresh_token_age_ms: u64,
    pub low_liquidity_usd: f64,
    pub aggregator_dust_floor: u64,
    pub stable_mints: Vec<Pubkey>,
    pub disabled_executors: Vec<ExecutorId>,
    pub max_concurrent_requests: usize,
    pub compute_unit_price_micro_lamports: Option<u64>,
    pub log_level: String,
}

fn url_list(name: &str, defaults: &[&str]) -> Vec<String> {
    env::var(name)
        .ok()
        .map(|s| {
            s.split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_else(|| defaults.iter().map(|s| s.to_string()).collect())
}

fn parsed<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        // Venue-restricted quotes go through the same Jupiter-compatible /quote shape.
        let jupiter_quote_urls = url_list("JUPITER_QUOTE_URLS", JUPITER_QUOTE_URLS);
        let venue_defaults: Vec<&str> = jupiter_quote_urls.iter().map(String::as_str).collect();

        Config {
            orca_quote_urls: url_list("ORCA_QUOTE_URLS", &venue_defaults),
            order_book_quote_urls: url_list("ORDER_BOOK_QUOTE_URLS", &venue_defaults),
            jupiter_swap_urls: url_list("JUPITER_SWAP_URLS", JUPITER_SWAP_URLS),
            raydium_api_urls: url_list("RAYDIUM_API_URLS", RAYDIUM_COMPUTE_URLS),
            jupiter_quote_urls,
            quote_timeout_ms: parsed("QUOTE_TIMEOUT_MS", 8_000),
            build_timeout_ms: parsed("BUILD_TIMEOUT_MS", 15_000),
            quote_cache_ttl_secs: parsed("QUOTE_CACHE_TTL_SECS", 15),
            quote_cache_max_entries: parsed("QUOTE_CACHE_MAX_ENTRIES", 1_000),
            small_trade_threshold: parsed("SMALL_TRADE_THRESHOLD", 1_000_000),
            fresh_token_age_ms: parsed("FRESH_TOKEN_AGE_MS", 30 * 60 * 1_000),
            low_liquidity_usd: parsed("LOW_LIQUIDITY_USD", 50_000.0),
            aggregator_dust_floor: parsed("AGGREGATOR_DUST_FLOOR", 1_000),
            stable_mints: env::var("STABLE_MINTS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .filter_map(|part| Pubkey::from_str(part.trim()).ok())
                        .collect()
                })
                .unwrap_or_else(|| vec![USDC_MINT, USDT_MINT]),
            disabled_executors: env::var("DISABLED_EXECUTORS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .filter(|part| !part.trim().is_empty())
                        .filter_map(|part| part.parse().ok())
                        .collect()
                })
                .unwrap_or_default(),
            max_concurrent_requests: parsed("MAX_CONCURRENT_REQUESTS", 16),
            compute_unit_price_micro_lamports: env::var("COMPUTE_UNIT_PRICE_MICRO_LAMPORTS")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Configuration with public default endpoints and reference thresholds,
    /// independent of the process environment.
    pub fn test_default() -> Self {
        let jupiter_quote_urls: Vec<String> =
            JUPITER_QUOTE_URLS.iter().map(|s| s.to_string()).collect();
        Config {
            orca_quote_urls: jupiter_quote_urls.clone(),
            order_book_quote_urls: jupiter_quote_urls.clone(),
            jupiter_quote_urls,
            jupiter_swap_urls: JUPITER_SWAP_URLS.iter().map(|s| s.to_string()).collect(),
            raydium_api_urls: RAYDIUM_COMPUTE_URLS.iter().map(|s| s.to_string()).collect(),
            quote_timeout_ms: 8_000,
            build_timeout_ms: 15_000,
            quote_cache_ttl_secs: 15,
            quote_cache_max_entries: 1_000,
            small_trade_threshold: 1_000_000,
            fresh_token_age_ms: 30 * 60 * 1_000,
            low_liquidity_usd: 50_000.0,
            aggregator_dust_floor: 1_000,
            stable_mints: vec![USDC_MINT, USDT_MINT],
            disabled_executors: Vec::new(),
            max_concurrent_requests: 16,
            compute_unit_price_micro_lamports: None,
            log_level: "info".to_string(),
        }
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_millis(self.quote_timeout_ms)
    }

    pub fn build_timeout(&self) -> Duration {
        Duration::from_millis(self.build_timeout_ms)
    }

    pub fn quote_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.quote_cache_ttl_secs)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }

    pub fn is_enabled(&self, id: ExecutorId) -> bool {
        !self.disabled_executors.contains(&id)
    }

    pub fn validate(&self) -> Result<(), RouterError> {
        if self.quote_timeout_ms == 0 || self.build_timeout_ms == 0 {
            return Err(RouterError::Config("timeouts must be greater than zero".to_string()));
        }
        if self.quote_cache_max_entries == 0 {
            return Err(RouterError::Config(
                "QUOTE_CACHE_MAX_ENTRIES must be greater than zero".to_string(),
            ));
        }
        // The authorized builder is needed even when its quotes are disabled.
        if self.jupiter_quote_urls.is_empty() || self.jupiter_swap_urls.is_empty() {
            return Err(RouterError::Config(
                "JUPITER_QUOTE_URLS and JUPITER_SWAP_URLS cannot be empty".to_string(),
            ));
        }
        let endpoint_lists = [
            (ExecutorId::Raydium, "RAYDIUM_API_URLS", &self.raydium_api_urls),
            (ExecutorId::Orca, "ORCA_QUOTE_URLS", &self.orca_quote_urls),
            (ExecutorId::Phoenix, "ORDER_BOOK_QUOTE_URLS", &self.order_book_quote_urls),
            (ExecutorId::OpenBook, "ORDER_BOOK_QUOTE_URLS", &self.order_book_quote_urls),
        ];
        for (id, name, urls) in endpoint_lists {
            if self.is_enabled(id) && urls.is_empty() {
                return Err(RouterError::Config(format!("{} cannot be empty while {} is enabled", name, id)));
            }
        }
        let all_urls = self
            .jupiter_quote_urls
            .iter()
            .chain(&self.jupiter_swap_urls)
            .chain(&self.raydium_api_urls)
            .chain(&self.orca_quote_urls)
            .chain(&self.order_book_quote_urls);
        for raw in all_urls {
            url::Url::parse(raw)
                .map_err(|e| RouterError::Config(format!("invalid endpoint URL '{}': {}", raw, e)))?;
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        log::info!("Application Configuration Loaded: {:?}", self);
        if !self.disabled_executors.is_empty() {
            log::info!("Disabled executors: {:?}", self.disabled_executors);
        }
    }
}
