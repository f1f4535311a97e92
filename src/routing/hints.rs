// src/routing/hints.rs
//! Best-effort routing hints from external collaborators (token metadata,
//! liquidity estimates). Quoting never waits on them beyond a short timeout.

use crate::dex::quote::SwapParams;
use crate::error::Result;
use async_trait::async_trait;
use log::debug;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_HINT_TIMEOUT: Duration = Duration::from_millis(750);

#[async_trait]
pub trait RoutingHints: Send + Sync {
    /// Age of the mint in milliseconds, if known.
    async fn token_age_ms(&self, mint: &Pubkey) -> Result<Option<u64>>;

    /// Estimated USD liquidity for the pair, if known.
    async fn liquidity_usd(&self, input_mint: &Pubkey, output_mint: &Pubkey) -> Result<Option<f64>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedHints {
    pub token_age_ms: Option<u64>,
    pub liquidity_usd: Option<f64>,
}

async fn bounded<T>(limit: Duration, what: &str, call: impl std::future::Future<Output = Result<Option<T>>>) -> Option<T> {
    match timeout(limit, call).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            debug!("{} hint unavailable: {}", what, e);
            None
        }
        Err(_) => {
            debug!("{} hint timed out after {:?}", what, limit);
            None
        }
    }
}

/// Resolves every hint for `params` concurrently. The pair's age is the age of
/// its younger mint. Failures and timeouts yield `None`.
pub async fn resolve_hints(hints: &dyn RoutingHints, params: &SwapParams, limit: Duration) -> ResolvedHints {
    let (input_age, output_age, liquidity_usd) = tokio::join!(
        bounded(limit, "input token age", hints.token_age_ms(&params.input_mint)),
        bounded(limit, "output token age", hints.token_age_ms(&params.output_mint)),
        bounded(
            limit,
            "liquidity",
            hints.liquidity_usd(&params.input_mint, &params.output_mint)
        ),
    );

    let token_age_ms = match (input_age, output_age) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    ResolvedHints {
        token_age_ms,
        liquidity_usd,
    }
}
