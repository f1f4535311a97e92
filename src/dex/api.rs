// src/dex/api.rs

use crate::dex::quote::{ExecutorId, ExecutorKind, Quote, SwapParams, SwapResult};
use crate::error::{Result, RouterError};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use solana_sdk::pubkey::Pubkey;

/// One quote backend: capability test, quote fetch, transaction build.
///
/// Implementors provide `fetch_quote`; callers use `quote`, which enforces the
/// executor boundary: zero-output, empty-route and (for single-hop backends)
/// multi-hop quotes never leave it, and every failure collapses to `None`
/// with a logged reason.
#[async_trait]
pub trait SwapExecutor: Send + Sync {
    fn id(&self) -> ExecutorId;

    fn kind(&self) -> ExecutorKind;

    /// Cheap local predicate. Must never perform I/O.
    fn can_handle(&self, params: &SwapParams) -> bool;

    /// Raw backend call. May fail for any reason.
    async fn fetch_quote(&self, params: &SwapParams) -> Result<Quote>;

    async fn quote(&self, params: &SwapParams) -> Option<Quote> {
        let screened = match self.fetch_quote(params).await {
            Ok(quote) => screen_quote(self.id(), self.kind(), quote),
            Err(e) => Err(e),
        };

        match screened {
            Ok(quote) => Some(quote),
            Err(RouterError::NoRoute(reason)) => {
                debug!("{} has no route: {}", self.id(), reason);
                None
            }
            Err(e) if e.is_recoverable() => {
                info!("{} quote failed transiently: {}", self.id(), e);
                None
            }
            Err(e) if e.is_backend_local() => {
                warn!("{} quote failed: {}", self.id(), e);
                None
            }
            Err(e) => {
                error!("{} rejected the request: {}", self.id(), e);
                None
            }
        }
    }

    /// Builds a signable transaction from `quote`. Backends that cannot build
    /// a valid transaction keep this default and always return `None`.
    async fn build_transaction(&self, _quote: &Quote, _wallet: &Pubkey) -> Option<SwapResult> {
        None
    }
}

/// Applies the executor-boundary checks to a freshly fetched quote.
pub fn screen_quote(id: ExecutorId, kind: ExecutorKind, mut quote: Quote) -> Result<Quote> {
    if quote.out_amount == 0 {
        return Err(RouterError::NoRoute(format!("{} quoted zero output", id)));
    }
    if quote.route_plan.is_empty() {
        return Err(RouterError::NoRoute(format!("{} returned an empty route plan", id)));
    }
    if kind.single_hop_only() && quote.hop_count() > 1 {
        return Err(RouterError::InvalidResponse(format!(
            "{} is single-hop only but quoted {} hops",
            id,
            quote.hop_count()
        )));
    }
    quote.source = id;
    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::quote::RouteHop;
    use crate::utils::{USDC_MINT, WSOL_MINT};

    fn hop() -> RouteHop {
        RouteHop {
            pool: "pool".to_string(),
            label: "Raydium".to_string(),
            input_mint: WSOL_MINT,
            output_mint: USDC_MINT,
            in_amount: 10,
            out_amount: 9,
            percent: 100,
        }
    }

    fn quote(out_amount: u64, hops: usize) -> Quote {
        Quote {
            source: ExecutorId::Jupiter,
            input_mint: WSOL_MINT,
            output_mint: USDC_MINT,
            in_amount: 10,
            out_amount,
            price_impact: 0.0,
            slippage_bps: 50,
            route_plan: (0..hops).map(|_| hop()).collect(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn zero_output_is_no_route() {
        let result = screen_quote(ExecutorId::Jupiter, ExecutorKind::Aggregator, quote(0, 1));
        assert!(matches!(result, Err(RouterError::NoRoute(_))));
    }

    #[test]
    fn empty_route_is_no_route() {
        let result = screen_quote(ExecutorId::Jupiter, ExecutorKind::Aggregator, quote(9, 0));
        assert!(matches!(result, Err(RouterError::NoRoute(_))));
    }

    #[test]
    fn direct_amm_rejects_multi_hop() {
        let result = screen_quote(ExecutorId::Raydium, ExecutorKind::DirectAmm, quote(9, 2));
        assert!(matches!(result, Err(RouterError::InvalidResponse(_))));

        let ok = screen_quote(ExecutorId::Raydium, ExecutorKind::DirectAmm, quote(9, 1)).unwrap();
        assert_eq!(ok.source, ExecutorId::Raydium);
    }

    #[test]
    fn aggregator_accepts_multi_hop() {
        assert!(screen_quote(ExecutorId::Jupiter, ExecutorKind::Aggregator, quote(9, 3)).is_ok());
    }
}
