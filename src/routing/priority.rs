// src/routing/priority.rs
//! Per-request executor ordering.

use crate::config::settings::Config;
use crate::dex::quote::{ExecutorId, ExecutorKind, SwapParams};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashSet;

/// Tuning knobs for the ordering heuristics. All of them are configuration;
/// none is individually load-bearing.
#[derive(Debug, Clone)]
pub struct RoutingThresholds {
    /// Below this amount the aggregator is tried last.
    pub small_trade_threshold: u64,
    /// Tokens younger than this are often unindexed by the aggregator.
    pub fresh_token_age_ms: u64,
    /// Below this liquidity single-hop backends go first.
    pub low_liquidity_usd: f64,
    pub stable_mints: HashSet<Pubkey>,
}

impl Default for RoutingThresholds {
    fn default() -> Self {
        Self::from_config(&Config::test_default())
    }
}

impl RoutingThresholds {
    pub fn from_config(config: &Config) -> Self {
        Self {
            small_trade_threshold: config.small_trade_threshold,
            fresh_token_age_ms: config.fresh_token_age_ms,
            low_liquidity_usd: config.low_liquidity_usd,
            stable_mints: config.stable_mints.iter().copied().collect(),
        }
    }

    pub fn is_small_trade(&self, amount: u64) -> bool {
        amount < self.small_trade_threshold
    }

    pub fn is_fresh(&self, token_age_ms: Option<u64>) -> bool {
        token_age_ms.map_or(false, |age| age < self.fresh_token_age_ms)
    }

    pub fn is_low_liquidity(&self, liquidity_usd: Option<f64>) -> bool {
        liquidity_usd.map_or(false, |usd| usd < self.low_liquidity_usd)
    }

    pub fn is_stable_pair(&self, params: &SwapParams) -> bool {
        self.stable_mints.contains(&params.input_mint)
            && self.stable_mints.contains(&params.output_mint)
    }
}

/// One routing decision. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub order: Vec<ExecutorId>,
    pub skip: HashSet<ExecutorId>,
    /// Set on low liquidity. Only affects `order`; the walk still takes the
    /// first usable quote.
    pub prefer_single_hop: bool,
}

impl RouteConfig {
    /// Executors to attempt, in order, with the skip set applied.
    pub fn attempt_order(&self) -> impl Iterator<Item = ExecutorId> + '_ {
        self.order.iter().copied().filter(move |id| !self.skip.contains(id))
    }
}

/// Derives the executor order for one request from `base`, which lists every
/// registered executor in its default priority.
///
/// Rules apply in sequence, each a stable partition of the previous order:
/// stable/stable pairs put order books first; low liquidity or a fresh token
/// puts single-hop AMMs first; small trades or a fresh token push the
/// aggregator to the back.
pub fn route_config(
    base: &[(ExecutorId, ExecutorKind)],
    params: &SwapParams,
    token_age_ms: Option<u64>,
    liquidity_usd: Option<f64>,
    thresholds: &RoutingThresholds,
    disabled: &HashSet<ExecutorId>,
) -> RouteConfig {
    let mut ranked: Vec<(ExecutorId, ExecutorKind)> = base.to_vec();

    let fresh = thresholds.is_fresh(token_age_ms);
    let low_liquidity = thresholds.is_low_liquidity(liquidity_usd);

    if thresholds.is_stable_pair(params) {
        ranked.sort_by_key(|(_, kind)| *kind != ExecutorKind::OrderBook);
    }
    if low_liquidity || fresh {
        ranked.sort_by_key(|(_, kind)| *kind != ExecutorKind::DirectAmm);
    }
    if fresh || thresholds.is_small_trade(params.amount) {
        ranked.sort_by_key(|(_, kind)| *kind == ExecutorKind::Aggregator);
    }

    RouteConfig {
        order: ranked.into_iter().map(|(id, _)| id).collect(),
        skip: disabled.clone(),
        prefer_single_hop: low_liquidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{USDC_MINT, USDT_MINT, WSOL_MINT};
    use pretty_assertions::assert_eq;

    fn base() -> Vec<(ExecutorId, ExecutorKind)> {
        vec![
            (ExecutorId::Jupiter, ExecutorKind::Aggregator),
            (ExecutorId::Raydium, ExecutorKind::DirectAmm),
            (ExecutorId::Orca, ExecutorKind::DirectAmm),
            (ExecutorId::Phoenix, ExecutorKind::OrderBook),
            (ExecutorId::OpenBook, ExecutorKind::OrderBook),
        ]
    }

    fn order(params: &SwapParams, age: Option<u64>, liquidity: Option<f64>) -> RouteConfig {
        route_config(
            &base(),
            params,
            age,
            liquidity,
            &RoutingThresholds::default(),
            &HashSet::new(),
        )
    }

    #[test]
    fn large_trade_without_hints_keeps_base_order() {
        let params = SwapParams::new(WSOL_MINT, USDC_MINT, 100_000_000, 50);
        let config = order(&params, None, None);
        assert_eq!(config.order, ExecutorId::ALL.to_vec());
        assert!(!config.prefer_single_hop);
    }

    #[test]
    fn small_trade_moves_aggregator_last() {
        let params = SwapParams::new(WSOL_MINT, USDC_MINT, 10_000, 50);
        let config = order(&params, None, None);
        assert_eq!(
            config.order,
            vec![
                ExecutorId::Raydium,
                ExecutorId::Orca,
                ExecutorId::Phoenix,
                ExecutorId::OpenBook,
                ExecutorId::Jupiter,
            ]
        );
    }

    #[test]
    fn stable_pair_prefers_order_books() {
        let params = SwapParams::new(USDC_MINT, USDT_MINT, 100_000_000, 5);
        let config = order(&params, None, None);
        assert_eq!(config.order[0], ExecutorId::Phoenix);
        assert_eq!(config.order[1], ExecutorId::OpenBook);
        assert_eq!(config.order[2], ExecutorId::Jupiter);
    }

    #[test]
    fn low_liquidity_forces_single_hop_first() {
        let params = SwapParams::new(USDC_MINT, USDT_MINT, 100_000_000, 5);
        let config = order(&params, None, Some(1_000.0));
        assert_eq!(config.order[0], ExecutorId::Raydium);
        assert_eq!(config.order[1], ExecutorId::Orca);
        assert!(config.prefer_single_hop);
    }

    #[test]
    fn fresh_token_puts_direct_amms_first_and_aggregator_last() {
        let params = SwapParams::new(WSOL_MINT, USDC_MINT, 100_000_000, 50);
        let config = order(&params, Some(60_000), None);
        assert_eq!(config.order.first(), Some(&ExecutorId::Raydium));
        assert_eq!(config.order.last(), Some(&ExecutorId::Jupiter));
    }

    #[test]
    fn disabled_executors_are_skipped() {
        let params = SwapParams::new(WSOL_MINT, USDC_MINT, 100_000_000, 50);
        let disabled: HashSet<ExecutorId> = [ExecutorId::Orca].into_iter().collect();
        let config = route_config(
            &base(),
            &params,
            None,
            None,
            &RoutingThresholds::default(),
            &disabled,
        );
        let attempted: Vec<ExecutorId> = config.attempt_order().collect();
        assert!(!attempted.contains(&ExecutorId::Orca));
        assert_eq!(attempted.len(), 4);
    }
}
