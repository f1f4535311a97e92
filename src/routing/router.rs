// src/routing/router.rs

use crate::cache::{CacheConfig, QuoteCache};
use crate::config::settings::Config;
use crate::dex::{self, api::SwapExecutor, quote::{ExecutorId, ExecutorKind, Quote, SwapParams, SwapResult}};
use crate::error::{Result, RouterError};
use crate::routing::execution::{ExecutionDelegate, AUTHORIZED_BUILDER};
use crate::routing::hints::{resolve_hints, RoutingHints, DEFAULT_HINT_TIMEOUT};
use crate::routing::priority::{route_config, RouteConfig, RoutingThresholds};
use futures::future::join_all;
use log::{debug, info, warn};
use solana_sdk::pubkey::Pubkey;
use std::{collections::HashMap, collections::HashSet, sync::Arc, time::Duration};

/// Owns the executor set, the quote cache and the execution delegate.
pub struct QuoteRouter {
    executors: HashMap<ExecutorId, Arc<dyn SwapExecutor>>,
    /// Registration order, the default priority.
    base: Vec<(ExecutorId, ExecutorKind)>,
    cache: Arc<QuoteCache>,
    delegate: ExecutionDelegate,
    thresholds: RoutingThresholds,
    disabled: HashSet<ExecutorId>,
    hints: Option<Arc<dyn RoutingHints>>,
    hint_timeout: Duration,
}

impl QuoteRouter {
    /// `executors` must include the authorized builder. Their order is the
    /// default priority; a later duplicate id replaces an earlier one.
    pub fn new(
        executors: Vec<Arc<dyn SwapExecutor>>,
        cache: Arc<QuoteCache>,
        thresholds: RoutingThresholds,
    ) -> Result<Self> {
        let mut table: HashMap<ExecutorId, Arc<dyn SwapExecutor>> = HashMap::new();
        let mut base = Vec::new();
        for executor in executors {
            let id = executor.id();
            if table.insert(id, Arc::clone(&executor)).is_none() {
                base.push((id, executor.kind()));
            }
        }

        let builder = table.get(&AUTHORIZED_BUILDER).cloned().ok_or_else(|| {
            RouterError::Config(format!("{} executor is required to build transactions", AUTHORIZED_BUILDER))
        })?;
        let delegate = ExecutionDelegate::new(builder)?;

        info!(
            "🧭 Quote router ready with {} executor(s): {:?}",
            base.len(),
            base.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>()
        );

        Ok(Self {
            executors: table,
            base,
            cache,
            delegate,
            thresholds,
            disabled: HashSet::new(),
            hints: None,
            hint_timeout: DEFAULT_HINT_TIMEOUT,
        })
    }

    /// Wires the configured executors, cache and thresholds.
    pub fn from_config(config: &Config) -> Result<Self> {
        let executors = dex::build_executors(config)?;
        let cache = Arc::new(QuoteCache::new(CacheConfig {
            ttl: config.quote_cache_ttl(),
            max_entries: config.quote_cache_max_entries,
        }));
        Ok(Self::new(executors, cache, RoutingThresholds::from_config(config))?
            .with_disabled(config.disabled_executors.iter().copied()))
    }

    pub fn with_disabled(mut self, disabled: impl IntoIterator<Item = ExecutorId>) -> Self {
        self.disabled.extend(disabled);
        self
    }

    pub fn with_hints(mut self, hints: Arc<dyn RoutingHints>, timeout: Duration) -> Self {
        self.hints = Some(hints);
        self.hint_timeout = timeout;
        self
    }

    pub fn cache(&self) -> &Arc<QuoteCache> {
        &self.cache
    }

    pub fn route_config(
        &self,
        params: &SwapParams,
        token_age_ms: Option<u64>,
        liquidity_usd: Option<f64>,
    ) -> RouteConfig {
        route_config(
            &self.base,
            params,
            token_age_ms,
            liquidity_usd,
            &self.thresholds,
            &self.disabled,
        )
    }

    /// First usable quote in priority order, or `None` when no executor has a
    /// route. Executors are attempted strictly one after another.
    pub async fn best_quote(
        &self,
        params: &SwapParams,
        token_age_ms: Option<u64>,
        liquidity_usd: Option<f64>,
    ) -> Option<Quote> {
        if let Err(e) = params.validate() {
            warn!("Rejecting quote request: {}", e);
            return None;
        }

        let fingerprint = params.fingerprint();
        if let Some(quote) = self.cache.get(&fingerprint).await {
            return Some(quote);
        }

        let config = self.route_config(params, token_age_ms, liquidity_usd);
        debug!(
            "Route order for {}: {:?} (prefer single hop: {})",
            fingerprint, config.order, config.prefer_single_hop
        );

        for id in config.attempt_order() {
            let Some(executor) = self.executors.get(&id) else {
                continue;
            };
            if !executor.can_handle(params) {
                debug!("{} cannot handle {}", id, fingerprint);
                continue;
            }
            let Some(quote) = executor.quote(params).await else {
                continue;
            };
            if !quote.is_routable() {
                continue;
            }

            info!("✅ Best quote from {}: {} -> {}", id, quote.in_amount, quote.out_amount);
            self.cache.insert(fingerprint, quote.clone()).await;
            return Some(quote);
        }

        info!("❌ No route for {}", fingerprint);
        None
    }

    /// `best_quote` with token age and liquidity taken from the configured
    /// hint collaborator, when there is one.
    pub async fn best_quote_hinted(&self, params: &SwapParams) -> Option<Quote> {
        let resolved = match &self.hints {
            Some(hints) => resolve_hints(hints.as_ref(), params, self.hint_timeout).await,
            None => Default::default(),
        };
        self.best_quote(params, resolved.token_age_ms, resolved.liquidity_usd)
            .await
    }

    /// Every capable executor's quote, best output first, equal outputs in
    /// registration order. Runs all executors concurrently; failed ones
    /// contribute nothing. Bypasses the cache.
    pub async fn all_quotes(&self, params: &SwapParams) -> Vec<Quote> {
        if let Err(e) = params.validate() {
            warn!("Rejecting comparison request: {}", e);
            return Vec::new();
        }

        let config = self.route_config(params, None, None);
        let capable: Vec<Arc<dyn SwapExecutor>> = config
            .attempt_order()
            .filter_map(|id| self.executors.get(&id))
            .filter(|executor| executor.can_handle(params))
            .cloned()
            .collect();

        let results = join_all(capable.iter().map(|executor| executor.quote(params))).await;

        let mut quotes: Vec<Quote> = results
            .into_iter()
            .flatten()
            .filter(Quote::is_routable)
            .collect();
        quotes.sort_by(|a, b| {
            b.out_amount
                .cmp(&a.out_amount)
                .then_with(|| self.base_rank(a.source).cmp(&self.base_rank(b.source)))
        });

        debug!("Collected {} of {} quotes", quotes.len(), capable.len());
        quotes
    }

    fn base_rank(&self, id: ExecutorId) -> usize {
        self.base
            .iter()
            .position(|(candidate, _)| *candidate == id)
            .unwrap_or(usize::MAX)
    }

    /// Builds a transaction for `quote` through the authorized builder. Never
    /// served from cache.
    pub async fn execute_swap(&self, quote: &Quote, wallet: &Pubkey) -> Result<SwapResult> {
        if !quote.is_routable() {
            return Err(RouterError::InvalidInput(
                "cannot execute a quote without output or route".to_string(),
            ));
        }
        info!(
            "🚀 Executing {} quote via {} for {}",
            quote.source,
            self.delegate.builder_id(),
            wallet
        );
        self.delegate.execute(quote, wallet).await
    }
}
