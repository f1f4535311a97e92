//! Shared test helpers: stub executors that record their invocations, and
//! local mock HTTP backends.
#![allow(dead_code)]

use async_trait::async_trait;
use solana_quote_router::{
    cache::{CacheConfig, QuoteCache},
    dex::api::SwapExecutor,
    error::{Result, RouterError},
    routing::{QuoteRouter, RoutingThresholds},
    utils::{USDC_MINT, WSOL_MINT},
    ExecutorId, ExecutorKind, Quote, RouteHop, SwapParams, SwapResult,
};
use solana_sdk::pubkey::Pubkey;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type CallLog = Arc<Mutex<Vec<ExecutorId>>>;

/// Start and end of each `fetch_quote`, in the order they happened.
pub type EventLog = Arc<Mutex<Vec<(ExecutorId, Phase)>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}

/// What a stub answers to `fetch_quote`.
#[derive(Debug, Clone)]
pub enum StubResponse {
    Quote { out_amount: u64, hops: usize },
    Fail,
}

pub struct StubExecutor {
    pub id: ExecutorId,
    pub kind: ExecutorKind,
    pub response: StubResponse,
    pub handles: bool,
    pub delay: Duration,
    pub quotes: CallLog,
    pub builds: CallLog,
    pub events: EventLog,
}

impl StubExecutor {
    pub fn new(id: ExecutorId, kind: ExecutorKind, response: StubResponse, log: &StubLog) -> Self {
        Self {
            id,
            kind,
            response,
            handles: true,
            delay: Duration::ZERO,
            quotes: Arc::clone(&log.quotes),
            builds: Arc::clone(&log.builds),
            events: Arc::clone(&log.events),
        }
    }

    /// Makes `fetch_quote` take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn refusing(mut self) -> Self {
        self.handles = false;
        self
    }

    pub fn arc(self) -> Arc<dyn SwapExecutor> {
        Arc::new(self)
    }
}

#[async_trait]
impl SwapExecutor for StubExecutor {
    fn id(&self) -> ExecutorId {
        self.id
    }

    fn kind(&self) -> ExecutorKind {
        self.kind
    }

    fn can_handle(&self, _params: &SwapParams) -> bool {
        self.handles
    }

    async fn fetch_quote(&self, params: &SwapParams) -> Result<Quote> {
        self.quotes.lock().unwrap().push(self.id);
        self.events.lock().unwrap().push((self.id, Phase::Start));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.events.lock().unwrap().push((self.id, Phase::End));
        match self.response {
            StubResponse::Quote { out_amount, hops } => Ok(stub_quote(self.id, params, out_amount, hops)),
            StubResponse::Fail => Err(RouterError::EndpointUnavailable(format!("{} stub", self.id))),
        }
    }

    async fn build_transaction(&self, quote: &Quote, _wallet: &Pubkey) -> Option<SwapResult> {
        self.builds.lock().unwrap().push(self.id);
        if self.id != ExecutorId::Jupiter || quote.source != self.id {
            return None;
        }
        Some(SwapResult {
            transaction: "AQID".to_string(),
            source: self.id,
            last_valid_block_height: Some(42),
        })
    }
}

/// Quote and build invocations across every stub sharing it.
#[derive(Default, Clone)]
pub struct StubLog {
    pub quotes: CallLog,
    pub builds: CallLog,
    pub events: EventLog,
}

impl StubLog {
    pub fn quotes(&self) -> Vec<ExecutorId> {
        self.quotes.lock().unwrap().clone()
    }

    pub fn builds(&self) -> Vec<ExecutorId> {
        self.builds.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<(ExecutorId, Phase)> {
        self.events.lock().unwrap().clone()
    }
}

pub fn stub_quote(source: ExecutorId, params: &SwapParams, out_amount: u64, hops: usize) -> Quote {
    let route_plan = (0..hops)
        .map(|i| RouteHop {
            pool: format!("{}-pool-{}", source, i),
            label: source.to_string(),
            input_mint: params.input_mint,
            output_mint: params.output_mint,
            in_amount: params.amount,
            out_amount,
            percent: 100,
        })
        .collect();
    Quote {
        source,
        input_mint: params.input_mint,
        output_mint: params.output_mint,
        in_amount: params.amount,
        out_amount,
        price_impact: 0.001,
        slippage_bps: params.slippage_bps,
        route_plan,
        raw: serde_json::json!({ "source": source.as_str(), "outAmount": out_amount.to_string() }),
    }
}

pub fn sol_usdc(amount: u64) -> SwapParams {
    SwapParams::new(WSOL_MINT, USDC_MINT, amount, 50)
}

pub fn router(executors: Vec<Arc<dyn SwapExecutor>>, ttl: Duration) -> QuoteRouter {
    let cache = Arc::new(QuoteCache::new(CacheConfig {
        ttl,
        max_entries: 100,
    }));
    QuoteRouter::new(executors, cache, RoutingThresholds::default()).unwrap()
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

/// A local URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test port");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/quote", addr)
}
