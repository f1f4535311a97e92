//! Orca Whirlpool direct executor.
//!
//! Quotes come from a Jupiter-compatible endpoint restricted to Whirlpool pools
//! with direct routes only. Single-hop: anything longer is rejected at the
//! executor boundary.

use crate::dex::api::SwapExecutor;
use crate::dex::clients::jupiter::fetch_jupiter_quote;
use crate::dex::clients::jupiter_api::QuoteRequest;
use crate::dex::http_utils::FailoverTransport;
use crate::dex::quote::{ExecutorId, ExecutorKind, Quote, SwapParams};
use crate::error::Result;
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

pub const ORCA_DEX_LABELS: &str = "Whirlpool";

pub struct OrcaClient {
    transport: Arc<FailoverTransport>,
    quote_urls: Vec<String>,
    timeout: Duration,
}

impl OrcaClient {
    pub fn new(transport: Arc<FailoverTransport>, quote_urls: Vec<String>, timeout: Duration) -> Self {
        Self {
            transport,
            quote_urls,
            timeout,
        }
    }
}

#[async_trait]
impl SwapExecutor for OrcaClient {
    fn id(&self) -> ExecutorId {
        ExecutorId::Orca
    }

    fn kind(&self) -> ExecutorKind {
        ExecutorKind::DirectAmm
    }

    fn can_handle(&self, params: &SwapParams) -> bool {
        params.amount > 0
    }

    async fn fetch_quote(&self, params: &SwapParams) -> Result<Quote> {
        let request = QuoteRequest {
            input_mint: params.input_mint.to_string(),
            output_mint: params.output_mint.to_string(),
            amount: params.amount,
            slippage_bps: params.slippage_bps,
            only_direct_routes: Some(true),
            dexes: Some(ORCA_DEX_LABELS.to_string()),
            max_accounts: None,
        };
        fetch_jupiter_quote(&self.transport, ExecutorId::Orca, &self.quote_urls, self.timeout, &request).await
    }
}
