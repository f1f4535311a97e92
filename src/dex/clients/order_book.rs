// src/dex/clients/order_book.rs
//! Order-book venues (Phoenix, OpenBook v2).
//!
//! Each venue only quotes the pairs listed in its static market table. Their
//! liquidity is also reachable through the aggregator, so they never build
//! transactions themselves.

use crate::dex::api::SwapExecutor;
use crate::dex::clients::jupiter::fetch_jupiter_quote;
use crate::dex::clients::jupiter_api::QuoteRequest;
use crate::dex::http_utils::FailoverTransport;
use crate::dex::quote::{ExecutorId, ExecutorKind, Quote, SwapParams};
use crate::error::Result;
use crate::utils::{USDC_MINT, USDT_MINT, WSOL_MINT};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use solana_sdk::pubkey::Pubkey;
use std::{collections::HashSet, sync::Arc, time::Duration};

const JUP_MINT: Pubkey = solana_sdk::pubkey!("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN");
const BONK_MINT: Pubkey = solana_sdk::pubkey!("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263");
const MSOL_MINT: Pubkey = solana_sdk::pubkey!("mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So");

/// Pairs are stored with the smaller key first so lookups are direction-agnostic.
fn market(a: Pubkey, b: Pubkey) -> (Pubkey, Pubkey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

static PHOENIX_MARKETS: Lazy<HashSet<(Pubkey, Pubkey)>> = Lazy::new(|| {
    [
        market(WSOL_MINT, USDC_MINT),
        market(WSOL_MINT, USDT_MINT),
        market(USDC_MINT, USDT_MINT),
        market(JUP_MINT, USDC_MINT),
        market(BONK_MINT, USDC_MINT),
    ]
    .into_iter()
    .collect()
});

static OPENBOOK_MARKETS: Lazy<HashSet<(Pubkey, Pubkey)>> = Lazy::new(|| {
    [
        market(WSOL_MINT, USDC_MINT),
        market(USDC_MINT, USDT_MINT),
        market(MSOL_MINT, WSOL_MINT),
        market(JUP_MINT, USDC_MINT),
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBookVenue {
    Phoenix,
    OpenBook,
}

impl OrderBookVenue {
    pub fn id(&self) -> ExecutorId {
        match self {
            OrderBookVenue::Phoenix => ExecutorId::Phoenix,
            OrderBookVenue::OpenBook => ExecutorId::OpenBook,
        }
    }

    /// Venue label understood by the quote endpoint's `dexes` filter.
    pub fn dex_label(&self) -> &'static str {
        match self {
            OrderBookVenue::Phoenix => "Phoenix",
            OrderBookVenue::OpenBook => "OpenBook V2",
        }
    }

    fn markets(&self) -> &'static HashSet<(Pubkey, Pubkey)> {
        match self {
            OrderBookVenue::Phoenix => &PHOENIX_MARKETS,
            OrderBookVenue::OpenBook => &OPENBOOK_MARKETS,
        }
    }

    pub fn lists_market(&self, a: &Pubkey, b: &Pubkey) -> bool {
        self.markets().contains(&market(*a, *b))
    }
}

pub struct OrderBookClient {
    venue: OrderBookVenue,
    transport: Arc<FailoverTransport>,
    quote_urls: Vec<String>,
    timeout: Duration,
}

impl OrderBookClient {
    pub fn new(
        venue: OrderBookVenue,
        transport: Arc<FailoverTransport>,
        quote_urls: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            venue,
            transport,
            quote_urls,
            timeout,
        }
    }
}

#[async_trait]
impl SwapExecutor for OrderBookClient {
    fn id(&self) -> ExecutorId {
        self.venue.id()
    }

    fn kind(&self) -> ExecutorKind {
        ExecutorKind::OrderBook
    }

    fn can_handle(&self, params: &SwapParams) -> bool {
        self.venue.lists_market(&params.input_mint, &params.output_mint)
    }

    async fn fetch_quote(&self, params: &SwapParams) -> Result<Quote> {
        let request = QuoteRequest {
            input_mint: params.input_mint.to_string(),
            output_mint: params.output_mint.to_string(),
            amount: params.amount,
            slippage_bps: params.slippage_bps,
            only_direct_routes: Some(true),
            dexes: Some(self.venue.dex_label().to_string()),
            max_accounts: None,
        };
        fetch_jupiter_quote(&self.transport, self.id(), &self.quote_urls, self.timeout, &request).await
    }
}
