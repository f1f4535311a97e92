//! Jupiter aggregator executor. Multi-hop, and the only backend authorized to
//! build swap transactions.

use crate::dex::api::SwapExecutor;
use crate::dex::clients::jupiter_api::{QuoteRequest, QuoteResponse, SwapRequest, SwapResponse};
use crate::dex::http_utils::{decode_json, FailoverTransport};
use crate::dex::quote::{ExecutorId, ExecutorKind, Quote, SwapParams, SwapResult};
use crate::error::{Result, RouterError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info, warn};
use solana_sdk::pubkey::Pubkey;
use std::{sync::Arc, time::Duration};

pub const JUPITER_QUOTE_URLS: &[&str] = &[
    "https://quote-api.jup.ag/v6/quote",
    "https://lite-api.jup.ag/swap/v1/quote",
];
pub const JUPITER_SWAP_URLS: &[&str] = &[
    "https://quote-api.jup.ag/v6/swap",
    "https://lite-api.jup.ag/swap/v1/swap",
];

/// Keeps the route small enough to fit a single versioned transaction.
const JUPITER_MAX_ACCOUNTS: u16 = 64;

/// Issues a `/quote` request against Jupiter-compatible endpoints and returns
/// the decoded response together with the raw JSON it came from.
pub async fn fetch_jupiter_quote(
    transport: &FailoverTransport,
    source: ExecutorId,
    urls: &[String],
    timeout: Duration,
    request: &QuoteRequest,
) -> Result<Quote> {
    let backend = source.as_str();
    let response = transport
        .attempt(backend, urls, timeout, |client, url| client.get(url).query(request))
        .await?;

    let raw: serde_json::Value = decode_json(backend, response).await?;
    let decoded: QuoteResponse = serde_json::from_value(raw.clone()).map_err(|e| {
        RouterError::InvalidResponse(format!("{} quote response is incomplete: {}", backend, e))
    })?;
    decoded.into_quote(source, request.slippage_bps, raw)
}

#[derive(Debug, Clone)]
pub struct JupiterSettings {
    pub quote_urls: Vec<String>,
    pub swap_urls: Vec<String>,
    pub quote_timeout: Duration,
    pub build_timeout: Duration,
    /// Amounts below this are not worth an aggregator round trip.
    pub dust_floor: u64,
    pub compute_unit_price_micro_lamports: Option<u64>,
}

impl Default for JupiterSettings {
    fn default() -> Self {
        Self {
            quote_urls: JUPITER_QUOTE_URLS.iter().map(|s| s.to_string()).collect(),
            swap_urls: JUPITER_SWAP_URLS.iter().map(|s| s.to_string()).collect(),
            quote_timeout: Duration::from_secs(8),
            build_timeout: Duration::from_secs(15),
            dust_floor: 1_000,
            compute_unit_price_micro_lamports: None,
        }
    }
}

pub struct JupiterClient {
    transport: Arc<FailoverTransport>,
    settings: JupiterSettings,
}

impl JupiterClient {
    pub fn new(transport: Arc<FailoverTransport>, settings: JupiterSettings) -> Self {
        info!(
            "Jupiter client configured with {} quote and {} swap endpoint(s)",
            settings.quote_urls.len(),
            settings.swap_urls.len()
        );
        Self { transport, settings }
    }

    fn quote_request(&self, params: &SwapParams) -> QuoteRequest {
        QuoteRequest {
            input_mint: params.input_mint.to_string(),
            output_mint: params.output_mint.to_string(),
            amount: params.amount,
            slippage_bps: params.slippage_bps,
            only_direct_routes: None,
            dexes: None,
            max_accounts: Some(JUPITER_MAX_ACCOUNTS),
        }
    }

    /// Posts the quote's own payload to `/swap`.
    pub async fn swap(&self, quote: &Quote, wallet: &Pubkey) -> Result<SwapResult> {
        if quote.source != ExecutorId::Jupiter {
            return Err(RouterError::TransactionBuildFailed(format!(
                "jupiter can only build its own quotes, got one from {}",
                quote.source
            )));
        }
        if !quote.has_raw_payload() {
            return Err(RouterError::TransactionBuildFailed(
                "quote carries no jupiter payload".to_string(),
            ));
        }

        let request = SwapRequest {
            user_public_key: wallet.to_string(),
            quote_response: &quote.raw,
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
            compute_unit_price_micro_lamports: self.settings.compute_unit_price_micro_lamports,
        };

        debug!(
            "🔨 Building Jupiter swap: {} {} -> {} for {}",
            quote.in_amount, quote.input_mint, quote.output_mint, wallet
        );

        let response = self
            .transport
            .attempt(
                "jupiter",
                &self.settings.swap_urls,
                self.settings.build_timeout,
                |client, url| client.post(url).json(&request),
            )
            .await?;
        let swap: SwapResponse = decode_json("jupiter", response).await?;

        if let Some(simulation_error) = swap.simulation_error.filter(|v| !v.is_null()) {
            return Err(RouterError::TransactionBuildFailed(format!(
                "jupiter simulation failed: {}",
                simulation_error
            )));
        }
        let bytes = STANDARD.decode(swap.swap_transaction.trim()).map_err(|e| {
            RouterError::InvalidResponse(format!("swapTransaction is not base64: {}", e))
        })?;
        if bytes.is_empty() {
            return Err(RouterError::InvalidResponse("swapTransaction is empty".to_string()));
        }

        Ok(SwapResult {
            transaction: swap.swap_transaction,
            source: ExecutorId::Jupiter,
            last_valid_block_height: swap.last_valid_block_height,
        })
    }
}

#[async_trait]
impl SwapExecutor for JupiterClient {
    fn id(&self) -> ExecutorId {
        ExecutorId::Jupiter
    }

    fn kind(&self) -> ExecutorKind {
        ExecutorKind::Aggregator
    }

    fn can_handle(&self, params: &SwapParams) -> bool {
        params.amount >= self.settings.dust_floor
    }

    async fn fetch_quote(&self, params: &SwapParams) -> Result<Quote> {
        let request = self.quote_request(params);
        fetch_jupiter_quote(
            &self.transport,
            ExecutorId::Jupiter,
            &self.settings.quote_urls,
            self.settings.quote_timeout,
            &request,
        )
        .await
    }

    async fn build_transaction(&self, quote: &Quote, wallet: &Pubkey) -> Option<SwapResult> {
        match self.swap(quote, wallet).await {
            Ok(result) => {
                info!("✅ Jupiter built swap transaction for {}", wallet);
                Some(result)
            }
            Err(e) => {
                warn!("Jupiter swap build failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{USDC_MINT, WSOL_MINT};

    fn client(dust_floor: u64) -> JupiterClient {
        JupiterClient::new(
            Arc::new(FailoverTransport::new(4).unwrap()),
            JupiterSettings {
                dust_floor,
                ..JupiterSettings::default()
            },
        )
    }

    #[test]
    fn dust_amounts_are_not_handled() {
        let jupiter = client(1_000);
        assert!(!jupiter.can_handle(&SwapParams::new(WSOL_MINT, USDC_MINT, 999, 50)));
        assert!(jupiter.can_handle(&SwapParams::new(WSOL_MINT, USDC_MINT, 1_000, 50)));
    }

    #[test]
    fn quote_request_allows_multi_hop() {
        let jupiter = client(1);
        let request = jupiter.quote_request(&SwapParams::new(WSOL_MINT, USDC_MINT, 5, 30));
        assert_eq!(request.only_direct_routes, None);
        assert_eq!(request.dexes, None);
        assert_eq!(request.slippage_bps, 30);
    }
}
