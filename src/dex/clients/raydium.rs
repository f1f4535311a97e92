// src/dex/clients/raydium.rs
//! Raydium direct executor backed by the Raydium trade API
//! (`/compute/swap-base-in`). Single-hop only.

use crate::dex::api::SwapExecutor;
use crate::dex::http_utils::{decode_json, FailoverTransport};
use crate::dex::quote::{
    parse_amount, parse_mint, ExecutorId, ExecutorKind, Quote, RouteHop, SwapParams,
};
use crate::error::{Result, RouterError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};

pub const RAYDIUM_COMPUTE_URLS: &[&str] =
    &["https://transaction-v1.raydium.io/compute/swap-base-in"];

#[derive(Debug, Serialize)]
struct ComputeRequest {
    #[serde(rename = "inputMint")]
    input_mint: String,
    #[serde(rename = "outputMint")]
    output_mint: String,
    amount: u64,
    #[serde(rename = "slippageBps")]
    slippage_bps: u16,
    #[serde(rename = "txVersion")]
    tx_version: &'static str,
}

/// Envelope every Raydium trade API response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputeResponse {
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<ComputeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputeData {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "inputAmount")]
    pub input_amount: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "outputAmount")]
    pub output_amount: String,
    #[serde(rename = "slippageBps", default)]
    pub slippage_bps: Option<u16>,
    /// Percentage, not a ratio (0.12 means 0.12%)
    #[serde(rename = "priceImpactPct", default)]
    pub price_impact_pct: Option<f64>,
    #[serde(rename = "routePlan")]
    pub route_plan: Vec<RaydiumRouteStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaydiumRouteStep {
    #[serde(rename = "poolId")]
    pub pool_id: String,
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
}

impl ComputeResponse {
    pub fn into_quote(self, requested_slippage_bps: u16, raw: serde_json::Value) -> Result<Quote> {
        if !self.success {
            let reason = self.msg.unwrap_or_else(|| "unknown".to_string());
            return Err(RouterError::NoRoute(format!("raydium: {}", reason)));
        }
        let data = self
            .data
            .ok_or_else(|| RouterError::InvalidResponse("raydium response has no data".to_string()))?;

        let in_amount = parse_amount("inputAmount", &data.input_amount)?;
        let out_amount = parse_amount("outputAmount", &data.output_amount)?;
        let last = data.route_plan.len().saturating_sub(1);

        let route_plan = data
            .route_plan
            .iter()
            .enumerate()
            .map(|(i, step)| {
                Ok(RouteHop {
                    pool: step.pool_id.clone(),
                    label: "Raydium".to_string(),
                    input_mint: parse_mint("routePlan.inputMint", &step.input_mint)?,
                    output_mint: parse_mint("routePlan.outputMint", &step.output_mint)?,
                    // Raydium reports amounts only for the whole route.
                    in_amount: if i == 0 { in_amount } else { 0 },
                    out_amount: if i == last { out_amount } else { 0 },
                    percent: 100,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Quote {
            source: ExecutorId::Raydium,
            input_mint: parse_mint("inputMint", &data.input_mint)?,
            output_mint: parse_mint("outputMint", &data.output_mint)?,
            in_amount,
            out_amount,
            price_impact: data.price_impact_pct.unwrap_or(0.0) / 100.0,
            slippage_bps: data.slippage_bps.unwrap_or(requested_slippage_bps),
            route_plan,
            raw,
        })
    }
}

pub struct RaydiumClient {
    transport: Arc<FailoverTransport>,
    compute_urls: Vec<String>,
    timeout: Duration,
}

impl RaydiumClient {
    pub fn new(transport: Arc<FailoverTransport>, compute_urls: Vec<String>, timeout: Duration) -> Self {
        Self {
            transport,
            compute_urls,
            timeout,
        }
    }
}

#[async_trait]
impl SwapExecutor for RaydiumClient {
    fn id(&self) -> ExecutorId {
        ExecutorId::Raydium
    }

    fn kind(&self) -> ExecutorKind {
        ExecutorKind::DirectAmm
    }

    fn can_handle(&self, params: &SwapParams) -> bool {
        params.amount > 0
    }

    async fn fetch_quote(&self, params: &SwapParams) -> Result<Quote> {
        let request = ComputeRequest {
            input_mint: params.input_mint.to_string(),
            output_mint: params.output_mint.to_string(),
            amount: params.amount,
            slippage_bps: params.slippage_bps,
            tx_version: "V0",
        };
        let response = self
            .transport
            .attempt("raydium", &self.compute_urls, self.timeout, |client, url| {
                client.get(url).query(&request)
            })
            .await?;

        let raw: serde_json::Value = decode_json("raydium", response).await?;
        let decoded: ComputeResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            RouterError::InvalidResponse(format!("raydium compute response is incomplete: {}", e))
        })?;
        decoded.into_quote(params.slippage_bps, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{USDC_MINT, WSOL_MINT};
    use serde_json::json;

    fn single_hop() -> serde_json::Value {
        json!({
            "id": "0f3a",
            "success": true,
            "version": "V1",
            "data": {
                "swapType": "BaseIn",
                "inputMint": WSOL_MINT.to_string(),
                "inputAmount": "100000000",
                "outputMint": USDC_MINT.to_string(),
                "outputAmount": "94000000",
                "otherAmountThreshold": "93530000",
                "slippageBps": 50,
                "priceImpactPct": 0.12,
                "routePlan": [{
                    "poolId": "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2",
                    "inputMint": WSOL_MINT.to_string(),
                    "outputMint": USDC_MINT.to_string(),
                    "feeMint": WSOL_MINT.to_string(),
                    "feeRate": 25,
                    "feeAmount": "250000"
                }]
            }
        })
    }

    #[test]
    fn compute_response_maps_to_quote() {
        let raw = single_hop();
        let response: ComputeResponse = serde_json::from_value(raw.clone()).unwrap();
        let quote = response.into_quote(50, raw).unwrap();

        assert_eq!(quote.source, ExecutorId::Raydium);
        assert_eq!(quote.out_amount, 94_000_000);
        assert_eq!(quote.hop_count(), 1);
        assert_eq!(quote.route_plan[0].in_amount, 100_000_000);
        assert_eq!(quote.route_plan[0].out_amount, 94_000_000);
        assert!((quote.price_impact - 0.0012).abs() < 1e-12);
    }

    #[test]
    fn unsuccessful_response_is_no_route() {
        let raw = json!({ "id": "1", "success": false, "msg": "ROUTE_NOT_FOUND" });
        let response: ComputeResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(
            response.into_quote(50, raw),
            Err(RouterError::NoRoute(_))
        ));
    }

    #[test]
    fn success_without_data_is_invalid() {
        let raw = json!({ "id": "1", "success": true });
        let response: ComputeResponse = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(
            response.into_quote(50, raw),
            Err(RouterError::InvalidResponse(_))
        ));
    }
}
