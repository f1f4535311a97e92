//! Jupiter Swap API data structures
//!
//! Request and response shapes for the `/quote` and `/swap` endpoints. The same
//! quote shape is served by every Jupiter-compatible endpoint, including the
//! venue-restricted ones the direct AMM and order-book executors use.

use crate::dex::quote::{parse_amount, parse_mint, ExecutorId, Quote, RouteHop};
use crate::error::{Result, RouterError};
use serde::{Deserialize, Serialize};

/// Query string for the `/quote` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "inputMint")]
    pub input_mint: String,

    #[serde(rename = "outputMint")]
    pub output_mint: String,

    /// Amount of input token (in smallest unit)
    pub amount: u64,

    /// Slippage tolerance in basis points (e.g., 100 = 1%)
    #[serde(rename = "slippageBps")]
    pub slippage_bps: u16,

    #[serde(rename = "onlyDirectRoutes", skip_serializing_if = "Option::is_none")]
    pub only_direct_routes: Option<bool>,

    /// Comma-separated venue labels the route may use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dexes: Option<String>,

    #[serde(rename = "maxAccounts", skip_serializing_if = "Option::is_none")]
    pub max_accounts: Option<u16>,
}

/// Response of the `/quote` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "inputMint")]
    pub input_mint: String,

    #[serde(rename = "inAmount")]
    pub in_amount: String,

    #[serde(rename = "outputMint")]
    pub output_mint: String,

    #[serde(rename = "outAmount")]
    pub out_amount: String,

    #[serde(rename = "otherAmountThreshold", default)]
    pub other_amount_threshold: Option<String>,

    #[serde(rename = "slippageBps", default)]
    pub slippage_bps: Option<u16>,

    #[serde(rename = "routePlan")]
    pub route_plan: Vec<RoutePlan>,

    #[serde(rename = "contextSlot", default)]
    pub context_slot: Option<u64>,

    /// Ratio encoded as a decimal string ("0.0012" means 0.12%)
    #[serde(rename = "priceImpactPct", default)]
    pub price_impact_pct: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    #[serde(rename = "swapInfo")]
    pub swap_info: SwapInfo,

    #[serde(default)]
    pub percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapInfo {
    #[serde(rename = "ammKey")]
    pub amm_key: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(rename = "inputMint")]
    pub input_mint: String,

    #[serde(rename = "outputMint")]
    pub output_mint: String,

    #[serde(rename = "inAmount")]
    pub in_amount: String,

    #[serde(rename = "outAmount")]
    pub out_amount: String,
}

impl QuoteResponse {
    /// Converts the wire response into a `Quote`, keeping `raw` as the payload
    /// the builder will re-submit.
    pub fn into_quote(
        self,
        source: ExecutorId,
        requested_slippage_bps: u16,
        raw: serde_json::Value,
    ) -> Result<Quote> {
        let route_plan = self
            .route_plan
            .iter()
            .map(|step| {
                Ok(RouteHop {
                    pool: step.swap_info.amm_key.clone(),
                    label: step.swap_info.label.clone().unwrap_or_default(),
                    input_mint: parse_mint("swapInfo.inputMint", &step.swap_info.input_mint)?,
                    output_mint: parse_mint("swapInfo.outputMint", &step.swap_info.output_mint)?,
                    in_amount: parse_amount("swapInfo.inAmount", &step.swap_info.in_amount)?,
                    out_amount: parse_amount("swapInfo.outAmount", &step.swap_info.out_amount)?,
                    percent: step.percent.unwrap_or(100),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let price_impact = match self.price_impact_pct.as_deref() {
            Some(raw_impact) => raw_impact.trim().parse::<f64>().map_err(|e| {
                RouterError::InvalidResponse(format!("priceImpactPct '{}': {}", raw_impact, e))
            })?,
            None => 0.0,
        };

        Ok(Quote {
            source,
            input_mint: parse_mint("inputMint", &self.input_mint)?,
            output_mint: parse_mint("outputMint", &self.output_mint)?,
            in_amount: parse_amount("inAmount", &self.in_amount)?,
            out_amount: parse_amount("outAmount", &self.out_amount)?,
            price_impact,
            slippage_bps: self.slippage_bps.unwrap_or(requested_slippage_bps),
            route_plan,
            raw,
        })
    }
}

/// Body of the `/swap` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SwapRequest<'a> {
    #[serde(rename = "userPublicKey")]
    pub user_public_key: String,

    /// The `/quote` response, verbatim
    #[serde(rename = "quoteResponse")]
    pub quote_response: &'a serde_json::Value,

    #[serde(rename = "wrapAndUnwrapSol")]
    pub wrap_and_unwrap_sol: bool,

    #[serde(rename = "dynamicComputeUnitLimit")]
    pub dynamic_compute_unit_limit: bool,

    #[serde(
        rename = "computeUnitPriceMicroLamports",
        skip_serializing_if = "Option::is_none"
    )]
    pub compute_unit_price_micro_lamports: Option<u64>,
}

/// Response of the `/swap` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SwapResponse {
    /// Base64 encoded versioned transaction
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,

    #[serde(rename = "lastValidBlockHeight", default)]
    pub last_valid_block_height: Option<u64>,

    #[serde(rename = "simulationError", default)]
    pub simulation_error: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{USDC_MINT, WSOL_MINT};
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "inputMint": WSOL_MINT.to_string(),
            "inAmount": "100000000",
            "outputMint": USDC_MINT.to_string(),
            "outAmount": "95000000",
            "otherAmountThreshold": "94525000",
            "swapMode": "ExactIn",
            "slippageBps": 50,
            "priceImpactPct": "0.0012",
            "routePlan": [
                {
                    "swapInfo": {
                        "ammKey": "HJPjoWUrhoZzkNfRpHuieeFk9WcZWjwy6PBjZ81ngndJ",
                        "label": "Raydium",
                        "inputMint": WSOL_MINT.to_string(),
                        "outputMint": "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So",
                        "inAmount": "100000000",
                        "outAmount": "86000000",
                        "feeAmount": "25000",
                        "feeMint": WSOL_MINT.to_string()
                    },
                    "percent": 100
                },
                {
                    "swapInfo": {
                        "ammKey": "7qbRF6YsyGuLUVs6Y1q64bdVrfe4ZcUUz1JRdoVNUJnm",
                        "label": "Whirlpool",
                        "inputMint": "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So",
                        "outputMint": USDC_MINT.to_string(),
                        "inAmount": "86000000",
                        "outAmount": "95000000",
                        "feeAmount": "0",
                        "feeMint": USDC_MINT.to_string()
                    },
                    "percent": 100
                }
            ],
            "contextSlot": 293847561,
            "timeTaken": 0.012
        })
    }

    #[test]
    fn quote_response_maps_to_quote() {
        let raw = sample();
        let response: QuoteResponse = serde_json::from_value(raw.clone()).unwrap();
        let quote = response.into_quote(ExecutorId::Jupiter, 50, raw.clone()).unwrap();

        assert_eq!(quote.source, ExecutorId::Jupiter);
        assert_eq!(quote.in_amount, 100_000_000);
        assert_eq!(quote.out_amount, 95_000_000);
        assert_eq!(quote.hop_count(), 2);
        assert_eq!(quote.route_plan[1].label, "Whirlpool");
        assert!((quote.price_impact - 0.0012).abs() < f64::EPSILON);
        assert_eq!(quote.raw, raw);
    }

    #[test]
    fn malformed_amount_is_invalid_response() {
        let mut raw = sample();
        raw["outAmount"] = json!("lots");
        let response: QuoteResponse = serde_json::from_value(raw.clone()).unwrap();
        let result = response.into_quote(ExecutorId::Jupiter, 50, raw);
        assert!(matches!(result, Err(RouterError::InvalidResponse(_))));
    }

    #[test]
    fn quote_request_query_shape() {
        let request = QuoteRequest {
            input_mint: WSOL_MINT.to_string(),
            output_mint: USDC_MINT.to_string(),
            amount: 1_000,
            slippage_bps: 50,
            only_direct_routes: Some(true),
            dexes: Some("Phoenix".to_string()),
            max_accounts: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["onlyDirectRoutes"], json!(true));
        assert_eq!(value["dexes"], json!("Phoenix"));
        assert!(value.get("maxAccounts").is_none());
    }
}
