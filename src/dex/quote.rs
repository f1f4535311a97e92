// src/dex/quote.rs

use crate::error::RouterError;
use crate::utils::pubkey_string;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

/// Identifies one quote backend. The router keys its executor table by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorId {
    Jupiter,
    Raydium,
    Orca,
    Phoenix,
    OpenBook,
}

impl ExecutorId {
    pub const ALL: [ExecutorId; 5] = [
        ExecutorId::Jupiter,
        ExecutorId::Raydium,
        ExecutorId::Orca,
        ExecutorId::Phoenix,
        ExecutorId::OpenBook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorId::Jupiter => "jupiter",
            ExecutorId::Raydium => "raydium",
            ExecutorId::Orca => "orca",
            ExecutorId::Phoenix => "phoenix",
            ExecutorId::OpenBook => "openbook",
        }
    }
}

impl fmt::Display for ExecutorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutorId {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jupiter" => Ok(ExecutorId::Jupiter),
            "raydium" => Ok(ExecutorId::Raydium),
            "orca" | "whirlpool" => Ok(ExecutorId::Orca),
            "phoenix" => Ok(ExecutorId::Phoenix),
            "openbook" | "openbook_v2" => Ok(ExecutorId::OpenBook),
            other => Err(RouterError::InvalidInput(format!("unknown executor id '{}'", other))),
        }
    }
}

/// Capability envelope of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutorKind {
    /// Multi-hop router, always attempts.
    Aggregator,
    /// Single pool traversal only.
    DirectAmm,
    /// Restricted to the pairs in its market table.
    OrderBook,
}

impl ExecutorKind {
    pub fn single_hop_only(&self) -> bool {
        matches!(self, ExecutorKind::DirectAmm)
    }
}

/// A swap request. Amounts are in the input mint's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapParams {
    #[serde(with = "pubkey_string")]
    pub input_mint: Pubkey,
    #[serde(with = "pubkey_string")]
    pub output_mint: Pubkey,
    pub amount: u64,
    pub slippage_bps: u16,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "pubkey_string::option")]
    pub wallet: Option<Pubkey>,
}

impl SwapParams {
    pub fn new(input_mint: Pubkey, output_mint: Pubkey, amount: u64, slippage_bps: u16) -> Self {
        Self {
            input_mint,
            output_mint,
            amount,
            slippage_bps,
            wallet: None,
        }
    }

    pub fn with_wallet(mut self, wallet: Pubkey) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Deterministic cache key. Deliberately excludes the wallet and any time component.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.input_mint, self.output_mint, self.amount, self.slippage_bps
        )
    }

    /// Rejects requests the router must never forward to a backend.
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.amount == 0 {
            return Err(RouterError::InvalidInput("amount must be greater than zero".to_string()));
        }
        if self.input_mint == self.output_mint {
            return Err(RouterError::InvalidInput(
                "input and output mints must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// One pool or market traversal inside a route plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteHop {
    /// Pool / market address as reported by the backend.
    pub pool: String,
    pub label: String,
    #[serde(with = "pubkey_string")]
    pub input_mint: Pubkey,
    #[serde(with = "pubkey_string")]
    pub output_mint: Pubkey,
    pub in_amount: u64,
    pub out_amount: u64,
    /// Share of the input routed through this hop.
    pub percent: u8,
}

/// A priced, routed estimate from one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub source: ExecutorId,
    #[serde(with = "pubkey_string")]
    pub input_mint: Pubkey,
    #[serde(with = "pubkey_string")]
    pub output_mint: Pubkey,
    pub in_amount: u64,
    pub out_amount: u64,
    /// 0.01 means one percent.
    pub price_impact: f64,
    pub slippage_bps: u16,
    pub route_plan: Vec<RouteHop>,
    /// The backend's response as received; the builder re-submits it verbatim.
    pub raw: serde_json::Value,
}

impl Quote {
    /// A quote with zero output or no hops is "no route".
    pub fn is_routable(&self) -> bool {
        self.out_amount > 0 && !self.route_plan.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.route_plan.len()
    }

    pub fn has_raw_payload(&self) -> bool {
        !self.raw.is_null()
    }

    /// Parameters that re-derive this quote from another backend.
    pub fn to_params(&self) -> SwapParams {
        SwapParams::new(self.input_mint, self.output_mint, self.in_amount, self.slippage_bps)
    }
}

/// A signable transaction produced by the authorized builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    /// Base64-encoded serialized transaction.
    pub transaction: String,
    pub source: ExecutorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_valid_block_height: Option<u64>,
}

/// Parses the decimal-string amounts the quote APIs use.
pub fn parse_amount(field: &str, value: &str) -> Result<u64, RouterError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| RouterError::InvalidResponse(format!("{} '{}' is not a u64: {}", field, value, e)))
}

/// Parses a mint reported by a backend.
pub fn parse_mint(field: &str, value: &str) -> Result<Pubkey, RouterError> {
    Pubkey::from_str(value.trim())
        .map_err(|e| RouterError::InvalidResponse(format!("{} '{}' is not a pubkey: {}", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{USDC_MINT, WSOL_MINT};
    use pretty_assertions::assert_eq;

    #[test]
    fn fingerprint_ignores_wallet() {
        let params = SwapParams::new(WSOL_MINT, USDC_MINT, 1_000_000, 50);
        let with_wallet = params.clone().with_wallet(Pubkey::new_unique());
        assert_eq!(params.fingerprint(), with_wallet.fingerprint());
        assert_eq!(
            params.fingerprint(),
            format!("{}:{}:1000000:50", WSOL_MINT, USDC_MINT)
        );
    }

    #[test]
    fn fingerprint_distinguishes_slippage() {
        let a = SwapParams::new(WSOL_MINT, USDC_MINT, 1_000_000, 50);
        let b = SwapParams::new(WSOL_MINT, USDC_MINT, 1_000_000, 100);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn validate_rejects_zero_amount_and_same_mint() {
        assert!(SwapParams::new(WSOL_MINT, USDC_MINT, 0, 50).validate().is_err());
        assert!(SwapParams::new(WSOL_MINT, WSOL_MINT, 10, 50).validate().is_err());
        assert!(SwapParams::new(WSOL_MINT, USDC_MINT, 10, 0).validate().is_ok());
    }

    #[test]
    fn executor_id_parses_aliases() {
        assert_eq!("Whirlpool".parse::<ExecutorId>().unwrap(), ExecutorId::Orca);
        assert_eq!(" openbook ".parse::<ExecutorId>().unwrap(), ExecutorId::OpenBook);
        assert!("serum".parse::<ExecutorId>().is_err());
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("outAmount", "95000000").unwrap(), 95_000_000);
        assert!(parse_amount("outAmount", "-1").is_err());
        assert!(parse_amount("outAmount", "1.5").is_err());
    }
}
