// src/routing/execution.rs
//! Turns a winning quote into a signable transaction.
//!
//! Only the aggregator builds transactions: it is the one backend whose route
//! plan and account list are guaranteed consistent for a multi-hop swap. A
//! quote from any other backend only selects the trade; the aggregator is
//! re-quoted once with the same pair, input amount and slippage, and that
//! fresh quote is what gets built.

use crate::dex::api::SwapExecutor;
use crate::dex::quote::{ExecutorId, Quote, SwapResult};
use crate::error::{Result, RouterError};
use log::{info, warn};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

pub const AUTHORIZED_BUILDER: ExecutorId = ExecutorId::Jupiter;

pub struct ExecutionDelegate {
    builder: Arc<dyn SwapExecutor>,
}

impl ExecutionDelegate {
    pub fn new(builder: Arc<dyn SwapExecutor>) -> Result<Self> {
        if builder.id() != AUTHORIZED_BUILDER {
            return Err(RouterError::Config(format!(
                "{} is not authorized to build transactions",
                builder.id()
            )));
        }
        Ok(Self { builder })
    }

    pub fn builder_id(&self) -> ExecutorId {
        self.builder.id()
    }

    pub async fn execute(&self, quote: &Quote, wallet: &Pubkey) -> Result<SwapResult> {
        let builder_id = self.builder.id();

        let fresh;
        let buildable = if quote.source == builder_id && quote.has_raw_payload() {
            quote
        } else {
            info!(
                "🔁 Re-quoting {} for {} quote ({} {} -> {})",
                builder_id, quote.source, quote.in_amount, quote.input_mint, quote.output_mint
            );
            fresh = self.builder.quote(&quote.to_params()).await.ok_or_else(|| {
                warn!("{} re-quote failed, aborting execution", builder_id);
                RouterError::TransactionBuildFailed(format!(
                    "{} could not re-quote the {} route",
                    builder_id, quote.source
                ))
            })?;
            &fresh
        };

        self.builder
            .build_transaction(buildable, wallet)
            .await
            .ok_or_else(|| {
                RouterError::TransactionBuildFailed(format!(
                    "{} did not return a transaction",
                    builder_id
                ))
            })
    }
}
