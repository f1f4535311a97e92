// src/dex/mod.rs

pub mod api;
pub mod clients;
pub mod http_utils;
pub mod quote;

pub use api::SwapExecutor;
pub use http_utils::FailoverTransport;
pub use quote::{ExecutorId, ExecutorKind, Quote, RouteHop, SwapParams, SwapResult};

use crate::config::settings::Config;
use crate::error::Result;
use clients::{
    JupiterClient, JupiterSettings, OrcaClient, OrderBookClient, OrderBookVenue, RaydiumClient,
};
use log::info;
use std::sync::Arc;

/// Initializes every supported executor over one shared failover transport,
/// in base priority order.
///
/// Disabled executors are still constructed; the router keeps them in its
/// skip set. The aggregator is always present because it is the transaction
/// builder.
pub fn build_executors(config: &Config) -> Result<Vec<Arc<dyn SwapExecutor>>> {
    let transport = Arc::new(FailoverTransport::new(config.max_concurrent_requests)?);
    build_executors_with(config, transport)
}

pub fn build_executors_with(
    config: &Config,
    transport: Arc<FailoverTransport>,
) -> Result<Vec<Arc<dyn SwapExecutor>>> {
    let mut executors: Vec<Arc<dyn SwapExecutor>> = Vec::new();

    info!("Initializing swap executors...");

    executors.push(Arc::new(JupiterClient::new(
        Arc::clone(&transport),
        JupiterSettings {
            quote_urls: config.jupiter_quote_urls.clone(),
            swap_urls: config.jupiter_swap_urls.clone(),
            quote_timeout: config.quote_timeout(),
            build_timeout: config.build_timeout(),
            dust_floor: config.aggregator_dust_floor,
            compute_unit_price_micro_lamports: config.compute_unit_price_micro_lamports,
        },
    )));
    info!("- Jupiter executor initialized.");

    executors.push(Arc::new(RaydiumClient::new(
        Arc::clone(&transport),
        config.raydium_api_urls.clone(),
        config.quote_timeout(),
    )));
    info!("- Raydium executor initialized.");

    executors.push(Arc::new(OrcaClient::new(
        Arc::clone(&transport),
        config.orca_quote_urls.clone(),
        config.quote_timeout(),
    )));
    info!("- Orca executor initialized.");

    for venue in [OrderBookVenue::Phoenix, OrderBookVenue::OpenBook] {
        executors.push(Arc::new(OrderBookClient::new(
            venue,
            Arc::clone(&transport),
            config.order_book_quote_urls.clone(),
            config.quote_timeout(),
        )));
        info!("- {} executor initialized.", venue.id());
    }

    for disabled in &config.disabled_executors {
        info!("- {} is disabled by configuration.", disabled);
    }

    info!("Total {} swap executors initialized successfully.", executors.len());
    Ok(executors)
}
