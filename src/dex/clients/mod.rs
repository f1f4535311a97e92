// src/dex/clients/mod.rs
//! Quote backends. Each client implements `SwapExecutor`.

pub mod jupiter;
pub mod jupiter_api;
pub mod orca;
pub mod order_book;
pub mod raydium;

pub use jupiter::{JupiterClient, JupiterSettings};
pub use orca::OrcaClient;
pub use order_book::{OrderBookClient, OrderBookVenue};
pub use raydium::RaydiumClient;
