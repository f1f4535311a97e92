pub mod cache;
pub mod config;
pub mod dex;
pub mod error;
pub mod routing;
pub mod utils;

pub use cache::QuoteCache;
pub use config::Config;
pub use dex::quote::{ExecutorId, ExecutorKind, Quote, RouteHop, SwapParams, SwapResult};
pub use error::RouterError;
pub use routing::QuoteRouter;
