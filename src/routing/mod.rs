// src/routing/mod.rs
//! Quote routing: per-request executor ordering, the router itself, and the
//! single transaction-building path.

pub mod execution;
pub mod hints;
pub mod priority;
pub mod router;

pub use execution::{ExecutionDelegate, AUTHORIZED_BUILDER};
pub use hints::{resolve_hints, ResolvedHints, RoutingHints};
pub use priority::{RouteConfig, RoutingThresholds};
pub use router::QuoteRouter;
