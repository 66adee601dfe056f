/// Routing Layer
///
/// Off-chain side of a swap: quotes a route through a provider and turns it into the canonical
/// approve-then-swap batch the executor consumes.

pub mod builder;
pub mod models;
pub mod provider;

pub use builder::{SwapPlanner, build_swap_request, min_destination_amount};
pub use models::{PriceRoute, QuoteRequest, SwapSide, SwapTransaction, TransactionRequest};
pub use provider::{FixedRateProvider, RouteProvider};
