/// Execution Layer
///
/// This layer is responsible for:
/// - Running single opaque calls and recording their outcome
/// - Sequencing call batches with all-or-nothing semantics
/// - Custody, settlement and slippage enforcement around a batch
/// - Audit events for every settled swap

pub mod approval;
pub mod call_executor;
pub mod multicall;
pub mod reentrancy;
pub mod swap_executor;
pub mod types;

// Scenario tests
#[cfg(test)]
mod tests;

pub use approval::{approval_call, encode_approval};
pub use call_executor::{CallExecutor, CallFailure};
pub use multicall::{MulticallReport, MulticallRunner};
pub use reentrancy::{ReentrancyGuard, ReentrancyLock};
pub use swap_executor::SwapExecutor;
pub use types::{CallOutcome, CallSpec, SwapPhase, SwapRequest, SwapResult};
