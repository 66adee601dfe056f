// Layered architecture
pub mod abi; // Solidity interfaces: ERC-20, executor, test router
pub mod errors; // Revert reasons and swap error taxonomy
pub mod state; // State Layer: simulated chain, balances, contracts
pub mod execution; // Execution Layer: call batches, custody, settlement
pub mod routing; // Routing Layer: quotes and batch construction

// Common utilities and types
pub mod utils;

// Re-export key components from each layer
pub use abi::{IERC20, IMockRouter, ISwapExecutor};
pub use errors::{Revert, SwapError};
pub use execution::{
    CallExecutor, CallFailure, CallOutcome, CallSpec, MulticallReport, MulticallRunner, ReentrancyLock, SwapExecutor,
    SwapPhase, SwapRequest, SwapResult, approval_call, encode_approval,
};
pub use routing::{
    FixedRateProvider, PriceRoute, RouteProvider, SwapPlanner, SwapTransaction, build_swap_request, min_destination_amount,
};
pub use state::{
    BalanceLedger, BalanceSnapshot, CallContext, CallResult, Contract, Erc20Token, LyingRouter, MockRouter,
    RevertingTarget, World,
};
pub use utils::{ExecutorConfig, RoutingConfig, SwapExecutorConfig, Token, USDC, WETH};
