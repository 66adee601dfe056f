/// State Layer
///
/// Simulated chain the executor runs against:
/// - Journaled balances, allowances and logs with checkpoint / revert
/// - Contracts as opaque callables behind the `Contract` trait
/// - Standard ERC-20 token and test router contracts

pub mod erc20;
pub mod ledger;
pub mod mock_contracts;
pub mod world;

pub use erc20::Erc20Token;
pub use ledger::{BalanceLedger, BalanceSnapshot};
pub use mock_contracts::{LyingRouter, MockRouter, RevertingTarget};
pub use world::{CallContext, CallResult, Checkpoint, Contract, ContractWrapper, DEFAULT_MAX_CALL_DEPTH, World};
