use super::types::CallSpec;
use crate::abi::IERC20;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use tracing::debug;

/// ERC-20 `approve(spender, amount)` payload letting `spender` pull `amount` of `asset` from the executor.
/// The payload is meant to be sent to `asset` as one entry of the batch.
pub fn encode_approval(asset: Address, spender: Address, amount: U256) -> Bytes {
    debug!(%asset, %spender, %amount, "Encoding approval");
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// Batch entry approving `spender` on `asset`
pub fn approval_call(asset: Address, spender: Address, amount: U256) -> CallSpec {
    CallSpec::required(asset, encode_approval(asset, spender, amount))
}
