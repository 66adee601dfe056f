use crate::abi::ISwapExecutor;
use crate::errors::{Revert, SwapError};
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// One entry of a multicall batch
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSpec {
    pub target: Address,
    pub payload: Bytes,
    pub allow_failure: bool,
}

impl CallSpec {
    pub fn new(target: Address, payload: impl Into<Bytes>, allow_failure: bool) -> Self {
        Self { target, payload: payload.into(), allow_failure }
    }

    /// A call whose failure aborts the batch
    pub fn required(target: Address, payload: impl Into<Bytes>) -> Self {
        Self::new(target, payload, false)
    }

    /// A call whose failure is recorded and skipped
    pub fn optional(target: Address, payload: impl Into<Bytes>) -> Self {
        Self::new(target, payload, true)
    }
}

impl From<ISwapExecutor::Call3> for CallSpec {
    fn from(call: ISwapExecutor::Call3) -> Self {
        Self { target: call.target, payload: call.callData, allow_failure: call.allowFailure }
    }
}

impl From<CallSpec> for ISwapExecutor::Call3 {
    fn from(call: CallSpec) -> Self {
        Self { target: call.target, allowFailure: call.allow_failure, callData: call.payload }
    }
}

/// What happened to one call of the batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOutcome {
    pub index: usize,
    pub success: bool,
    pub return_data: Bytes,
}

impl CallOutcome {
    pub fn succeeded(index: usize, return_data: Bytes) -> Self {
        Self { index, success: true, return_data }
    }

    pub fn failed(index: usize, reason: &Revert) -> Self {
        Self { index, success: false, return_data: reason.revert_data() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub source_asset: Address,
    pub destination_asset: Address,
    pub source_amount: U256,
    pub min_destination_amount: U256,
    pub calls: Vec<CallSpec>,
}

impl SwapRequest {
    pub fn new(
        source_asset: Address,
        destination_asset: Address,
        source_amount: U256,
        min_destination_amount: U256,
        calls: Vec<CallSpec>,
    ) -> Self {
        Self { source_asset, destination_asset, source_amount, min_destination_amount, calls }
    }

    /// Reject requests that cannot describe a swap. Runs before any state is touched.
    pub fn validate(&self, max_calls: usize) -> Result<(), SwapError> {
        if self.source_amount.is_zero() {
            return Err(SwapError::MalformedRequest("source amount is zero".to_string()));
        }
        if self.calls.is_empty() {
            return Err(SwapError::MalformedRequest("call batch is empty".to_string()));
        }
        if self.calls.len() > max_calls {
            return Err(SwapError::MalformedRequest(format!(
                "call batch has {} calls, limit is {}",
                self.calls.len(),
                max_calls
            )));
        }
        if self.source_asset == self.destination_asset {
            return Err(SwapError::MalformedRequest("source and destination asset are identical".to_string()));
        }
        Ok(())
    }
}

impl From<ISwapExecutor::executeSwapCall> for SwapRequest {
    fn from(call: ISwapExecutor::executeSwapCall) -> Self {
        Self {
            source_asset: call.srcToken,
            destination_asset: call.destToken,
            source_amount: call.srcAmount,
            min_destination_amount: call.minDestAmount,
            calls: call.calls.into_iter().map(CallSpec::from).collect(),
        }
    }
}

/// Settled swap. Only ever built after every invariant held.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub initiator: Address,
    pub source_asset: Address,
    pub destination_asset: Address,
    /// Source asset actually consumed, i.e. custody minus refund
    pub amount_in: U256,
    /// Measured growth of the initiator's destination balance
    pub amount_out: U256,
    /// Unspent source asset returned to the initiator
    pub refunded_in: U256,
    pub call_outcomes: Vec<CallOutcome>,
}

impl SwapResult {
    pub fn failed_calls(&self) -> impl Iterator<Item = &CallOutcome> {
        self.call_outcomes.iter().filter(|outcome| !outcome.success)
    }
}

/// Lifecycle of one swap invocation
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapPhase {
    Idle,
    FundsLocked,
    BatchApplied,
    BatchFailed,
    Settled,
    Reverted,
}
