use super::types::{CallOutcome, CallSpec};
use crate::errors::{Revert, SwapError};
use crate::state::World;
use alloy_primitives::Address;
use tracing::{debug, warn};

/// A call that failed without `allow_failure`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFailure {
    pub index: usize,
    pub reason: Revert,
}

impl From<CallFailure> for SwapError {
    fn from(failure: CallFailure) -> Self {
        SwapError::CallFailure { index: failure.index, reason: failure.reason }
    }
}

/// Runs single calls on behalf of `caller`
#[derive(Clone, Copy, Debug)]
pub struct CallExecutor {
    caller: Address,
}

impl CallExecutor {
    pub fn new(caller: Address) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Execute `call` as the `index`-th entry of a batch.
    ///
    /// The world reverts whatever a failing call changed, so a failure recorded under `allow_failure`
    /// leaves no trace besides its outcome.
    pub fn execute(&self, world: &mut World, index: usize, call: &CallSpec) -> Result<CallOutcome, CallFailure> {
        match world.call(self.caller, call.target, call.payload.clone()) {
            Ok(return_data) => {
                debug!(index, target = %call.target, returned = return_data.len(), "Call succeeded");
                Ok(CallOutcome::succeeded(index, return_data))
            }
            Err(reason) if call.allow_failure => {
                warn!(index, target = %call.target, %reason, "Call failed, failure allowed");
                Ok(CallOutcome::failed(index, &reason))
            }
            Err(reason) => {
                warn!(index, target = %call.target, %reason, "Call failed");
                Err(CallFailure { index, reason })
            }
        }
    }
}
