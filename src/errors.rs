use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolError;
use thiserror::Error;

/// Failure of a single call inside the world. Any state the call touched has been rolled back by the
/// time a `Revert` is observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Revert {
    #[error("execution reverted: {0}")]
    Reason(String),
    #[error("execution reverted with data {0}")]
    Data(Bytes),
    #[error("no contract deployed at {0}")]
    NoContract(Address),
    #[error("unrecognized calldata for {0}")]
    UnknownSelector(Address),
    #[error("call depth limit {0} exceeded")]
    DepthLimit(usize),
}

impl Revert {
    pub fn reason(msg: impl Into<String>) -> Self {
        Self::Reason(msg.into())
    }

    /// Return data as a Solidity caller would see it: raw revert data, or `Error(string)` otherwise
    pub fn revert_data(&self) -> Bytes {
        match self {
            Self::Data(data) => data.clone(),
            Self::Reason(reason) => alloy_sol_types::Revert::from(reason.as_str()).abi_encode().into(),
            other => alloy_sol_types::Revert::from(other.to_string()).abi_encode().into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("malformed swap request: {0}")]
    MalformedRequest(String),
    #[error("custody of {amount} {asset} from {initiator} failed: {reason}")]
    Custody { asset: Address, initiator: Address, amount: U256, reason: Revert },
    #[error("call #{index} failed: {reason}")]
    CallFailure { index: usize, reason: Revert },
    #[error("slippage violation: required {required}, received {actual}")]
    SlippageViolation { required: U256, actual: U256 },
    #[error("source balance fell by {actual}, more than the {allowed} taken into custody")]
    SourceOverdraw { allowed: U256, actual: U256 },
    #[error("settlement to initiator failed: {reason}")]
    Settlement { reason: Revert },
    #[error("reentrant swap rejected")]
    Reentrancy,
}

impl SwapError {
    /// Whether the error was raised before any state was touched.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::MalformedRequest(_) | Self::Reentrancy)
    }
}

impl From<SwapError> for Revert {
    fn from(error: SwapError) -> Self {
        Revert::Reason(error.to_string())
    }
}
