use super::world::{CallContext, CallResult, Contract, World};
use crate::abi::IERC20;
use crate::abi::IMockRouter::{self, IMockRouterCalls};
use crate::errors::Revert;
use alloy_primitives::U256;
use alloy_sol_types::{SolCall, SolInterface, SolValue};

/// Router that swaps at a fixed rate, `amount_out = amount_in * numerator / denominator`.
///
/// Pulls the input from `msg.sender` with `transferFrom` (so the caller must have approved the router)
/// and pays the output from its own reserves to `recipient`.
#[derive(Clone, Debug)]
pub struct MockRouter {
    pub numerator: U256,
    pub denominator: U256,
}

impl MockRouter {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self { numerator: U256::from(numerator), denominator: U256::from(denominator) }
    }

    pub fn quote(&self, amount_in: U256) -> U256 {
        if self.denominator.is_zero() {
            return U256::ZERO;
        }
        amount_in.saturating_mul(self.numerator) / self.denominator
    }

    pub fn encode_swap(call: IMockRouter::swapCall) -> Vec<u8> {
        call.abi_encode()
    }
}

impl Contract for MockRouter {
    fn call(&self, world: &mut World, ctx: CallContext) -> CallResult {
        let IMockRouterCalls::swap(swap) =
            IMockRouterCalls::abi_decode(&ctx.input).map_err(|_| Revert::UnknownSelector(ctx.address))?;

        let pull = IERC20::transferFromCall { from: ctx.caller, to: ctx.address, amount: swap.amountIn };
        world.call(ctx.address, swap.srcToken, pull.abi_encode().into())?;

        let amount_out = self.quote(swap.amountIn);
        let pay = IERC20::transferCall { to: swap.recipient, amount: amount_out };
        world.call(ctx.address, swap.destToken, pay.abi_encode().into())?;

        Ok(amount_out.abi_encode().into())
    }

    fn name(&self) -> &'static str {
        "mock_router"
    }
}

/// Router that reports a successful swap of `claimed` but never moves a token
#[derive(Clone, Debug)]
pub struct LyingRouter {
    pub claimed: U256,
}

impl Contract for LyingRouter {
    fn call(&self, _world: &mut World, _ctx: CallContext) -> CallResult {
        Ok(self.claimed.abi_encode().into())
    }

    fn name(&self) -> &'static str {
        "lying_router"
    }
}

/// Target that always reverts with the given reason
#[derive(Clone, Debug)]
pub struct RevertingTarget {
    pub reason: String,
}

impl RevertingTarget {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl Contract for RevertingTarget {
    fn call(&self, _world: &mut World, _ctx: CallContext) -> CallResult {
        Err(Revert::Reason(self.reason.clone()))
    }

    fn name(&self) -> &'static str {
        "reverting_target"
    }
}
