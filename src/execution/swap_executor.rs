use super::approval::encode_approval;
use super::multicall::MulticallRunner;
use super::reentrancy::ReentrancyLock;
use super::types::{SwapPhase, SwapRequest, SwapResult};
use crate::abi::ISwapExecutor::{self, ISwapExecutorCalls};
use crate::abi::IERC20;
use crate::errors::{Revert, SwapError};
use crate::state::{BalanceSnapshot, CallContext, CallResult, Contract, World};
use crate::utils::ExecutorConfig;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Swap executor living at `address`.
///
/// Takes custody of the initiator's input, runs the caller-supplied batch with itself as `msg.sender`,
/// forwards the proceeds and checks the measured output against the requested minimum. Any failure undoes
/// the whole invocation, custody included.
#[derive(Debug)]
pub struct SwapExecutor {
    address: Address,
    config: ExecutorConfig,
    lock: ReentrancyLock,
}

/// Balances read before custody is taken
struct Baseline {
    initiator_source: BalanceSnapshot,
    initiator_destination: BalanceSnapshot,
    held_source: BalanceSnapshot,
    held_destination: BalanceSnapshot,
}

impl SwapExecutor {
    pub fn new(address: Address) -> Self {
        Self::with_config(address, ExecutorConfig::default())
    }

    pub fn with_config(address: Address, config: ExecutorConfig) -> Self {
        Self { address, config, lock: ReentrancyLock::new() }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Register the executor in `world` so it can be reached through `World::call`
    pub fn deploy(self, world: &mut World) -> Arc<Self> {
        let executor = Arc::new(self);
        world.deploy(executor.address, executor.clone());
        executor
    }

    /// Perform `request` for `initiator`. On `Err` the world is exactly as it was before the call.
    pub fn execute_swap(&self, world: &mut World, initiator: Address, request: SwapRequest) -> Result<SwapResult, SwapError> {
        let _guard = self.lock.enter()?;
        request.validate(self.config.max_calls_per_batch)?;

        info!(
            %initiator,
            source = %request.source_asset,
            destination = %request.destination_asset,
            amount = %request.source_amount,
            min_out = %request.min_destination_amount,
            calls = request.calls.len(),
            "Executing swap"
        );

        let checkpoint = world.checkpoint();
        match self.swap_within_checkpoint(world, initiator, &request) {
            Ok(result) => {
                world.commit(checkpoint);
                info!(
                    phase = %SwapPhase::Settled,
                    %initiator,
                    amount_in = %result.amount_in,
                    amount_out = %result.amount_out,
                    refunded = %result.refunded_in,
                    "Swap settled"
                );
                Ok(result)
            }
            Err(err) => {
                world.revert_to(checkpoint);
                warn!(phase = %SwapPhase::Reverted, %initiator, error = %err, "Swap reverted");
                Err(err)
            }
        }
    }

    fn swap_within_checkpoint(&self, world: &mut World, initiator: Address, request: &SwapRequest) -> Result<SwapResult, SwapError> {
        let baseline = Baseline {
            initiator_source: BalanceSnapshot::take(&*world, request.source_asset, initiator),
            initiator_destination: BalanceSnapshot::take(&*world, request.destination_asset, initiator),
            held_source: BalanceSnapshot::take(&*world, request.source_asset, self.address),
            held_destination: BalanceSnapshot::take(&*world, request.destination_asset, self.address),
        };

        self.take_custody(world, initiator, request)?;
        debug!(phase = %SwapPhase::FundsLocked, %initiator, amount = %request.source_amount);

        let report = MulticallRunner::new(self.address).run(world, &request.calls);
        let calls_executed = report.calls_executed();
        let batch_success = report.all_succeeded_or_allowed;
        let call_outcomes = report.into_outcomes().inspect_err(|_| {
            debug!(phase = %SwapPhase::BatchFailed, %initiator);
        })?;
        debug!(phase = %SwapPhase::BatchApplied, %initiator, calls = calls_executed);

        let refunded_in = self.settle(world, initiator, &baseline)?;

        let destination_after = baseline.initiator_destination.retake(&*world);
        let Some(amount_out) = baseline.initiator_destination.gain(&destination_after) else {
            return Err(SwapError::SlippageViolation { required: request.min_destination_amount, actual: U256::ZERO });
        };
        if amount_out < request.min_destination_amount {
            return Err(SwapError::SlippageViolation { required: request.min_destination_amount, actual: amount_out });
        }

        let source_after = baseline.initiator_source.retake(&*world);
        let spent = baseline.initiator_source.loss(&source_after);
        if spent > request.source_amount {
            return Err(SwapError::SourceOverdraw { allowed: request.source_amount, actual: spent });
        }
        let amount_in = request.source_amount.saturating_sub(refunded_in);

        world.emit_event(
            self.address,
            &ISwapExecutor::MultiCallExecuted {
                caller: initiator,
                callCount: U256::from(calls_executed),
                success: batch_success,
            },
        );
        world.emit_event(
            self.address,
            &ISwapExecutor::SwapExecuted {
                srcToken: request.source_asset,
                destToken: request.destination_asset,
                srcAmount: amount_in,
                destAmount: amount_out,
                user: initiator,
            },
        );

        Ok(SwapResult {
            initiator,
            source_asset: request.source_asset,
            destination_asset: request.destination_asset,
            amount_in,
            amount_out,
            refunded_in,
            call_outcomes,
        })
    }

    fn take_custody(&self, world: &mut World, initiator: Address, request: &SwapRequest) -> Result<(), SwapError> {
        let pull = IERC20::transferFromCall { from: initiator, to: self.address, amount: request.source_amount };
        world.call(self.address, request.source_asset, pull.abi_encode().into()).map_err(|reason| SwapError::Custody {
            asset: request.source_asset,
            initiator,
            amount: request.source_amount,
            reason,
        })?;
        Ok(())
    }

    /// Hand everything the executor gained during the invocation to the initiator: destination proceeds
    /// always, unspent source when refunds are enabled. Returns the refunded source amount.
    fn settle(&self, world: &mut World, initiator: Address, baseline: &Baseline) -> Result<U256, SwapError> {
        let proceeds = baseline.held_destination.retake(&*world).amount.saturating_sub(baseline.held_destination.amount);
        if !proceeds.is_zero() {
            self.transfer_out(world, baseline.held_destination.asset, initiator, proceeds)?;
        }

        if !self.config.refund_unspent_input {
            return Ok(U256::ZERO);
        }
        let unspent = baseline.held_source.retake(&*world).amount.saturating_sub(baseline.held_source.amount);
        if !unspent.is_zero() {
            self.transfer_out(world, baseline.held_source.asset, initiator, unspent)?;
        }
        Ok(unspent)
    }

    fn transfer_out(&self, world: &mut World, asset: Address, to: Address, amount: U256) -> Result<(), SwapError> {
        debug!(%asset, %to, %amount, "Forwarding to initiator");
        let transfer = IERC20::transferCall { to, amount };
        world
            .call(self.address, asset, transfer.abi_encode().into())
            .map_err(|reason| SwapError::Settlement { reason })?;
        Ok(())
    }
}

impl Contract for SwapExecutor {
    fn call(&self, world: &mut World, ctx: CallContext) -> CallResult {
        match ISwapExecutorCalls::abi_decode(&ctx.input).map_err(|_| Revert::UnknownSelector(ctx.address))? {
            ISwapExecutorCalls::executeSwap(call) => {
                let result = self.execute_swap(world, ctx.caller, SwapRequest::from(call))?;
                Ok(result.amount_out.abi_encode().into())
            }
            ISwapExecutorCalls::encodeApproval(call) => {
                Ok(encode_approval(call.token, call.spender, call.amount).abi_encode().into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "swap_executor"
    }
}
