use super::call_executor::{CallExecutor, CallFailure};
use super::types::{CallOutcome, CallSpec};
use crate::errors::SwapError;
use crate::state::World;
use alloy_primitives::Address;
use tracing::{info, warn};

/// Aggregated result of one batch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MulticallReport {
    /// Outcomes of the calls that completed, in batch order. Excludes the aborting call.
    pub outcomes: Vec<CallOutcome>,
    /// True when every call either succeeded or was allowed to fail
    pub all_succeeded_or_allowed: bool,
    /// The call that aborted the batch, if any
    pub aborted: Option<CallFailure>,
}

impl MulticallReport {
    /// Calls that were attempted, including the one that aborted the batch
    pub fn calls_executed(&self) -> usize {
        self.outcomes.len() + usize::from(self.aborted.is_some())
    }

    /// Calls that failed but were marked `allow_failure`
    pub fn allowed_failures(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.success).count()
    }

    pub fn into_outcomes(self) -> Result<Vec<CallOutcome>, SwapError> {
        match self.aborted {
            Some(failure) => Err(failure.into()),
            None => Ok(self.outcomes),
        }
    }
}

/// Sequences a batch of calls through a [`CallExecutor`]
#[derive(Clone, Copy, Debug)]
pub struct MulticallRunner {
    executor: CallExecutor,
}

impl MulticallRunner {
    pub fn new(caller: Address) -> Self {
        Self { executor: CallExecutor::new(caller) }
    }

    /// Run `calls` strictly in order.
    ///
    /// The first failing call without `allow_failure` stops the batch and every effect of the batch is
    /// discarded.
    pub fn run(&self, world: &mut World, calls: &[CallSpec]) -> MulticallReport {
        let checkpoint = world.checkpoint();
        let mut outcomes = Vec::with_capacity(calls.len());

        for (index, call) in calls.iter().enumerate() {
            match self.executor.execute(world, index, call) {
                Ok(outcome) => outcomes.push(outcome),
                Err(failure) => {
                    world.revert_to(checkpoint);
                    warn!(
                        caller = %self.executor.caller(),
                        calls = calls.len(),
                        executed = index + 1,
                        "Multicall aborted at call #{}: {}", index, failure.reason
                    );
                    return MulticallReport { outcomes, all_succeeded_or_allowed: false, aborted: Some(failure) };
                }
            }
        }

        world.commit(checkpoint);
        let report = MulticallReport { outcomes, all_succeeded_or_allowed: true, aborted: None };
        info!(
            caller = %self.executor.caller(),
            calls = report.calls_executed(),
            allowed_failures = report.allowed_failures(),
            success = report.all_succeeded_or_allowed,
            "Multicall executed"
        );
        report
    }
}
