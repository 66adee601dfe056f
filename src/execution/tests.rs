/// Scenario tests for swap execution
///
/// These run complete swaps against a simulated chain with two tokens, a fixed-rate router and a few
/// misbehaving contracts, and check balances and audit logs after each invocation.

#[cfg(test)]
mod scenario_tests {
    use super::super::*;
    use crate::abi::{IERC20, IMockRouter, ISwapExecutor};
    use crate::errors::{Revert, SwapError};
    use crate::state::{BalanceLedger, CallContext, CallResult, Contract, LyingRouter, MockRouter, RevertingTarget, World};
    use crate::utils::ExecutorConfig;
    use alloy_primitives::{Address, Bytes, U256, address};
    use alloy_sol_types::{SolCall, SolValue};
    use std::sync::{Arc, Mutex};

    const WETH: Address = address!("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1");
    const USDC: Address = address!("0xaf88d065e77c8cC2239327C5EDb3A432268e5831");
    const USER: Address = address!("0xC3E5607Cd4ca0D5Fe51e09B60Ed97a0Ae6F874dd");
    const EXECUTOR: Address = Address::repeat_byte(0xe0);
    const ROUTER: Address = Address::repeat_byte(0x20);
    const LIAR: Address = Address::repeat_byte(0x21);
    const BROKEN: Address = Address::repeat_byte(0x22);
    const THIEF: Address = Address::repeat_byte(0x66);

    // 1 WETH -> 2500 USDC
    const RATE_NUM: u64 = 2_500_000_000;
    const RATE_DEN: u64 = 1_000_000_000_000_000_000;

    fn one_weth() -> U256 {
        U256::from(RATE_DEN)
    }

    fn usdc(units: u64) -> U256 {
        U256::from(units) * U256::from(1_000_000u64)
    }

    struct Fixture {
        world: World,
        executor: Arc<SwapExecutor>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_config(ExecutorConfig::default())
        }

        fn with_config(config: ExecutorConfig) -> Self {
            let mut world = World::new();
            world.deploy_token(WETH);
            world.deploy_token(USDC);
            world.deploy(ROUTER, Arc::new(MockRouter::new(RATE_NUM, RATE_DEN)));
            world.deploy(LIAR, Arc::new(LyingRouter { claimed: usdc(5_000) }));
            world.deploy(BROKEN, Arc::new(RevertingTarget::new("route expired")));
            let executor = SwapExecutor::with_config(EXECUTOR, config).deploy(&mut world);

            world.mint(WETH, USER, U256::from(3) * one_weth());
            world.mint(USDC, USER, usdc(10));
            world.mint(USDC, ROUTER, usdc(1_000_000));

            let mut fixture = Self { world, executor };
            fixture.approve_executor(one_weth());
            fixture.world.finalize();
            fixture
        }

        fn approve_executor(&mut self, amount: U256) {
            let approve = IERC20::approveCall { spender: EXECUTOR, amount }.abi_encode();
            self.world.call(USER, WETH, approve.into()).unwrap();
        }

        fn balance(&self, asset: Address, holder: Address) -> U256 {
            self.world.balance_of(asset, holder)
        }

        fn swap(&mut self, request: SwapRequest) -> Result<SwapResult, SwapError> {
            self.executor.execute_swap(&mut self.world, USER, request)
        }

        fn executor_logs(&self) -> usize {
            self.world.logs().iter().filter(|log| log.address == EXECUTOR).count()
        }
    }

    fn router_swap(amount_in: U256) -> CallSpec {
        let swap = IMockRouter::swapCall { srcToken: WETH, destToken: USDC, amountIn: amount_in, recipient: EXECUTOR };
        CallSpec::required(ROUTER, MockRouter::encode_swap(swap))
    }

    fn weth_to_usdc(min_out: U256, calls: Vec<CallSpec>) -> SwapRequest {
        SwapRequest::new(WETH, USDC, one_weth(), min_out, calls)
    }

    fn canonical_batch() -> Vec<CallSpec> {
        vec![approval_call(WETH, ROUTER, one_weth()), router_swap(one_weth())]
    }

    #[test]
    fn test_swap_weth_for_usdc_through_router() {
        let mut fx = Fixture::new();
        let weth_before = fx.balance(WETH, USER);
        let usdc_before = fx.balance(USDC, USER);

        let result = fx.swap(weth_to_usdc(usdc(1_000), canonical_batch())).unwrap();

        assert_eq!(fx.balance(WETH, USER), weth_before - one_weth());
        assert_eq!(fx.balance(USDC, USER), usdc_before + usdc(2_500));
        assert_eq!(result.amount_in, one_weth());
        assert_eq!(result.amount_out, usdc(2_500));
        assert_eq!(result.refunded_in, U256::ZERO);
        assert_eq!(result.call_outcomes.len(), 2);
        assert!(result.call_outcomes.iter().all(|outcome| outcome.success));

        // nothing stays behind in the executor
        assert_eq!(fx.balance(USDC, EXECUTOR), U256::ZERO);
        assert_eq!(fx.balance(WETH, EXECUTOR), U256::ZERO);

        let batches = fx.world.events::<ISwapExecutor::MultiCallExecuted>(EXECUTOR);
        assert_eq!(batches, vec![ISwapExecutor::MultiCallExecuted { caller: USER, callCount: U256::from(2), success: true }]);
        let swaps = fx.world.events::<ISwapExecutor::SwapExecuted>(EXECUTOR);
        assert_eq!(
            swaps,
            vec![ISwapExecutor::SwapExecuted {
                srcToken: WETH,
                destToken: USDC,
                srcAmount: one_weth(),
                destAmount: usdc(2_500),
                user: USER,
            }]
        );
    }

    #[test]
    fn test_failed_required_call_reverts_custody() {
        let mut fx = Fixture::new();
        let weth_before = fx.balance(WETH, USER);

        let calls = vec![approval_call(WETH, ROUTER, one_weth()), CallSpec::required(BROKEN, Bytes::new())];
        let err = fx.swap(weth_to_usdc(U256::ZERO, calls)).unwrap_err();

        match err {
            SwapError::CallFailure { index, reason } => {
                assert_eq!(index, 1);
                assert_eq!(reason, Revert::reason("route expired"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fx.balance(WETH, USER), weth_before);
        assert_eq!(fx.balance(WETH, EXECUTOR), U256::ZERO);
        assert_eq!(fx.world.allowance(WETH, USER, EXECUTOR), one_weth());
        assert_eq!(fx.world.allowance(WETH, EXECUTOR, ROUTER), U256::ZERO);
        assert_eq!(fx.executor_logs(), 0);
    }

    #[test]
    fn test_slippage_violation_reverts_successful_batch() {
        let mut fx = Fixture::new();
        let weth_before = fx.balance(WETH, USER);
        let usdc_before = fx.balance(USDC, USER);

        let err = fx.swap(weth_to_usdc(usdc(3_000), canonical_batch())).unwrap_err();

        assert!(matches!(
            err,
            SwapError::SlippageViolation { required, actual } if required == usdc(3_000) && actual == usdc(2_500)
        ));
        assert_eq!(fx.balance(WETH, USER), weth_before);
        assert_eq!(fx.balance(USDC, USER), usdc_before);
        assert_eq!(fx.balance(USDC, ROUTER), usdc(1_000_000));
        assert_eq!(fx.executor_logs(), 0);
    }

    #[test]
    fn test_output_equal_to_minimum_settles() {
        let mut fx = Fixture::new();
        let usdc_before = fx.balance(USDC, USER);

        let result = fx.swap(weth_to_usdc(usdc(2_500), canonical_batch())).unwrap();

        assert_eq!(result.amount_out, usdc(2_500));
        assert_eq!(fx.balance(USDC, USER), usdc_before + usdc(2_500));
    }

    #[test]
    fn test_destination_decrease_is_slippage_violation() {
        let mut fx = Fixture::new();
        let approve = IERC20::approveCall { spender: EXECUTOR, amount: usdc(5) }.abi_encode();
        fx.world.call(USER, USDC, approve.into()).unwrap();
        let usdc_before = fx.balance(USDC, USER);
        let weth_before = fx.balance(WETH, USER);

        let drain = IERC20::transferFromCall { from: USER, to: THIEF, amount: usdc(5) }.abi_encode();
        let err = fx.swap(weth_to_usdc(U256::ZERO, vec![CallSpec::required(USDC, drain)])).unwrap_err();

        assert!(matches!(
            err,
            SwapError::SlippageViolation { required, actual } if required.is_zero() && actual.is_zero()
        ));
        assert_eq!(fx.balance(USDC, USER), usdc_before);
        assert_eq!(fx.balance(USDC, THIEF), U256::ZERO);
        assert_eq!(fx.balance(WETH, USER), weth_before);
        assert_eq!(fx.world.allowance(USDC, USER, EXECUTOR), usdc(5));
        assert_eq!(fx.executor_logs(), 0);
    }

    #[test]
    fn test_calls_run_in_given_order() {
        let mut fx = Fixture::new();
        let ok = fx.swap(weth_to_usdc(U256::ZERO, canonical_batch()));
        assert!(ok.is_ok());

        let mut fx = Fixture::new();
        let reversed = vec![router_swap(one_weth()), approval_call(WETH, ROUTER, one_weth())];
        let err = fx.swap(weth_to_usdc(U256::ZERO, reversed)).unwrap_err();
        assert!(matches!(err, SwapError::CallFailure { index: 0, .. }));
    }

    #[test]
    fn test_reported_output_is_not_trusted() {
        let mut fx = Fixture::new();
        let lie = CallSpec::required(LIAR, Bytes::new());

        let err = fx.swap(weth_to_usdc(usdc(1_000), vec![lie.clone()])).unwrap_err();
        assert!(matches!(err, SwapError::SlippageViolation { actual, .. } if actual.is_zero()));

        // with no minimum the swap settles, measures nothing and returns the untouched input
        let weth_before = fx.balance(WETH, USER);
        let result = fx.swap(weth_to_usdc(U256::ZERO, vec![lie])).unwrap();
        assert_eq!(result.amount_out, U256::ZERO);
        assert_eq!(result.refunded_in, one_weth());
        assert_eq!(result.amount_in, U256::ZERO);
        assert_eq!(U256::from_be_slice(&result.call_outcomes[0].return_data), usdc(5_000));
        assert_eq!(fx.balance(WETH, USER), weth_before);
    }

    #[test]
    fn test_allowed_failure_does_not_abort() {
        let mut fx = Fixture::new();
        let mut calls = vec![CallSpec::optional(BROKEN, Bytes::new())];
        calls.extend(canonical_batch());

        let result = fx.swap(weth_to_usdc(usdc(1_000), calls)).unwrap();

        assert_eq!(result.amount_out, usdc(2_500));
        assert_eq!(result.failed_calls().map(|outcome| outcome.index).collect::<Vec<_>>(), vec![0]);
        let batches = fx.world.events::<ISwapExecutor::MultiCallExecuted>(EXECUTOR);
        assert_eq!(batches[0].callCount, U256::from(3));
        assert!(batches[0].success);
    }

    #[test]
    fn test_custody_requires_allowance_and_balance() {
        let mut fx = Fixture::new();
        fx.approve_executor(U256::ZERO);
        let err = fx.swap(weth_to_usdc(U256::ZERO, canonical_batch())).unwrap_err();
        assert!(matches!(err, SwapError::Custody { asset, .. } if asset == WETH));

        let mut fx = Fixture::new();
        fx.approve_executor(U256::MAX);
        let request = SwapRequest::new(WETH, USDC, U256::from(10) * one_weth(), U256::ZERO, canonical_batch());
        let err = fx.swap(request).unwrap_err();
        match err {
            SwapError::Custody { reason, .. } => {
                assert_eq!(reason, Revert::reason("ERC20: transfer amount exceeds balance"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_requests_are_rejected() {
        let mut fx = Fixture::new();
        let logs = fx.world.logs().len();

        let err = fx.swap(weth_to_usdc(U256::ZERO, vec![])).unwrap_err();
        assert!(err.is_rejection());

        let zero = SwapRequest::new(WETH, USDC, U256::ZERO, U256::ZERO, canonical_batch());
        assert!(matches!(fx.swap(zero), Err(SwapError::MalformedRequest(_))));

        let same = SwapRequest::new(WETH, WETH, one_weth(), U256::ZERO, canonical_batch());
        assert!(matches!(fx.swap(same), Err(SwapError::MalformedRequest(_))));

        assert_eq!(fx.world.logs().len(), logs);
    }

    #[test]
    fn test_batch_size_limit_from_config() {
        let config = ExecutorConfig { max_calls_per_batch: 1, ..ExecutorConfig::default() };
        let mut fx = Fixture::with_config(config);
        assert_eq!(fx.executor.config().max_calls_per_batch, 1);
        let err = fx.swap(weth_to_usdc(U256::ZERO, canonical_batch())).unwrap_err();
        assert!(matches!(err, SwapError::MalformedRequest(msg) if msg.contains("limit is 1")));
    }

    #[test]
    fn test_unspent_input_is_refunded() {
        let mut fx = Fixture::new();
        let half = one_weth() / U256::from(2);
        let weth_before = fx.balance(WETH, USER);

        let calls = vec![approval_call(WETH, ROUTER, half), router_swap(half)];
        let result = fx.swap(weth_to_usdc(usdc(1_000), calls)).unwrap();

        assert_eq!(result.refunded_in, half);
        assert_eq!(result.amount_in, half);
        assert_eq!(result.amount_out, usdc(1_250));
        assert_eq!(fx.balance(WETH, USER), weth_before - half);
        assert_eq!(fx.balance(WETH, EXECUTOR), U256::ZERO);
    }

    #[test]
    fn test_refund_can_be_disabled() {
        let config = ExecutorConfig { refund_unspent_input: false, ..ExecutorConfig::default() };
        let mut fx = Fixture::with_config(config);
        let half = one_weth() / U256::from(2);

        let calls = vec![approval_call(WETH, ROUTER, half), router_swap(half)];
        let result = fx.swap(weth_to_usdc(U256::ZERO, calls)).unwrap();

        assert_eq!(result.refunded_in, U256::ZERO);
        assert_eq!(result.amount_in, one_weth());
        assert_eq!(fx.balance(WETH, EXECUTOR), half);
    }

    #[test]
    fn test_batch_cannot_spend_more_of_initiators_source() {
        let mut fx = Fixture::new();
        fx.approve_executor(U256::from(2) * one_weth());
        let weth_before = fx.balance(WETH, USER);

        let steal = IERC20::transferFromCall { from: USER, to: THIEF, amount: one_weth() }.abi_encode();
        let mut calls = canonical_batch();
        calls.push(CallSpec::required(WETH, steal));

        let err = fx.swap(weth_to_usdc(U256::ZERO, calls)).unwrap_err();
        assert!(matches!(err, SwapError::SourceOverdraw { actual, .. } if actual == U256::from(2) * one_weth()));
        assert_eq!(fx.balance(WETH, USER), weth_before);
        assert_eq!(fx.balance(WETH, THIEF), U256::ZERO);
    }

    /// Tries to start a second swap from inside the batch and records how the executor answered
    struct ReentrantCaller {
        observed: Mutex<Option<CallResult>>,
    }

    impl Contract for ReentrantCaller {
        fn call(&self, world: &mut World, ctx: CallContext) -> CallResult {
            let nested = ISwapExecutor::executeSwapCall {
                srcToken: WETH,
                destToken: USDC,
                srcAmount: one_weth(),
                minDestAmount: U256::ZERO,
                calls: canonical_batch().into_iter().map(Into::into).collect(),
            };
            let result = world.call(ctx.address, EXECUTOR, nested.abi_encode().into());
            if let Ok(mut observed) = self.observed.lock() {
                *observed = Some(result);
            }
            Ok(Bytes::new())
        }
    }

    #[test]
    fn test_nested_swap_is_rejected() {
        let mut fx = Fixture::new();
        let attacker = Arc::new(ReentrantCaller { observed: Mutex::new(None) });
        let attacker_address = Address::repeat_byte(0xa7);
        fx.world.deploy(attacker_address, attacker.clone());

        let mut calls = canonical_batch();
        calls.push(CallSpec::required(attacker_address, Bytes::new()));
        let result = fx.swap(weth_to_usdc(usdc(1_000), calls)).unwrap();
        assert_eq!(result.amount_out, usdc(2_500));

        let observed = attacker.observed.lock().unwrap().clone();
        assert_eq!(observed, Some(Err(Revert::reason("reentrant swap rejected"))));

        // the guard is released once the outer swap returns
        fx.approve_executor(one_weth());
        assert!(fx.swap(weth_to_usdc(usdc(1_000), canonical_batch())).is_ok());
    }

    #[test]
    fn test_execute_swap_through_calldata() {
        let mut fx = Fixture::new();
        let call = ISwapExecutor::executeSwapCall {
            srcToken: WETH,
            destToken: USDC,
            srcAmount: one_weth(),
            minDestAmount: usdc(1_000),
            calls: canonical_batch().into_iter().map(Into::into).collect(),
        };

        let output = fx.world.call(USER, EXECUTOR, call.abi_encode().into()).unwrap();
        assert_eq!(U256::from_be_slice(&output), usdc(2_500));
        assert_eq!(fx.world.events::<ISwapExecutor::SwapExecuted>(EXECUTOR).len(), 1);

        // a failing swap surfaces as a revert carrying the error
        let call = ISwapExecutor::executeSwapCall {
            srcToken: WETH,
            destToken: USDC,
            srcAmount: one_weth(),
            minDestAmount: usdc(1_000),
            calls: vec![],
        };
        let err = fx.world.call(USER, EXECUTOR, call.abi_encode().into()).unwrap_err();
        assert_eq!(err, Revert::reason("malformed swap request: call batch is empty"));
    }

    #[test]
    fn test_encode_approval_through_calldata() {
        let mut fx = Fixture::new();
        let call = ISwapExecutor::encodeApprovalCall { token: WETH, spender: ROUTER, amount: one_weth() };

        let output = fx.world.call(USER, EXECUTOR, call.abi_encode().into()).unwrap();
        let payload = Bytes::abi_decode(&output).unwrap();
        assert_eq!(payload, encode_approval(WETH, ROUTER, one_weth()));
    }
}
