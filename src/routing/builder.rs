use super::models::{PriceRoute, QuoteRequest, SwapSide, SwapTransaction, TransactionRequest};
use super::provider::RouteProvider;
use crate::errors::SwapError;
use crate::execution::{CallSpec, SwapRequest, approval_call};
use crate::utils::{RoutingConfig, Token};
use alloy_primitives::{Address, U256};
use eyre::eyre;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const BPS_DENOMINATOR: u64 = 10_000;

/// Lowest acceptable output for `quoted` with `slippage_bps` tolerance, rounded down
pub fn min_destination_amount(quoted: U256, slippage_bps: u16) -> U256 {
    let keep = BPS_DENOMINATOR.saturating_sub(u64::from(slippage_bps));
    quoted.saturating_mul(U256::from(keep)) / U256::from(BPS_DENOMINATOR)
}

/// Canonical two-call batch for an aggregator route: approve the transfer proxy on the source asset,
/// then hand the calldata to the router.
pub fn build_swap_request(
    route: &PriceRoute,
    transaction: &SwapTransaction,
    min_destination_amount: U256,
) -> Result<SwapRequest, SwapError> {
    if !transaction.value.is_zero() {
        return Err(SwapError::MalformedRequest("route requires native value".to_string()));
    }
    if transaction.data.is_empty() {
        return Err(SwapError::MalformedRequest("route calldata is empty".to_string()));
    }

    let calls = vec![
        approval_call(route.src_token, route.token_transfer_proxy, route.src_amount),
        CallSpec::required(transaction.to, transaction.data.clone()),
    ];
    let request = SwapRequest::new(route.src_token, route.dest_token, route.src_amount, min_destination_amount, calls);
    request.validate(usize::MAX)?;
    Ok(request)
}

/// Turns a (source, destination, amount) intent into an executable [`SwapRequest`] using a route provider
pub struct SwapPlanner<P> {
    provider: P,
    config: RoutingConfig,
}

impl<P: RouteProvider> SwapPlanner<P> {
    pub fn new(provider: P, config: RoutingConfig) -> Self {
        Self { provider, config }
    }

    /// Quote `amount` of `source` for `destination` and build the batch. Routes are requested for
    /// `executor`, which receives the router output before forwarding it.
    pub async fn plan_swap(
        &self,
        source: &Token,
        destination: &Token,
        amount: U256,
        executor: Address,
    ) -> eyre::Result<SwapRequest> {
        if source.is_native() || destination.is_native() {
            return Err(eyre!("native assets are not supported, use {}", Token::weth().get_symbol()));
        }

        let quote_request = QuoteRequest {
            src_token: source.get_address(),
            dest_token: destination.get_address(),
            src_decimals: source.get_decimals(),
            dest_decimals: destination.get_decimals(),
            amount,
            side: SwapSide::Sell,
            network: self.config.chain_id,
            user_address: executor,
        };
        let route = self.provider.get_quote(&quote_request).await?;
        debug!(
            src = %source.get_symbol(),
            dest = %destination.get_symbol(),
            quoted = destination.to_float(route.dest_amount),
            "Route quoted"
        );

        let deadline = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() + self.config.deadline_secs;
        let transaction_request = TransactionRequest {
            price_route: route.clone(),
            src_token: route.src_token,
            dest_token: route.dest_token,
            src_amount: route.src_amount,
            dest_amount: route.dest_amount,
            user_address: executor,
            deadline,
            ignore_checks: true,
        };
        let transaction = self.provider.get_swap_transaction(&transaction_request).await?;
        if transaction.chain_id != self.config.chain_id {
            return Err(eyre!("transaction built for chain {}, expected {}", transaction.chain_id, self.config.chain_id));
        }

        let min_out = min_destination_amount(route.dest_amount, self.config.slippage_bps);
        let request = build_swap_request(&route, &transaction, min_out)?;
        info!(
            src = %source.get_symbol(),
            dest = %destination.get_symbol(),
            amount = source.to_float(amount),
            min_out = destination.to_float(min_out),
            router = %transaction.to,
            "Swap planned"
        );
        Ok(request)
    }
}
