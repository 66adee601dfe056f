use super::models::{PriceRoute, QuoteRequest, SwapTransaction, TransactionRequest};
use crate::abi::IMockRouter;
use crate::state::MockRouter;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use eyre::eyre;

/// Source of quotes and router calldata, typically an off-chain aggregator
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn get_quote(&self, request: &QuoteRequest) -> eyre::Result<PriceRoute>;

    async fn get_swap_transaction(&self, request: &TransactionRequest) -> eyre::Result<SwapTransaction>;
}

/// Provider quoting a single [`MockRouter`] deployment. The router is its own transfer proxy.
#[derive(Clone, Debug)]
pub struct FixedRateProvider {
    pub router_address: Address,
    pub router: MockRouter,
    pub chain_id: u64,
}

impl FixedRateProvider {
    pub fn new(router_address: Address, router: MockRouter, chain_id: u64) -> Self {
        Self { router_address, router, chain_id }
    }
}

#[async_trait]
impl RouteProvider for FixedRateProvider {
    async fn get_quote(&self, request: &QuoteRequest) -> eyre::Result<PriceRoute> {
        if request.network != self.chain_id {
            return Err(eyre!("unsupported network {}", request.network));
        }
        Ok(PriceRoute {
            src_token: request.src_token,
            dest_token: request.dest_token,
            src_decimals: request.src_decimals,
            dest_decimals: request.dest_decimals,
            src_amount: request.amount,
            dest_amount: self.router.quote(request.amount),
            contract_address: self.router_address,
            token_transfer_proxy: self.router_address,
            network: self.chain_id,
        })
    }

    async fn get_swap_transaction(&self, request: &TransactionRequest) -> eyre::Result<SwapTransaction> {
        if request.src_amount.is_zero() {
            return Err(eyre!("zero source amount"));
        }
        let swap = IMockRouter::swapCall {
            srcToken: request.src_token,
            destToken: request.dest_token,
            amountIn: request.src_amount,
            recipient: request.user_address,
        };
        Ok(SwapTransaction {
            from: request.user_address,
            to: self.router_address,
            value: U256::ZERO,
            data: MockRouter::encode_swap(swap).into(),
            chain_id: self.chain_id,
        })
    }
}
