use alloy_primitives::{Address, address};

pub const ARBITRUM_CHAIN_ID: u64 = 42161;

pub const WETH: Address = address!("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1");

pub const USDC: Address = address!("0xaf88d065e77c8cC2239327C5EDb3A432268e5831");

/// Placeholder the aggregator uses for the chain's native coin
pub const NATIVE: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

#[non_exhaustive]
pub struct ArbitrumAggregatorAddress;

impl ArbitrumAggregatorAddress {
    // Router that receives the swap calldata
    pub const AUGUSTUS_SWAPPER: Address = address!("def171fe48cf0115b1d80b88dc8eab59176fee57");

    // Spender that must be approved for the source asset
    pub const TOKEN_TRANSFER_PROXY: Address = address!("216B4B4Ba9F3e719726886d34a177484278Bfcae");
}
