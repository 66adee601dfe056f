use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapSide {
    Sell,
    Buy,
}

/// Price request sent to the aggregator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub src_token: Address,
    pub dest_token: Address,
    pub src_decimals: u8,
    pub dest_decimals: u8,
    pub amount: U256,
    pub side: SwapSide,
    pub network: u64,
    /// Account the route is built for. For executor swaps this is the executor, not the initiator.
    pub user_address: Address,
}

/// Quoted route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRoute {
    pub src_token: Address,
    pub dest_token: Address,
    pub src_decimals: u8,
    pub dest_decimals: u8,
    pub src_amount: U256,
    pub dest_amount: U256,
    /// Router the swap calldata is sent to
    pub contract_address: Address,
    /// Spender that pulls the source asset
    pub token_transfer_proxy: Address,
    #[serde(default)]
    pub network: u64,
}

/// Request for calldata executing a quoted route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub price_route: PriceRoute,
    pub src_token: Address,
    pub dest_token: Address,
    pub src_amount: U256,
    pub dest_amount: U256,
    pub user_address: Address,
    /// Unix timestamp after which the route must not execute
    pub deadline: u64,
    pub ignore_checks: bool,
}

/// Ready-to-send router call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransaction {
    pub from: Address,
    pub to: Address,
    #[serde(default)]
    pub value: U256,
    pub data: Bytes,
    pub chain_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_price_route_from_aggregator_json() {
        let json = r#"{
            "srcToken": "0x82af49447d8a07e3bd95bd0d56f35241523fbab1",
            "destToken": "0xaf88d065e77c8cc2239327c5edb3a432268e5831",
            "srcDecimals": 18,
            "destDecimals": 6,
            "srcAmount": "1000000000000000000",
            "destAmount": "2500000000",
            "contractAddress": "0xdef171fe48cf0115b1d80b88dc8eab59176fee57",
            "tokenTransferProxy": "0x216b4b4ba9f3e719726886d34a177484278bfcae",
            "network": 42161
        }"#;

        let route: PriceRoute = serde_json::from_str(json).unwrap();
        assert_eq!(route.src_decimals, 18);
        assert_eq!(route.dest_amount, U256::from(2_500_000_000u64));
        assert_eq!(route.token_transfer_proxy, crate::utils::ArbitrumAggregatorAddress::TOKEN_TRANSFER_PROXY);
    }

    #[test]
    fn test_swap_side_names() {
        assert_eq!(SwapSide::Sell.to_string(), "SELL");
        assert_eq!(SwapSide::from_str("BUY").unwrap(), SwapSide::Buy);
        assert_eq!(serde_json::to_string(&SwapSide::Sell).unwrap(), "\"SELL\"");
    }
}
