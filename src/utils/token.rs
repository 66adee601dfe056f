use crate::utils::constants::{NATIVE, WETH};
use alloy_primitives::utils::Unit;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Asset metadata needed to express amounts in whole units
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    decimals: u8,
    name: Option<String>,
    symbol: Option<String>,
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.get_address()
    }
}

impl Eq for Token {}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.get_address())
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Token {
    pub fn new(address: Address) -> Token {
        Token { address, decimals: 18, name: None, symbol: None }
    }

    pub fn new_with_data(address: Address, symbol: Option<String>, name: Option<String>, decimals: Option<u8>) -> Token {
        Token { address, symbol, name, decimals: decimals.unwrap_or(18) }
    }

    pub fn weth() -> Token {
        Token::new_with_data(WETH, Some("WETH".to_string()), Some("Wrapped Ether".to_string()), Some(18))
    }

    pub fn get_symbol(&self) -> String {
        self.symbol.clone().unwrap_or(self.address.to_string())
    }

    pub fn get_name(&self) -> String {
        self.name.clone().unwrap_or(self.address.to_string())
    }

    pub fn get_decimals(&self) -> u8 {
        self.decimals
    }

    pub fn get_exp(&self) -> U256 {
        if self.decimals == 18 { Unit::ETHER.wei() } else { U256::from(10).pow(U256::from(self.decimals)) }
    }

    pub fn get_address(&self) -> Address {
        self.address
    }

    /// Amount in whole units. Values that do not fit in `u64` whole units come back as 0.
    pub fn to_float(&self, value: U256) -> f64 {
        let (div, rem) = value.div_rem(self.get_exp());
        match (u64::try_from(div), u128::try_from(rem)) {
            (Ok(div), Ok(rem)) => div as f64 + rem as f64 / 10f64.powi(self.decimals as i32),
            _ => 0f64,
        }
    }

    /// Inverse of `to_float`, truncating below the smallest unit
    pub fn from_float(&self, value: f64) -> U256 {
        if !value.is_finite() || value <= 0.0 {
            return U256::ZERO;
        }
        let whole = value.trunc();
        let fraction = ((value - whole) * 10f64.powi(self.decimals as i32)) as u128;
        U256::from(whole as u128) * self.get_exp() + U256::from(fraction)
    }

    pub fn is_wrapped(&self) -> bool {
        self.address == WETH
    }

    pub fn is_native(&self) -> bool {
        self.address == NATIVE || self.address.is_zero()
    }
}
