use super::ledger::BalanceLedger;
use super::world::{CallContext, CallResult, Contract, World};
use crate::abi::IERC20::{self, IERC20Calls};
use crate::errors::Revert;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolInterface, SolValue};

/// ERC-20 token whose balances and allowances are kept in the world, keyed by the token's address.
///
/// Follows the OpenZeppelin behaviour: an allowance of `U256::MAX` is never decreased.
#[derive(Clone, Copy, Debug, Default)]
pub struct Erc20Token;

impl Contract for Erc20Token {
    fn call(&self, world: &mut World, ctx: CallContext) -> CallResult {
        let asset = ctx.address;
        let call = IERC20Calls::abi_decode(&ctx.input).map_err(|_| Revert::UnknownSelector(asset))?;

        match call {
            IERC20Calls::balanceOf(call) => Ok(world.balance_of(asset, call.account).abi_encode().into()),
            IERC20Calls::allowance(call) => Ok(world.allowance(asset, call.owner, call.spender).abi_encode().into()),
            IERC20Calls::approve(call) => {
                world.set_allowance(asset, ctx.caller, call.spender, call.amount);
                world.emit_event(asset, &IERC20::Approval { owner: ctx.caller, spender: call.spender, value: call.amount });
                Ok(true.abi_encode().into())
            }
            IERC20Calls::transfer(call) => {
                move_balance(world, asset, ctx.caller, call.to, call.amount)?;
                Ok(true.abi_encode().into())
            }
            IERC20Calls::transferFrom(call) => {
                spend_allowance(world, asset, call.from, ctx.caller, call.amount)?;
                move_balance(world, asset, call.from, call.to, call.amount)?;
                Ok(true.abi_encode().into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "erc20"
    }
}

fn spend_allowance(world: &mut World, asset: Address, owner: Address, spender: Address, amount: U256) -> Result<(), Revert> {
    let allowance = world.allowance(asset, owner, spender);
    if allowance == U256::MAX {
        return Ok(());
    }
    let remaining = allowance.checked_sub(amount).ok_or_else(|| Revert::reason("ERC20: insufficient allowance"))?;
    world.set_allowance(asset, owner, spender, remaining);
    Ok(())
}

fn move_balance(world: &mut World, asset: Address, from: Address, to: Address, amount: U256) -> Result<(), Revert> {
    let from_balance = world.balance_of(asset, from);
    let from_remaining =
        from_balance.checked_sub(amount).ok_or_else(|| Revert::reason("ERC20: transfer amount exceeds balance"))?;
    world.set_balance(asset, from, from_remaining);

    // read after the debit so a self-transfer nets out
    let to_balance = world.balance_of(asset, to);
    let to_total = to_balance.checked_add(amount).ok_or_else(|| Revert::reason("ERC20: balance overflow"))?;
    world.set_balance(asset, to, to_total);

    world.emit_event(asset, &IERC20::Transfer { from, to, value: amount });
    Ok(())
}
