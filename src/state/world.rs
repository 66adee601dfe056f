use super::erc20::Erc20Token;
use super::ledger::BalanceLedger;
use crate::errors::Revert;
use crate::utils::ExecutorConfig;
use ahash::HashMap;
use alloy_primitives::{Address, Bytes, Log, U256};
use alloy_sol_types::SolEvent;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, trace};

pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;

/// Execution context handed to a contract for one call
#[derive(Clone, Debug)]
pub struct CallContext {
    /// `msg.sender` of the call
    pub caller: Address,
    /// Address the contract is deployed at
    pub address: Address,
    pub input: Bytes,
}

pub type CallResult = Result<Bytes, Revert>;

/// Opaque callable code living at an address.
///
/// A contract receives the world mutably and may call back into it, including into the contract that
/// called it. Everything it changes is rolled back by the world if it returns `Err`.
pub trait Contract: Send + Sync {
    fn call(&self, world: &mut World, ctx: CallContext) -> CallResult;

    fn name(&self) -> &'static str {
        "contract"
    }
}

pub type ContractWrapper = Arc<dyn Contract>;

/// Position in the world's journal. Reverting to it undoes every balance, allowance and log change made
/// after it was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    journal_len: usize,
    log_len: usize,
}

#[derive(Clone, Debug)]
enum JournalEntry {
    Balance { asset: Address, holder: Address, previous: U256 },
    Allowance { asset: Address, owner: Address, spender: Address, previous: U256 },
}

/// In-memory chain state: token balances and allowances, deployed contracts and emitted logs
pub struct World {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    contracts: HashMap<Address, ContractWrapper>,
    logs: Vec<Log>,
    journal: Vec<JournalEntry>,
    depth: usize,
    max_call_depth: usize,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for World {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("balances", &self.balances.len())
            .field("contracts", &self.contracts.len())
            .field("logs", &self.logs.len())
            .field("journal", &self.journal.len())
            .field("depth", &self.depth)
            .finish()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_max_call_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        Self {
            balances: HashMap::default(),
            allowances: HashMap::default(),
            contracts: HashMap::default(),
            logs: Vec::new(),
            journal: Vec::new(),
            depth: 0,
            max_call_depth,
        }
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::with_max_call_depth(config.max_call_depth)
    }

    pub fn deploy(&mut self, address: Address, contract: ContractWrapper) {
        debug!(%address, name = contract.name(), "Deploying contract");
        self.contracts.insert(address, contract);
    }

    /// Deploy a standard ERC-20 whose ledger lives in this world
    pub fn deploy_token(&mut self, asset: Address) {
        self.deploy(asset, Arc::new(Erc20Token));
    }

    pub fn allowance(&self, asset: Address, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(asset, owner, spender)).copied().unwrap_or_default()
    }

    pub fn set_balance(&mut self, asset: Address, holder: Address, amount: U256) {
        let previous = self.balances.insert((asset, holder), amount).unwrap_or_default();
        self.journal.push(JournalEntry::Balance { asset, holder, previous });
    }

    pub fn set_allowance(&mut self, asset: Address, owner: Address, spender: Address, amount: U256) {
        let previous = self.allowances.insert((asset, owner, spender), amount).unwrap_or_default();
        self.journal.push(JournalEntry::Allowance { asset, owner, spender, previous });
    }

    /// Credit `amount` of `asset` to `holder` out of thin air. Setup helper for fixtures.
    pub fn mint(&mut self, asset: Address, holder: Address, amount: U256) {
        let balance = self.balance_of(asset, holder).saturating_add(amount);
        self.set_balance(asset, holder, balance);
    }

    pub fn emit_event<E: SolEvent>(&mut self, address: Address, event: &E) {
        self.logs.push(Log { address, data: event.encode_log_data() });
    }

    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Logs emitted by `address` that decode as `E`
    pub fn events<E: SolEvent>(&self, address: Address) -> Vec<E> {
        self.logs
            .iter()
            .filter(|log| log.address == address)
            .filter_map(|log| E::decode_log_data(&log.data).ok())
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint { journal_len: self.journal.len(), log_len: self.logs.len() }
    }

    pub fn revert_to(&mut self, checkpoint: Checkpoint) {
        trace!(entries = self.journal.len().saturating_sub(checkpoint.journal_len), "Reverting journal");
        while self.journal.len() > checkpoint.journal_len {
            match self.journal.pop() {
                Some(JournalEntry::Balance { asset, holder, previous }) => {
                    self.balances.insert((asset, holder), previous);
                }
                Some(JournalEntry::Allowance { asset, owner, spender, previous }) => {
                    self.allowances.insert((asset, owner, spender), previous);
                }
                None => break,
            }
        }
        self.logs.truncate(checkpoint.log_len);
    }

    /// Keep the changes made since `checkpoint`. They stay journaled so an enclosing checkpoint can still
    /// undo them.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.journal_len <= self.journal.len());
    }

    /// Make every change so far permanent. Checkpoints taken before this point become invalid.
    pub fn finalize(&mut self) {
        self.journal.clear();
    }

    /// Run `input` against the contract at `target` with `caller` as `msg.sender`.
    ///
    /// The call is isolated in its own checkpoint: on `Err` none of its effects survive.
    pub fn call(&mut self, caller: Address, target: Address, input: Bytes) -> CallResult {
        if self.depth >= self.max_call_depth {
            return Err(Revert::DepthLimit(self.max_call_depth));
        }
        let Some(contract) = self.contracts.get(&target).cloned() else {
            return Err(Revert::NoContract(target));
        };

        let checkpoint = self.checkpoint();
        self.depth += 1;
        let result = contract.call(self, CallContext { caller, address: target, input });
        self.depth -= 1;

        match &result {
            Ok(_) => self.commit(checkpoint),
            Err(reason) => {
                trace!(%caller, %target, %reason, "Call reverted");
                self.revert_to(checkpoint);
            }
        }
        result
    }
}

impl BalanceLedger for World {
    fn balance_of(&self, asset: Address, holder: Address) -> U256 {
        self.balances.get(&(asset, holder)).copied().unwrap_or_default()
    }
}
