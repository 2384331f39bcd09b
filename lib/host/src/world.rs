//! Accounts, storage and logs shared by every frame of a [`crate::Host`].
use std::{collections::HashMap, rc::Rc};

use alloy_primitives::{Address, Log, U256};

use crate::{Error, Program};

/// Nonce of a freshly created contract account ([EIP-161]).
///
/// [EIP-161]: https://eips.ethereum.org/EIPS/eip-161
pub const CONTRACT_NONCE_BASE: u64 = 1;

/// Deepest call stack a transaction may build.
pub const MAX_CALL_DEPTH: usize = 1024;

/// State of a single account.
#[derive(Clone, Default)]
pub(crate) struct Account {
    pub(crate) nonce: u64,
    pub(crate) code: Option<Rc<dyn Program>>,
    pub(crate) storage: HashMap<U256, U256>,
}

impl Account {
    /// An address is in use once it has a nonce or code.
    fn is_occupied(&self) -> bool {
        self.nonce > 0 || self.code.is_some()
    }
}

/// Whole-chain state. Cloned to checkpoint a frame, restored on revert.
#[derive(Clone, Default)]
pub(crate) struct World {
    accounts: HashMap<Address, Account>,
    pub(crate) logs: Vec<Log>,
}

impl World {
    pub(crate) fn nonce(&self, account: Address) -> u64 {
        self.accounts.get(&account).map_or(0, |a| a.nonce)
    }

    pub(crate) fn code(&self, account: Address) -> Option<Rc<dyn Program>> {
        self.accounts.get(&account).and_then(|a| a.code.clone())
    }

    pub(crate) fn has_code(&self, account: Address) -> bool {
        self.accounts.get(&account).is_some_and(|a| a.code.is_some())
    }

    pub(crate) fn is_occupied(&self, account: Address) -> bool {
        self.accounts.get(&account).is_some_and(Account::is_occupied)
    }

    pub(crate) fn sload(&self, account: Address, slot: U256) -> U256 {
        self.accounts
            .get(&account)
            .and_then(|a| a.storage.get(&slot).copied())
            .unwrap_or_default()
    }

    pub(crate) fn sstore(&mut self, account: Address, slot: U256, value: U256) {
        let storage = &mut self.account_mut(account).storage;
        if value.is_zero() {
            storage.remove(&slot);
        } else {
            storage.insert(slot, value);
        }
    }

    /// Returns the current nonce of `account` and advances it by one.
    pub(crate) fn consume_nonce(
        &mut self,
        account: Address,
    ) -> Result<u64, Error> {
        let state = self.account_mut(account);
        let nonce = state.nonce;
        state.nonce =
            nonce.checked_add(1).ok_or(Error::NonceOverflow(account))?;
        Ok(nonce)
    }

    pub(crate) fn account_mut(&mut self, account: Address) -> &mut Account {
        self.accounts.entry(account).or_default()
    }
}
