//! Transaction-level entry points into the world.
use std::rc::Rc;

use alloy_primitives::{keccak256, Address, Log, U256};
use tracing::debug;

use crate::{
    context::{self, Frame},
    world::World,
    CallResult, Context, Program,
};

/// An in-memory chain processing one operation at a time.
///
/// Externally owned accounts need no registration: any [`Address`] can send
/// transactions, and each transaction consumes one of its nonces.
#[derive(Default)]
pub struct Host {
    pub(crate) world: World,
}

impl Host {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic externally owned account derived from `label`.
    #[must_use]
    pub fn eoa(label: &str) -> Address {
        Address::from_word(keccak256(label.as_bytes()))
    }

    /// Current nonce of `account`.
    #[must_use]
    pub fn nonce(&self, account: Address) -> u64 {
        self.world.nonce(account)
    }

    /// Whether `account` holds code.
    #[must_use]
    pub fn has_code(&self, account: Address) -> bool {
        self.world.has_code(account)
    }

    /// Reads `slot` from the storage of `account`.
    #[must_use]
    pub fn storage(&self, account: Address, slot: U256) -> U256 {
        self.world.sload(account, slot)
    }

    /// Sends a deployment transaction from `from`.
    ///
    /// The new address is derived from `from` and the nonce the transaction
    /// consumes.
    ///
    /// # Errors
    ///
    /// Revert data of the constructor, or of the host on address collision.
    pub fn deploy<P: Program>(
        &mut self,
        from: Address,
        program: P,
    ) -> Result<Address, Vec<u8>> {
        let code: Rc<dyn Program> = Rc::new(program);
        context::create(&mut self.world, from, Some(code), 0)
    }

    /// Sends a transaction from `from` calling `to` with `calldata`.
    ///
    /// The sender's nonce is consumed even when the call reverts.
    ///
    /// # Errors
    ///
    /// Revert data of the call.
    pub fn transact(
        &mut self,
        from: Address,
        to: Address,
        calldata: &[u8],
    ) -> CallResult {
        let nonce = self.world.consume_nonce(from)?;
        debug!(%from, %to, nonce, "transaction");
        context::execute(&mut self.world, Frame::top(from, to, false), calldata)
    }

    /// Executes a call without persisting any of its effects, like
    /// `eth_call`.
    ///
    /// # Errors
    ///
    /// Revert data of the call.
    pub fn call(
        &self,
        from: Address,
        to: Address,
        calldata: &[u8],
    ) -> CallResult {
        let mut world = self.world.clone();
        context::execute(&mut world, Frame::top(from, to, false), calldata)
    }

    /// Runs `f` inside a static frame of `at` called by `from`, on a copy of
    /// the world.
    ///
    /// Lets tests exercise a contract's Rust-side API against live state.
    pub fn inspect<R>(
        &self,
        from: Address,
        at: Address,
        f: impl FnOnce(&mut Context<'_>) -> R,
    ) -> R {
        let mut world = self.world.clone();
        f(&mut Context::new(&mut world, Frame::top(from, at, true)))
    }

    /// All logs emitted by committed transactions, oldest first.
    #[must_use]
    pub fn logs(&self) -> &[Log] {
        &self.world.logs
    }
}
